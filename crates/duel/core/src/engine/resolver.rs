//! Simultaneous turn resolution.
//!
//! Both sides commit a sanitized sequence up front; nothing about the order
//! of play is hidden state. Resolution then walks a fixed pipeline and every
//! mutation lands on the combatants as it happens.
//!
//! # Resolution order
//!
//! 1. **Step loop** over `0..max(len)`: each side's slot (if present) deals
//!    modifier-adjusted base damage. The player's hit lands first, but the
//!    enemy's hit in the same step still lands even if the player's killed
//!    them, so a double KO is possible. On-hit procs roll only while both
//!    sides are still standing. The loop stops the moment someone is dead,
//!    and is skipped entirely when someone enters the turn dead.
//! 2. **Combo phase**, regardless of how the loop ended: each side's full
//!    submitted sequence is matched against the registry (exact first, best
//!    otherwise) and an activation applies only when the combo is off
//!    cooldown for its source and the target is alive.
//! 3. **Tick phase**: status effects for both sides, then cooldowns for
//!    both sides. Status damage can still turn the outcome.
//! 4. **Outcome** from post-tick liveness; a double KO reports a draw.

use crate::combo::{ComboActivation, ComboRegistry};
use crate::rng::CombatRng;
use crate::state::{Combatant, Direction};

use super::modifier::DamageModifiers;
use super::on_hit::OnHitRules;
use super::report::{StatusReport, StepReport, TurnOutcome, TurnReport};

/// Resolves one committed turn between two combatants.
#[derive(Clone, Debug, Default)]
pub struct TurnResolver {
    modifiers: DamageModifiers,
    on_hit: OnHitRules,
}

impl TurnResolver {
    pub fn new(modifiers: DamageModifiers, on_hit: OnHitRules) -> Self {
        Self { modifiers, on_hit }
    }

    pub fn modifiers(&self) -> &DamageModifiers {
        &self.modifiers
    }

    pub fn on_hit_rules(&self) -> &OnHitRules {
        &self.on_hit
    }

    /// Resolves one turn; both sequences must already be sanitized.
    pub fn resolve(
        &self,
        registry: &ComboRegistry,
        player: &Combatant,
        player_seq: &[Direction],
        enemy: &Combatant,
        enemy_seq: &[Direction],
        rng: &mut dyn CombatRng,
    ) -> TurnReport {
        let mut steps = Vec::new();

        if player.is_alive() && enemy.is_alive() {
            let total = player_seq.len().max(enemy_seq.len());
            for index in 0..total {
                let player_input = player_seq.get(index).copied();
                let enemy_input = enemy_seq.get(index).copied();

                let player_hit = player_input
                    .map(|d| self.modifiers.apply(player.base_damage(), player.element(), d))
                    .unwrap_or(0);
                let enemy_hit = enemy_input
                    .map(|d| self.modifiers.apply(enemy.base_damage(), enemy.element(), d))
                    .unwrap_or(0);

                // Player lands first; the enemy's blow in the same step still
                // lands on a double KO.
                let player_damage = enemy.take_damage(player_hit);
                let enemy_damage = player.take_damage(enemy_hit);

                let mut player_procs = Vec::new();
                let mut enemy_procs = Vec::new();
                if player.is_alive() && enemy.is_alive() {
                    if let Some(direction) = player_input {
                        player_procs = self.on_hit.apply(player, enemy, direction, rng);
                    }
                    if let Some(direction) = enemy_input {
                        enemy_procs = self.on_hit.apply(enemy, player, direction, rng);
                    }
                }

                steps.push(StepReport {
                    index,
                    player_input,
                    enemy_input,
                    player_damage,
                    enemy_damage,
                    player_procs,
                    enemy_procs,
                });

                if !player.is_alive() || !enemy.is_alive() {
                    break;
                }
            }
        }

        let player_combo = Self::apply_combo(registry, player, player_seq, enemy);
        let enemy_combo = Self::apply_combo(registry, enemy, enemy_seq, player);

        let player_statuses = Self::tick_statuses(player);
        let enemy_statuses = Self::tick_statuses(enemy);
        player.tick_cooldowns();
        enemy.tick_cooldowns();

        TurnReport {
            steps,
            player_combo,
            enemy_combo,
            player_statuses,
            enemy_statuses,
            outcome: TurnOutcome::from_liveness(player.is_alive(), enemy.is_alive()),
        }
    }

    /// Matches `sequence` for `source` and applies the combo to a living
    /// target.
    ///
    /// The best-match fallback can return a combo that is still on cooldown
    /// for the source; such a match never applies, so a cooldown of N really
    /// holds the combo back for N turns.
    fn apply_combo(
        registry: &ComboRegistry,
        source: &Combatant,
        sequence: &[Direction],
        target: &Combatant,
    ) -> Option<ComboActivation> {
        let combo = registry.match_exact_or_best(sequence, Some(source))?;
        if !combo.is_available(Some(source)) || !target.is_alive() {
            return None;
        }
        Some(combo.apply(source, target))
    }

    fn tick_statuses(combatant: &Combatant) -> Vec<StatusReport> {
        combatant
            .tick_status_effects()
            .into_iter()
            .map(|(kind, outcome)| StatusReport { kind, outcome })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combo::{Combo, ComboEffect};
    use crate::config::CombatConfig;
    use crate::rng::ScriptedRng;
    use crate::state::{CombatantId, Element, StatusKind, TickOutcome};
    use Direction::{Down, Left, Right, Up};

    fn fighter(name: &str, element: Option<Element>, max_hp: u32, base_damage: u32) -> Combatant {
        Combatant::new(CombatantId::from(name), name, element, max_hp, base_damage)
    }

    fn lightning_combo() -> Combo {
        Combo {
            name: "lightning".to_owned(),
            description: "three quick strikes".to_owned(),
            pattern: vec![Right, Right, Right],
            element: Some(Element::Lightning),
            cooldown: 0,
            cost: 0,
            priority: 10,
            effects: vec![ComboEffect::Damage { amount: 20 }],
        }
    }

    fn plain_resolver() -> TurnResolver {
        TurnResolver::new(DamageModifiers::identity(), OnHitRules::none())
    }

    #[test]
    fn identity_steps_plus_combo_hit_the_expected_total() {
        let registry = ComboRegistry::with_combos(vec![lightning_combo()]).unwrap();
        let resolver = plain_resolver();
        let player = fighter("hero", Some(Element::Fire), 120, 12);
        let enemy = fighter("foe", Some(Element::Ice), 100, 10);
        let mut rng = ScriptedRng::new([]);

        let report = resolver.resolve(
            &registry,
            &player,
            &[Right, Right, Right],
            &enemy,
            &[],
            &mut rng,
        );

        // 3 steps of 12, then the any-tier lightning combo for 20.
        assert_eq!(enemy.hp(), 100 - 3 * 12 - 20);
        assert_eq!(report.steps.len(), 3);
        assert!(report.steps.iter().all(|s| s.player_damage == 12));
        assert_eq!(report.player_combo.as_ref().unwrap().combo, "lightning");
        assert!(report.enemy_combo.is_none());
        assert_eq!(report.outcome, TurnOutcome::Ongoing);
        // The player never got hit back.
        assert_eq!(player.hp(), 120);
    }

    #[test]
    fn both_sequences_land_step_by_step() {
        let registry = ComboRegistry::new();
        let resolver = plain_resolver();
        let player = fighter("hero", None, 100, 7);
        let enemy = fighter("foe", None, 100, 9);
        let mut rng = ScriptedRng::new([]);

        let report = resolver.resolve(
            &registry,
            &player,
            &[Up, Left],
            &enemy,
            &[Down, Right, Left],
            &mut rng,
        );

        assert_eq!(report.steps.len(), 3);
        // The player's sequence ran out at step 3.
        assert_eq!(report.steps[2].player_input, None);
        assert_eq!(report.steps[2].player_damage, 0);
        assert_eq!(enemy.hp(), 100 - 2 * 7);
        assert_eq!(player.hp(), 100 - 3 * 9);
    }

    #[test]
    fn step_loop_halts_the_moment_someone_dies() {
        let registry = ComboRegistry::new();
        let resolver = plain_resolver();
        let player = fighter("hero", None, 100, 10);
        let enemy = fighter("foe", None, 5, 3);
        let mut rng = ScriptedRng::new([]);

        let report = resolver.resolve(
            &registry,
            &player,
            &[Up, Down, Up],
            &enemy,
            &[Up, Down, Up],
            &mut rng,
        );

        assert_eq!(report.steps.len(), 1);
        assert!(!enemy.is_alive());
        // The enemy's first-step blow still landed.
        assert_eq!(player.hp(), 97);
        assert_eq!(report.outcome, TurnOutcome::EnemyDefeated);
    }

    #[test]
    fn simultaneous_kill_reports_a_draw() {
        let registry = ComboRegistry::new();
        let resolver = plain_resolver();
        let player = fighter("hero", None, 8, 10);
        let enemy = fighter("foe", None, 6, 10);
        let mut rng = ScriptedRng::new([]);

        let report = resolver.resolve(&registry, &player, &[Up], &enemy, &[Down], &mut rng);

        assert_eq!(report.outcome, TurnOutcome::Draw);
        assert!(!player.is_alive());
        assert!(!enemy.is_alive());
    }

    #[test]
    fn dead_entrant_skips_steps_but_the_turn_still_ticks() {
        let registry = ComboRegistry::new();
        let resolver = plain_resolver();
        let player = fighter("hero", None, 100, 10);
        let enemy = fighter("foe", None, 50, 10);
        enemy.take_damage(50);
        player.apply_status(crate::state::StatusEffect::new(StatusKind::Burn, 1, 4));
        player.set_combo_cooldown("spent", 1);
        let mut rng = ScriptedRng::new([]);

        let report = resolver.resolve(&registry, &player, &[Up, Down], &enemy, &[Up], &mut rng);

        assert!(report.steps.is_empty());
        assert_eq!(
            report.player_statuses,
            vec![StatusReport {
                kind: StatusKind::Burn,
                outcome: TickOutcome::Damage(4)
            }]
        );
        assert_eq!(player.hp(), 96);
        assert!(player.combo_ready("spent"));
        assert_eq!(report.outcome, TurnOutcome::EnemyDefeated);
    }

    #[test]
    fn empty_sequences_pass_the_turn_but_still_tick() {
        let registry = ComboRegistry::with_combos(vec![lightning_combo()]).unwrap();
        let resolver = plain_resolver();
        let player = fighter("hero", None, 100, 10);
        let enemy = fighter("foe", None, 100, 10);
        enemy.apply_status(crate::state::StatusEffect::new(StatusKind::Regen, 2, 3));
        enemy.take_damage(10);
        let mut rng = ScriptedRng::new([]);

        let report = resolver.resolve(&registry, &player, &[], &enemy, &[], &mut rng);

        assert!(report.steps.is_empty());
        assert!(report.player_combo.is_none());
        assert!(report.enemy_combo.is_none());
        assert_eq!(enemy.hp(), 93);
        assert_eq!(report.outcome, TurnOutcome::Ongoing);
    }

    #[test]
    fn stun_proc_fires_through_the_full_pipeline() {
        let registry = ComboRegistry::new();
        let config = CombatConfig::new();
        let resolver = TurnResolver::new(DamageModifiers::identity(), OnHitRules::standard(&config));
        let player = fighter("hero", Some(Element::Lightning), 100, 5);
        let enemy = fighter("foe", None, 100, 5);
        // One roll for the single horizontal step: 7 < 20 lands the stun.
        let mut rng = ScriptedRng::new([7]);

        let report = resolver.resolve(&registry, &player, &[Left], &enemy, &[], &mut rng);

        assert_eq!(
            report.steps[0].player_procs,
            vec![crate::engine::ProcEvent::Stunned { turns: 1 }]
        );
        assert!(enemy.is_stunned());
        // The end-of-turn tick consumed the stun's only turn.
        assert!(!enemy.has_status(StatusKind::Stun));
    }

    #[test]
    fn water_heal_proc_restores_the_attacker() {
        let registry = ComboRegistry::new();
        let config = CombatConfig::new();
        let resolver = TurnResolver::new(DamageModifiers::identity(), OnHitRules::standard(&config));
        let player = fighter("hero", Some(Element::Water), 120, 5);
        player.take_damage(30);
        let enemy = fighter("foe", None, 100, 5);
        let mut rng = ScriptedRng::new([]);

        resolver.resolve(&registry, &player, &[Up], &enemy, &[], &mut rng);

        // 5% of 120 = 6 back.
        assert_eq!(player.hp(), 96);
    }

    #[test]
    fn combo_on_cooldown_does_not_apply() {
        let mut combo = lightning_combo();
        combo.cooldown = 2;
        let registry = ComboRegistry::with_combos(vec![combo]).unwrap();
        let resolver = plain_resolver();
        let player = fighter("hero", None, 200, 1);
        let enemy = fighter("foe", None, 200, 1);
        player.set_combo_cooldown("lightning", 2);
        let mut rng = ScriptedRng::new([]);

        let report = resolver.resolve(
            &registry,
            &player,
            &[Right, Right, Right],
            &enemy,
            &[],
            &mut rng,
        );

        // The best-match fallback still resolves the pattern, but a spent
        // combo never applies.
        assert!(report.player_combo.is_none());
        assert_eq!(enemy.hp(), 200 - 3);
    }

    #[test]
    fn combo_cooldown_holds_across_turns() {
        let mut combo = lightning_combo();
        combo.cooldown = 3;
        let registry = ComboRegistry::with_combos(vec![combo]).unwrap();
        let resolver = plain_resolver();
        let player = fighter("hero", None, 500, 1);
        let enemy = fighter("foe", None, 500, 1);
        let mut rng = ScriptedRng::new([]);

        let first = resolver.resolve(
            &registry,
            &player,
            &[Right, Right, Right],
            &enemy,
            &[],
            &mut rng,
        );
        assert_eq!(first.player_combo.as_ref().unwrap().combo, "lightning");
        // 3 cooldown turns were recorded, the end-of-turn tick took one.
        assert_eq!(player.combo_cooldown("lightning"), 2);
        assert_eq!(enemy.hp(), 500 - 3 - 20);

        let second = resolver.resolve(
            &registry,
            &player,
            &[Right, Right, Right],
            &enemy,
            &[],
            &mut rng,
        );
        assert!(second.player_combo.is_none());
        assert_eq!(player.combo_cooldown("lightning"), 1);
        assert_eq!(enemy.hp(), 500 - 6 - 20);

        let third = resolver.resolve(
            &registry,
            &player,
            &[Right, Right, Right],
            &enemy,
            &[],
            &mut rng,
        );
        assert!(third.player_combo.is_none());

        // The cooldown drained; the combo fires again.
        let fourth = resolver.resolve(
            &registry,
            &player,
            &[Right, Right, Right],
            &enemy,
            &[],
            &mut rng,
        );
        assert_eq!(fourth.player_combo.as_ref().unwrap().combo, "lightning");
        assert_eq!(enemy.hp(), 500 - 12 - 40);
    }

    #[test]
    fn combos_skip_a_dead_target() {
        let registry = ComboRegistry::with_combos(vec![lightning_combo()]).unwrap();
        let resolver = plain_resolver();
        let player = fighter("hero", None, 100, 40);
        let enemy = fighter("foe", None, 50, 1);
        let mut rng = ScriptedRng::new([]);

        let report = resolver.resolve(
            &registry,
            &player,
            &[Right, Right, Right],
            &enemy,
            &[],
            &mut rng,
        );

        // Two steps killed the enemy; the combo matched but had no living
        // target.
        assert_eq!(report.steps.len(), 2);
        assert!(report.player_combo.is_none());
        assert_eq!(report.outcome, TurnOutcome::EnemyDefeated);
    }
}
