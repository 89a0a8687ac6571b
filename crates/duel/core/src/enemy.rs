//! Procedural opponent generation.
//!
//! The factory derives an enemy from the player it will face: stats scale
//! with difficulty off the player's own numbers (with floors so low-level
//! players still meet a credible threat), the element is keyed off the
//! difficulty, and per-turn input sequences are drawn through [`CombatRng`]
//! with an element-flavored axis bias. Given the same seed, the same enemy
//! plays the same fight.

use crate::config::CombatConfig;
use crate::rng::CombatRng;
use crate::state::{Axis, Combatant, CombatantId, Direction, Element};

/// Builds enemies and generates their turn sequences.
#[derive(Clone, Debug, Default)]
pub struct EnemyFactory {
    config: CombatConfig,
}

impl EnemyFactory {
    pub fn new(config: CombatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    // ===== construction =====

    /// Creates an enemy scaled against `player` at `difficulty`.
    ///
    /// Max hp and base damage start from the player's values, shift by the
    /// configured flat deltas, grow per difficulty level, and clamp at the
    /// configured floors. The element walks [`Element::all`] keyed by
    /// difficulty, so consecutive levels rotate through the affinities.
    pub fn create_for(
        &self,
        player: &Combatant,
        difficulty: u32,
        rng: &mut dyn CombatRng,
    ) -> Combatant {
        let max_hp = Self::scaled(
            player.max_hp(),
            self.config.enemy_hp_delta,
            self.config.enemy_hp_per_difficulty,
            difficulty,
            self.config.enemy_hp_floor,
        );
        let base_damage = Self::scaled(
            player.base_damage(),
            self.config.enemy_damage_delta,
            self.config.enemy_damage_per_difficulty,
            difficulty,
            self.config.enemy_damage_floor,
        );
        let element = Element::from_index(difficulty as usize);
        let name = format!("Enemy Lv{}", difficulty.saturating_add(1));
        Combatant::new(Self::next_id(rng), name, Some(element), max_hp, base_damage)
            .with_sprite(Self::sprite_for(element))
    }

    /// Creates an enemy with explicit stats (level-authored opponents).
    pub fn create_custom(
        &self,
        name: impl Into<String>,
        element: Option<Element>,
        max_hp: u32,
        base_damage: u32,
        sprite_path: Option<String>,
        rng: &mut dyn CombatRng,
    ) -> Combatant {
        let sprite = sprite_path.or_else(|| element.map(Self::sprite_for));
        let combatant = Combatant::new(Self::next_id(rng), name, element, max_hp, base_damage);
        match sprite {
            Some(path) => combatant.with_sprite(path),
            None => combatant,
        }
    }

    /// `base + delta + per_difficulty * difficulty`, clamped at `floor`.
    fn scaled(base: u32, delta: i32, per_difficulty: u32, difficulty: u32, floor: u32) -> u32 {
        let value = i64::from(base)
            + i64::from(delta)
            + i64::from(per_difficulty) * i64::from(difficulty);
        value.max(i64::from(floor)) as u32
    }

    fn next_id(rng: &mut dyn CombatRng) -> CombatantId {
        CombatantId::new(format!("enemy-{:08x}", rng.next_u32()))
    }

    fn sprite_for(element: Element) -> String {
        format!("sprites/enemies/{element}.png")
    }

    // ===== sequence generation =====

    /// Generates the enemy's input sequence for one turn.
    ///
    /// Draws [`CombatConfig::MAX_SEQUENCE_LEN`] directions with the enemy's
    /// element biasing the axis pick, re-rolling consecutive duplicates up
    /// to [`CombatConfig::SEQUENCE_RETRY_LIMIT`] times before accepting one,
    /// then rolls the configured chance to shorten the result by one input.
    /// The output is already in sanitized shape under a non-adversarial RNG.
    pub fn generate_sequence(&self, enemy: &Combatant, rng: &mut dyn CombatRng) -> Vec<Direction> {
        let bias = Self::horizontal_bias_percent(enemy.element());
        let mut sequence = Vec::with_capacity(CombatConfig::MAX_SEQUENCE_LEN);
        let mut last: Option<Direction> = None;
        for _ in 0..CombatConfig::MAX_SEQUENCE_LEN {
            let mut direction = Self::biased_direction(bias, rng);
            let mut attempts = 0;
            while Some(direction) == last && attempts < CombatConfig::SEQUENCE_RETRY_LIMIT {
                direction = Self::biased_direction(bias, rng);
                attempts += 1;
            }
            sequence.push(direction);
            last = Some(direction);
        }
        if rng.percent(self.config.shorten_chance_percent) {
            sequence.pop();
        }
        sequence
    }

    /// Chance (percent) that one drawn direction lies on the horizontal
    /// axis. Lightning leans hard into its stun axis, water slightly away
    /// from it, fire slightly toward it; ice and neutral are unbiased.
    pub fn horizontal_bias_percent(element: Option<Element>) -> u32 {
        match element {
            Some(Element::Lightning) => 75,
            Some(Element::Water) => 45,
            Some(Element::Fire) => 55,
            Some(Element::Ice) | None => 50,
        }
    }

    /// One axis roll, then a uniform pick within the axis.
    fn biased_direction(horizontal_percent: u32, rng: &mut dyn CombatRng) -> Direction {
        let axis = if rng.percent(horizontal_percent) {
            Axis::Horizontal
        } else {
            Axis::Vertical
        };
        Direction::along(axis)[rng.pick(2)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{PcgRng, ScriptedRng};

    fn player() -> Combatant {
        Combatant::new(CombatantId::from("p1"), "Hero", Some(Element::Fire), 120, 12)
    }

    #[test]
    fn scaling_follows_the_configured_deltas() {
        let factory = EnemyFactory::new(CombatConfig::default());
        let mut rng = PcgRng::new(1);
        let enemy = factory.create_for(&player(), 2, &mut rng);
        // 120 - 10 + 2 * 20 and 12 - 2 + 2 * 3.
        assert_eq!(enemy.max_hp(), 150);
        assert_eq!(enemy.base_damage(), 16);
        assert_eq!(enemy.hp(), enemy.max_hp());
    }

    #[test]
    fn scaling_clamps_at_the_floors() {
        let factory = EnemyFactory::new(CombatConfig::default());
        let weakling = Combatant::new(CombatantId::from("w"), "Weak", None, 10, 1);
        let mut rng = PcgRng::new(2);
        let enemy = factory.create_for(&weakling, 0, &mut rng);
        assert_eq!(enemy.max_hp(), CombatConfig::DEFAULT_ENEMY_HP_FLOOR);
        assert_eq!(enemy.base_damage(), CombatConfig::DEFAULT_ENEMY_DAMAGE_FLOOR);
    }

    #[test]
    fn element_rotates_with_difficulty() {
        let factory = EnemyFactory::new(CombatConfig::default());
        let mut rng = PcgRng::new(3);
        let hero = player();
        for (difficulty, expected) in [
            (0, Element::Fire),
            (1, Element::Water),
            (2, Element::Lightning),
            (3, Element::Ice),
            (4, Element::Fire),
        ] {
            let enemy = factory.create_for(&hero, difficulty, &mut rng);
            assert_eq!(enemy.element(), Some(expected));
        }
    }

    #[test]
    fn created_enemies_get_distinct_ids_and_element_sprites() {
        let factory = EnemyFactory::new(CombatConfig::default());
        let mut rng = PcgRng::new(4);
        let hero = player();
        let a = factory.create_for(&hero, 1, &mut rng);
        let b = factory.create_for(&hero, 1, &mut rng);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.sprite_path(), Some("sprites/enemies/water.png"));
    }

    #[test]
    fn custom_enemies_keep_their_authored_stats() {
        let factory = EnemyFactory::new(CombatConfig::default());
        let mut rng = PcgRng::new(5);
        let boss = factory.create_custom(
            "Warden",
            Some(Element::Ice),
            300,
            18,
            Some("sprites/bosses/warden.png".to_owned()),
            &mut rng,
        );
        assert_eq!(boss.name(), "Warden");
        assert_eq!(boss.max_hp(), 300);
        assert_eq!(boss.base_damage(), 18);
        assert_eq!(boss.sprite_path(), Some("sprites/bosses/warden.png"));
    }

    #[test]
    fn sequences_avoid_consecutive_duplicates() {
        let factory = EnemyFactory::new(CombatConfig::default());
        let hero = player();
        for seed in 0..200 {
            let mut rng = PcgRng::new(seed);
            let enemy = factory.create_for(&hero, 2, &mut rng);
            let sequence = factory.generate_sequence(&enemy, &mut rng);
            assert!(sequence.len() >= CombatConfig::MAX_SEQUENCE_LEN - 1);
            for pair in sequence.windows(2) {
                assert_ne!(pair[0], pair[1], "seed {seed} produced {sequence:?}");
            }
        }
    }

    #[test]
    fn shorten_roll_drops_exactly_one_direction() {
        let factory = EnemyFactory::new(CombatConfig::default());
        let mut id_rng = PcgRng::new(6);
        let enemy = factory.create_custom("Drone", None, 50, 5, None, &mut id_rng);
        // Axis rolls alternate horizontal/vertical (49 < 50, 99 >= 50), the
        // axis picks alternate sides, and the final 0 lands the 8% shorten.
        let mut rng = ScriptedRng::new([49, 0, 99, 0, 49, 1, 99, 1, 0]);
        let sequence = factory.generate_sequence(&enemy, &mut rng);
        assert_eq!(
            sequence,
            vec![Direction::Left, Direction::Up, Direction::Right]
        );
    }

    #[test]
    fn duplicate_is_accepted_after_the_retry_budget() {
        let factory = EnemyFactory::new(CombatConfig::default());
        let mut id_rng = PcgRng::new(7);
        let enemy = factory.create_custom("Drone", None, 50, 5, None, &mut id_rng);
        // Every draw resolves to Left (axis roll passes, pick lands on 0),
        // and the shorten roll at the very end also reads 0, which passes.
        let mut rng = ScriptedRng::new(std::iter::repeat_n(0, 200));
        let sequence = factory.generate_sequence(&enemy, &mut rng);
        assert_eq!(sequence.len(), CombatConfig::MAX_SEQUENCE_LEN - 1);
        assert!(sequence.iter().all(|&d| d == Direction::Left));
    }

    #[test]
    fn lightning_enemies_favor_the_horizontal_axis() {
        let factory = EnemyFactory::new(CombatConfig::default());
        let mut rng = PcgRng::new(8);
        let enemy = factory.create_custom(
            "Storm",
            Some(Element::Lightning),
            80,
            9,
            None,
            &mut rng,
        );
        let mut horizontal = 0usize;
        let mut total = 0usize;
        for _ in 0..500 {
            for direction in factory.generate_sequence(&enemy, &mut rng) {
                if direction.is_horizontal() {
                    horizontal += 1;
                }
                total += 1;
            }
        }
        // 75% axis bias; the duplicate re-rolls pull the ratio toward the
        // middle but nowhere near even.
        let ratio = horizontal as f64 / total as f64;
        assert!(ratio > 0.60, "horizontal ratio {ratio}");
    }
}
