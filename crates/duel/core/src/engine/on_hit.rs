//! Elemental on-hit procs.
//!
//! A proc rule is a declarative row: attacker element, input axis, and the
//! consequence. The resolver rolls each matching row once per landed step
//! while both combatants are alive. Rules are data so variants ship without
//! touching the resolver.

use crate::config::CombatConfig;
use crate::rng::CombatRng;
use crate::state::{Axis, Combatant, Direction, Element, StatusEffect, StatusKind};

use super::report::ProcEvent;

/// Consequence triggered when a rule's row matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnHitProc {
    /// Chance (percent) to stun the defender for `turns`.
    StunChance { percent: u32, turns: u32 },
    /// The attacker heals `percent` of their own max hp, floor `minimum`.
    HealAttacker { percent: u32, minimum: u32 },
}

/// One element/axis row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OnHitRule {
    pub element: Element,
    pub axis: Axis,
    pub proc: OnHitProc,
}

/// Ordered proc rule table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OnHitRules {
    rules: Vec<OnHitRule>,
}

impl OnHitRules {
    /// No procs at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// The stock table: horizontal lightning can stun, vertical water heals
    /// the attacker.
    pub fn standard(config: &CombatConfig) -> Self {
        Self {
            rules: vec![
                OnHitRule {
                    element: Element::Lightning,
                    axis: Axis::Horizontal,
                    proc: OnHitProc::StunChance {
                        percent: config.stun_chance_percent,
                        turns: config.stun_turns,
                    },
                },
                OnHitRule {
                    element: Element::Water,
                    axis: Axis::Vertical,
                    proc: OnHitProc::HealAttacker {
                        percent: config.heal_percent_of_max,
                        minimum: 1,
                    },
                },
            ],
        }
    }

    pub fn push(&mut self, rule: OnHitRule) {
        self.rules.push(rule);
    }

    /// Rolls and applies every rule matching one landed hit.
    ///
    /// Returns the procs that actually fired, in table order.
    pub fn apply(
        &self,
        attacker: &Combatant,
        defender: &Combatant,
        direction: Direction,
        rng: &mut dyn CombatRng,
    ) -> Vec<ProcEvent> {
        let Some(element) = attacker.element() else {
            return Vec::new();
        };
        let mut events = Vec::new();
        for rule in self
            .rules
            .iter()
            .filter(|r| r.element == element && r.axis == direction.axis())
        {
            match rule.proc {
                OnHitProc::StunChance { percent, turns } => {
                    if rng.percent(percent) {
                        defender.apply_status(StatusEffect::new(StatusKind::Stun, turns, 0));
                        events.push(ProcEvent::Stunned { turns });
                    }
                }
                OnHitProc::HealAttacker { percent, minimum } => {
                    let amount = heal_amount(attacker.max_hp(), percent, minimum);
                    let healed = attacker.heal(amount);
                    events.push(ProcEvent::Healed { amount: healed });
                }
            }
        }
        events
    }
}

/// `percent` of `max_hp`, rounded half-up, floored at `minimum`.
fn heal_amount(max_hp: u32, percent: u32, minimum: u32) -> u32 {
    ((max_hp.saturating_mul(percent) + 50) / 100).max(minimum)
}
