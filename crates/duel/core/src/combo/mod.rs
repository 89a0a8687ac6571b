//! Combo definitions and matching.
//!
//! A combo is an exact directional pattern plus a list of tagged effects.
//! Catalogs are data (built-in or loaded); the registry owns matching and
//! the availability rules.
pub mod effect;
pub mod registry;

pub use effect::{ComboEffect, EffectApplied};
pub use registry::{ComboRegistry, RegistryError};

use crate::state::{Combatant, Direction, Element};

/// A directional-pattern special move.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combo {
    /// Unique name; doubles as the cooldown key.
    pub name: String,
    pub description: String,
    /// Exact direction pattern that triggers this combo.
    pub pattern: Vec<Direction>,
    /// Elemental affinity; `None` is neutral and suits any source.
    pub element: Option<Element>,
    /// Turns the combo stays unavailable after activation. 0 = every turn.
    pub cooldown: u32,
    /// Resource cost on activation. Carried in the data model for layers
    /// that meter a resource pool; the duel core itself charges nothing.
    pub cost: u32,
    /// Breaks ties between simultaneous matches; higher wins.
    pub priority: i32,
    /// Ordered effects applied on activation.
    pub effects: Vec<ComboEffect>,
}

impl Combo {
    /// Exact pattern equality against a sanitized sequence.
    pub fn matches(&self, sequence: &[Direction]) -> bool {
        !self.pattern.is_empty() && self.pattern == sequence
    }

    /// Whether `source` could activate this combo right now.
    ///
    /// An absent source can activate nothing; the registry's fallback rules
    /// decide what that means for matching.
    pub fn is_available(&self, source: Option<&Combatant>) -> bool {
        source.is_some_and(|c| c.combo_ready(&self.name))
    }

    /// Applies every effect in order and records the source's cooldown.
    ///
    /// Callers gate on a living target; individual effects already no-op
    /// against the dead, so a mid-list kill cannot corrupt the remainder.
    pub fn apply(&self, source: &Combatant, target: &Combatant) -> ComboActivation {
        let effects = self
            .effects
            .iter()
            .map(|effect| effect.apply(source, target))
            .collect();
        if self.cooldown > 0 {
            source.set_combo_cooldown(&self.name, self.cooldown);
        }
        ComboActivation {
            combo: self.name.clone(),
            effects,
        }
    }
}

/// Report of one activated combo.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComboActivation {
    /// Name of the combo that fired.
    pub combo: String,
    /// Per-effect outcomes in application order.
    pub effects: Vec<EffectApplied>,
}

/// UI projection of a combo plus availability for one combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComboView {
    pub name: String,
    pub description: String,
    pub pattern: Vec<Direction>,
    pub element: Option<Element>,
    pub cooldown: u32,
    pub priority: i32,
    /// Turns until usable again; 0 means ready.
    pub remaining_cooldown: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CombatantId;

    fn jab() -> Combo {
        Combo {
            name: "jab".to_owned(),
            description: "quick poke".to_owned(),
            pattern: vec![Direction::Left, Direction::Right],
            element: None,
            cooldown: 2,
            cost: 0,
            priority: 1,
            effects: vec![ComboEffect::Damage { amount: 4 }],
        }
    }

    #[test]
    fn matching_is_exact() {
        let combo = jab();
        assert!(combo.matches(&[Direction::Left, Direction::Right]));
        assert!(!combo.matches(&[Direction::Left]));
        assert!(!combo.matches(&[Direction::Right, Direction::Left]));
        assert!(!combo.matches(&[]));
    }

    #[test]
    fn activation_applies_effects_and_starts_the_cooldown() {
        let source = Combatant::new(CombatantId::from("a"), "A", None, 40, 5);
        let target = Combatant::new(CombatantId::from("b"), "B", None, 40, 5);
        let activation = jab().apply(&source, &target);
        assert_eq!(activation.combo, "jab");
        assert_eq!(activation.effects, vec![EffectApplied::Damage(4)]);
        assert_eq!(target.hp(), 36);
        assert_eq!(source.combo_cooldown("jab"), 2);
    }

    #[test]
    fn unavailable_without_a_source() {
        assert!(!jab().is_available(None));
    }
}
