//! Elemental damage modifiers.
//!
//! Step damage is `base_damage * percent / 100`, where the percent comes
//! from a pure lookup keyed by attacker element and input direction. The
//! table starts empty, which means identity: every hit deals exactly base
//! damage until a rule says otherwise.

use crate::state::{Direction, Element};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ModifierRule {
    element: Option<Element>,
    direction: Direction,
    percent: u32,
}

/// Damage modifier table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DamageModifiers {
    rules: Vec<ModifierRule>,
}

impl DamageModifiers {
    /// The identity table: every hit at 100%.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Registers a percent modifier for `element` hits along `direction`.
    /// Later rules for the same key shadow earlier ones.
    pub fn with_rule(
        mut self,
        element: Option<Element>,
        direction: Direction,
        percent: u32,
    ) -> Self {
        self.rules.insert(
            0,
            ModifierRule {
                element,
                direction,
                percent,
            },
        );
        self
    }

    /// Modifier percent for one step; 100 when no rule matches.
    pub fn percent_for(&self, element: Option<Element>, direction: Direction) -> u32 {
        self.rules
            .iter()
            .find(|r| r.element == element && r.direction == direction)
            .map(|r| r.percent)
            .unwrap_or(100)
    }

    /// Applies the table to a base damage value.
    pub fn apply(&self, base_damage: u32, element: Option<Element>, direction: Direction) -> u32 {
        base_damage.saturating_mul(self.percent_for(element, direction)) / 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_passes_base_damage_through() {
        let table = DamageModifiers::identity();
        assert_eq!(table.apply(12, Some(Element::Fire), Direction::Right), 12);
        assert_eq!(table.apply(12, None, Direction::Up), 12);
    }

    #[test]
    fn rules_scale_matching_hits_only() {
        let table =
            DamageModifiers::identity().with_rule(Some(Element::Ice), Direction::Down, 150);
        assert_eq!(table.apply(10, Some(Element::Ice), Direction::Down), 15);
        assert_eq!(table.apply(10, Some(Element::Ice), Direction::Up), 10);
        assert_eq!(table.apply(10, Some(Element::Fire), Direction::Down), 10);
    }

    #[test]
    fn later_rules_shadow_earlier_ones() {
        let table = DamageModifiers::identity()
            .with_rule(None, Direction::Left, 50)
            .with_rule(None, Direction::Left, 200);
        assert_eq!(table.apply(10, None, Direction::Left), 20);
    }
}
