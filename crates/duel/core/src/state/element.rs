//! Elemental affinities.

/// Elemental affinity carried by combatants and combos.
///
/// Affinity drives on-hit procs, combo match tiers, and enemy input bias.
/// Declaration order is part of the contract: difficulty-keyed selection
/// walks the variants in this order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Element {
    /// Aggressive, damage-over-time leaning affinity.
    Fire,
    /// Sustain affinity; vertical water hits can heal the attacker.
    Water,
    /// Fast affinity; horizontal lightning hits can stun.
    Lightning,
    /// Control affinity.
    Ice,
}

impl Element {
    /// Number of elements.
    pub const COUNT: usize = 4;

    /// All elements in declaration order.
    pub const fn all() -> [Element; Self::COUNT] {
        [Element::Fire, Element::Water, Element::Lightning, Element::Ice]
    }

    /// Deterministic element for an index, wrapping modulo [`Self::COUNT`].
    ///
    /// Used to key enemy affinity off the level difficulty.
    pub const fn from_index(index: usize) -> Element {
        match index % Self::COUNT {
            0 => Element::Fire,
            1 => Element::Water,
            2 => Element::Lightning,
            _ => Element::Ice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn from_index_wraps_modulo_count() {
        assert_eq!(Element::from_index(0), Element::Fire);
        assert_eq!(Element::from_index(2), Element::Lightning);
        assert_eq!(Element::from_index(4), Element::Fire);
        assert_eq!(Element::from_index(7), Element::Ice);
    }

    #[test]
    fn parses_snake_case_ignoring_ascii_case() {
        assert_eq!(Element::from_str("fire").unwrap(), Element::Fire);
        assert_eq!(Element::from_str("LIGHTNING").unwrap(), Element::Lightning);
        assert!(Element::from_str("plasma").is_err());
    }

    #[test]
    fn displays_snake_case() {
        assert_eq!(Element::Water.to_string(), "water");
    }
}
