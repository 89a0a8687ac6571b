//! Built-in combo catalog.
//!
//! The four elemental signature moves every build ships with, plus the two
//! neutral utility moves. Data files can replace or extend this list; the
//! constants here are the baseline the rest of the balance is tuned around.

use duel_core::{Combo, ComboEffect, Direction, Element, StatusKind};

use Direction::{Down, Left, Right, Up};

/// The default combo list, one signature move per element plus two neutral
/// utility moves. Names are unique; the registry validates on construction.
pub fn default_combos() -> Vec<Combo> {
    vec![
        Combo {
            name: "Lightning".to_owned(),
            description: "Concentrated lightning strike".to_owned(),
            pattern: vec![Right, Right, Right],
            element: Some(Element::Lightning),
            cooldown: 0,
            cost: 0,
            priority: 10,
            effects: vec![ComboEffect::Damage { amount: 20 }],
        },
        Combo {
            name: "FireBall".to_owned(),
            description: "Fireball that leaves the target burning".to_owned(),
            pattern: vec![Right, Up, Right],
            element: Some(Element::Fire),
            cooldown: 0,
            cost: 0,
            priority: 10,
            effects: vec![
                ComboEffect::Damage { amount: 15 },
                ComboEffect::ApplyStatus {
                    kind: StatusKind::Burn,
                    turns: 3,
                    power: 5,
                },
            ],
        },
        Combo {
            name: "Blizzard".to_owned(),
            description: "Ice storm that freezes the target solid".to_owned(),
            pattern: vec![Left, Down, Left],
            element: Some(Element::Ice),
            cooldown: 0,
            cost: 0,
            priority: 10,
            effects: vec![
                ComboEffect::Damage { amount: 10 },
                ComboEffect::ApplyStatus {
                    kind: StatusKind::Freeze,
                    turns: 2,
                    power: 0,
                },
            ],
        },
        Combo {
            name: "Flood".to_owned(),
            description: "Flood wave that slows the target down".to_owned(),
            pattern: vec![Down, Down, Down],
            element: Some(Element::Water),
            cooldown: 0,
            cost: 0,
            priority: 10,
            effects: vec![
                ComboEffect::Damage { amount: 10 },
                ComboEffect::ApplyStatus {
                    kind: StatusKind::Slow,
                    turns: 3,
                    power: 0,
                },
            ],
        },
        Combo {
            name: "Bulwark".to_owned(),
            description: "Raise a guard, then ram it into the foe".to_owned(),
            pattern: vec![Down, Left, Down],
            element: None,
            cooldown: 3,
            cost: 0,
            priority: 5,
            effects: vec![
                ComboEffect::GrantShield { amount: 12 },
                ComboEffect::ScaledDamage { percent: 50, bonus: 0 },
            ],
        },
        Combo {
            name: "SecondWind".to_owned(),
            description: "Catch your breath and recover".to_owned(),
            pattern: vec![Up, Down, Up],
            element: None,
            cooldown: 4,
            cost: 0,
            priority: 5,
            effects: vec![ComboEffect::Heal { amount: 15 }],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_core::{ComboRegistry, Element};

    #[test]
    fn catalog_passes_registry_validation() {
        let registry = ComboRegistry::with_combos(default_combos()).unwrap();
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn every_element_has_a_signature_move() {
        let combos = default_combos();
        for element in Element::all() {
            assert!(
                combos.iter().any(|c| c.element == Some(element)),
                "missing signature move for {element}"
            );
        }
    }

    #[test]
    fn every_effect_kind_is_exercised() {
        let combos = default_combos();
        let has = |f: &dyn Fn(&ComboEffect) -> bool| {
            combos.iter().flat_map(|c| &c.effects).any(|e| f(e))
        };
        assert!(has(&|e| matches!(e, ComboEffect::Damage { .. })));
        assert!(has(&|e| matches!(e, ComboEffect::ScaledDamage { .. })));
        assert!(has(&|e| matches!(e, ComboEffect::ApplyStatus { .. })));
        assert!(has(&|e| matches!(e, ComboEffect::GrantShield { .. })));
        assert!(has(&|e| matches!(e, ComboEffect::Heal { .. })));
    }

    #[test]
    fn signature_move_constants_hold() {
        let combos = default_combos();
        let lightning = combos.iter().find(|c| c.name == "Lightning").unwrap();
        assert_eq!(lightning.pattern, vec![Right, Right, Right]);
        assert_eq!(lightning.effects, vec![ComboEffect::Damage { amount: 20 }]);
        assert_eq!(lightning.priority, 10);
        assert_eq!(lightning.cooldown, 0);
    }
}
