//! Combo catalog loader.

use std::path::Path;

use duel_core::{Combo, ComboRegistry};

use crate::loaders::{LoadResult, read_file};

/// Loader for combo catalogs from RON files.
///
/// RON format: `Vec<Combo>`, for example:
///
/// ```ron
/// [
///     (
///         name: "Jab",
///         description: "A quick poke",
///         pattern: [left, right],
///         element: Some(fire),
///         cooldown: 1,
///         cost: 0,
///         priority: 2,
///         effects: [damage(amount: 4)],
///     ),
/// ]
/// ```
pub struct ComboLoader;

impl ComboLoader {
    /// Load a combo catalog from a RON file into a validated registry.
    pub fn load(path: &Path) -> LoadResult<ComboRegistry> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse RON text into a validated registry.
    pub fn parse(content: &str) -> LoadResult<ComboRegistry> {
        let combos: Vec<Combo> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse combo catalog RON: {}", e))?;
        ComboRegistry::with_combos(combos)
            .map_err(|e| anyhow::anyhow!("Invalid combo catalog: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_core::{ComboEffect, Direction, Element, StatusKind};

    const CATALOG: &str = r#"[
        (
            name: "Jab",
            description: "A quick poke",
            pattern: [left, right],
            element: Some(fire),
            cooldown: 1,
            cost: 0,
            priority: 2,
            effects: [damage(amount: 4)],
        ),
        (
            name: "Chill",
            description: "",
            pattern: [down, up],
            element: None,
            cooldown: 0,
            cost: 0,
            priority: 1,
            effects: [apply_status(kind: freeze, turns: 2, power: 0)],
        ),
    ]"#;

    #[test]
    fn parses_a_catalog_into_a_registry() {
        let registry = ComboLoader::parse(CATALOG).unwrap();
        assert_eq!(registry.len(), 2);
        let jab = registry.get("Jab").unwrap();
        assert_eq!(jab.pattern, vec![Direction::Left, Direction::Right]);
        assert_eq!(jab.element, Some(Element::Fire));
        assert_eq!(jab.effects, vec![ComboEffect::Damage { amount: 4 }]);
        let chill = registry.get("Chill").unwrap();
        assert_eq!(
            chill.effects,
            vec![ComboEffect::ApplyStatus {
                kind: StatusKind::Freeze,
                turns: 2,
                power: 0,
            }]
        );
    }

    #[test]
    fn duplicate_names_fail_validation() {
        let dup = r#"[
            (name: "X", description: "", pattern: [up], element: None,
             cooldown: 0, cost: 0, priority: 0, effects: []),
            (name: "X", description: "", pattern: [down], element: None,
             cooldown: 0, cost: 0, priority: 0, effects: []),
        ]"#;
        let err = ComboLoader::parse(dup).unwrap_err();
        assert!(err.to_string().contains("duplicate combo name"));
    }

    #[test]
    fn empty_patterns_fail_validation() {
        let empty = r#"[
            (name: "Hollow", description: "", pattern: [], element: None,
             cooldown: 0, cost: 0, priority: 0, effects: []),
        ]"#;
        let err = ComboLoader::parse(empty).unwrap_err();
        assert!(err.to_string().contains("empty pattern"));
    }

    #[test]
    fn malformed_ron_reports_a_parse_error() {
        let err = ComboLoader::parse("not ron at all [").unwrap_err();
        assert!(err.to_string().contains("parse combo catalog"));
    }
}
