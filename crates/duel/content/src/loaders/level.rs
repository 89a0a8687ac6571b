//! Level spec loader.

use std::path::Path;

use crate::level::LevelSpec;
use crate::loaders::{LoadResult, read_file};

/// Loader for level specs from RON files.
///
/// RON format: a single [`LevelSpec`], for example:
///
/// ```ron
/// (
///     id: "volcano-3",
///     name: "Magma Gallery",
///     difficulty: 3,
///     enemy: Some((
///         name: "Cinder Warden",
///         element: Some(fire),
///         max_hp: 180,
///         base_damage: 14,
///         sprite_path: Some("sprites/bosses/cinder_warden.png"),
///     )),
///     image_paths: ["backdrops/magma.png"],
/// )
/// ```
pub struct LevelLoader;

impl LevelLoader {
    /// Load a level spec from a RON file, validating eagerly.
    pub fn load(path: &Path) -> LoadResult<LevelSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse RON text into a validated level spec.
    pub fn parse(content: &str) -> LoadResult<LevelSpec> {
        let spec: LevelSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse level RON: {}", e))?;
        spec.validate().map_err(|e| anyhow::anyhow!("Invalid level: {}", e))?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_core::Element;

    #[test]
    fn parses_a_full_level_spec() {
        let spec = LevelLoader::parse(
            r#"(
                id: "volcano-3",
                name: "Magma Gallery",
                difficulty: 3,
                enemy: Some((
                    name: "Cinder Warden",
                    element: Some(fire),
                    max_hp: 180,
                    base_damage: 14,
                    sprite_path: Some("sprites/bosses/cinder_warden.png"),
                )),
                image_paths: ["backdrops/magma.png"],
            )"#,
        )
        .unwrap();
        assert_eq!(spec.id, "volcano-3");
        assert_eq!(spec.difficulty, 3);
        let enemy = spec.enemy.unwrap();
        assert_eq!(enemy.element, Some(Element::Fire));
        assert_eq!(enemy.max_hp, 180);
        assert_eq!(spec.image_paths, vec!["backdrops/magma.png".to_owned()]);
        assert!(spec.sound_paths.is_empty());
    }

    #[test]
    fn optional_fields_default() {
        let spec = LevelLoader::parse(r#"(id: "l1", name: "Intro", difficulty: 1)"#).unwrap();
        assert!(spec.enemy.is_none());
        assert!(spec.image_paths.is_empty());
    }

    #[test]
    fn zero_difficulty_is_rejected() {
        let err = LevelLoader::parse(r#"(id: "l1", name: "Intro", difficulty: 0)"#).unwrap_err();
        assert!(err.to_string().contains("difficulty"));
    }

    #[test]
    fn zero_hp_override_is_rejected() {
        let err = LevelLoader::parse(
            r#"(
                id: "l2",
                name: "Boss",
                difficulty: 2,
                enemy: Some((name: "Husk", element: None, max_hp: 0, base_damage: 3)),
            )"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("max hp"));
    }
}
