//! Level specifications.
//!
//! A level describes one encounter: an id, a display name, the difficulty
//! that drives enemy scaling, optionally a fully-authored enemy that
//! replaces the scaled one, and the asset keys the presentation layer
//! should have on hand. The spec is pure data; building the actual enemy is
//! the runtime's job.

use duel_core::Element;

/// One encounter definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelSpec {
    /// Stable identifier, recorded in save files.
    pub id: String,
    pub name: String,
    /// Drives enemy scaling and element selection. At least 1.
    pub difficulty: u32,
    /// Authored enemy replacing the scaled one, if present.
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemy: Option<EnemyOverride>,
    /// Asset keys the presentation layer preloads for this level.
    #[cfg_attr(feature = "serde", serde(default))]
    pub image_paths: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sound_paths: Vec<String>,
}

/// Authored enemy stats for a level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyOverride {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Option<Element>,
    pub max_hp: u32,
    pub base_damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sprite_path: Option<String>,
}

impl LevelSpec {
    /// Minimal spec with no authored enemy and no assets.
    pub fn new(id: impl Into<String>, name: impl Into<String>, difficulty: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            difficulty: difficulty.max(1),
            enemy: None,
            image_paths: Vec::new(),
            sound_paths: Vec::new(),
        }
    }

    pub fn with_enemy(mut self, enemy: EnemyOverride) -> Self {
        self.enemy = Some(enemy);
        self
    }

    /// Checks the invariants loaders enforce eagerly.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("level id must not be empty".to_owned());
        }
        if self.difficulty == 0 {
            return Err(format!("level '{}': difficulty must be at least 1", self.id));
        }
        if let Some(enemy) = &self.enemy {
            if enemy.name.trim().is_empty() {
                return Err(format!("level '{}': enemy name must not be empty", self.id));
            }
            if enemy.max_hp == 0 {
                return Err(format!(
                    "level '{}': enemy max hp must be at least 1",
                    self.id
                ));
            }
        }
        Ok(())
    }
}
