//! Combat configuration loader.

use std::path::Path;

use duel_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat tuning from TOML files.
///
/// Every field is optional; missing entries keep the built-in default, so a
/// tuning file only states what it changes.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load combat config from a TOML file.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse TOML text into a combat config.
    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_keep_defaults_elsewhere() {
        let config = ConfigLoader::parse(
            "shorten_chance_percent = 12\nstun_chance_percent = 35\n",
        )
        .unwrap();
        assert_eq!(config.shorten_chance_percent, 12);
        assert_eq!(config.stun_chance_percent, 35);
        assert_eq!(config.enemy_hp_floor, CombatConfig::DEFAULT_ENEMY_HP_FLOOR);
    }

    #[test]
    fn empty_files_yield_the_default_config() {
        assert_eq!(ConfigLoader::parse("").unwrap(), CombatConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ConfigLoader::parse("mystery_knob = 3\n").is_err());
    }
}
