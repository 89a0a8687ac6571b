//! Runtime configuration shared across the orchestrator and workers.

use std::path::Path;

use duel_core::CombatConfig;
use serde::Deserialize;
use thiserror::Error;

/// Failure while reading or validating a runtime config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} must be at least 1")]
    ZeroCapacity { field: &'static str },
}

/// Tunables for the runtime layer.
///
/// Loadable from TOML; every field is optional and falls back to the
/// default, so a config file only states what it changes:
///
/// ```toml
/// event_capacity = 64
/// rng_seed = 7
///
/// [combat]
/// stun_chance_percent = 25
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Combat tuning forwarded to the model layer.
    pub combat: CombatConfig,
    /// Capacity of each per-topic broadcast channel.
    pub event_capacity: usize,
    /// Capacity of the worker command channel.
    pub command_capacity: usize,
    /// Seed for the combat RNG; drawn from entropy when absent.
    pub rng_seed: Option<u64>,
    /// Version tag stamped into save envelopes.
    pub save_version: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            event_capacity: 100,
            command_capacity: 32,
            rng_seed: None,
            save_version: 1,
        }
    }
}

impl RuntimeConfig {
    /// Parse and validate TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Channel capacities of zero would panic deep inside tokio; reject
    /// them up front instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.event_capacity == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "event_capacity",
            });
        }
        if self.command_capacity == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "command_capacity",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_the_defaults() {
        let config = RuntimeConfig::from_toml("").unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_what_it_names() {
        let config = RuntimeConfig::from_toml(
            "event_capacity = 16\nrng_seed = 9\n\n[combat]\nstun_chance_percent = 30\n",
        )
        .unwrap();
        assert_eq!(config.event_capacity, 16);
        assert_eq!(config.command_capacity, 32);
        assert_eq!(config.rng_seed, Some(9));
        assert_eq!(config.combat.stun_chance_percent, 30);
        assert_eq!(
            config.combat.enemy_hp_floor,
            CombatConfig::DEFAULT_ENEMY_HP_FLOOR
        );
    }

    #[test]
    fn zero_capacities_are_rejected() {
        let err = RuntimeConfig::from_toml("command_capacity = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ZeroCapacity {
                field: "command_capacity"
            }
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(RuntimeConfig::from_toml("mystery = true\n").is_err());
    }
}
