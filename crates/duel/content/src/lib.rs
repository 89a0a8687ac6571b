//! Data-driven combat content and loaders.
//!
//! This crate houses static duel content and the loaders that read it from
//! data files:
//! - Built-in combo catalog (in code, no file needed)
//! - Combo catalogs (data-driven via RON)
//! - Level specs with optional authored enemies (data-driven via RON)
//! - Combat configuration (data-driven via TOML)
//!
//! Content is consumed by the runtime when assembling an encounter and never
//! appears inside the combat model itself. All loaders use duel-core types
//! directly with serde and fail eagerly with descriptive errors.

pub mod catalog;
pub mod level;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::default_combos;
pub use level::{EnemyOverride, LevelSpec};

#[cfg(feature = "loaders")]
pub use loaders::{ComboLoader, ConfigLoader, LevelLoader};
