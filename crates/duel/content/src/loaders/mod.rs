//! Content loaders for reading duel data from files.
//!
//! Loaders convert RON/TOML files into validated duel-core and content
//! types. Parsing and validation both fail eagerly with descriptive errors;
//! nothing half-loaded ever reaches the runtime.

pub mod combos;
pub mod config;
pub mod level;

pub use combos::ComboLoader;
pub use config::ConfigLoader;
pub use level::LevelLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
