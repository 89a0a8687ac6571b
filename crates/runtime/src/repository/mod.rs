//! Repository layer for dynamic runtime data
//!
//! Repositories handle data that CHANGES during gameplay: player saves.
//! Static content (combo catalogs, levels, config) is loaded through
//! `duel-content`, not through repositories.

mod error;
mod memory;
mod save;
mod traits;

pub use error::{RepositoryError, Result};
pub use memory::InMemorySaveRepo;
pub use save::SaveData;
pub use traits::SaveRepository;
