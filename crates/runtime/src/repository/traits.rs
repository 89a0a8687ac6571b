//! Repository contracts for persisting and restoring saves.

use super::error::Result;
use super::save::SaveData;

/// Repository for save-game persistence
///
/// Implementations decide the medium (memory, disk, remote); the runtime
/// only depends on this contract.
pub trait SaveRepository: Send + Sync {
    /// Persist a save, replacing any existing save with the same id
    fn save(&self, data: &SaveData) -> Result<()>;

    /// Load a save by id
    fn load(&self, id: &str) -> Result<Option<SaveData>>;

    /// List all saves, newest first
    fn list(&self) -> Result<Vec<SaveData>>;

    /// Delete a save
    fn delete(&self, id: &str) -> Result<()>;

    /// Check if a save exists
    fn exists(&self, id: &str) -> bool {
        matches!(self.load(id), Ok(Some(_)))
    }
}
