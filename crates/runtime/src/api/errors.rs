//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, and sequence
//! providers so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no active encounter")]
    NoActiveEncounter,

    #[error("no player loaded")]
    NoPlayerLoaded,

    #[error("encounter is paused")]
    EncounterPaused,

    #[error("player sequence provider not set")]
    ProviderNotSet,

    #[error("encounter worker command channel closed")]
    CommandChannelClosed,

    #[error("encounter worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("encounter worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("save {id:?} not found")]
    SaveNotFound { id: String },

    #[error("saved combatant could not be restored")]
    InvalidSave(#[from] duel_core::SnapshotError),

    #[error("combo catalog failed validation")]
    InvalidCatalog(#[from] duel_core::RegistryError),

    #[error("level failed validation: {reason}")]
    InvalidLevel { reason: String },

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}
