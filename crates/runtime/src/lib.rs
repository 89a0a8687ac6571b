//! Runtime orchestration for the deterministic duel simulation.
//!
//! This crate wires together the combat model, content catalogs, save
//! repositories, and the background encounter worker into a cohesive API.
//! Consumers embed [`CombatRuntime`] to drive encounters, subscribe to
//! events, and interact with the duel through [`CombatHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus for flexible routing
//! - [`workers`] keeps background tasks internal to the crate
//! - [`repository`] and [`assets`] hold the persistence and asset seams
pub mod api;
pub mod assets;
pub mod config;
pub mod events;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{CombatHandle, PassSequenceProvider, Result, RuntimeError, SequenceProvider};
pub use assets::{AssetStore, SpriteCache};
pub use config::{ConfigError, RuntimeConfig};
pub use events::{EncounterEvent, ErrorEvent, Event, EventBus, Topic, TurnEvent};
pub use repository::{InMemorySaveRepo, RepositoryError, SaveData, SaveRepository};
pub use runtime::{CombatRuntime, RuntimeBuilder};
