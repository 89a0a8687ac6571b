//! Worker tasks that back the runtime orchestration.
//!
//! The encounter worker owns all mutable combat state; the handle and the
//! event bus are the only ways in and out.

mod encounter;

pub use encounter::{Command, EncounterWorker};
