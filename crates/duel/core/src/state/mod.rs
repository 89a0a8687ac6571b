//! Combat state representation.
//!
//! This module owns the data structures that describe combatants, their
//! status effects, and directional input sequences. Runtime layers read
//! snapshots of this state but mutate it exclusively through the combatant
//! API and the turn resolver.
pub mod combatant;
pub mod common;
pub mod direction;
pub mod element;
pub mod sequence;
pub mod snapshot;
pub mod status;

pub use combatant::{Combatant, TurnFlags};
pub use common::CombatantId;
pub use direction::{Axis, Direction};
pub use element::Element;
pub use sequence::{SequenceBuilder, SequenceError, sanitize_sequence};
pub use snapshot::{CombatantSnapshot, SnapshotError, StatusSnapshot};
pub use status::{StatusApplied, StatusEffect, StatusKind, TickOutcome};
