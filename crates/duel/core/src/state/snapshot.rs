//! Persisted combatant contract.
//!
//! The snapshot is the only shape the model promises to round-trip: plain
//! strings and integers, stable under serde, independent of in-memory
//! layout. Enum-valued fields are stored as their snake_case text so saved
//! data stays readable and diffable.
//!
//! Out of contract (documented, by decision): ability cooldowns, transient
//! turn flags, and the `persistent` marker on status effects, which resets
//! on load.

use std::collections::BTreeMap;

/// Persisted view of one combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSnapshot {
    pub id: String,
    pub name: String,
    /// Element as snake_case text; `None` for neutral combatants.
    pub element: Option<String>,
    pub hp: u32,
    pub max_hp: u32,
    pub base_damage: u32,
    pub shield: u32,
    pub sprite_path: Option<String>,
    /// Combo name to remaining cooldown turns; zero-turn entries never
    /// appear.
    pub combo_cooldowns: BTreeMap<String, u32>,
    pub status_effects: Vec<StatusSnapshot>,
}

/// Persisted view of one status effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusSnapshot {
    /// Status kind as snake_case text.
    pub kind: String,
    pub turns: u32,
    pub power: u32,
}

/// Rejection raised when a snapshot fails validation on load.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("unknown element in saved data: {value:?}")]
    UnknownElement { value: String },
    #[error("unknown status kind in saved data: {value:?}")]
    UnknownStatusKind { value: String },
    #[error("saved max hp must be at least 1")]
    ZeroMaxHp,
    #[error("saved hp {hp} exceeds max hp {max_hp}")]
    HpAboveMax { hp: u32, max_hp: u32 },
}
