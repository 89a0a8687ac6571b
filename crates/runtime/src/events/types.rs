//! Event types for different topics.

use duel_core::{CombatantSnapshot, TurnReport};
use serde::{Deserialize, Serialize};

/// Events related to turn resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TurnEvent {
    /// A full turn resolved; snapshots are taken after the turn settled
    Resolved {
        player: CombatantSnapshot,
        enemy: CombatantSnapshot,
        report: TurnReport,
    },
}

/// Events related to encounter lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EncounterEvent {
    /// A new encounter began against the named level's enemy
    Started {
        level_id: String,
        player: CombatantSnapshot,
        enemy: CombatantSnapshot,
    },

    /// The enemy dropped to zero hp this turn
    EnemyDefeated { enemy: CombatantSnapshot },

    /// The player dropped to zero hp this turn
    PlayerDefeated { player: CombatantSnapshot },

    /// The active encounter was discarded without a winner
    Reset,
}

/// Events surfaced when a command fails after validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ErrorEvent {
    Raised { message: String },
}
