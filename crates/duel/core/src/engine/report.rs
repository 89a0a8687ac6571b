//! Turn resolution reports.
//!
//! Resolution mutates the combatants in place; the report is the record of
//! what happened, shaped for event payloads and UI playback.

use crate::combo::ComboActivation;
use crate::state::{Direction, StatusKind, TickOutcome};

/// On-hit proc that actually fired during a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProcEvent {
    /// The defender was stunned for `turns`.
    Stunned { turns: u32 },
    /// The attacker recovered `amount` hp.
    Healed { amount: u32 },
}

/// One resolved step of simultaneous inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepReport {
    pub index: usize,
    /// The player's input for this slot; `None` once their sequence ran out.
    pub player_input: Option<Direction>,
    pub enemy_input: Option<Direction>,
    /// Hp the enemy actually lost to the player this step.
    pub player_damage: u32,
    /// Hp the player actually lost to the enemy this step.
    pub enemy_damage: u32,
    /// Procs fired by the player's hit.
    pub player_procs: Vec<ProcEvent>,
    /// Procs fired by the enemy's hit.
    pub enemy_procs: Vec<ProcEvent>,
}

/// One status outcome from the tick phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusReport {
    pub kind: StatusKind,
    pub outcome: TickOutcome,
}

/// Who, if anyone, fell this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TurnOutcome {
    /// Both combatants still stand.
    Ongoing,
    /// The enemy fell.
    EnemyDefeated,
    /// The player fell.
    PlayerDefeated,
    /// Both fell in the same turn.
    Draw,
}

impl TurnOutcome {
    /// Derives the outcome from post-turn liveness.
    pub fn from_liveness(player_alive: bool, enemy_alive: bool) -> Self {
        match (player_alive, enemy_alive) {
            (true, true) => TurnOutcome::Ongoing,
            (true, false) => TurnOutcome::EnemyDefeated,
            (false, true) => TurnOutcome::PlayerDefeated,
            (false, false) => TurnOutcome::Draw,
        }
    }

    /// True when the encounter is over.
    pub fn is_terminal(self) -> bool {
        !matches!(self, TurnOutcome::Ongoing)
    }

    pub fn enemy_defeated(self) -> bool {
        matches!(self, TurnOutcome::EnemyDefeated | TurnOutcome::Draw)
    }

    pub fn player_defeated(self) -> bool {
        matches!(self, TurnOutcome::PlayerDefeated | TurnOutcome::Draw)
    }
}

/// Everything that happened in one resolved turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    /// Step-by-step exchange, in order; truncated at the first death.
    pub steps: Vec<StepReport>,
    /// The player's combo activation, if their full sequence matched.
    pub player_combo: Option<ComboActivation>,
    /// The enemy's combo activation, if their full sequence matched.
    pub enemy_combo: Option<ComboActivation>,
    /// The player's status outcomes from the tick phase.
    pub player_statuses: Vec<StatusReport>,
    /// The enemy's status outcomes from the tick phase.
    pub enemy_statuses: Vec<StatusReport>,
    pub outcome: TurnOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_tracks_liveness() {
        assert_eq!(TurnOutcome::from_liveness(true, true), TurnOutcome::Ongoing);
        assert_eq!(
            TurnOutcome::from_liveness(true, false),
            TurnOutcome::EnemyDefeated
        );
        assert_eq!(
            TurnOutcome::from_liveness(false, true),
            TurnOutcome::PlayerDefeated
        );
        assert_eq!(TurnOutcome::from_liveness(false, false), TurnOutcome::Draw);
    }

    #[test]
    fn draw_counts_both_sides_as_defeated() {
        assert!(TurnOutcome::Draw.enemy_defeated());
        assert!(TurnOutcome::Draw.player_defeated());
        assert!(TurnOutcome::Draw.is_terminal());
        assert!(!TurnOutcome::Ongoing.is_terminal());
    }
}
