//! Asynchronous abstraction for sourcing the player's direction sequence.
//!
//! Runtime users plug in [`SequenceProvider`] implementations so encounters
//! can run with human input, scripted fixtures, or AI policies.
use async_trait::async_trait;

use duel_core::{Combatant, Direction};

use super::errors::Result;

/// Trait for providing a direction sequence for the player's next turn.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - Scripted/replayed sequences
/// - Testing fixtures
#[async_trait]
pub trait SequenceProvider: Send + Sync {
    /// Provide the sequence the player swipes this turn.
    ///
    /// # Arguments
    /// * `player` - The player combatant, for reads like hp or cooldowns
    ///
    /// # Returns
    /// The directions to submit, or an error if input cannot be determined
    async fn provide_sequence(&self, player: &Combatant) -> Result<Vec<Direction>>;
}

/// A simple provider that always passes the turn with an empty sequence.
/// Useful for testing or as a fallback.
pub struct PassSequenceProvider;

#[async_trait]
impl SequenceProvider for PassSequenceProvider {
    async fn provide_sequence(&self, _player: &Combatant) -> Result<Vec<Direction>> {
        Ok(Vec::new())
    }
}
