//! Cloneable façade for issuing commands to the encounter worker.
//!
//! [`CombatHandle`] hides channel plumbing and offers async helpers for
//! driving encounters or streaming events from specific topics.
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};

use duel_content::LevelSpec;
use duel_core::{Combatant, CombatantSnapshot, ComboView, Direction, TurnReport};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the combat runtime
#[derive(Clone)]
pub struct CombatHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl CombatHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Start an encounter against the level's enemy, replacing any active one.
    ///
    /// Returns a snapshot of the freshly built enemy.
    pub async fn start_encounter(
        &self,
        player: Combatant,
        level: LevelSpec,
    ) -> Result<CombatantSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::StartEncounter {
                player,
                level,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Submit the player's direction sequence and resolve one full turn
    pub async fn submit_sequence(&self, directions: Vec<Direction>) -> Result<TurnReport> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::SubmitSequence {
                directions,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Pause the encounter; submissions fail until [`resume`](Self::resume)
    pub async fn pause(&self) -> Result<()> {
        self.set_paused(true).await
    }

    /// Resume a paused encounter
    pub async fn resume(&self) -> Result<()> {
        self.set_paused(false).await
    }

    async fn set_paused(&self, paused: bool) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::SetPaused {
                paused,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Current player, shared for live reads (hp bars, status icons)
    pub async fn player(&self) -> Result<Option<Arc<Combatant>>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryPlayer { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Current enemy, if an encounter is active or just ended
    pub async fn enemy(&self) -> Result<Option<Arc<Combatant>>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryEnemy { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Catalog view of every registered combo, with cooldown state for the
    /// current player when one is loaded
    pub async fn combos(&self) -> Result<Vec<ComboView>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryCombos { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Discard the active encounter and release its enemy assets
    pub async fn reset_encounter(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::ResetEncounter { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Persist the current player under a fresh save id and return it
    pub async fn save_game(&self, name: &str) -> Result<String> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::SaveGame {
                name: name.to_owned(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Restore the player from a save, discarding any active encounter.
    ///
    /// Returns the snapshot the player was restored from.
    pub async fn load_game(&self, id: &str) -> Result<CombatantSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::LoadGame {
                id: id.to_owned(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Turn` - Turn resolution reports
    /// - `Topic::Encounter` - Encounter lifecycle (started, won, lost, reset)
    /// - `Topic::Error` - Command failures surfaced to observers
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// // Only subscribe to turn events
    /// let mut turn_rx = handle.subscribe(Topic::Turn);
    /// while let Ok(event) = turn_rx.recv().await {
    ///     // Handle turn events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
