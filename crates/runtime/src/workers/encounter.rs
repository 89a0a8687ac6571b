//! Encounter worker that owns the authoritative combat state.
//!
//! Receives commands from [`CombatHandle`](crate::api::CombatHandle), builds
//! enemies and resolves turns through `duel-core`, and publishes events to
//! the EventBus. Nothing outside this task mutates the encounter.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use duel_content::LevelSpec;
use duel_core::{
    CombatConfig, CombatRng, Combatant, CombatantSnapshot, ComboRegistry, ComboView, Direction,
    EnemyFactory, PcgRng, TurnOutcome, TurnReport, TurnResolver, sanitize_sequence,
};

use crate::api::{Result, RuntimeError};
use crate::assets::AssetStore;
use crate::events::{EncounterEvent, ErrorEvent, Event, EventBus, TurnEvent};
use crate::repository::{SaveData, SaveRepository};

/// Commands that can be sent to the encounter worker
pub enum Command {
    /// Start an encounter against the level's enemy, replacing any active one.
    /// Returns a snapshot of the freshly built enemy.
    StartEncounter {
        player: Combatant,
        level: LevelSpec,
        reply: oneshot::Sender<Result<CombatantSnapshot>>,
    },
    /// Submit the player's sequence and resolve one full turn.
    SubmitSequence {
        directions: Vec<Direction>,
        reply: oneshot::Sender<Result<TurnReport>>,
    },
    /// Set the pause gate; submissions are rejected while paused.
    SetPaused {
        paused: bool,
        reply: oneshot::Sender<()>,
    },
    /// Query the current player (read-only, shared).
    QueryPlayer {
        reply: oneshot::Sender<Option<Arc<Combatant>>>,
    },
    /// Query the current enemy (read-only, shared).
    QueryEnemy {
        reply: oneshot::Sender<Option<Arc<Combatant>>>,
    },
    /// Query catalog views with the current player's cooldowns folded in.
    QueryCombos {
        reply: oneshot::Sender<Vec<ComboView>>,
    },
    /// Discard the active encounter and return to idle.
    ResetEncounter { reply: oneshot::Sender<()> },
    /// Persist the current player under a fresh save id.
    SaveGame {
        name: String,
        reply: oneshot::Sender<Result<String>>,
    },
    /// Restore the player from a save, discarding any active encounter.
    LoadGame {
        id: String,
        reply: oneshot::Sender<Result<CombatantSnapshot>>,
    },
}

/// Encounter lifecycle. `Ended` keeps the enemy around so observers can
/// still read the final state before a reset.
enum Phase {
    Idle,
    Active {
        enemy: Arc<Combatant>,
    },
    Ended {
        enemy: Arc<Combatant>,
        outcome: TurnOutcome,
    },
}

/// Background task that processes combat commands.
///
/// The worker retains the enemy sprite in the asset store for as long as the
/// enemy is alive and releases it on defeat, reset, or replacement.
pub struct EncounterWorker {
    registry: ComboRegistry,
    resolver: TurnResolver,
    factory: EnemyFactory,
    rng: PcgRng,
    assets: Arc<dyn AssetStore>,
    saves: Arc<dyn SaveRepository>,
    save_version: u32,
    player: Option<Arc<Combatant>>,
    level_id: Option<String>,
    phase: Phase,
    paused: bool,
    command_rx: mpsc::Receiver<Command>,
    events: EventBus,
}

impl EncounterWorker {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        registry: ComboRegistry,
        resolver: TurnResolver,
        factory: EnemyFactory,
        rng: PcgRng,
        assets: Arc<dyn AssetStore>,
        saves: Arc<dyn SaveRepository>,
        save_version: u32,
        command_rx: mpsc::Receiver<Command>,
        events: EventBus,
    ) -> Self {
        debug!(
            target: "runtime::worker",
            combos = registry.len(),
            "encounter worker initialized"
        );

        Self {
            registry,
            resolver,
            factory,
            rng,
            assets,
            saves,
            save_version,
            player: None,
            level_id: None,
            phase: Phase::Idle,
            paused: false,
            command_rx,
            events,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                else => break,
            }
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::StartEncounter {
                player,
                level,
                reply,
            } => {
                let result = self.handle_start(player, level);
                if reply.send(result).is_err() {
                    debug!("StartEncounter reply channel closed (caller dropped)");
                }
            }
            Command::SubmitSequence { directions, reply } => {
                let result = self.handle_submit(directions);
                if reply.send(result).is_err() {
                    debug!("SubmitSequence reply channel closed (caller dropped)");
                }
            }
            Command::SetPaused { paused, reply } => {
                self.paused = paused;
                debug!(target: "runtime::worker", paused, "pause gate set");
                if reply.send(()).is_err() {
                    debug!("SetPaused reply channel closed (caller dropped)");
                }
            }
            Command::QueryPlayer { reply } => {
                if reply.send(self.player.clone()).is_err() {
                    debug!("QueryPlayer reply channel closed (caller dropped)");
                }
            }
            Command::QueryEnemy { reply } => {
                if reply.send(self.current_enemy()).is_err() {
                    debug!("QueryEnemy reply channel closed (caller dropped)");
                }
            }
            Command::QueryCombos { reply } => {
                let views = self.registry.views_for(self.player.as_deref());
                if reply.send(views).is_err() {
                    debug!("QueryCombos reply channel closed (caller dropped)");
                }
            }
            Command::ResetEncounter { reply } => {
                self.handle_reset();
                if reply.send(()).is_err() {
                    debug!("ResetEncounter reply channel closed (caller dropped)");
                }
            }
            Command::SaveGame { name, reply } => {
                let result = self.handle_save(name);
                if reply.send(result).is_err() {
                    debug!("SaveGame reply channel closed (caller dropped)");
                }
            }
            Command::LoadGame { id, reply } => {
                let result = self.handle_load(id);
                if reply.send(result).is_err() {
                    debug!("LoadGame reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Validates the level, replaces any active encounter, and builds the
    /// enemy from the level's difficulty or its typed override.
    fn handle_start(&mut self, player: Combatant, level: LevelSpec) -> Result<CombatantSnapshot> {
        if let Err(reason) = level.validate() {
            return self.fail(RuntimeError::InvalidLevel { reason });
        }

        self.release_current_enemy();

        let enemy = match &level.enemy {
            Some(spec) => self.factory.create_custom(
                spec.name.clone(),
                spec.element,
                spec.max_hp,
                spec.base_damage,
                spec.sprite_path.clone(),
                &mut self.rng,
            ),
            None => self
                .factory
                .create_for(&player, level.difficulty, &mut self.rng),
        };
        if let Some(path) = enemy.sprite_path() {
            self.assets.retain(path);
        }

        let enemy = Arc::new(enemy);
        let player = Arc::new(player);
        let snapshot = enemy.snapshot();

        self.player = Some(Arc::clone(&player));
        self.level_id = Some(level.id.clone());
        self.phase = Phase::Active {
            enemy: Arc::clone(&enemy),
        };
        self.paused = false;

        debug!(
            target: "runtime::worker",
            level = %level.id,
            enemy = %snapshot.name,
            enemy_hp = snapshot.max_hp,
            "encounter started"
        );

        self.events.publish(Event::Encounter(EncounterEvent::Started {
            level_id: level.id,
            player: player.snapshot(),
            enemy: snapshot.clone(),
        }));

        Ok(snapshot)
    }

    /// Resolves one full turn: sanitize both sequences, run the resolver,
    /// publish the report, then settle defeat bookkeeping.
    fn handle_submit(&mut self, directions: Vec<Direction>) -> Result<TurnReport> {
        if self.paused {
            return Err(RuntimeError::EncounterPaused);
        }
        let enemy = match &self.phase {
            Phase::Active { enemy } => Arc::clone(enemy),
            _ => return self.fail(RuntimeError::NoActiveEncounter),
        };
        let player = match &self.player {
            Some(player) => Arc::clone(player),
            None => return self.fail(RuntimeError::NoPlayerLoaded),
        };

        let player_seq = sanitize_sequence(&directions, CombatConfig::MAX_SEQUENCE_LEN);
        let raw_enemy_seq = self.factory.generate_sequence(&enemy, &mut self.rng);
        let enemy_seq = sanitize_sequence(&raw_enemy_seq, CombatConfig::MAX_SEQUENCE_LEN);

        let report = self.resolver.resolve(
            &self.registry,
            &player,
            &player_seq,
            &enemy,
            &enemy_seq,
            &mut self.rng,
        );

        debug!(
            target: "runtime::worker",
            player_len = player_seq.len(),
            enemy_len = enemy_seq.len(),
            outcome = ?report.outcome,
            "turn resolved"
        );

        self.events.publish(Event::Turn(TurnEvent::Resolved {
            player: player.snapshot(),
            enemy: enemy.snapshot(),
            report: report.clone(),
        }));

        if report.outcome.enemy_defeated() {
            self.release_sprite_of(&enemy);
            self.events
                .publish(Event::Encounter(EncounterEvent::EnemyDefeated {
                    enemy: enemy.snapshot(),
                }));
        }
        if report.outcome.player_defeated() {
            self.events
                .publish(Event::Encounter(EncounterEvent::PlayerDefeated {
                    player: player.snapshot(),
                }));
        }
        if report.outcome.is_terminal() {
            self.phase = Phase::Ended {
                enemy,
                outcome: report.outcome,
            };
        }

        Ok(report)
    }

    /// Returns to idle: releases enemy assets, clears the pause gate, and
    /// drops the player's transient statuses so the next encounter starts
    /// clean.
    fn handle_reset(&mut self) {
        self.release_current_enemy();
        self.paused = false;
        if let Some(player) = &self.player {
            player.drop_transient_statuses();
        }
        debug!(target: "runtime::worker", "encounter reset");
        self.events
            .publish(Event::Encounter(EncounterEvent::Reset));
    }

    fn handle_save(&mut self, name: String) -> Result<String> {
        let Some(player) = &self.player else {
            return self.fail(RuntimeError::NoPlayerLoaded);
        };

        let created_at = chrono::Utc::now();
        let id = format!(
            "save-{}-{:08x}",
            created_at.format("%Y%m%d%H%M%S"),
            self.rng.next_u32()
        );
        let data = SaveData {
            id: id.clone(),
            name,
            created_at,
            version: self.save_version,
            level_id: self.level_id.clone(),
            player: player.snapshot(),
        };

        if let Err(error) = self.saves.save(&data) {
            return self.fail(RuntimeError::Repository(error));
        }

        debug!(target: "runtime::worker", id = %id, "game saved");
        Ok(id)
    }

    fn handle_load(&mut self, id: String) -> Result<CombatantSnapshot> {
        let data = match self.saves.load(&id) {
            Ok(Some(data)) => data,
            Ok(None) => return self.fail(RuntimeError::SaveNotFound { id }),
            Err(error) => return self.fail(RuntimeError::Repository(error)),
        };

        let player = match Combatant::from_snapshot(data.player.clone()) {
            Ok(player) => player,
            Err(error) => return self.fail(RuntimeError::InvalidSave(error)),
        };

        self.release_current_enemy();
        self.player = Some(Arc::new(player));
        self.level_id = data.level_id;
        self.paused = false;

        debug!(target: "runtime::worker", id = %data.id, name = %data.name, "game loaded");
        Ok(data.player)
    }

    fn current_enemy(&self) -> Option<Arc<Combatant>> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Active { enemy } | Phase::Ended { enemy, .. } => Some(Arc::clone(enemy)),
        }
    }

    /// Releases the current enemy's sprite (unless already released on
    /// defeat) and moves the phase to idle.
    fn release_current_enemy(&mut self) {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => {}
            Phase::Active { enemy } => self.release_sprite_of(&enemy),
            Phase::Ended { enemy, outcome } => {
                // The sprite was already released when the defeat fired.
                if !outcome.enemy_defeated() {
                    self.release_sprite_of(&enemy);
                }
            }
        }
    }

    fn release_sprite_of(&self, enemy: &Combatant) {
        if let Some(path) = enemy.sprite_path()
            && !self.assets.release(path)
        {
            warn!(target: "runtime::worker", path, "released sprite was not cached");
        }
    }

    /// Publishes the failure on the error topic, then returns it to the
    /// caller.
    fn fail<T>(&self, error: RuntimeError) -> Result<T> {
        self.events.publish(Event::Error(ErrorEvent::Raised {
            message: error.to_string(),
        }));
        Err(error)
    }
}
