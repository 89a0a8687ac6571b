//! High-level runtime orchestrator.
//!
//! The runtime owns the encounter worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive encounters.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::debug;

use duel_content::default_combos;
use duel_core::{
    Combo, ComboRegistry, DamageModifiers, EnemyFactory, OnHitRules, PcgRng, TurnOutcome,
    TurnReport, TurnResolver,
};

use crate::api::{CombatHandle, Result, RuntimeError, SequenceProvider};
use crate::assets::{AssetStore, SpriteCache};
use crate::config::RuntimeConfig;
use crate::events::{Event, EventBus, Topic};
use crate::repository::{InMemorySaveRepo, SaveRepository};
use crate::workers::{Command, EncounterWorker};

/// Main runtime that orchestrates combat encounters
///
/// Design: the runtime owns the worker and coordinates the player provider.
/// [`CombatHandle`] provides a cloneable façade for clients.
pub struct CombatRuntime {
    // Shared handle (can be cloned for clients)
    handle: CombatHandle,

    // Player sequence provider (injected by user)
    player_provider: Option<Box<dyn SequenceProvider>>,

    // Background worker
    worker_handle: JoinHandle<()>,
}

impl CombatRuntime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> CombatHandle {
        self.handle.clone()
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Execute a single turn step
    ///
    /// Asks the configured provider for the player's sequence, then submits
    /// it for resolution.
    pub async fn step(&mut self) -> Result<TurnReport> {
        let provider = self
            .player_provider
            .as_ref()
            .ok_or(RuntimeError::ProviderNotSet)?;

        let player = self
            .handle
            .player()
            .await?
            .ok_or(RuntimeError::NoPlayerLoaded)?;

        let directions = provider.provide_sequence(&player).await?;
        self.handle.submit_sequence(directions).await
    }

    /// Drive the active encounter until one side falls
    pub async fn run_encounter(&mut self) -> Result<TurnOutcome> {
        loop {
            let report = self.step().await?;
            if report.outcome.is_terminal() {
                return Ok(report.outcome);
            }
        }
    }

    /// Set the player sequence provider
    pub fn set_player_provider(&mut self, provider: impl SequenceProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`CombatRuntime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    combos: Option<Vec<Combo>>,
    modifiers: DamageModifiers,
    on_hit: Option<OnHitRules>,
    assets: Option<Arc<dyn AssetStore>>,
    saves: Option<Arc<dyn SaveRepository>>,
    player_provider: Option<Box<dyn SequenceProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            combos: None,
            modifiers: DamageModifiers::identity(),
            on_hit: None,
            assets: None,
            saves: None,
            player_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the built-in combo catalog
    pub fn combos(mut self, combos: Vec<Combo>) -> Self {
        self.combos = Some(combos);
        self
    }

    /// Override the elemental damage modifier table
    pub fn damage_modifiers(mut self, modifiers: DamageModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Replace the standard on-hit proc rules
    pub fn on_hit_rules(mut self, rules: OnHitRules) -> Self {
        self.on_hit = Some(rules);
        self
    }

    /// Inject an asset store (defaults to an in-memory [`SpriteCache`])
    pub fn asset_store(mut self, assets: Arc<dyn AssetStore>) -> Self {
        self.assets = Some(assets);
        self
    }

    /// Inject a save repository (defaults to [`InMemorySaveRepo`])
    pub fn save_repository(mut self, saves: Arc<dyn SaveRepository>) -> Self {
        self.saves = Some(saves);
        self
    }

    /// Set the player sequence provider (optional)
    pub fn player_provider(mut self, provider: impl SequenceProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    /// Fix the RNG seed for reproducible encounters
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.config.rng_seed = Some(seed);
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<CombatRuntime> {
        self.config.validate()?;

        let combos = self.combos.unwrap_or_else(default_combos);
        let registry = ComboRegistry::with_combos(combos)?;

        let on_hit = self
            .on_hit
            .unwrap_or_else(|| OnHitRules::standard(&self.config.combat));
        let resolver = TurnResolver::new(self.modifiers, on_hit);
        let factory = EnemyFactory::new(self.config.combat.clone());

        let seed = self.config.rng_seed.unwrap_or_else(rand::random);
        let rng = PcgRng::new(seed);

        let assets = self
            .assets
            .unwrap_or_else(|| Arc::new(SpriteCache::new()));
        let saves = self
            .saves
            .unwrap_or_else(|| Arc::new(InMemorySaveRepo::new()));

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_capacity);
        let event_bus = EventBus::with_capacity(self.config.event_capacity);

        let handle = CombatHandle::new(command_tx, event_bus.clone());

        let worker = EncounterWorker::new(
            registry,
            resolver,
            factory,
            rng,
            assets,
            saves,
            self.config.save_version,
            command_rx,
            event_bus,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        debug!(seed, "combat runtime started");

        Ok(CombatRuntime {
            handle,
            player_provider: self.player_provider,
            worker_handle,
        })
    }
}
