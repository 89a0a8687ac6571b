//! Deterministic duel combat model shared across the workspace.
//!
//! `duel-core` defines the canonical rules (combatants, status effects,
//! combos, the turn resolver) and exposes pure APIs reused by the runtime
//! and offline tools. Nothing here performs I/O or reads a clock, and
//! randomness enters only through the [`rng::CombatRng`] trait, so a whole
//! turn replays bit-for-bit from a seed.
pub mod combo;
pub mod config;
pub mod enemy;
pub mod engine;
pub mod rng;
pub mod state;

pub use combo::{
    Combo, ComboActivation, ComboEffect, ComboRegistry, ComboView, EffectApplied, RegistryError,
};
pub use config::CombatConfig;
pub use engine::{
    DamageModifiers, OnHitProc, OnHitRule, OnHitRules, ProcEvent, StatusReport, StepReport,
    TurnOutcome, TurnReport, TurnResolver,
};
pub use enemy::EnemyFactory;
pub use rng::{CombatRng, PcgRng};
pub use state::{
    Axis, Combatant, CombatantId, CombatantSnapshot, Direction, Element, SequenceBuilder,
    SequenceError, SnapshotError, StatusApplied, StatusEffect, StatusKind, StatusSnapshot,
    TickOutcome, TurnFlags, sanitize_sequence,
};
