//! Status effect engine.
//!
//! Effects are counted in turns, not wall time: the owning combatant ticks
//! them once per resolved turn, applies each tick's outcome, and drops what
//! expired.
//!
//! # Lifecycle
//!
//! 1. **Apply** - a new effect is inserted and its immediate outcome (if
//!    any) runs once. Applying a kind that is already active merges instead:
//!    power and duration each take the maximum of the old and new value, and
//!    the immediate outcome re-runs only if the merge raised either.
//! 2. **Tick** - `remaining_turns` decrements and the kind's outcome fires
//!    (burn damages on the tick that zeroes it too).
//! 3. **Expire** - effects at zero remaining turns are removed after the
//!    tick that drained them.

/// Kinds of status effect.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusKind {
    /// Damage over time; loses `power` hp per tick.
    Burn,
    /// Frozen solid: marks the owner stunned while active.
    Freeze,
    /// Marks the owner stunned while active.
    Stun,
    /// Marks the owner slowed while active.
    Slow,
    /// Recovery over time; regains `power` hp per tick.
    Regen,
}

impl StatusKind {
    /// Number of status kinds.
    pub const COUNT: usize = 5;

    /// All kinds in declaration order.
    pub const fn all() -> [StatusKind; Self::COUNT] {
        [
            StatusKind::Burn,
            StatusKind::Freeze,
            StatusKind::Stun,
            StatusKind::Slow,
            StatusKind::Regen,
        ]
    }
}

/// Consequence of one status tick, applied by the owning combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TickOutcome {
    /// Lose hp (shield absorbs first).
    Damage(u32),
    /// Recover hp, capped at max.
    Heal(u32),
    /// Mark the owner stunned for the coming turn.
    Stunned,
    /// Mark the owner slowed for the coming turn.
    Slowed,
}

/// How a status application landed on a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatusApplied {
    /// New effect inserted; its immediate outcome ran.
    Inserted,
    /// Merged into an already-active effect of the same kind.
    ///
    /// `boosted` is true when the merge raised power or duration; the
    /// immediate outcome re-runs exactly then.
    Merged { boosted: bool },
    /// The target was dead; nothing changed.
    RejectedDead,
    /// The bounded effect list was full; the effect was dropped.
    RejectedFull,
}

/// A single timed effect on a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Ticks left before the effect expires.
    pub remaining_turns: u32,
    /// Kind-specific magnitude (damage or heal per tick; unused for marks).
    pub power: u32,
    /// Whether the effect survives the end of an encounter.
    ///
    /// Combat-applied effects are transient and dropped on encounter reset;
    /// loaded effects come back transient as well, which the snapshot
    /// contract documents.
    pub persistent: bool,
}

impl StatusEffect {
    /// A transient effect, the normal combat case.
    pub fn new(kind: StatusKind, remaining_turns: u32, power: u32) -> Self {
        Self {
            kind,
            remaining_turns,
            power,
            persistent: false,
        }
    }

    /// An effect that carries across encounter resets.
    pub fn lasting(kind: StatusKind, remaining_turns: u32, power: u32) -> Self {
        Self {
            persistent: true,
            ..Self::new(kind, remaining_turns, power)
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_turns == 0
    }

    /// Consumes one turn and yields this tick's outcome.
    ///
    /// Returns `None` once expired. The outcome fires on every consumed
    /// turn, including the one that drains the effect to zero.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if self.is_expired() {
            return None;
        }
        self.remaining_turns -= 1;
        Some(self.outcome())
    }

    /// Outcome run once at application time (and again on a boosted merge).
    ///
    /// Stun-like kinds mark the owner immediately so a stun landed mid-turn
    /// is visible before the end-of-turn tick; the other kinds only act on
    /// ticks.
    pub fn immediate_outcome(&self) -> Option<TickOutcome> {
        match self.kind {
            StatusKind::Freeze | StatusKind::Stun => Some(TickOutcome::Stunned),
            StatusKind::Burn | StatusKind::Slow | StatusKind::Regen => None,
        }
    }

    /// Folds another application of the same kind into this one.
    ///
    /// Power and duration each take the maximum of both values, so merging
    /// never weakens an active effect. Returns true when either value grew.
    pub fn merge_from(&mut self, other: &StatusEffect) -> bool {
        debug_assert_eq!(self.kind, other.kind);
        let boosted = other.power > self.power || other.remaining_turns > self.remaining_turns;
        self.power = self.power.max(other.power);
        self.remaining_turns = self.remaining_turns.max(other.remaining_turns);
        self.persistent |= other.persistent;
        boosted
    }

    fn outcome(&self) -> TickOutcome {
        match self.kind {
            StatusKind::Burn => TickOutcome::Damage(self.power),
            StatusKind::Regen => TickOutcome::Heal(self.power),
            StatusKind::Freeze | StatusKind::Stun => TickOutcome::Stunned,
            StatusKind::Slow => TickOutcome::Slowed,
        }
    }
}
