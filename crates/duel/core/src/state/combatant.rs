//! Combatants and their interior-synchronized state.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use arrayvec::ArrayVec;

use crate::config::CombatConfig;

use super::snapshot::{CombatantSnapshot, SnapshotError, StatusSnapshot};
use super::{CombatantId, Element, StatusApplied, StatusEffect, StatusKind, TickOutcome};

bitflags::bitflags! {
    /// Transient per-turn markers, cleared at the start of every status tick
    /// and re-set from that tick's outcomes.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TurnFlags: u8 {
        /// An active stun or freeze is suppressing the owner.
        const STUNNED = 1 << 0;
        /// An active slow is hampering the owner.
        const SLOWED = 1 << 1;
    }
}

/// Mutable combat state, guarded by the combatant's lock.
#[derive(Clone, Debug)]
struct CombatantState {
    hp: u32,
    shield: u32,
    statuses: ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
    combo_cooldowns: BTreeMap<String, u32>,
    ability_cooldowns: BTreeMap<String, u32>,
    flags: TurnFlags,
}

impl CombatantState {
    fn fresh(hp: u32) -> Self {
        Self {
            hp,
            shield: 0,
            statuses: ArrayVec::new(),
            combo_cooldowns: BTreeMap::new(),
            ability_cooldowns: BTreeMap::new(),
            flags: TurnFlags::empty(),
        }
    }

    /// Shield absorbs first, the remainder comes out of hp (clamped at 0).
    /// Returns the hp actually lost.
    fn damage(&mut self, amount: u32) -> u32 {
        if amount == 0 || self.hp == 0 {
            return 0;
        }
        let absorbed = amount.min(self.shield);
        self.shield -= absorbed;
        let hp_loss = (amount - absorbed).min(self.hp);
        self.hp -= hp_loss;
        hp_loss
    }

    fn heal(&mut self, amount: u32, max_hp: u32) -> u32 {
        if self.hp == 0 {
            return 0;
        }
        let healed = amount.min(max_hp - self.hp);
        self.hp += healed;
        healed
    }

    fn apply_outcome(&mut self, outcome: TickOutcome, max_hp: u32) {
        match outcome {
            TickOutcome::Damage(amount) => {
                self.damage(amount);
            }
            TickOutcome::Heal(amount) => {
                self.heal(amount, max_hp);
            }
            TickOutcome::Stunned => self.flags.insert(TurnFlags::STUNNED),
            TickOutcome::Slowed => self.flags.insert(TurnFlags::SLOWED),
        }
    }

    fn tick_down(cooldowns: &mut BTreeMap<String, u32>) {
        cooldowns.retain(|_, turns| {
            *turns = turns.saturating_sub(1);
            *turns > 0
        });
    }
}

/// One fighter in a duel.
///
/// # Design
///
/// Identity (`id`, `name`, `element`, `max_hp`, `base_damage`, sprite path)
/// is fixed at construction. Everything that changes during combat lives
/// behind an internal `RwLock`, so every mutator takes `&self` and a
/// combatant shared as `Arc<Combatant>` can be read (HUD, observers) while
/// the resolver is mid-turn. Each operation is atomic; the resolver supplies
/// any cross-operation ordering.
///
/// # Invariants
///
/// - `hp <= max_hp` at all times; `hp == 0` means dead.
/// - Dead combatants reject damage, healing, shield grants, and status
///   application as no-ops.
/// - At most one status effect per kind: same-kind applications merge.
/// - Cooldown maps never hold zero-turn entries.
#[derive(Debug)]
pub struct Combatant {
    id: CombatantId,
    name: String,
    element: Option<Element>,
    max_hp: u32,
    base_damage: u32,
    sprite_path: Option<String>,
    state: RwLock<CombatantState>,
}

impl Combatant {
    /// Creates a combatant at full health with no shield.
    pub fn new(
        id: CombatantId,
        name: impl Into<String>,
        element: Option<Element>,
        max_hp: u32,
        base_damage: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            element,
            max_hp: max_hp.max(1),
            base_damage,
            sprite_path: None,
            state: RwLock::new(CombatantState::fresh(max_hp.max(1))),
        }
    }

    /// Attaches the asset key the orchestration layer retains for this
    /// combatant.
    pub fn with_sprite(mut self, path: impl Into<String>) -> Self {
        self.sprite_path = Some(path.into());
        self
    }

    // ===== identity =====

    pub fn id(&self) -> &CombatantId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn element(&self) -> Option<Element> {
        self.element
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn base_damage(&self) -> u32 {
        self.base_damage
    }

    pub fn sprite_path(&self) -> Option<&str> {
        self.sprite_path.as_deref()
    }

    // ===== health and shield =====

    pub fn hp(&self) -> u32 {
        self.read().hp
    }

    pub fn shield(&self) -> u32 {
        self.read().shield
    }

    pub fn is_alive(&self) -> bool {
        self.read().hp > 0
    }

    /// Applies damage through the shield-then-hp path.
    ///
    /// Zero-amount hits and hits on the dead are no-ops. Returns the hp
    /// actually lost.
    pub fn take_damage(&self, amount: u32) -> u32 {
        self.write().damage(amount)
    }

    /// Restores hp, capped at `max_hp`. No-op on the dead.
    /// Returns the hp actually restored.
    pub fn heal(&self, amount: u32) -> u32 {
        self.write().heal(amount, self.max_hp)
    }

    /// Grants shield points. No-op on the dead.
    /// Returns the points actually granted.
    pub fn add_shield(&self, amount: u32) -> u32 {
        let mut state = self.write();
        if state.hp == 0 {
            return 0;
        }
        state.shield += amount;
        amount
    }

    /// Removes shield points, floored at 0. No-op on the dead.
    /// Returns the points actually removed.
    pub fn sub_shield(&self, amount: u32) -> u32 {
        let mut state = self.write();
        if state.hp == 0 {
            return 0;
        }
        let removed = amount.min(state.shield);
        state.shield -= removed;
        removed
    }

    // ===== status effects =====

    /// Applies a status effect, merging with an active effect of the same
    /// kind.
    ///
    /// The effect's immediate outcome runs on insertion, and again when a
    /// merge raises power or duration. Dead targets reject the application.
    pub fn apply_status(&self, effect: StatusEffect) -> StatusApplied {
        let mut state = self.write();
        if state.hp == 0 {
            return StatusApplied::RejectedDead;
        }
        if let Some(existing) = state.statuses.iter_mut().find(|e| e.kind == effect.kind) {
            let boosted = existing.merge_from(&effect);
            let rerun = if boosted {
                existing.immediate_outcome()
            } else {
                None
            };
            if let Some(outcome) = rerun {
                state.apply_outcome(outcome, self.max_hp);
            }
            return StatusApplied::Merged { boosted };
        }
        if state.statuses.is_full() {
            return StatusApplied::RejectedFull;
        }
        let immediate = effect.immediate_outcome();
        state.statuses.push(effect);
        if let Some(outcome) = immediate {
            state.apply_outcome(outcome, self.max_hp);
        }
        StatusApplied::Inserted
    }

    /// The active effect of `kind`, if any.
    pub fn status(&self, kind: StatusKind) -> Option<StatusEffect> {
        self.read().statuses.iter().find(|e| e.kind == kind).copied()
    }

    pub fn has_status(&self, kind: StatusKind) -> bool {
        self.status(kind).is_some()
    }

    /// Copies of the active effects, in application order.
    pub fn statuses(&self) -> Vec<StatusEffect> {
        self.read().statuses.to_vec()
    }

    /// Ticks every active effect once and applies the outcomes.
    ///
    /// Transient flags are cleared first and re-set by this tick's stun and
    /// slow outcomes; effects that expired are removed afterwards. Status
    /// damage goes through the same shield-then-hp path as direct hits and
    /// can kill. Returns the outcomes in application order.
    pub fn tick_status_effects(&self) -> Vec<(StatusKind, TickOutcome)> {
        let mut state = self.write();
        state.flags = TurnFlags::empty();
        let mut outcomes = Vec::new();
        for effect in state.statuses.iter_mut() {
            if let Some(outcome) = effect.tick() {
                outcomes.push((effect.kind, outcome));
            }
        }
        for (_, outcome) in &outcomes {
            state.apply_outcome(*outcome, self.max_hp);
        }
        state.statuses.retain(|e| !e.is_expired());
        outcomes
    }

    /// Drops effects that do not carry across encounters.
    pub fn drop_transient_statuses(&self) {
        self.write().statuses.retain(|e| e.persistent);
    }

    // ===== cooldowns =====

    /// Decrements every combo and ability cooldown by one turn.
    pub fn tick_cooldowns(&self) {
        let mut state = self.write();
        let state = &mut *state;
        CombatantState::tick_down(&mut state.combo_cooldowns);
        CombatantState::tick_down(&mut state.ability_cooldowns);
    }

    pub fn combo_ready(&self, name: &str) -> bool {
        !self.read().combo_cooldowns.contains_key(name)
    }

    /// Remaining cooldown turns for `name`; 0 when ready.
    pub fn combo_cooldown(&self, name: &str) -> u32 {
        self.read().combo_cooldowns.get(name).copied().unwrap_or(0)
    }

    /// Records a combo cooldown. Zero turns clears the entry.
    pub fn set_combo_cooldown(&self, name: &str, turns: u32) {
        let mut state = self.write();
        if turns == 0 {
            state.combo_cooldowns.remove(name);
        } else {
            state.combo_cooldowns.insert(name.to_owned(), turns);
        }
    }

    pub fn ability_ready(&self, name: &str) -> bool {
        !self.read().ability_cooldowns.contains_key(name)
    }

    pub fn ability_cooldown(&self, name: &str) -> u32 {
        self.read().ability_cooldowns.get(name).copied().unwrap_or(0)
    }

    pub fn set_ability_cooldown(&self, name: &str, turns: u32) {
        let mut state = self.write();
        if turns == 0 {
            state.ability_cooldowns.remove(name);
        } else {
            state.ability_cooldowns.insert(name.to_owned(), turns);
        }
    }

    // ===== transient flags =====

    pub fn flags(&self) -> TurnFlags {
        self.read().flags
    }

    pub fn is_stunned(&self) -> bool {
        self.read().flags.contains(TurnFlags::STUNNED)
    }

    pub fn is_slowed(&self) -> bool {
        self.read().flags.contains(TurnFlags::SLOWED)
    }

    // ===== persistence =====

    /// Captures the persisted view of this combatant.
    ///
    /// Ability cooldowns and transient flags are deliberately outside the
    /// contract; see [`CombatantSnapshot`].
    pub fn snapshot(&self) -> CombatantSnapshot {
        let state = self.read();
        CombatantSnapshot {
            id: self.id.as_str().to_owned(),
            name: self.name.clone(),
            element: self.element.map(|e| e.to_string()),
            hp: state.hp,
            max_hp: self.max_hp,
            base_damage: self.base_damage,
            shield: state.shield,
            sprite_path: self.sprite_path.clone(),
            combo_cooldowns: state.combo_cooldowns.clone(),
            status_effects: state
                .statuses
                .iter()
                .map(|e| StatusSnapshot {
                    kind: e.kind.to_string(),
                    turns: e.remaining_turns,
                    power: e.power,
                })
                .collect(),
        }
    }

    /// Rebuilds a combatant from its persisted view, validating eagerly.
    ///
    /// Unknown element or status-kind text, a zero `max_hp`, and `hp` above
    /// `max_hp` are all rejected with a descriptive error. Zero-turn status
    /// entries and zero-turn cooldowns are dropped; duplicate status kinds
    /// merge on the way in.
    pub fn from_snapshot(snapshot: CombatantSnapshot) -> Result<Self, SnapshotError> {
        if snapshot.max_hp == 0 {
            return Err(SnapshotError::ZeroMaxHp);
        }
        if snapshot.hp > snapshot.max_hp {
            return Err(SnapshotError::HpAboveMax {
                hp: snapshot.hp,
                max_hp: snapshot.max_hp,
            });
        }
        let element = match &snapshot.element {
            None => None,
            Some(text) => Some(Element::from_str(text).map_err(|_| {
                SnapshotError::UnknownElement {
                    value: text.clone(),
                }
            })?),
        };

        let mut statuses: ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }> =
            ArrayVec::new();
        for entry in &snapshot.status_effects {
            let kind = StatusKind::from_str(&entry.kind).map_err(|_| {
                SnapshotError::UnknownStatusKind {
                    value: entry.kind.clone(),
                }
            })?;
            if entry.turns == 0 {
                continue;
            }
            let effect = StatusEffect::new(kind, entry.turns, entry.power);
            if let Some(existing) = statuses.iter_mut().find(|e| e.kind == kind) {
                existing.merge_from(&effect);
            } else if !statuses.is_full() {
                statuses.push(effect);
            }
        }

        let combo_cooldowns = snapshot
            .combo_cooldowns
            .into_iter()
            .filter(|(_, turns)| *turns > 0)
            .collect();

        Ok(Self {
            id: CombatantId::new(snapshot.id),
            name: snapshot.name,
            element,
            max_hp: snapshot.max_hp,
            base_damage: snapshot.base_damage,
            sprite_path: snapshot.sprite_path,
            state: RwLock::new(CombatantState {
                hp: snapshot.hp,
                shield: snapshot.shield,
                statuses,
                combo_cooldowns,
                ability_cooldowns: BTreeMap::new(),
                flags: TurnFlags::empty(),
            }),
        })
    }

    // ===== locking =====

    fn read(&self) -> RwLockReadGuard<'_, CombatantState> {
        self.state.read().expect("combatant state lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, CombatantState> {
        self.state.write().expect("combatant state lock poisoned")
    }
}
