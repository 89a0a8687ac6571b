//! Tagged combo effect kinds.
//!
//! Effects are data, not code: each variant carries its parameters and
//! application is one total `match`, so catalogs serialize cleanly and a
//! loaded combo can never reference behavior that does not exist.

use crate::state::{Combatant, StatusApplied, StatusEffect, StatusKind};

/// One consequence of activating a combo, applied in catalog order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ComboEffect {
    /// Flat damage to the target.
    Damage { amount: u32 },
    /// Damage scaled from the source's base damage:
    /// `base * percent / 100 + bonus`, floor 1.
    ScaledDamage { percent: u32, bonus: u32 },
    /// Applies a status effect to the target.
    ApplyStatus {
        kind: StatusKind,
        turns: u32,
        power: u32,
    },
    /// Grants shield points to the source.
    GrantShield { amount: u32 },
    /// Heals the source.
    Heal { amount: u32 },
}

impl ComboEffect {
    /// Applies this effect and reports what actually happened.
    ///
    /// Targets that die mid-list are handled by the no-op rules on
    /// [`Combatant`]; the rest of the list still runs.
    pub fn apply(&self, source: &Combatant, target: &Combatant) -> EffectApplied {
        match *self {
            ComboEffect::Damage { amount } => EffectApplied::Damage(target.take_damage(amount)),
            ComboEffect::ScaledDamage { percent, bonus } => {
                let amount = (source.base_damage().saturating_mul(percent) / 100 + bonus).max(1);
                EffectApplied::Damage(target.take_damage(amount))
            }
            ComboEffect::ApplyStatus { kind, turns, power } => EffectApplied::Status {
                kind,
                applied: target.apply_status(StatusEffect::new(kind, turns, power)),
            },
            ComboEffect::GrantShield { amount } => EffectApplied::Shield(source.add_shield(amount)),
            ComboEffect::Heal { amount } => EffectApplied::Heal(source.heal(amount)),
        }
    }
}

/// What a single effect did when applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EffectApplied {
    /// Hp actually removed from the target.
    Damage(u32),
    /// Status application and how it landed.
    Status {
        kind: StatusKind,
        applied: StatusApplied,
    },
    /// Shield points granted to the source.
    Shield(u32),
    /// Hp actually restored to the source.
    Heal(u32),
}
