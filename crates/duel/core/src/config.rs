/// Combat tuning constants and runtime-tunable parameters.
///
/// Compile-time capacities are exposed as associated constants so they can be
/// used as type parameters; everything else is a plain field with a default,
/// overridable by the embedding layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct CombatConfig {
    /// Flat term added to the player's max hp when scaling an enemy.
    pub enemy_hp_delta: i32,
    /// Max hp gained by the enemy per difficulty level.
    pub enemy_hp_per_difficulty: u32,
    /// Lower bound on generated enemy max hp.
    pub enemy_hp_floor: u32,
    /// Flat term added to the player's base damage when scaling an enemy.
    pub enemy_damage_delta: i32,
    /// Base damage gained by the enemy per difficulty level.
    pub enemy_damage_per_difficulty: u32,
    /// Lower bound on generated enemy base damage.
    pub enemy_damage_floor: u32,
    /// Chance (percent) that a finished enemy sequence is shortened by one.
    pub shorten_chance_percent: u32,
    /// Chance (percent) that a lightning hit along the horizontal axis stuns.
    pub stun_chance_percent: u32,
    /// Duration, in turns, of the stun inflicted by a lightning proc.
    pub stun_turns: u32,
    /// Fraction of max hp (percent, floor 1 point) healed by a water proc.
    pub heal_percent_of_max: u32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum concurrent status effects per combatant. One slot per kind is
    /// enough because same-kind applications merge.
    pub const MAX_STATUS_EFFECTS: usize = 8;

    // ===== sequence shaping =====
    /// Maximum directions kept in a sanitized input sequence.
    pub const MAX_SEQUENCE_LEN: usize = 4;
    /// Re-roll attempts before a consecutive duplicate direction is accepted.
    pub const SEQUENCE_RETRY_LIMIT: u32 = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ENEMY_HP_DELTA: i32 = -10;
    pub const DEFAULT_ENEMY_HP_PER_DIFFICULTY: u32 = 20;
    pub const DEFAULT_ENEMY_HP_FLOOR: u32 = 40;
    pub const DEFAULT_ENEMY_DAMAGE_DELTA: i32 = -2;
    pub const DEFAULT_ENEMY_DAMAGE_PER_DIFFICULTY: u32 = 3;
    pub const DEFAULT_ENEMY_DAMAGE_FLOOR: u32 = 5;
    pub const DEFAULT_SHORTEN_CHANCE_PERCENT: u32 = 8;
    pub const DEFAULT_STUN_CHANCE_PERCENT: u32 = 20;
    pub const DEFAULT_STUN_TURNS: u32 = 1;
    pub const DEFAULT_HEAL_PERCENT_OF_MAX: u32 = 5;

    pub fn new() -> Self {
        Self {
            enemy_hp_delta: Self::DEFAULT_ENEMY_HP_DELTA,
            enemy_hp_per_difficulty: Self::DEFAULT_ENEMY_HP_PER_DIFFICULTY,
            enemy_hp_floor: Self::DEFAULT_ENEMY_HP_FLOOR,
            enemy_damage_delta: Self::DEFAULT_ENEMY_DAMAGE_DELTA,
            enemy_damage_per_difficulty: Self::DEFAULT_ENEMY_DAMAGE_PER_DIFFICULTY,
            enemy_damage_floor: Self::DEFAULT_ENEMY_DAMAGE_FLOOR,
            shorten_chance_percent: Self::DEFAULT_SHORTEN_CHANCE_PERCENT,
            stun_chance_percent: Self::DEFAULT_STUN_CHANCE_PERCENT,
            stun_turns: Self::DEFAULT_STUN_TURNS,
            heal_percent_of_max: Self::DEFAULT_HEAL_PERCENT_OF_MAX,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
