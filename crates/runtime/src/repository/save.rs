//! Serializable save envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use duel_core::CombatantSnapshot;

use super::error::{RepositoryError, Result};

/// One persisted game: the player snapshot plus bookkeeping metadata.
///
/// Enemies and in-flight encounters are deliberately not saved; loading a
/// save always lands the player outside combat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// Unique save id, assigned by the runtime on save
    pub id: String,
    /// Player-facing label ("Before the boss")
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Envelope version for forward-compatible migrations
    pub version: u32,
    /// Level the player was on when saving, if any
    pub level_id: Option<String>,
    pub player: CombatantSnapshot,
}

impl SaveData {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| RepositoryError::Json(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| RepositoryError::Json(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use duel_core::{Combatant, CombatantId, Element};

    fn sample() -> SaveData {
        let player = Combatant::new(
            CombatantId::from("hero"),
            "Hero",
            Some(Element::Fire),
            100,
            10,
        );
        player.take_damage(25);
        SaveData {
            id: "save-1".into(),
            name: "Before the boss".into(),
            created_at: Utc::now(),
            version: 1,
            level_id: Some("level-3".into()),
            player: player.snapshot(),
        }
    }

    #[test]
    fn json_roundtrip_preserves_the_envelope() {
        let data = sample();
        let json = data.to_json().expect("serialize");
        let decoded = SaveData::from_json(&json).expect("deserialize");
        assert_eq!(decoded, data);
        assert_eq!(decoded.player.hp, 75);
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = SaveData::from_json("{ not json").unwrap_err();
        assert!(matches!(err, RepositoryError::Json(_)));
    }
}
