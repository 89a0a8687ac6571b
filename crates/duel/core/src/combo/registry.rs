//! Combo registration and pattern matching.
//!
//! # Matching
//!
//! Matching always starts from exact pattern equality; what differs between
//! the entry points is how availability is treated:
//!
//! - [`ComboRegistry::match_best`] prefers available combos but falls back
//!   to ignoring availability when every pattern match is spent (or no
//!   source was given), then picks through affinity tiers: source-element
//!   matches, then neutral combos, then anything.
//! - [`ComboRegistry::match_exact`] never falls back: an on-cooldown combo
//!   simply does not match. The available matches go through the same
//!   affinity tiers.
//!
//! Inside a tier the highest priority wins; equal priorities resolve to the
//! lexicographically smallest name, so matching is a pure function of the
//! registry and the inputs.

use crate::state::{Combatant, Direction};

use super::{Combo, ComboView};

/// Validation failure while building a registry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate combo name: {name}")]
    DuplicateName { name: String },
    #[error("combo {name} has an empty pattern")]
    EmptyPattern { name: String },
}

/// Validated collection of combos shared by both sides of a duel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComboRegistry {
    combos: Vec<Combo>,
}

impl ComboRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry, validating every combo eagerly.
    pub fn with_combos(combos: Vec<Combo>) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for combo in combos {
            registry.register(combo)?;
        }
        Ok(registry)
    }

    /// Adds a combo, rejecting empty patterns and duplicate names.
    pub fn register(&mut self, combo: Combo) -> Result<(), RegistryError> {
        if combo.pattern.is_empty() {
            return Err(RegistryError::EmptyPattern { name: combo.name });
        }
        if self.get(&combo.name).is_some() {
            return Err(RegistryError::DuplicateName { name: combo.name });
        }
        self.combos.push(combo);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Combo> {
        self.combos.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combo> {
        self.combos.iter()
    }

    pub fn len(&self) -> usize {
        self.combos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    /// Best match for `sequence`, preferring available combos and the
    /// source's affinity.
    pub fn match_best(&self, sequence: &[Direction], source: Option<&Combatant>) -> Option<&Combo> {
        let matches: Vec<&Combo> = self.combos.iter().filter(|c| c.matches(sequence)).collect();
        if matches.is_empty() {
            return None;
        }
        let available: Vec<&Combo> = matches
            .iter()
            .copied()
            .filter(|c| c.is_available(source))
            .collect();
        // A fully-spent (or absent) source still resolves the pattern.
        let pool = if available.is_empty() { matches } else { available };
        Self::pick_tiered(&pool, source)
    }

    /// Exact match that also requires availability; no fallback past the
    /// availability filter, same affinity tiers as [`Self::match_best`].
    pub fn match_exact(&self, sequence: &[Direction], source: Option<&Combatant>) -> Option<&Combo> {
        let exact: Vec<&Combo> = self
            .combos
            .iter()
            .filter(|c| c.matches(sequence) && c.is_available(source))
            .collect();
        Self::pick_tiered(&exact, source)
    }

    /// Exact-and-available match first, best match otherwise.
    pub fn match_exact_or_best(
        &self,
        sequence: &[Direction],
        source: Option<&Combatant>,
    ) -> Option<&Combo> {
        self.match_exact(sequence, source)
            .or_else(|| self.match_best(sequence, source))
    }

    /// UI projections with per-combatant remaining cooldowns.
    pub fn views_for(&self, combatant: Option<&Combatant>) -> Vec<ComboView> {
        self.combos
            .iter()
            .map(|c| ComboView {
                name: c.name.clone(),
                description: c.description.clone(),
                pattern: c.pattern.clone(),
                element: c.element,
                cooldown: c.cooldown,
                priority: c.priority,
                remaining_cooldown: combatant
                    .map(|f| f.combo_cooldown(&c.name))
                    .unwrap_or(0),
            })
            .collect()
    }

    /// Affinity tiers over one candidate pool: combos matching the source's
    /// element first, then neutral combos, then anything.
    fn pick_tiered<'a>(pool: &[&'a Combo], source: Option<&Combatant>) -> Option<&'a Combo> {
        let source_element = source.and_then(|c| c.element());
        let by_element: Vec<&'a Combo> = pool
            .iter()
            .copied()
            .filter(|c| source.is_some() && c.element == source_element)
            .collect();
        if let Some(best) = Self::pick(&by_element) {
            return Some(best);
        }
        let neutral: Vec<&'a Combo> = pool
            .iter()
            .copied()
            .filter(|c| c.element.is_none())
            .collect();
        if let Some(best) = Self::pick(&neutral) {
            return Some(best);
        }
        Self::pick(pool)
    }

    /// Highest priority wins; ties resolve to the smallest name.
    fn pick<'a>(candidates: &[&'a Combo]) -> Option<&'a Combo> {
        candidates
            .iter()
            .copied()
            .max_by(|a, b| a.priority.cmp(&b.priority).then_with(|| b.name.cmp(&a.name)))
    }
}
