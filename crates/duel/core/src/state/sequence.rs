//! Input sequence shaping.
//!
//! Raw sequences arrive from players and the enemy generator; both pass
//! through [`sanitize_sequence`] before resolution so the turn engine only
//! ever sees deduplicated, bounded input.

use crate::config::CombatConfig;

use super::Direction;

/// Normalizes a raw input sequence.
///
/// Collapses consecutive duplicate directions and truncates the result to
/// `max_len`. Empty input is valid and stays empty (a pass turn).
pub fn sanitize_sequence(sequence: &[Direction], max_len: usize) -> Vec<Direction> {
    let mut out = Vec::with_capacity(sequence.len().min(max_len));
    for &direction in sequence {
        if out.last() == Some(&direction) {
            continue;
        }
        if out.len() == max_len {
            break;
        }
        out.push(direction);
    }
    out
}

/// Error raised by [`SequenceBuilder::push`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    /// The builder already holds its maximum number of directions.
    #[error("sequence already holds {capacity} directions")]
    Full { capacity: usize },
    /// The pushed direction repeats the previous input.
    #[error("direction {direction} repeats the previous input")]
    ConsecutiveDuplicate { direction: Direction },
}

/// Bounded accumulator for player-entered directions.
///
/// Input layers push one direction per keypress; the builder enforces the
/// same shape [`sanitize_sequence`] produces, so the sequence a player sees
/// is exactly the sequence that resolves.
#[derive(Clone, Debug)]
pub struct SequenceBuilder {
    directions: Vec<Direction>,
    capacity: usize,
}

impl SequenceBuilder {
    /// Builder bounded at [`CombatConfig::MAX_SEQUENCE_LEN`].
    pub fn new() -> Self {
        Self::with_capacity(CombatConfig::MAX_SEQUENCE_LEN)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            directions: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a direction, rejecting overflow and consecutive repeats.
    pub fn push(&mut self, direction: Direction) -> Result<(), SequenceError> {
        if self.directions.len() == self.capacity {
            return Err(SequenceError::Full {
                capacity: self.capacity,
            });
        }
        if self.directions.last() == Some(&direction) {
            return Err(SequenceError::ConsecutiveDuplicate { direction });
        }
        self.directions.push(direction);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.directions.clear();
    }

    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    pub fn as_slice(&self) -> &[Direction] {
        &self.directions
    }

    /// Hands the accumulated sequence over and leaves the builder empty.
    pub fn take(&mut self) -> Vec<Direction> {
        std::mem::take(&mut self.directions)
    }
}

impl Default for SequenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::{Down, Left, Right, Up};

    #[test]
    fn sanitize_collapses_duplicates_then_truncates() {
        let raw = [Up, Up, Left, Left, Left, Right];
        assert_eq!(sanitize_sequence(&raw, 4), vec![Up, Left, Right]);
    }

    #[test]
    fn sanitize_truncates_to_max_len() {
        let raw = [Up, Down, Up, Down, Up, Down];
        assert_eq!(sanitize_sequence(&raw, 4), vec![Up, Down, Up, Down]);
    }

    #[test]
    fn sanitize_keeps_empty_input_empty() {
        assert!(sanitize_sequence(&[], 4).is_empty());
    }

    #[test]
    fn builder_rejects_consecutive_duplicates() {
        let mut builder = SequenceBuilder::new();
        builder.push(Right).unwrap();
        assert_eq!(
            builder.push(Right),
            Err(SequenceError::ConsecutiveDuplicate { direction: Right })
        );
        builder.push(Up).unwrap();
        assert_eq!(builder.as_slice(), &[Right, Up]);
    }

    #[test]
    fn builder_rejects_pushes_past_capacity() {
        let mut builder = SequenceBuilder::with_capacity(2);
        builder.push(Left).unwrap();
        builder.push(Down).unwrap();
        assert_eq!(builder.push(Up), Err(SequenceError::Full { capacity: 2 }));
    }

    #[test]
    fn take_drains_the_builder() {
        let mut builder = SequenceBuilder::new();
        builder.push(Left).unwrap();
        builder.push(Right).unwrap();
        assert_eq!(builder.take(), vec![Left, Right]);
        assert!(builder.is_empty());
    }
}
