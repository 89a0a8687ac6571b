//! Deterministic randomness for combat resolution.
//!
//! Every probabilistic mechanic (on-hit procs, enemy sequence bias, sequence
//! shortening) draws from a [`CombatRng`] stream owned by the caller. Given
//! the same seed the whole encounter replays identically, which keeps turn
//! resolution testable and makes recorded fights reproducible.

/// Random stream consumed by the combat engine.
///
/// Implementations must be deterministic: the same seed must produce the
/// same sequence of values.
pub trait CombatRng: Send {
    /// Generate the next random u32 in the stream.
    fn next_u32(&mut self) -> u32;

    /// Roll a percentage check: true with probability `percent` in 100.
    ///
    /// Rolls a value in `0..100` and compares strictly below the threshold,
    /// so 0 never passes and 100 always does.
    fn percent(&mut self, percent: u32) -> bool {
        if percent >= 100 {
            return true;
        }
        self.next_u32() % 100 < percent
    }

    /// Uniform index in `0..len`. Returns 0 when `len` is 0.
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u32() as usize) % len
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// Uses the PCG-XSH-RR variant: 64-bit LCG state permuted into 32-bit
/// output. Small, fast, and of good statistical quality.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a stream seeded with `seed`.
    ///
    /// The seed is mixed through one LCG step so that small seeds (0, 1, 2)
    /// still diverge immediately.
    pub fn new(seed: u64) -> Self {
        let mut rng = Self {
            state: seed.wrapping_add(Self::INCREMENT),
        };
        rng.state = Self::step(rng.state);
        rng
    }

    /// Advance the LCG state by one step:
    /// `state' = (state * multiplier + increment) mod 2^64`.
    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation (xorshift high, random rotate).
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl CombatRng for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::step(self.state);
        Self::output(self.state)
    }
}

/// Replays a fixed list of values, then zeros.
///
/// Zero makes every exhausted `percent` roll land, which keeps scripted
/// scenarios explicit about the rolls they care about.
#[cfg(test)]
pub(crate) struct ScriptedRng {
    values: std::collections::VecDeque<u32>,
}

#[cfg(test)]
impl ScriptedRng {
    pub(crate) fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

#[cfg(test)]
impl CombatRng for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.values.pop_front().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_replays_identically() {
        let mut a = PcgRng::new(42);
        let mut b = PcgRng::new(42);
        for _ in 0..64 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = PcgRng::new(0);
        let mut b = PcgRng::new(1);
        let same = (0..16).filter(|_| a.next_u32() == b.next_u32()).count();
        assert!(same < 16);
    }

    #[test]
    fn percent_bounds_are_exact() {
        let mut rng = PcgRng::new(7);
        assert!(!(0..100).any(|_| rng.percent(0)));
        assert!((0..100).all(|_| rng.percent(100)));
    }

    #[test]
    fn pick_stays_in_range() {
        let mut rng = PcgRng::new(99);
        for _ in 0..200 {
            assert!(rng.pick(4) < 4);
        }
        assert_eq!(rng.pick(0), 0);
    }
}
