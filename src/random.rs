//! Randomness sources for die draws.
//!
//! The sequencer never touches a random number generator directly. It draws
//! through [`DiceSource`], so hosts can inject OS entropy, a seeded generator
//! for reproducible sessions, or a scripted sequence for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed die draws.
///
/// `Send` so the source can move into the animation task.
pub trait DiceSource: Send {
    /// Draw an integer in `low..=high` (inclusive on both ends).
    fn draw(&mut self, low: u8, high: u8) -> u8;
}

/// [`DiceSource`] backed by any [`rand::Rng`].
#[derive(Clone, Debug)]
pub struct RngDice<R = StdRng> {
    rng: R,
}

impl RngDice<StdRng> {
    /// Generator seeded from operating system entropy.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic generator; the same seed yields the same rolls.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RngDice<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for RngDice<StdRng> {
    fn default() -> Self {
        Self::from_os_rng()
    }
}

impl<R: Rng + Send> DiceSource for RngDice<R> {
    fn draw(&mut self, low: u8, high: u8) -> u8 {
        self.rng.random_range(low..=high)
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
///
/// Values are clamped into the requested range. Clones share the cursor, so a
/// test can keep a clone and inspect [`draw_count`](Self::draw_count) after
/// handing the original to a sequencer.
///
/// ## Example
///
/// ```rust
/// use d20_core_view::{DiceSource, ScriptedDice};
///
/// let mut dice = ScriptedDice::new(vec![4, 20]);
/// assert_eq!(dice.draw(1, 20), 4);
/// assert_eq!(dice.draw(1, 20), 20);
/// assert_eq!(dice.draw(1, 20), 4); // cycles
/// assert_eq!(dice.draw_count(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    values: Arc<[u8]>,
    cursor: Arc<AtomicUsize>,
}

impl ScriptedDice {
    /// Replay `values` in order. An empty script always yields `low`.
    pub fn new(values: Vec<u8>) -> Self {
        Self {
            values: values.into(),
            cursor: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Always yield the same value.
    pub fn constant(value: u8) -> Self {
        Self::new(vec![value])
    }

    /// `frames` copies of `filler` followed by `last`.
    pub fn ending_with(filler: u8, frames: usize, last: u8) -> Self {
        let mut values = vec![filler; frames];
        values.push(last);
        Self::new(values)
    }

    /// Number of draws taken so far, across all clones.
    pub fn draw_count(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

impl DiceSource for ScriptedDice {
    fn draw(&mut self, low: u8, high: u8) -> u8 {
        let idx = self.cursor.fetch_add(1, Ordering::SeqCst);
        if self.values.is_empty() {
            return low;
        }
        self.values[idx % self.values.len()].clamp(low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_dice_stays_in_range() {
        let mut dice = RngDice::seeded(7);
        for _ in 0..1_000 {
            let v = dice.draw(1, 20);
            assert!((1..=20).contains(&v));
        }
    }

    #[test]
    fn test_rng_dice_seed_is_reproducible() {
        let mut a = RngDice::seeded(42);
        let mut b = RngDice::seeded(42);
        let left: Vec<u8> = (0..16).map(|_| a.draw(1, 20)).collect();
        let right: Vec<u8> = (0..16).map(|_| b.draw(1, 20)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_rng_dice_hits_every_face() {
        let mut dice = RngDice::seeded(3);
        let mut seen = [false; 20];
        for _ in 0..2_000 {
            seen[(dice.draw(1, 20) - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_scripted_clamps() {
        let mut dice = ScriptedDice::new(vec![0, 30, 5]);
        assert_eq!(dice.draw(1, 20), 1);
        assert_eq!(dice.draw(1, 20), 20);
        assert_eq!(dice.draw(1, 20), 5);
    }

    #[test]
    fn test_scripted_clones_share_cursor() {
        let dice = ScriptedDice::ending_with(3, 15, 20);
        let mut handed_off = dice.clone();
        for _ in 0..15 {
            assert_eq!(handed_off.draw(1, 20), 3);
        }
        assert_eq!(handed_off.draw(1, 20), 20);
        assert_eq!(dice.draw_count(), 16);
    }

    #[test]
    fn test_scripted_empty_yields_low() {
        let mut dice = ScriptedDice::new(Vec::new());
        assert_eq!(dice.draw(1, 20), 1);
    }
}
