//! Roll animation state machine.

use std::time::Duration;

use crate::{DiceSource, Face, MessageSet, RollOutcome, RollState};

/// Number of cosmetic draws before the final one.
pub const ANIMATION_ITERATIONS: u32 = 15;
/// Pause after each cosmetic draw, in milliseconds.
pub const ANIMATION_DELAY_MS: u64 = 80;

/// Where the machine is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RollPhase {
    /// Resting between rolls
    #[default]
    Idle,
    /// Cosmetic draws in progress
    Animating,
}

/// What a single [`RollAnimation::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// No roll in progress; nothing changed
    Idle,
    /// A cosmetic draw was shown; wait [`RollAnimation::interval`] before ticking again
    Frame(Face),
    /// The final draw was committed and the machine is idle again
    Finished(RollOutcome),
}

/// Platform-agnostic roll animation.
///
/// This machine owns the [`RollState`] but does not handle timing. The caller
/// ticks it once per [`interval`](Self::interval) until it reports
/// [`Tick::Finished`]. [`RollSequencer`](crate::RollSequencer) is the Tokio
/// driver; terminal or game-loop hosts can drive it directly.
///
/// ## Example
///
/// ```rust
/// use d20_core_view::{RollAnimation, RollPhase, ScriptedDice, Tick, ANIMATION_ITERATIONS};
///
/// let mut anim = RollAnimation::default();
/// let mut dice = ScriptedDice::ending_with(5, ANIMATION_ITERATIONS as usize, 20);
///
/// assert!(anim.start());
/// assert!(!anim.start()); // already animating
/// assert_eq!(anim.phase(), RollPhase::Animating);
///
/// let mut frames = 0;
/// loop {
///     match anim.tick(&mut dice) {
///         Tick::Frame(_) => frames += 1,
///         Tick::Finished(_) => break,
///         Tick::Idle => unreachable!(),
///     }
/// }
/// assert_eq!(frames, ANIMATION_ITERATIONS);
/// assert_eq!(anim.state().current_value().get(), 20);
/// assert_eq!(anim.phase(), RollPhase::Idle);
/// ```
#[derive(Clone, Debug)]
pub struct RollAnimation {
    /// Observable fields
    state: RollState,
    /// Cosmetic draws left in the current roll
    remaining: u32,
    /// Texts used for `result_message`
    messages: MessageSet,
}

impl RollAnimation {
    /// Create an idle animation using `messages`.
    pub fn new(messages: MessageSet) -> Self {
        Self {
            state: RollState::new(&messages),
            remaining: 0,
            messages,
        }
    }

    /// Accept a roll.
    ///
    /// Returns false, changing nothing, while a roll is already animating.
    pub fn start(&mut self) -> bool {
        if self.state.is_rolling() {
            return false;
        }
        self.state.begin(&self.messages);
        self.remaining = ANIMATION_ITERATIONS;
        true
    }

    /// Advance the roll by one draw.
    ///
    /// The first [`ANIMATION_ITERATIONS`] calls after [`start`](Self::start)
    /// show a cosmetic face; the next one draws the final face, classifies it
    /// and returns to idle.
    pub fn tick(&mut self, source: &mut dyn DiceSource) -> Tick {
        if !self.state.is_rolling() {
            return Tick::Idle;
        }

        let face = Face::draw(source);
        if self.remaining > 0 {
            self.remaining -= 1;
            self.state.show(face);
            Tick::Frame(face)
        } else {
            let outcome = RollOutcome::classify(face);
            self.state.commit(outcome, &self.messages);
            Tick::Finished(outcome)
        }
    }

    /// Give up on the roll in progress without drawing a final face.
    ///
    /// Returns false when already idle.
    pub fn abandon(&mut self) -> bool {
        if !self.state.is_rolling() {
            return false;
        }
        self.state.abandon(&self.messages);
        self.remaining = 0;
        true
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> RollPhase {
        if self.state.is_rolling() {
            RollPhase::Animating
        } else {
            RollPhase::Idle
        }
    }

    /// Observable state.
    #[inline]
    pub fn state(&self) -> &RollState {
        &self.state
    }

    /// Cosmetic draws still to come in the current roll.
    #[inline]
    pub fn remaining_frames(&self) -> u32 {
        self.remaining
    }

    /// Messages this animation writes.
    #[inline]
    pub fn messages(&self) -> &MessageSet {
        &self.messages
    }

    /// Wait between a cosmetic draw and the next tick.
    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(ANIMATION_DELAY_MS)
    }
}

impl Default for RollAnimation {
    fn default() -> Self {
        Self::new(MessageSet::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RngDice, ScriptedDice};

    fn run_to_end(anim: &mut RollAnimation, dice: &mut dyn DiceSource) -> (u32, RollOutcome) {
        let mut frames = 0;
        loop {
            match anim.tick(dice) {
                Tick::Frame(_) => frames += 1,
                Tick::Finished(outcome) => return (frames, outcome),
                Tick::Idle => panic!("animation went idle without finishing"),
            }
        }
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut anim = RollAnimation::default();
        let mut dice = ScriptedDice::constant(9);
        assert_eq!(anim.tick(&mut dice), Tick::Idle);
        assert_eq!(dice.draw_count(), 0);
        assert_eq!(anim.state().current_value(), Face::MIN);
    }

    #[test]
    fn test_start_sets_placeholder() {
        let mut anim = RollAnimation::default();
        assert!(anim.start());
        assert!(anim.state().is_rolling());
        assert_eq!(anim.state().result_message(), "Rolling...");
        assert_eq!(anim.remaining_frames(), ANIMATION_ITERATIONS);
    }

    #[test]
    fn test_rejects_restart_while_animating() {
        let mut anim = RollAnimation::default();
        let mut dice = ScriptedDice::constant(4);
        assert!(anim.start());
        anim.tick(&mut dice);
        anim.tick(&mut dice);

        assert!(!anim.start());
        // Restart attempt must not rearm the frame counter.
        assert_eq!(anim.remaining_frames(), ANIMATION_ITERATIONS - 2);
    }

    #[test]
    fn test_sixteen_draws_per_roll() {
        let mut anim = RollAnimation::default();
        let mut dice = ScriptedDice::constant(11);
        anim.start();
        let (frames, outcome) = run_to_end(&mut anim, &mut dice);

        assert_eq!(frames, ANIMATION_ITERATIONS);
        assert_eq!(dice.draw_count(), 16);
        assert_eq!(outcome, RollOutcome::Normal(Face::clamped(11)));
        assert_eq!(anim.phase(), RollPhase::Idle);
    }

    #[test]
    fn test_message_untouched_during_frames() {
        let mut anim = RollAnimation::default();
        let mut dice = ScriptedDice::ending_with(20, ANIMATION_ITERATIONS as usize, 6);
        anim.start();
        for _ in 0..ANIMATION_ITERATIONS {
            assert!(matches!(anim.tick(&mut dice), Tick::Frame(f) if f == Face::MAX));
            assert_eq!(anim.state().result_message(), "Rolling...");
        }
        assert_eq!(anim.tick(&mut dice), Tick::Finished(RollOutcome::Normal(Face::clamped(6))));
        assert_eq!(anim.state().current_value().get(), 6);
        assert_eq!(anim.state().result_message(), "Result: 6");
    }

    #[test]
    fn test_critical_outcomes() {
        let mut anim = RollAnimation::default();

        let mut hit = ScriptedDice::ending_with(10, ANIMATION_ITERATIONS as usize, 20);
        anim.start();
        assert_eq!(run_to_end(&mut anim, &mut hit).1, RollOutcome::CriticalHit);
        assert_eq!(anim.state().result_message(), "CRITICAL HIT! ⚔️");

        let mut miss = ScriptedDice::ending_with(10, ANIMATION_ITERATIONS as usize, 1);
        anim.start();
        assert_eq!(run_to_end(&mut anim, &mut miss).1, RollOutcome::CriticalMiss);
        assert_eq!(anim.state().result_message(), "CRITICAL MISS! 💀");
    }

    #[test]
    fn test_repeated_rolls_stay_in_range() {
        let mut anim = RollAnimation::default();
        let mut dice = RngDice::seeded(99);
        for _ in 0..50 {
            assert!(anim.start());
            while let Tick::Frame(face) = anim.tick(&mut dice) {
                assert!((1..=20).contains(&face.get()));
            }
            let value = anim.state().current_value().get();
            assert!((1..=20).contains(&value));
        }
    }

    #[test]
    fn test_abandon_mid_roll() {
        let mut anim = RollAnimation::default();
        let mut dice = ScriptedDice::constant(4);
        assert!(!anim.abandon());

        anim.start();
        anim.tick(&mut dice);
        assert!(anim.abandon());
        assert_eq!(anim.phase(), RollPhase::Idle);
        assert_eq!(anim.remaining_frames(), 0);
        assert_eq!(anim.tick(&mut dice), Tick::Idle);
        assert!(anim.start());
    }

    #[test]
    fn test_interval() {
        let anim = RollAnimation::default();
        assert_eq!(anim.interval(), Duration::from_millis(80));
        assert_eq!(anim.interval() * ANIMATION_ITERATIONS, Duration::from_millis(1200));
    }
}
