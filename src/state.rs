//! Observable roll state.

use crate::{Face, MessageSet, RollOutcome};

/// The three fields a presenter renders.
///
/// Only the roll machinery mutates it; everyone else receives snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollState {
    /// Face currently displayed
    current_value: Face,
    /// True from acceptance of a roll until its result is committed
    is_rolling: bool,
    /// Idle prompt, in-progress placeholder, or the latest result
    result_message: String,
}

impl RollState {
    /// Fresh state showing face 1 and the idle prompt.
    pub fn new(messages: &MessageSet) -> Self {
        Self {
            current_value: Face::MIN,
            is_rolling: false,
            result_message: messages.idle_prompt.clone(),
        }
    }

    #[inline]
    pub fn current_value(&self) -> Face {
        self.current_value
    }

    #[inline]
    pub fn is_rolling(&self) -> bool {
        self.is_rolling
    }

    #[inline]
    pub fn result_message(&self) -> &str {
        &self.result_message
    }

    pub(crate) fn begin(&mut self, messages: &MessageSet) {
        self.is_rolling = true;
        self.result_message = messages.in_progress.clone();
    }

    pub(crate) fn show(&mut self, face: Face) {
        self.current_value = face;
    }

    /// Commit the final face, its message and the idle flag together.
    pub(crate) fn commit(&mut self, outcome: RollOutcome, messages: &MessageSet) {
        self.current_value = outcome.face();
        self.result_message = messages.describe(outcome);
        self.is_rolling = false;
    }

    /// Drop an unfinished roll, back to the idle prompt.
    pub(crate) fn abandon(&mut self, messages: &MessageSet) {
        self.result_message = messages.idle_prompt.clone();
        self.is_rolling = false;
    }
}

impl Default for RollState {
    fn default() -> Self {
        Self::new(&MessageSet::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = RollState::default();
        assert_eq!(state.current_value(), Face::MIN);
        assert!(!state.is_rolling());
        assert_eq!(state.result_message(), "Tap the button to roll");
    }

    #[test]
    fn test_begin_and_commit() {
        let messages = MessageSet::default();
        let mut state = RollState::new(&messages);

        state.begin(&messages);
        assert!(state.is_rolling());
        assert_eq!(state.result_message(), "Rolling...");

        state.show(Face::clamped(9));
        assert_eq!(state.current_value().get(), 9);
        assert_eq!(state.result_message(), "Rolling...");

        state.commit(RollOutcome::CriticalHit, &messages);
        assert!(!state.is_rolling());
        assert_eq!(state.current_value(), Face::MAX);
        assert_eq!(state.result_message(), "CRITICAL HIT! ⚔️");
    }

    #[test]
    fn test_abandon_restores_prompt() {
        let messages = MessageSet::default();
        let mut state = RollState::new(&messages);
        state.begin(&messages);
        state.show(Face::clamped(4));

        state.abandon(&messages);
        assert!(!state.is_rolling());
        assert_eq!(state.current_value().get(), 4);
        assert_eq!(state.result_message(), "Tap the button to roll");
    }
}
