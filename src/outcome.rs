//! Outcome classification and the messages shown for each outcome.

use crate::Face;

/// Placeholder substituted with the final face in [`MessageSet::result_template`].
pub const VALUE_PLACEHOLDER: &str = "{value}";

/// Classified result of a completed roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RollOutcome {
    /// Natural 20
    CriticalHit,
    /// Natural 1
    CriticalMiss,
    /// Anything in between
    Normal(Face),
}

impl RollOutcome {
    /// Classify a final face.
    ///
    /// ```rust
    /// use d20_core_view::{Face, RollOutcome};
    ///
    /// assert_eq!(RollOutcome::classify(Face::MAX), RollOutcome::CriticalHit);
    /// assert_eq!(RollOutcome::classify(Face::MIN), RollOutcome::CriticalMiss);
    /// let seven = Face::clamped(7);
    /// assert_eq!(RollOutcome::classify(seven), RollOutcome::Normal(seven));
    /// ```
    pub fn classify(face: Face) -> Self {
        if face.is_critical_hit() {
            RollOutcome::CriticalHit
        } else if face.is_critical_miss() {
            RollOutcome::CriticalMiss
        } else {
            RollOutcome::Normal(face)
        }
    }

    /// The face this outcome was classified from.
    pub fn face(self) -> Face {
        match self {
            RollOutcome::CriticalHit => Face::MAX,
            RollOutcome::CriticalMiss => Face::MIN,
            RollOutcome::Normal(face) => face,
        }
    }
}

/// Texts written to `result_message`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageSet {
    /// Shown before the first roll completes
    pub idle_prompt: String,
    /// Shown for the whole animation
    pub in_progress: String,
    /// Final message on a natural 20
    pub critical_hit: String,
    /// Final message on a natural 1
    pub critical_miss: String,
    /// Final message otherwise; `{value}` is replaced with the face
    pub result_template: String,
}

impl Default for MessageSet {
    fn default() -> Self {
        Self {
            idle_prompt: "Tap the button to roll".to_string(),
            in_progress: "Rolling...".to_string(),
            critical_hit: "CRITICAL HIT! ⚔️".to_string(),
            critical_miss: "CRITICAL MISS! 💀".to_string(),
            result_template: format!("Result: {VALUE_PLACEHOLDER}"),
        }
    }
}

impl MessageSet {
    /// Message describing `outcome`.
    pub fn describe(&self, outcome: RollOutcome) -> String {
        match outcome {
            RollOutcome::CriticalHit => self.critical_hit.clone(),
            RollOutcome::CriticalMiss => self.critical_miss.clone(),
            RollOutcome::Normal(face) => self
                .result_template
                .replace(VALUE_PLACEHOLDER, &face.to_string()),
        }
    }
}
