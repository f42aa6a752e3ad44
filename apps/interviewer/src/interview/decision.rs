//! Advance-decision parsing.
//!
//! The model is asked to answer "YES" or "NO". The matching rule is a plain,
//! case-sensitive substring check on "YES"; everything else means stay.

use tracing::warn;

/// Literal token that counts as an affirmative advance decision.
pub const AFFIRMATIVE_TOKEN: &str = "YES";
const NEGATIVE_TOKEN: &str = "NO";

/// Whether the decision text counts as "advance".
pub fn is_affirmative(text: &str) -> bool {
    text.contains(AFFIRMATIVE_TOKEN)
}

/// Interpreted outcome of an advance-decision call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceDecision {
    Advance,
    Stay,
    /// Neither token found. Treated as Stay.
    Unrecognized,
}

impl AdvanceDecision {
    pub fn parse(text: &str) -> Self {
        if is_affirmative(text) {
            AdvanceDecision::Advance
        } else if text.contains(NEGATIVE_TOKEN) {
            AdvanceDecision::Stay
        } else {
            AdvanceDecision::Unrecognized
        }
    }

    /// Parses and logs the silent fallback when the response is malformed.
    pub fn interpret(text: &str) -> Self {
        let decision = Self::parse(text);
        if decision == AdvanceDecision::Unrecognized {
            warn!(
                "Advance decision response was neither YES nor NO, staying in current stage: {:?}",
                text.chars().take(80).collect::<String>()
            );
        }
        decision
    }

    pub fn should_advance(self) -> bool {
        self == AdvanceDecision::Advance
    }
}
