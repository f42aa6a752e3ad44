//! Interview stages and the Introduction sub-state machine.

use std::fmt;

/// One phase of the fixed interview progression.
///
/// Declaration order is the progression order; `Ord` follows it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    #[default]
    Introduction,
    General,
    Technical,
    Experience,
    Behavioral,
    Closing,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Introduction,
        Stage::General,
        Stage::Technical,
        Stage::Experience,
        Stage::Behavioral,
        Stage::Closing,
    ];

    /// The following stage, or `None` at Closing.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Introduction => Some(Stage::General),
            Stage::General => Some(Stage::Technical),
            Stage::Technical => Some(Stage::Experience),
            Stage::Experience => Some(Stage::Behavioral),
            Stage::Behavioral => Some(Stage::Closing),
            Stage::Closing => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Stage::Closing
    }

    /// Label used in prompts and logs.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Introduction => "introduction",
            Stage::General => "general_questions",
            Stage::Technical => "technical_questions",
            Stage::Experience => "experience_questions",
            Stage::Behavioral => "behavioral_questions",
            Stage::Closing => "closing",
        }
    }

    /// What kind of question is appropriate in this stage.
    /// `role` is interpolated for the Technical stage.
    pub fn instruction(self, role: &str) -> String {
        match self {
            Stage::Introduction => {
                "Ask for the candidate's name or the position they are applying for.".to_string()
            }
            Stage::General => {
                "Ask about their background, motivation, and general qualifications.".to_string()
            }
            Stage::Technical => {
                format!("Ask a specific technical question relevant to the {role} role.")
            }
            Stage::Experience => "Ask about their past experience, referencing their resume \
                information when possible."
                .to_string(),
            Stage::Behavioral => {
                "Ask how they handled a specific situation in the past.".to_string()
            }
            Stage::Closing => "Ask if they have any questions, or provide a conclusion to the \
                interview."
                .to_string(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Explicit sub-state of the Introduction stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IntroStep {
    #[default]
    NeedName,
    NeedRole,
    Ready,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_walks_fixed_order() {
        let mut walked = vec![Stage::Introduction];
        let mut current = Stage::Introduction;
        while let Some(next) = current.next() {
            walked.push(next);
            current = next;
        }
        assert_eq!(walked, Stage::ALL.to_vec());
    }

    #[test]
    fn test_closing_is_terminal() {
        assert!(Stage::Closing.is_terminal());
        assert_eq!(Stage::Closing.next(), None);
        assert!(Stage::ALL[..5].iter().all(|s| !s.is_terminal()));
    }

    #[test]
    fn test_order_matches_progression() {
        for pair in Stage::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].next(), Some(pair[1]));
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Stage::General.to_string(), "general_questions");
        assert_eq!(Stage::Closing.label(), "closing");
    }

    #[test]
    fn test_technical_instruction_mentions_role() {
        let instruction = Stage::Technical.instruction("Data Engineer");
        assert!(instruction.contains("Data Engineer"));
    }

    #[test]
    fn test_experience_instruction_references_resume() {
        assert!(Stage::Experience.instruction("x").contains("resume"));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Stage::default(), Stage::Introduction);
        assert_eq!(IntroStep::default(), IntroStep::NeedName);
    }
}
