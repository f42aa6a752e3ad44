use thiserror::Error;

use crate::llm_client::LlmError;

/// Interview-level error type.
/// Surfaced to the REPL, which decides whether to retry or abort.
#[derive(Debug, Error)]
pub enum InterviewError {
    /// The generation service failed, errored, or exceeded the per-call timeout.
    #[error("question generation unavailable: {0}")]
    GenerationUnavailable(#[from] LlmError),

    #[error("resume context error: {0}")]
    ResumeContext(String),
}

impl InterviewError {
    pub fn is_generation_unavailable(&self) -> bool {
        matches!(self, InterviewError::GenerationUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_llm_error_converts_to_generation_unavailable() {
        let err: InterviewError = LlmError::EmptyContent.into();
        assert!(err.is_generation_unavailable());
        assert_eq!(
            err.to_string(),
            "question generation unavailable: LLM returned empty content"
        );
    }

    #[test]
    fn test_timeout_is_generation_unavailable() {
        let err = InterviewError::from(LlmError::Timeout(Duration::from_secs(5)));
        assert!(err.is_generation_unavailable());
    }

    #[test]
    fn test_resume_error_is_not_generation_unavailable() {
        let err = InterviewError::ResumeContext("bad json".to_string());
        assert!(!err.is_generation_unavailable());
    }
}
