//! Session state — the single source of truth for one interview's progress.

use tracing::info;

use crate::interview::stage::{IntroStep, Stage};
use crate::models::resume::ResumeContext;

/// One completed question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
}

/// Complete mutable state of one interview.
///
/// `stage` only moves forward (via `advance`) and only returns to
/// Introduction on `reset`. The transcript is append-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    candidate_name: Option<String>,
    target_role: Option<String>,
    stage: Stage,
    intro: IntroStep,
    transcript: Vec<Exchange>,
    resume_context: Option<ResumeContext>,
    pending_question: Option<String>,
    /// Transcript length when the current stage was entered.
    stage_started_at: usize,
}

impl Session {
    pub fn new(resume_context: Option<ResumeContext>) -> Self {
        Self {
            resume_context,
            ..Self::default()
        }
    }

    /// Clears all interview progress. The injected resume context is kept.
    pub fn reset(&mut self) {
        let resume_context = self.resume_context.take();
        *self = Session::new(resume_context);
        info!("New interview session initialized");
    }

    /// Appends a question/answer pair. Any answer text is accepted as-is.
    pub fn record_exchange(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.transcript.push(Exchange {
            question: question.into(),
            answer: answer.into(),
        });
    }

    /// Moves to the next stage. No-op at Closing, and in Introduction until
    /// both name and role are known. Returns whether the stage changed.
    pub fn advance(&mut self) -> bool {
        if self.stage == Stage::Introduction && self.intro != IntroStep::Ready {
            return false;
        }
        match self.stage.next() {
            Some(next) => {
                self.stage = next;
                self.stage_started_at = self.transcript.len();
                info!("Moving to interview stage: {next}");
                true
            }
            None => false,
        }
    }

    /// Role-tagged rendering of the transcript for prompts. Empty when no exchanges.
    pub fn format_history(&self) -> String {
        self.transcript
            .iter()
            .map(|e| format!("Interviewer: {}\nCandidate: {}", e.question, e.answer))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Records the candidate's name. Only takes effect while the name is still
    /// needed; blank input leaves it unset.
    pub fn set_candidate_name(&mut self, name: &str) -> bool {
        if self.intro != IntroStep::NeedName || name.trim().is_empty() {
            return false;
        }
        self.candidate_name = Some(name.to_string());
        self.intro = IntroStep::NeedRole;
        true
    }

    /// Records the target role. Only takes effect right after the name was given;
    /// blank input leaves it unset.
    pub fn set_target_role(&mut self, role: &str) -> bool {
        if self.intro != IntroStep::NeedRole || role.trim().is_empty() {
            return false;
        }
        self.target_role = Some(role.to_string());
        self.intro = IntroStep::Ready;
        true
    }

    pub fn set_pending_question(&mut self, question: impl Into<String>) {
        self.pending_question = Some(question.into());
    }

    pub fn candidate_name(&self) -> Option<&str> {
        self.candidate_name.as_deref()
    }

    pub fn target_role(&self) -> Option<&str> {
        self.target_role.as_deref()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn intro_step(&self) -> IntroStep {
        self.intro
    }

    pub fn transcript(&self) -> &[Exchange] {
        &self.transcript
    }

    pub fn resume_context(&self) -> Option<&ResumeContext> {
        self.resume_context.as_ref()
    }

    pub fn pending_question(&self) -> Option<&str> {
        self.pending_question.as_deref()
    }

    /// Exchanges completed since the current stage was entered.
    pub fn exchanges_in_stage(&self) -> usize {
        self.transcript.len().saturating_sub(self.stage_started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_fresh() {
        let session = Session::new(None);
        assert_eq!(session.stage(), Stage::Introduction);
        assert_eq!(session.intro_step(), IntroStep::NeedName);
        assert!(session.candidate_name().is_none());
        assert!(session.target_role().is_none());
        assert!(session.transcript().is_empty());
        assert!(session.pending_question().is_none());
    }

    #[test]
    fn test_advance_is_monotonic_and_idempotent_at_closing() {
        let mut session = Session::new(None);
        session.set_candidate_name("Alice");
        session.set_target_role("Engineer");
        let mut seen = vec![session.stage()];
        while session.advance() {
            assert!(session.stage() > *seen.last().unwrap());
            seen.push(session.stage());
        }
        assert_eq!(seen, Stage::ALL.to_vec());

        for _ in 0..5 {
            assert!(!session.advance());
            assert_eq!(session.stage(), Stage::Closing);
        }
    }

    #[test]
    fn test_record_exchange_preserves_order() {
        let mut session = Session::new(None);
        for i in 0..10 {
            session.record_exchange(format!("q{i}"), format!("a{i}"));
        }
        assert_eq!(session.transcript().len(), 10);
        for (i, exchange) in session.transcript().iter().enumerate() {
            assert_eq!(exchange.question, format!("q{i}"));
            assert_eq!(exchange.answer, format!("a{i}"));
        }
    }

    #[test]
    fn test_record_exchange_accepts_empty_answer() {
        let mut session = Session::new(None);
        session.record_exchange("Anything to add?", "");
        assert_eq!(session.transcript()[0].answer, "");
    }

    #[test]
    fn test_format_history_empty() {
        assert_eq!(Session::new(None).format_history(), "");
    }

    #[test]
    fn test_format_history_role_tagged() {
        let mut session = Session::new(None);
        session.record_exchange("What is your name?", "Alice");
        session.record_exchange("Which role?", "Engineer");
        assert_eq!(
            session.format_history(),
            "Interviewer: What is your name?\nCandidate: Alice\n\
             Interviewer: Which role?\nCandidate: Engineer"
        );
    }

    #[test]
    fn test_intro_setters_follow_sub_state() {
        let mut session = Session::new(None);
        assert!(!session.set_target_role("Engineer"), "role before name is ignored");
        assert!(session.set_candidate_name("Alice"));
        assert_eq!(session.intro_step(), IntroStep::NeedRole);
        assert!(!session.set_candidate_name("Bob"), "name is set once");
        assert!(session.set_target_role("Engineer"));
        assert_eq!(session.intro_step(), IntroStep::Ready);
        assert!(!session.set_target_role("Manager"), "role is set once");

        assert_eq!(session.candidate_name(), Some("Alice"));
        assert_eq!(session.target_role(), Some("Engineer"));
    }

    #[test]
    fn test_blank_intro_answers_leave_fields_unset() {
        let mut session = Session::new(None);
        assert!(!session.set_candidate_name("   "));
        assert_eq!(session.intro_step(), IntroStep::NeedName);
        assert!(session.candidate_name().is_none());

        session.set_candidate_name("Alice");
        assert!(!session.set_target_role("\t\n"));
        assert_eq!(session.intro_step(), IntroStep::NeedRole);
        assert!(session.target_role().is_none());
    }

    #[test]
    fn test_advance_waits_for_introduction() {
        let mut session = Session::new(None);
        assert!(!session.advance());
        assert_eq!(session.stage(), Stage::Introduction);

        session.set_candidate_name("Alice");
        assert!(!session.advance());
        assert_eq!(session.stage(), Stage::Introduction);

        session.set_target_role("Engineer");
        assert!(session.advance());
        assert_eq!(session.stage(), Stage::General);
    }

    #[test]
    fn test_reset_matches_fresh_session() {
        let resume = ResumeContext::sample();
        let mut session = Session::new(Some(resume.clone()));
        session.set_candidate_name("Alice");
        session.set_target_role("Engineer");
        session.record_exchange("q", "a");
        session.set_pending_question("next?");
        session.advance();
        session.advance();

        session.reset();

        assert_eq!(session, Session::new(Some(resume)));
    }

    #[test]
    fn test_exchanges_in_stage_restart_on_advance() {
        let mut session = Session::new(None);
        session.set_candidate_name("Alice");
        session.set_target_role("Engineer");
        session.record_exchange("q1", "a1");
        assert_eq!(session.exchanges_in_stage(), 1);

        session.advance();
        assert_eq!(session.exchanges_in_stage(), 0);
        session.record_exchange("q2", "a2");
        session.record_exchange("q3", "a3");
        assert_eq!(session.exchanges_in_stage(), 2);
    }
}
