//! Dialogue Controller — decides the next question and when to change stage.
//!
//! Flow per turn: record exchange → (Introduction: capture name/role) →
//! advance decision via LLM → next question (scripted or generated).
//!
//! This is the only component that talks to the generation service. Every
//! operation works on a draft copy of the session and commits it only on
//! success, so a failed call leaves the session exactly as it was.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::errors::InterviewError;
use crate::interview::decision::AdvanceDecision;
use crate::interview::prompts::{
    role_prompt, welcome_prompt, ADVANCE_DECISION_PROMPT_TEMPLATE, NAME_PROMPT,
    QUESTION_PROMPT_TEMPLATE,
};
use crate::interview::session::Session;
use crate::interview::stage::{IntroStep, Stage};
use crate::llm_client::{GenerationService, LlmError};
use crate::models::resume::render_resume;

pub struct DialogueController {
    session: Session,
    generator: Arc<dyn GenerationService>,
    /// Upper bound on a single generation call.
    timeout: Duration,
}

impl DialogueController {
    pub fn new(
        generator: Arc<dyn GenerationService>,
        session: Session,
        timeout: Duration,
    ) -> Self {
        Self {
            session,
            generator,
            timeout,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Discards the current interview and starts over at Introduction.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Produces the next question and remembers it as the pending question.
    pub async fn next_question(&mut self) -> Result<String, InterviewError> {
        let mut draft = self.session.clone();
        let question = self.question_for(&mut draft).await?;
        self.session = draft;
        Ok(question)
    }

    /// Records the answer to the pending question, decides whether to advance,
    /// and returns the next question.
    pub async fn process_response(&mut self, answer: &str) -> Result<String, InterviewError> {
        let mut draft = self.session.clone();
        record_answer(&mut draft, answer);

        // A blank name or role is not stored; the same question is asked again.
        let introducing = match (draft.stage(), draft.intro_step()) {
            (Stage::Introduction, IntroStep::NeedName) => {
                draft.set_candidate_name(answer.trim());
                true
            }
            (Stage::Introduction, IntroStep::NeedRole) => {
                draft.set_target_role(answer.trim());
                true
            }
            _ => false,
        };

        if !introducing && !draft.stage().is_terminal() {
            let decision = self.decide_advance(&draft).await?;
            debug!("Advance decision at {}: {:?}", draft.stage(), decision);
            if decision.should_advance() {
                draft.advance();
            }
        }

        let question = self.question_for(&mut draft).await?;
        self.session = draft;
        Ok(question)
    }

    /// Records the answer to the final question without generating anything further.
    pub fn conclude(&mut self, answer: &str) {
        record_answer(&mut self.session, answer);
        info!(
            "Interview concluded after {} exchanges",
            self.session.transcript().len()
        );
    }

    async fn question_for(&self, session: &mut Session) -> Result<String, InterviewError> {
        let question = if session.stage() == Stage::Introduction {
            match session.intro_step() {
                IntroStep::NeedName => NAME_PROMPT.to_string(),
                IntroStep::NeedRole => role_prompt(session.candidate_name().unwrap_or_default()),
                IntroStep::Ready => {
                    session.advance();
                    welcome_prompt(
                        session.candidate_name().unwrap_or_default(),
                        session.target_role().unwrap_or_default(),
                    )
                }
            }
        } else {
            let prompt = build_question_prompt(session);
            self.generate(&prompt).await?
        };

        session.set_pending_question(question.clone());
        Ok(question)
    }

    async fn decide_advance(&self, session: &Session) -> Result<AdvanceDecision, InterviewError> {
        let prompt = ADVANCE_DECISION_PROMPT_TEMPLATE
            .replace("{chat_history}", &session.format_history())
            .replace("{stage}", session.stage().label());
        let response = self.generate(&prompt).await?;
        Ok(AdvanceDecision::interpret(&response))
    }

    /// One bounded attempt against the generation service.
    async fn generate(&self, prompt: &str) -> Result<String, InterviewError> {
        match tokio::time::timeout(self.timeout, self.generator.generate(prompt)).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => {
                warn!("Generation call failed: {e}");
                Err(InterviewError::GenerationUnavailable(e))
            }
            Err(_) => {
                warn!("Generation call exceeded {}s", self.timeout.as_secs());
                Err(InterviewError::GenerationUnavailable(LlmError::Timeout(
                    self.timeout,
                )))
            }
        }
    }
}

fn record_answer(session: &mut Session, answer: &str) {
    let question = match session.pending_question() {
        Some(q) => q.to_string(),
        None => {
            warn!("Answer received with no pending question");
            String::new()
        }
    };
    session.record_exchange(question, answer);
}

/// Fills the question template for any post-introduction stage.
fn build_question_prompt(session: &Session) -> String {
    let role = session.target_role().unwrap_or("the position");
    let stage = session.stage();

    QUESTION_PROMPT_TEMPLATE
        .replace("{job_position}", role)
        .replace("{stage}", stage.label())
        .replace("{name}", session.candidate_name().unwrap_or("Unknown"))
        .replace("{chat_history}", &session.format_history())
        .replace("{resume_info}", &render_resume(session.resume_context()))
        .replace("{stage_instruction}", &stage.instruction(role))
}
