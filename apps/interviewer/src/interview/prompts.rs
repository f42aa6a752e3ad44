// All prompt text for the interview module.
// Scripted introduction lines are sent without any model call.

/// First scripted question of every session.
pub const NAME_PROMPT: &str =
    "Hello! I'm your AI interviewer today. Could you please tell me your name?";

/// Scripted role question. Interpolates the candidate's name.
pub fn role_prompt(name: &str) -> String {
    format!("Nice to meet you, {name}! What position are you applying for?")
}

/// Scripted hand-off into the substantive interview.
pub fn welcome_prompt(name: &str, role: &str) -> String {
    format!(
        "Thank you, {name}. Let's begin the interview for the {role} position. \
        Could you tell me a bit about yourself and your professional background?"
    )
}

/// Question generation template.
/// Replace: {job_position}, {stage}, {name}, {chat_history}, {resume_info}, {stage_instruction}
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"You are an expert AI interviewer conducting a job interview for the position of {job_position}.

Current interview stage: {stage}
Candidate name: {name}
Previous conversation:
{chat_history}

Resume information: {resume_info}

Based on the current stage and information above, generate a relevant, professional interview question.

For this stage: {stage_instruction}

Generate only ONE question that's appropriate for the current stage. Make it conversational and engaging."#;

/// Advance decision template.
/// Replace: {chat_history}, {stage}
pub const ADVANCE_DECISION_PROMPT_TEMPLATE: &str = r#"Based on the interview conversation so far:
{chat_history}

Current stage: {stage}

Should the interviewer move to the next stage of the interview? Consider:
1. Have enough questions been asked in the current stage?
2. Has the candidate provided sufficient information?
3. Is it natural to transition to the next stage now?

Respond with only "YES" or "NO"."#;

/// Phrases that mark a question as the interview's final remark.
const CLOSING_REMARK_MARKERS: &[&str] = &["thank you for your time", "interview is complete"];

/// Whether a question reads as the interviewer wrapping up.
pub fn is_closing_remark(question: &str) -> bool {
    let lower = question.to_lowercase();
    CLOSING_REMARK_MARKERS.iter().any(|m| lower.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_prompts_interpolate() {
        assert_eq!(
            role_prompt("Alice"),
            "Nice to meet you, Alice! What position are you applying for?"
        );
        let welcome = welcome_prompt("Alice", "Engineer");
        assert!(welcome.starts_with("Thank you, Alice."));
        assert!(welcome.contains("the Engineer position"));
    }

    #[test]
    fn test_templates_have_placeholders() {
        for key in [
            "{job_position}",
            "{stage}",
            "{name}",
            "{chat_history}",
            "{resume_info}",
            "{stage_instruction}",
        ] {
            assert!(QUESTION_PROMPT_TEMPLATE.contains(key), "missing {key}");
        }
        assert!(ADVANCE_DECISION_PROMPT_TEMPLATE.contains("{chat_history}"));
        assert!(ADVANCE_DECISION_PROMPT_TEMPLATE.contains("{stage}"));
    }

    #[test]
    fn test_closing_remark_detection() {
        assert!(is_closing_remark("Thank you for your time today, Alice!"));
        assert!(is_closing_remark("This interview is complete. Goodbye."));
        assert!(!is_closing_remark("Do you have any questions for us?"));
    }
}
