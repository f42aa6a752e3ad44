// Shared prompt constants.
// The interview module defines its own prompt templates in interview/prompts.rs.
// This file contains the cross-cutting system prompt sent with every call.

/// System prompt sent with every generation request.
pub const INTERVIEWER_SYSTEM: &str = "You are an expert, professional job interviewer. \
    Respond with exactly what is asked for and nothing else. \
    Do NOT add preambles, role labels, or explanations. \
    Do NOT answer on behalf of the candidate.";
