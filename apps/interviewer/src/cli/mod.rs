pub mod repl;

use std::path::PathBuf;

use clap::Parser;

use crate::llm_client::LlmProvider;

/// Interviewer — a staged, LLM-driven job interview in your terminal.
#[derive(Debug, Parser)]
#[command(name = "interviewer", version, about)]
pub struct Cli {
    /// Resume context as a JSON file (defaults to the built-in sample resume).
    #[arg(long, value_name = "FILE")]
    pub resume: Option<PathBuf>,

    /// Run without any resume context.
    #[arg(long, conflicts_with = "resume")]
    pub no_resume: bool,

    /// Model provider: "anthropic" or "huggingface" (overrides LLM_PROVIDER).
    #[arg(long)]
    pub provider: Option<LlmProvider>,

    /// Model name (overrides LLM_MODEL).
    #[arg(long)]
    pub model: Option<String>,

    /// Per-call generation timeout in seconds (overrides GENERATION_TIMEOUT_SECS).
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Print questions instantly instead of typing them out.
    #[arg(long)]
    pub no_typing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["interviewer"]).unwrap();
        assert!(cli.resume.is_none());
        assert!(!cli.no_resume);
        assert!(cli.provider.is_none());
        assert!(!cli.no_typing);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "interviewer",
            "--resume",
            "me.json",
            "--provider",
            "huggingface",
            "--model",
            "mistralai/Mistral-7B-Instruct-v0.3",
            "--timeout-secs",
            "20",
            "--no-typing",
        ])
        .unwrap();
        assert_eq!(cli.resume, Some(PathBuf::from("me.json")));
        assert_eq!(cli.provider, Some(LlmProvider::HuggingFace));
        assert_eq!(cli.model.as_deref(), Some("mistralai/Mistral-7B-Instruct-v0.3"));
        assert_eq!(cli.timeout_secs, Some(20));
        assert!(cli.no_typing);
    }

    #[test]
    fn test_resume_and_no_resume_conflict() {
        assert!(Cli::try_parse_from(["interviewer", "--resume", "a.json", "--no-resume"]).is_err());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        assert!(Cli::try_parse_from(["interviewer", "--provider", "openai"]).is_err());
    }
}
