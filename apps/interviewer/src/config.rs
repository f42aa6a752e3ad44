use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::cli::Cli;
use crate::llm_client::{LlmProvider, LlmSettings};
use crate::models::resume::ResumeSource;

/// Application configuration loaded from environment variables, with
/// command-line flags taking precedence.
/// Fails at startup if the chosen provider's API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_provider: LlmProvider,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub generation_timeout_secs: u64,
    pub typing_delay_ms: u64,
    /// Closing-stage questions answered before the interview wraps up on its own.
    pub closing_question_limit: usize,
    pub resume: ResumeSource,
    pub rust_log: String,
}

impl Config {
    pub fn load(cli: &Cli) -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let llm_provider = match cli.provider {
            Some(provider) => provider,
            None => LlmProvider::from_str(&env_or("LLM_PROVIDER", "anthropic"))
                .map_err(|e| anyhow!(e))?,
        };

        let model = cli
            .model
            .clone()
            .or_else(|| std::env::var("LLM_MODEL").ok())
            .unwrap_or_else(|| llm_provider.default_model().to_string());

        let generation_timeout_secs = require_positive(
            "GENERATION_TIMEOUT_SECS",
            match cli.timeout_secs {
                Some(secs) => secs,
                None => parse_env("GENERATION_TIMEOUT_SECS", 60)?,
            },
        )?;

        let typing_delay_ms = if cli.no_typing {
            0
        } else {
            parse_env("TYPING_DELAY_MS", 10)?
        };

        let resume = resume_source(
            cli.no_resume,
            cli.resume
                .clone()
                .or_else(|| std::env::var("RESUME_PATH").ok().map(PathBuf::from)),
        );

        Ok(Config {
            llm_provider,
            api_key: require_env(llm_provider.api_key_var())?,
            model,
            temperature: parse_env("LLM_TEMPERATURE", 0.7)?,
            max_tokens: parse_env("LLM_MAX_TOKENS", 1024)?,
            generation_timeout_secs,
            typing_delay_ms,
            closing_question_limit: parse_env("CLOSING_QUESTION_LIMIT", 3)?,
            resume,
            rust_log: env_or("RUST_LOG", "warn"),
        })
    }

    pub fn llm_settings(&self) -> LlmSettings {
        LlmSettings {
            provider: self.llm_provider,
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            // HTTP timeout sits just above the controller's bound so the controller reports it.
            request_timeout: self.generation_timeout() + Duration::from_secs(5),
        }
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }
}

fn resume_source(disabled: bool, path: Option<PathBuf>) -> ResumeSource {
    match (disabled, path) {
        (true, _) => ResumeSource::None,
        (false, Some(path)) => ResumeSource::File(path),
        (false, None) => ResumeSource::Sample,
    }
}

fn require_positive(key: &str, value: u64) -> Result<u64> {
    if value == 0 {
        return Err(anyhow!("{key} must be at least 1"));
    }
    Ok(value)
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_value(key, std::env::var(key).ok(), default)
}

fn parse_value<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{value}'")),
        None => Ok(default),
    }
}
