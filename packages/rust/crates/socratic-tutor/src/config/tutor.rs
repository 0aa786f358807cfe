//! Tutor configuration: inference endpoint, model, credential, call policy.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TutorError};
use crate::llm::CompletionPolicy;
use crate::tutor::CONTEXT_WINDOW_TURNS;

/// Gemini's OpenAI-compatible chat completions endpoint.
pub const DEFAULT_INFERENCE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Environment variables consulted for the API key, in order.
pub const API_KEY_ENV_VARS: &[&str] = &["SOCRATIC_TUTOR_API_KEY", "GOOGLE_AI_API_KEY"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorConfig {
    /// Chat completions URL (OpenAI-compatible).
    pub inference_url: String,
    /// Model id sent with each request.
    pub model: String,
    /// API key; when None, resolved from the environment.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Upper bound for one completion call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Total completion attempts per turn (1 = no retry).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Linear backoff step between attempts.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// Most recent turns included in the prompt.
    #[serde(default = "default_context_window_turns")]
    pub context_window_turns: usize,
    /// Replacement for the compiled-in tutoring template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_template_path: Option<PathBuf>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    1
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_context_window_turns() -> usize {
    CONTEXT_WINDOW_TURNS
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            inference_url: DEFAULT_INFERENCE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            context_window_turns: default_context_window_turns(),
            prompt_template_path: None,
        }
    }
}

impl TutorConfig {
    pub fn completion_policy(&self) -> CompletionPolicy {
        CompletionPolicy {
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
            max_attempts: self.max_attempts.max(1),
            retry_backoff: Duration::from_millis(self.retry_backoff_ms),
        }
    }

    /// Whether the endpoint is a local proxy that holds its own credential.
    pub fn is_local_endpoint(&self) -> bool {
        self.inference_url.contains("127.0.0.1") || self.inference_url.contains("localhost")
    }

    /// Resolve API key: config value, or the first non-empty env var in `API_KEY_ENV_VARS`.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key
            && !key.trim().is_empty()
        {
            return Some(key.clone());
        }
        API_KEY_ENV_VARS.iter().find_map(|name| {
            std::env::var(name)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        })
    }

    /// Key to send, or a fatal config error when a remote endpoint has none.
    pub fn require_api_key(&self) -> Result<Option<String>> {
        match self.resolve_api_key() {
            Some(key) => Ok(Some(key)),
            None if self.is_local_endpoint() => Ok(None),
            None => Err(TutorError::Config(format!(
                "no API key for {} (set one of: {})",
                self.inference_url,
                API_KEY_ENV_VARS.join(", ")
            ))),
        }
    }

    /// Reject values that would make every turn fail.
    pub fn validate(&self) -> Result<()> {
        if self.inference_url.trim().is_empty() {
            return Err(TutorError::Config("inference_url must be non-empty".into()));
        }
        if self.model.trim().is_empty() {
            return Err(TutorError::Config("model must be non-empty".into()));
        }
        if self.context_window_turns == 0 {
            return Err(TutorError::Config(
                "context_window_turns must be positive".into(),
            ));
        }
        Ok(())
    }
}
