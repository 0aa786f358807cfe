//! LLM client: OpenAI-compatible chat completions, one prompt in, one text out.

use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TutorError;

/// External text-completion capability. Tests substitute scripted doubles.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Send one prompt and return the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [PromptMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct PromptMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response: choices[0].message.content.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP client for chat completions.
pub struct LlmClient {
    client: reqwest::Client,
    inference_url: String,
    model: String,
    api_key: Option<String>,
}

impl LlmClient {
    pub fn new(inference_url: String, model: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            inference_url,
            model,
            api_key,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextCompletion for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: [PromptMessage {
                role: "user",
                content: prompt,
            }],
        };
        let mut req = self
            .client
            .post(&self.inference_url)
            .json(&body);
        if let Some(ref key) = self.api_key {
            req = req.header("Authorization", format!("Bearer {key}"));
        }
        let res = req.send().await?;
        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            return Err(anyhow::anyhow!("LLM API error {status}: {text}"));
        }
        let parsed: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow::anyhow!("LLM response parse error: {e}; body: {text}"))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| anyhow::anyhow!("LLM response has no content"))
    }
}

/// Per-call bound and retry schedule for the completion capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionPolicy {
    pub timeout: Duration,
    /// Total attempts, including the first. `1` disables retry.
    pub max_attempts: u32,
    /// Backoff before attempt `n + 1` is `retry_backoff * n`.
    pub retry_backoff: Duration,
}

impl Default for CompletionPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 1,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

/// Run one completion under `policy`, mapping every failure to an upstream error kind.
pub async fn complete_with_policy(
    completion: &dyn TextCompletion,
    prompt: &str,
    policy: CompletionPolicy,
) -> std::result::Result<String, TutorError> {
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        let started = Instant::now();
        let error = match tokio::time::timeout(policy.timeout, completion.complete(prompt)).await {
            Ok(Ok(text)) => {
                tracing::debug!(
                    event = "tutor.llm.completed",
                    attempt,
                    elapsed_ms = started.elapsed().as_millis(),
                    chars = text.len(),
                    "completion received"
                );
                return Ok(text);
            }
            Ok(Err(error)) => TutorError::UpstreamFailure(error.to_string()),
            Err(_) => TutorError::Timeout(policy.timeout.as_millis()),
        };
        tracing::warn!(
            event = "tutor.llm.attempt_failed",
            attempt,
            max_attempts = attempts,
            kind = classify_upstream_error(&error),
            error = %error,
            "completion attempt failed"
        );
        if attempt >= attempts {
            return Err(error);
        }
        tokio::time::sleep(policy.retry_backoff * attempt).await;
        attempt += 1;
    }
}

/// Coarse diagnostic label for an upstream failure; used for logs only.
pub fn classify_upstream_error(error: &TutorError) -> &'static str {
    if matches!(error, TutorError::Timeout(_)) {
        return "timeout";
    }
    let text = error.to_string().to_ascii_lowercase();
    if text.contains("quota") || text.contains("rate limit") || text.contains("429") {
        "rate_limited"
    } else if text.contains("timeout") || text.contains("timed out") {
        "timeout"
    } else if text.contains("network") || text.contains("connection") || text.contains("connect")
    {
        "network"
    } else {
        "unknown"
    }
}
