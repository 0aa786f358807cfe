use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use socratic_tutor::{
    DEFAULT_INFERENCE_URL, DEFAULT_MODEL, LlmClient, PromptTemplate, QuizEvaluator,
    RuntimeSettings, TextCompletion, Tutor, TutorConfig, TutorOptions,
};

use crate::resolve::{describe_optional, resolve_optional_string, resolve_positive, resolve_string};

/// Per-invocation overrides from the CLI.
#[derive(Debug, Default, Clone)]
pub(crate) struct TutorOverrides {
    pub(crate) inference_url: Option<String>,
    pub(crate) model: Option<String>,
    pub(crate) timeout_secs: Option<u64>,
}

pub(crate) fn resolve_tutor_config(
    overrides: TutorOverrides,
    runtime_settings: &RuntimeSettings,
) -> TutorConfig {
    let inference = &runtime_settings.inference;
    let tutor = &runtime_settings.tutor;
    let defaults = TutorConfig::default();
    TutorConfig {
        inference_url: resolve_string(
            overrides.inference_url,
            "SOCRATIC_TUTOR_INFERENCE_URL",
            inference.url.as_deref(),
            DEFAULT_INFERENCE_URL,
        ),
        model: resolve_string(
            overrides.model,
            "SOCRATIC_TUTOR_MODEL",
            inference.model.as_deref(),
            DEFAULT_MODEL,
        ),
        api_key: None,
        timeout_secs: resolve_positive(
            overrides.timeout_secs,
            "SOCRATIC_TUTOR_TIMEOUT_SECS",
            inference.timeout_secs,
            defaults.timeout_secs,
        ),
        max_attempts: resolve_positive(
            None,
            "SOCRATIC_TUTOR_MAX_ATTEMPTS",
            inference.max_attempts,
            defaults.max_attempts,
        ),
        retry_backoff_ms: resolve_positive(
            None,
            "SOCRATIC_TUTOR_RETRY_BACKOFF_MS",
            inference.retry_backoff_ms,
            defaults.retry_backoff_ms,
        ),
        context_window_turns: resolve_positive(
            None,
            "SOCRATIC_TUTOR_CONTEXT_WINDOW_TURNS",
            tutor.context_window_turns,
            defaults.context_window_turns,
        ),
        prompt_template_path: resolve_optional_string(
            None,
            "SOCRATIC_TUTOR_PROMPT_TEMPLATE",
            tutor.prompt_template_path.as_deref(),
        )
        .map(PathBuf::from),
    }
}

/// Build the tutor and quiz evaluator around one shared completion client.
///
/// Fails on configuration errors (missing credential, unreadable template); these abort startup.
pub(crate) fn build_services(config: &TutorConfig) -> Result<(Tutor, QuizEvaluator)> {
    config.validate()?;
    let api_key = config.require_api_key()?;
    let template = match config.prompt_template_path {
        Some(ref path) => PromptTemplate::load_socratic(path)?,
        None => PromptTemplate::socratic_default(),
    };
    let policy = config.completion_policy();
    tracing::info!(
        event = "tutor.startup.configured",
        inference_url = %config.inference_url,
        model = %config.model,
        template = template.version(),
        template_path = %describe_optional(
            config.prompt_template_path.as_ref().map(|path| path.display()),
            "builtin"
        ),
        timeout_secs = config.timeout_secs,
        max_attempts = config.max_attempts,
        context_window_turns = config.context_window_turns,
        "tutor configured"
    );
    let completion: Arc<dyn TextCompletion> = Arc::new(LlmClient::new(
        config.inference_url.clone(),
        config.model.clone(),
        api_key,
    ));
    let tutor = Tutor::new(
        Arc::clone(&completion),
        TutorOptions {
            template,
            policy,
            context_window_turns: config.context_window_turns,
        },
    );
    let quiz = QuizEvaluator::new(completion, policy);
    Ok((tutor, quiz))
}
