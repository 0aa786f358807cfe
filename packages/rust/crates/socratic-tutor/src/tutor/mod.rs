//! Tutor: transcript + mastery → prompt → completion → normalized `TutorResponse`.
//!
//! `Tutor::generate` always returns a usable response. Upstream failures, timeouts and
//! malformed completions are logged and answered with a static fallback.

mod context;
mod extract;
mod normalize;

use std::sync::Arc;
use std::time::Instant;

pub use context::{CONTEXT_WINDOW_TURNS, build_context, format_array};
pub use extract::extract_json;
pub use normalize::{
    DEFAULT_QUESTION, TutorPayload, VisualizerPayload, normalize, parse_payload,
};

use crate::contracts::{
    AnswerAnalysis, ConversationTurn, MasteryMap, TutorResponse, VisualizerStateUpdate,
};
use crate::error::{Result, TutorError};
use crate::llm::{CompletionPolicy, TextCompletion, classify_upstream_error, complete_with_policy};
use crate::prompts::{PromptTemplate, PromptVars, render_socratic_prompt};

/// Question used when the completion could not be parsed.
pub const MALFORMED_FALLBACK_QUESTION: &str =
    "That's an interesting point! Can you elaborate on your thinking?";

/// Raw completion text kept in debug logs.
const LOGGED_COMPLETION_CHARS: usize = 500;

/// Tunables for a `Tutor`.
#[derive(Debug, Clone)]
pub struct TutorOptions {
    pub template: PromptTemplate,
    pub policy: CompletionPolicy,
    pub context_window_turns: usize,
}

impl Default for TutorOptions {
    fn default() -> Self {
        Self {
            template: PromptTemplate::socratic_default(),
            policy: CompletionPolicy::default(),
            context_window_turns: CONTEXT_WINDOW_TURNS,
        }
    }
}

/// Socratic tutor bound to one completion client. Holds no per-learner state.
pub struct Tutor {
    completion: Arc<dyn TextCompletion>,
    options: TutorOptions,
}

impl Tutor {
    pub fn new(completion: Arc<dyn TextCompletion>, options: TutorOptions) -> Self {
        Self {
            completion,
            options,
        }
    }

    pub fn options(&self) -> &TutorOptions {
        &self.options
    }

    /// Produce the next tutoring response. Never fails.
    pub async fn generate(
        &self,
        algorithm: &str,
        turns: &[ConversationTurn],
        mastery: &MasteryMap,
        array: Option<&[i64]>,
    ) -> TutorResponse {
        let started = Instant::now();
        let current_mastery = mastery.get_or_zero(algorithm);
        match self
            .try_generate(algorithm, turns, current_mastery, array)
            .await
        {
            Ok(response) => {
                tracing::info!(
                    event = "tutor.generate.completed",
                    algorithm,
                    analysis = response.analysis_of_user_answer.as_str(),
                    xp = response.xp_awarded,
                    elapsed_ms = started.elapsed().as_millis(),
                    "tutor response ready"
                );
                response
            }
            Err(error) => {
                let kind = if error.is_upstream() {
                    classify_upstream_error(&error)
                } else {
                    "malformed_output"
                };
                tracing::warn!(
                    event = "tutor.generate.fallback",
                    algorithm,
                    kind,
                    error = %error,
                    elapsed_ms = started.elapsed().as_millis(),
                    "returning fallback tutor response"
                );
                fallback_response(algorithm, current_mastery, &error)
            }
        }
    }

    async fn try_generate(
        &self,
        algorithm: &str,
        turns: &[ConversationTurn],
        current_mastery: f64,
        array: Option<&[i64]>,
    ) -> Result<TutorResponse> {
        let context = build_context(turns, array, self.options.context_window_turns);
        let prompt = render_socratic_prompt(
            &self.options.template,
            PromptVars {
                algorithm,
                mastery: current_mastery,
                context: &context,
            },
        );
        tracing::debug!(
            event = "tutor.generate.prompt",
            algorithm,
            template = self.options.template.version(),
            turns = turns.len(),
            prompt_chars = prompt.len(),
            "prompt rendered"
        );
        let raw = complete_with_policy(self.completion.as_ref(), &prompt, self.options.policy)
            .await?;
        let json = extract_json(&raw).inspect_err(|_| log_malformed(&raw))?;
        let payload = parse_payload(json).inspect_err(|_| log_malformed(&raw))?;
        Ok(normalize(payload, algorithm, current_mastery))
    }
}

fn log_malformed(raw: &str) {
    let preview: String = raw.chars().take(LOGGED_COMPLETION_CHARS).collect();
    tracing::debug!(
        event = "tutor.generate.malformed_completion",
        preview = %preview,
        "completion was not a JSON object"
    );
}

/// Static response for a failed turn: mastery unchanged, idle visualizer, no XP.
pub fn fallback_response(
    algorithm: &str,
    current_mastery: f64,
    error: &TutorError,
) -> TutorResponse {
    let socratic_question = if error.is_upstream() {
        format!(
            "I'm experiencing a technical issue. Let's continue with {} - what would you like to explore about this algorithm?",
            display_algorithm_name(algorithm)
        )
    } else {
        MALFORMED_FALLBACK_QUESTION.to_string()
    };
    TutorResponse {
        socratic_question,
        analysis_of_user_answer: AnswerAnalysis::Continuing,
        learner_mastery_update: MasteryMap::single(algorithm, current_mastery),
        visualizer_state_update: VisualizerStateUpdate::idle(),
        xp_awarded: 0,
    }
}

/// `bubbleSort` → `bubble Sort`.
pub fn display_algorithm_name(algorithm: &str) -> String {
    algorithm.replace("Sort", " Sort").trim().to_string()
}

#[cfg(test)]
#[path = "../../tests/tutor/fallback.rs"]
mod tests;
