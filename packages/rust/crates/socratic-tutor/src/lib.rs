//! Socratic sorting-algorithm tutor: LLM completion behind a response normalizer; HTTP gateway.
//!
//! - **Tutor**: transcript + mastery → prompt → completion → JSON repair → defaults + XP policy.
//! - **Quiz**: deterministic score and skill tier, model-written feedback with a canned fallback.

#![allow(missing_docs)]

mod config;
mod contracts;
mod error;
mod gateway;
mod llm;
mod prompts;
mod quiz;
mod tutor;

pub use config::{
    API_KEY_ENV_VARS, DEFAULT_INFERENCE_URL, DEFAULT_MODEL, GatewaySettings, InferenceSettings,
    RuntimeSettings, TutorConfig, TutorSettings, load_runtime_settings,
    load_runtime_settings_from_paths, runtime_settings_paths, set_config_home_override,
};
pub use contracts::{
    AnswerAnalysis, ArraySnapshot, CORRECT_ANSWER_XP, ConversationTurn, MasteryMap, Role,
    TutorResponse, VisualizerMode, VisualizerStateUpdate,
};
pub use error::TutorError;
pub use gateway::{
    ChatRequest, GatewayHealthResponse, GatewayState, QuizEvaluationRequest, ServiceInfoResponse,
    router, run_http, validate_chat_request,
};
pub use llm::{
    CompletionPolicy, LlmClient, TextCompletion, classify_upstream_error, complete_with_policy,
};
pub use prompts::{
    PromptTemplate, PromptVars, QUIZ_FEEDBACK_SLOTS, SOCRATIC_SLOTS, render_socratic_prompt,
};
pub use quiz::{DEFAULT_FEEDBACK, QuizEvaluation, QuizEvaluator, QuizRecord, SkillTier, tier};
pub use tutor::{
    CONTEXT_WINDOW_TURNS, DEFAULT_QUESTION, MALFORMED_FALLBACK_QUESTION, Tutor, TutorOptions,
    TutorPayload, VisualizerPayload, build_context, display_algorithm_name, extract_json,
    fallback_response, format_array, normalize, parse_payload,
};
