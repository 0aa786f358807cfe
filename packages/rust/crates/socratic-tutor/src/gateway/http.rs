//! HTTP gateway: POST /api/v1/chat → tutor turn, POST /api/v1/evaluate-quiz → quiz evaluation.
//!
//! Request validation returns 400; tutor failures never surface as HTTP errors because
//! `Tutor::generate` always yields a response.

use anyhow::Result;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{Semaphore, SemaphorePermit};
use tower_http::cors::CorsLayer;

use crate::contracts::{ConversationTurn, MasteryMap, TutorResponse};
use crate::quiz::{QuizEvaluation, QuizEvaluator, QuizRecord};
use crate::tutor::Tutor;

const SERVICE_NAME: &str = "Socratic Sort AI Backend";

/// Request body for POST /api/v1/chat.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub chat_history: Vec<ConversationTurn>,
    pub algorithm: String,
    #[serde(default)]
    pub learner_mastery: MasteryMap,
    /// Empty means no exercise is active.
    #[serde(default)]
    pub current_array: Vec<i64>,
}

/// Request body for POST /api/v1/evaluate-quiz.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizEvaluationRequest {
    pub questions: Vec<QuizRecord>,
}

/// Shared state for the HTTP server.
#[derive(Clone)]
pub struct GatewayState {
    pub tutor: Arc<Tutor>,
    pub quiz: Arc<QuizEvaluator>,
    /// When Some, limits concurrent completions; excess requests wait for a slot.
    pub concurrency_semaphore: Option<Arc<Semaphore>>,
    pub max_concurrent_requests: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfoResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub version: &'static str,
}

/// Response body for gateway health endpoint.
#[derive(Debug, Serialize)]
pub struct GatewayHealthResponse {
    pub status: &'static str,
    pub request_timeout_secs: u64,
    pub context_window_turns: usize,
    pub prompt_template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrent_requests: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_flight_requests: Option<usize>,
}

/// Validate chat body; returns the trimmed algorithm id.
pub fn validate_chat_request(body: &ChatRequest) -> Result<String, (StatusCode, String)> {
    let algorithm = body.algorithm.trim().to_string();
    if algorithm.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "algorithm must be non-empty".to_string(),
        ));
    }
    Ok(algorithm)
}

impl GatewayState {
    async fn acquire(&self) -> Result<Option<SemaphorePermit<'_>>, (StatusCode, String)> {
        match self.concurrency_semaphore {
            Some(ref sem) => sem.acquire().await.map(Some).map_err(|_| {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "concurrency limit closed".to_string(),
                )
            }),
            None => Ok(None),
        }
    }
}

async fn handle_chat(
    State(state): State<GatewayState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<TutorResponse>, (StatusCode, String)> {
    let algorithm = validate_chat_request(&body)?;
    let _permit = state.acquire().await?;
    let array = (!body.current_array.is_empty()).then_some(body.current_array.as_slice());
    let response = state
        .tutor
        .generate(&algorithm, &body.chat_history, &body.learner_mastery, array)
        .await;
    Ok(Json(response))
}

async fn handle_evaluate_quiz(
    State(state): State<GatewayState>,
    Json(body): Json<QuizEvaluationRequest>,
) -> Result<Json<QuizEvaluation>, (StatusCode, String)> {
    let _permit = state.acquire().await?;
    Ok(Json(state.quiz.evaluate(&body.questions).await))
}

async fn handle_root() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        message: SERVICE_NAME,
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn handle_health(State(state): State<GatewayState>) -> Json<GatewayHealthResponse> {
    let options = state.tutor.options();
    let in_flight_requests = state.max_concurrent_requests.and_then(|max| {
        state
            .concurrency_semaphore
            .as_ref()
            .map(|sem| max.saturating_sub(sem.available_permits()))
    });
    Json(GatewayHealthResponse {
        status: "healthy",
        request_timeout_secs: options.policy.timeout.as_secs(),
        context_window_turns: options.context_window_turns,
        prompt_template: options.template.version().to_string(),
        max_concurrent_requests: state.max_concurrent_requests,
        in_flight_requests,
    })
}

/// Build the gateway router.
pub fn router(tutor: Tutor, quiz: QuizEvaluator, max_concurrent_requests: Option<usize>) -> Router {
    let concurrency_semaphore = max_concurrent_requests.map(|n| Arc::new(Semaphore::new(n)));
    let state = GatewayState {
        tutor: Arc::new(tutor),
        quiz: Arc::new(quiz),
        concurrency_semaphore,
        max_concurrent_requests,
    };
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/api/v1/chat", post(handle_chat))
        .route("/api/v1/evaluate-quiz", post(handle_evaluate_quiz))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the HTTP server; binds to `bind_addr` (e.g. `0.0.0.0:8001`).
/// Graceful shutdown on Ctrl+C (SIGINT) and SIGTERM (Unix); in-flight requests complete before exit.
pub async fn run_http(
    tutor: Tutor,
    quiz: QuizEvaluator,
    bind_addr: &str,
    max_concurrent_requests: Option<usize>,
) -> Result<()> {
    let app = router(tutor, quiz, max_concurrent_requests);
    let listener = TcpListener::bind(bind_addr).await?;
    let max_str = max_concurrent_requests
        .map(|n| n.to_string())
        .unwrap_or_else(|| "unlimited".to_string());
    tracing::info!(
        "gateway listening on {} (max_concurrent={}, Ctrl+C/SIGTERM to stop)",
        bind_addr,
        max_str
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let ctrl_c = tokio::signal::ctrl_c();
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(error) => {
                tracing::warn!(error = %error, "SIGTERM handler unavailable; Ctrl+C only");
                let _ = ctrl_c.await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
