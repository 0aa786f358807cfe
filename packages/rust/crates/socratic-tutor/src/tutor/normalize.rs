//! Payload validation and defaulting.
//!
//! Every field of the model payload is optional. A field that is absent, `null`, or of the
//! wrong shape deserializes to `None` and takes its documented default; it never fails the
//! whole payload.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;

use crate::contracts::{
    AnswerAnalysis, MasteryMap, TutorResponse, VisualizerMode, VisualizerStateUpdate,
};
use crate::error::{Result, TutorError};

/// Asked when the model omits its question.
pub const DEFAULT_QUESTION: &str = "Great observation! Can you explain your reasoning further?";

/// Tutor payload as produced by the model, before defaulting.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub socratic_question: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub analysis_of_user_answer: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub learner_mastery_update: Option<MasteryMap>,
    #[serde(default, deserialize_with = "lenient")]
    pub visualizer_state_update: Option<VisualizerPayload>,
    /// Read only to report disagreement; the award is always recomputed.
    #[serde(default, deserialize_with = "lenient")]
    pub xp_awarded: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizerPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub focus_indices: Option<Vec<usize>>,
    #[serde(default, deserialize_with = "lenient")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub data: Option<Vec<i64>>,
    #[serde(default, deserialize_with = "lenient")]
    pub error_case: Option<Vec<i64>>,
}

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Parse the extracted JSON object.
pub fn parse_payload(json: &str) -> Result<TutorPayload> {
    serde_json::from_str(json).map_err(|error| TutorError::MalformedOutput(error.to_string()))
}

/// Apply defaults and the XP policy to a parsed payload.
pub fn normalize(payload: TutorPayload, algorithm: &str, current_mastery: f64) -> TutorResponse {
    let analysis = payload
        .analysis_of_user_answer
        .as_deref()
        .and_then(AnswerAnalysis::parse)
        .unwrap_or_default();
    let xp_awarded = analysis.xp();
    if let Some(claimed) = payload.xp_awarded
        && claimed != i64::from(xp_awarded)
    {
        tracing::debug!(
            event = "tutor.normalize.xp_overridden",
            algorithm,
            claimed,
            awarded = xp_awarded,
            "model xp ignored"
        );
    }

    let socratic_question = payload
        .socratic_question
        .filter(|question| !question.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_QUESTION.to_string());

    TutorResponse {
        socratic_question,
        analysis_of_user_answer: analysis,
        learner_mastery_update: mastery_update(
            payload.learner_mastery_update.as_ref(),
            algorithm,
            current_mastery,
        ),
        visualizer_state_update: payload
            .visualizer_state_update
            .map(visualizer_update)
            .unwrap_or_else(VisualizerStateUpdate::idle),
        xp_awarded,
    }
}

/// Only the active algorithm may change; its value is clamped to `[0, 1]`.
fn mastery_update(
    update: Option<&MasteryMap>,
    algorithm: &str,
    current_mastery: f64,
) -> MasteryMap {
    let value = update
        .and_then(|map| map.get(algorithm))
        .filter(|value| value.is_finite())
        .map_or(current_mastery, |value| value.clamp(0.0, 1.0));
    MasteryMap::single(algorithm, value)
}

fn visualizer_update(payload: VisualizerPayload) -> VisualizerStateUpdate {
    VisualizerStateUpdate {
        focus_indices: payload.focus_indices.unwrap_or_default(),
        state: payload
            .state
            .as_deref()
            .and_then(VisualizerMode::parse)
            .unwrap_or_default(),
        data: payload.data,
        error_case: payload.error_case,
    }
}

#[cfg(test)]
#[path = "../../tests/tutor/normalize.rs"]
mod tests;
