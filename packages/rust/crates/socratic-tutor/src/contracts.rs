//! Wire contracts shared by the tutor, the quiz evaluator and the HTTP gateway.
//!
//! JSON field names are camelCase to match the front-end.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// XP granted for an answer classified as `correct`. Every other classification earns zero.
pub const CORRECT_ANSWER_XP: u32 = 5;

/// Speaker of one conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    /// The front-end stores tutor turns as `ai`.
    #[serde(alias = "ai")]
    Assistant,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Assistant => "ASSISTANT",
        }
    }
}

/// One turn of the learner/tutor transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Learner-visible array while a sorting exercise is active. Opaque to the tutor.
pub type ArraySnapshot = Vec<i64>;

/// Per-algorithm mastery, conventionally in `[0, 1]`.
///
/// Values coming from callers are not assumed to be clamped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MasteryMap(BTreeMap<String, f64>);

impl MasteryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(algorithm: impl Into<String>, mastery: f64) -> Self {
        let mut map = Self::new();
        map.insert(algorithm, mastery);
        map
    }

    pub fn insert(&mut self, algorithm: impl Into<String>, mastery: f64) {
        self.0.insert(algorithm.into(), mastery);
    }

    pub fn get(&self, algorithm: &str) -> Option<f64> {
        self.0.get(algorithm).copied()
    }

    /// Mastery for `algorithm`, or `0.0` when the learner has none recorded.
    pub fn get_or_zero(&self, algorithm: &str) -> f64 {
        self.get(algorithm).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Replace the entry for `algorithm` with the value carried by `update`.
    ///
    /// Entries for other algorithms are left as they are, including any that `update`
    /// happens to mention. A missing or non-finite update value leaves the map unchanged.
    pub fn apply_update(&mut self, algorithm: &str, update: &MasteryMap) {
        if let Some(value) = update.get(algorithm).filter(|value| value.is_finite()) {
            self.insert(algorithm, value.clamp(0.0, 1.0));
        }
    }
}

impl FromIterator<(String, f64)> for MasteryMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Tutor classification of the learner's latest answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerAnalysis {
    Correct,
    Partial,
    Incorrect,
    #[default]
    Continuing,
}

impl AnswerAnalysis {
    /// Lenient label parsing; unknown labels yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "correct" => Some(Self::Correct),
            "partial" => Some(Self::Partial),
            "incorrect" => Some(Self::Incorrect),
            "continuing" => Some(Self::Continuing),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Partial => "partial",
            Self::Incorrect => "incorrect",
            Self::Continuing => "continuing",
        }
    }

    /// XP policy: only a correct answer is rewarded.
    pub fn xp(self) -> u32 {
        match self {
            Self::Correct => CORRECT_ANSWER_XP,
            Self::Partial | Self::Incorrect | Self::Continuing => 0,
        }
    }
}

/// Animation mode for the front-end visualizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizerMode {
    #[default]
    Idle,
    Comparing,
    Swapping,
    Sorted,
    Error,
}

impl VisualizerMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "idle" => Some(Self::Idle),
            "comparing" => Some(Self::Comparing),
            "swapping" => Some(Self::Swapping),
            "sorted" => Some(Self::Sorted),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// Patch applied by the front-end to its visualizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizerStateUpdate {
    pub focus_indices: Vec<usize>,
    pub state: VisualizerMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ArraySnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_case: Option<ArraySnapshot>,
}

impl VisualizerStateUpdate {
    /// `{focusIndices: [], state: idle}`.
    pub fn idle() -> Self {
        Self::default()
    }
}

/// The only result handed back to the tutoring UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorResponse {
    pub socratic_question: String,
    pub analysis_of_user_answer: AnswerAnalysis,
    pub learner_mastery_update: MasteryMap,
    pub visualizer_state_update: VisualizerStateUpdate,
    pub xp_awarded: u32,
}
