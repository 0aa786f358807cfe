//! Onboarding quiz evaluation: deterministic score and tier, model-written feedback.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::llm::{CompletionPolicy, TextCompletion, complete_with_policy};
use crate::prompts::PromptTemplate;
use crate::tutor::extract_json;

/// Feedback used whenever the model cannot supply one.
pub const DEFAULT_FEEDBACK: &str = "Great effort! Keep practicing to improve your understanding.";

/// One answered quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRecord {
    pub question: String,
    pub answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillTier {
    Basic,
    Intermediate,
    Advanced,
}

impl SkillTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// ≤3 correct → basic, ≤6 → intermediate, otherwise advanced.
pub fn tier(correct_count: usize) -> SkillTier {
    match correct_count {
        0..=3 => SkillTier::Basic,
        4..=6 => SkillTier::Intermediate,
        _ => SkillTier::Advanced,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizEvaluation {
    pub score: usize,
    pub total_questions: usize,
    pub skill_level: SkillTier,
    pub feedback: String,
    pub question_scores: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct FeedbackPayload {
    #[serde(default)]
    feedback: Option<String>,
}

pub struct QuizEvaluator {
    completion: Arc<dyn TextCompletion>,
    template: PromptTemplate,
    policy: CompletionPolicy,
}

impl QuizEvaluator {
    pub fn new(completion: Arc<dyn TextCompletion>, policy: CompletionPolicy) -> Self {
        Self {
            completion,
            template: PromptTemplate::quiz_feedback_default(),
            policy,
        }
    }

    /// Score the quiz and attach feedback. Never fails.
    pub async fn evaluate(&self, records: &[QuizRecord]) -> QuizEvaluation {
        let question_scores: Vec<u8> = records.iter().map(|r| u8::from(r.is_correct)).collect();
        let score = records.iter().filter(|r| r.is_correct).count();
        let skill_level = tier(score);
        let feedback = if records.is_empty() {
            DEFAULT_FEEDBACK.to_string()
        } else {
            self.feedback(records, score, skill_level).await
        };
        tracing::info!(
            event = "tutor.quiz.evaluated",
            score,
            total = records.len(),
            skill_level = skill_level.as_str(),
            "quiz evaluated"
        );
        QuizEvaluation {
            score,
            total_questions: records.len(),
            skill_level,
            feedback,
            question_scores,
        }
    }

    async fn feedback(&self, records: &[QuizRecord], score: usize, skill_level: SkillTier) -> String {
        let prompt = self.template.render(&[
            ("score", score.to_string().as_str()),
            ("total", records.len().to_string().as_str()),
            ("skill_level", skill_level.as_str()),
            ("questions", describe_answers(records).as_str()),
        ]);
        let raw = match complete_with_policy(self.completion.as_ref(), &prompt, self.policy).await
        {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(
                    event = "tutor.quiz.feedback_failed",
                    error = %error,
                    "using default quiz feedback"
                );
                return DEFAULT_FEEDBACK.to_string();
            }
        };
        parse_feedback(&raw).unwrap_or_else(|| {
            tracing::warn!(
                event = "tutor.quiz.feedback_malformed",
                chars = raw.len(),
                "using default quiz feedback"
            );
            DEFAULT_FEEDBACK.to_string()
        })
    }
}

fn parse_feedback(raw: &str) -> Option<String> {
    let json = extract_json(raw).ok()?;
    let payload: FeedbackPayload = serde_json::from_str(json).ok()?;
    payload
        .feedback
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn describe_answers(records: &[QuizRecord]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "Question {} ({}): {}\nUser's answer: {}\nCorrect answer: {}\nResult: {}",
                i + 1,
                r.category,
                r.question,
                r.answer,
                r.correct_answer,
                if r.is_correct { "correct" } else { "incorrect" }
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
