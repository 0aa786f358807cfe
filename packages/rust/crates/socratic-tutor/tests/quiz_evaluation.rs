#![allow(missing_docs)]

mod support;

use std::sync::Arc;

use socratic_tutor::{
    CompletionPolicy, DEFAULT_FEEDBACK, QuizEvaluator, QuizRecord, SkillTier, tier,
};

use support::ScriptedCompletion;

fn record(index: usize, is_correct: bool) -> QuizRecord {
    QuizRecord {
        question: format!("Question {index}"),
        answer: "A".to_string(),
        correct_answer: if is_correct { "A" } else { "B" }.to_string(),
        is_correct,
        category: "complexity".to_string(),
    }
}

#[test]
fn tier_boundaries() {
    assert_eq!(tier(0), SkillTier::Basic);
    assert_eq!(tier(3), SkillTier::Basic);
    assert_eq!(tier(4), SkillTier::Intermediate);
    assert_eq!(tier(6), SkillTier::Intermediate);
    assert_eq!(tier(7), SkillTier::Advanced);
    assert_eq!(tier(10), SkillTier::Advanced);
}

#[tokio::test]
async fn scores_deterministically_and_uses_model_feedback() {
    let completion = Arc::new(ScriptedCompletion::text(
        r#"Here you go: {"feedback": "Solid start. Review merge sort's stability.", "score": 99}"#,
    ));
    let evaluator = QuizEvaluator::new(completion.clone(), CompletionPolicy::default());
    let records: Vec<QuizRecord> = (0..8).map(|i| record(i, i % 2 == 0 || i == 7)).collect();

    let evaluation = evaluator.evaluate(&records).await;

    assert_eq!(evaluation.score, 5);
    assert_eq!(evaluation.total_questions, 8);
    assert_eq!(evaluation.skill_level, SkillTier::Intermediate);
    assert_eq!(evaluation.question_scores, vec![1, 0, 1, 0, 1, 0, 1, 1]);
    assert_eq!(evaluation.feedback, "Solid start. Review merge sort's stability.");
    let prompts = completion.prompts();
    let prompt = prompts.first().expect("prompt");
    assert!(prompt.contains("Score: 5/8 correct"));
    assert!(prompt.contains("Skill level: intermediate"));
    assert!(prompt.contains("Question 1 (complexity): Question 0"));
}

#[tokio::test]
async fn failed_feedback_call_uses_canned_message() {
    let completion = Arc::new(ScriptedCompletion::failing("network unreachable"));
    let evaluator = QuizEvaluator::new(completion, CompletionPolicy::default());

    let evaluation = evaluator.evaluate(&[record(0, true)]).await;

    assert_eq!(evaluation.feedback, DEFAULT_FEEDBACK);
    assert_eq!(evaluation.score, 1);
    assert_eq!(evaluation.skill_level, SkillTier::Basic);
}

#[tokio::test]
async fn unparseable_feedback_uses_canned_message() {
    let completion = Arc::new(ScriptedCompletion::text("Nice work overall!"));
    let evaluator = QuizEvaluator::new(completion, CompletionPolicy::default());

    let evaluation = evaluator.evaluate(&[record(0, false)]).await;

    assert_eq!(evaluation.feedback, DEFAULT_FEEDBACK);
    assert_eq!(evaluation.question_scores, vec![0]);
}

#[tokio::test]
async fn empty_quiz_skips_the_model() {
    let completion = Arc::new(ScriptedCompletion::text(r#"{"feedback": "unused"}"#));
    let evaluator = QuizEvaluator::new(completion.clone(), CompletionPolicy::default());

    let evaluation = evaluator.evaluate(&[]).await;

    assert_eq!(completion.calls(), 0);
    assert_eq!(evaluation.score, 0);
    assert_eq!(evaluation.skill_level, SkillTier::Basic);
    assert_eq!(evaluation.feedback, DEFAULT_FEEDBACK);
}

#[test]
fn evaluation_serializes_with_front_end_field_names() {
    let json = serde_json::to_value(socratic_tutor::QuizEvaluation {
        score: 7,
        total_questions: 10,
        skill_level: tier(7),
        feedback: "ok".to_string(),
        question_scores: vec![1, 0],
    })
    .expect("json");
    assert_eq!(json["totalQuestions"], 10);
    assert_eq!(json["skillLevel"], "advanced");
    assert_eq!(json["questionScores"], serde_json::json!([1, 0]));
}
