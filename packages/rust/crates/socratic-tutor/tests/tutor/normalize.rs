use super::*;

use crate::contracts::CORRECT_ANSWER_XP;

fn payload(json: &str) -> TutorPayload {
    parse_payload(json).expect("payload")
}

#[test]
fn complete_payload_passes_through_except_xp() {
    let parsed = payload(
        r#"{
            "socraticQuestion": "Which pair is compared next?",
            "analysisOfUserAnswer": "partial",
            "learnerMasteryUpdate": {"bubbleSort": 0.55},
            "visualizerStateUpdate": {
                "focusIndices": [1, 2],
                "state": "swapping",
                "data": [1, 3, 2],
                "errorCase": [3, 2, 1]
            },
            "xpAwarded": 15
        }"#,
    );
    let response = normalize(parsed, "bubbleSort", 0.5);

    assert_eq!(response.socratic_question, "Which pair is compared next?");
    assert_eq!(response.analysis_of_user_answer, AnswerAnalysis::Partial);
    assert_eq!(response.learner_mastery_update.get("bubbleSort"), Some(0.55));
    assert_eq!(response.visualizer_state_update.focus_indices, vec![1, 2]);
    assert_eq!(response.visualizer_state_update.state, VisualizerMode::Swapping);
    assert_eq!(response.visualizer_state_update.data, Some(vec![1, 3, 2]));
    assert_eq!(response.visualizer_state_update.error_case, Some(vec![3, 2, 1]));
    assert_eq!(response.xp_awarded, 0);
}

#[test]
fn empty_object_takes_every_default() {
    let response = normalize(payload("{}"), "quickSort", 0.3);

    assert_eq!(response.socratic_question, DEFAULT_QUESTION);
    assert_eq!(response.analysis_of_user_answer, AnswerAnalysis::Continuing);
    assert_eq!(response.learner_mastery_update, MasteryMap::single("quickSort", 0.3));
    assert_eq!(response.visualizer_state_update, VisualizerStateUpdate::idle());
    assert_eq!(response.xp_awarded, 0);
}

#[test]
fn wrong_typed_fields_are_defaulted_individually() {
    let parsed = payload(
        r#"{
            "socraticQuestion": 42,
            "analysisOfUserAnswer": ["correct"],
            "learnerMasteryUpdate": "high",
            "visualizerStateUpdate": "comparing"
        }"#,
    );
    assert_eq!(parsed, TutorPayload::default());

    let response = normalize(parsed, "bubbleSort", 0.5);
    assert_eq!(response.socratic_question, DEFAULT_QUESTION);
    assert_eq!(response.learner_mastery_update, MasteryMap::single("bubbleSort", 0.5));
    assert_eq!(response.visualizer_state_update, VisualizerStateUpdate::idle());
}

#[test]
fn visualizer_sub_fields_default_independently() {
    let parsed = payload(
        r#"{"visualizerStateUpdate": {"focusIndices": [-1], "state": "dancing", "data": [4, 5]}}"#,
    );
    let update = normalize(parsed, "bubbleSort", 0.0).visualizer_state_update;

    assert!(update.focus_indices.is_empty());
    assert_eq!(update.state, VisualizerMode::Idle);
    assert_eq!(update.data, Some(vec![4, 5]));
    assert_eq!(update.error_case, None);
}

#[test]
fn correct_analysis_awards_fixed_xp_even_without_xp_field() {
    let parsed = payload(r#"{"analysisOfUserAnswer": " Correct "}"#);
    assert_eq!(normalize(parsed, "bubbleSort", 0.5).xp_awarded, CORRECT_ANSWER_XP);
}

#[test]
fn model_xp_is_never_trusted() {
    for label in ["partial", "incorrect", "continuing", "excellent"] {
        let parsed = payload(&format!(
            r#"{{"analysisOfUserAnswer": "{label}", "xpAwarded": 100}}"#
        ));
        assert_eq!(normalize(parsed, "bubbleSort", 0.5).xp_awarded, 0, "{label}");
    }
}

#[test]
fn blank_question_counts_as_missing() {
    let parsed = payload(r#"{"socraticQuestion": "   "}"#);
    assert_eq!(normalize(parsed, "bubbleSort", 0.5).socratic_question, DEFAULT_QUESTION);
}

#[test]
fn mastery_update_keeps_only_active_algorithm_and_clamps() {
    let update: MasteryMap =
        serde_json::from_str(r#"{"bubbleSort": 1.7, "mergeSort": 0.9}"#).expect("map");
    let normalized = mastery_update(Some(&update), "bubbleSort", 0.4);

    assert_eq!(normalized, MasteryMap::single("bubbleSort", 1.0));
}

#[test]
fn mastery_update_without_active_entry_keeps_current_value() {
    let update = MasteryMap::single("mergeSort", 0.9);
    assert_eq!(
        mastery_update(Some(&update), "bubbleSort", 0.4),
        MasteryMap::single("bubbleSort", 0.4)
    );
    assert_eq!(
        mastery_update(None, "bubbleSort", 0.4),
        MasteryMap::single("bubbleSort", 0.4)
    );
}

#[test]
fn invalid_json_is_malformed_output() {
    let error = parse_payload("{not json}").expect_err("should fail");
    assert!(matches!(error, TutorError::MalformedOutput(_)));
}
