use super::*;

#[test]
fn display_name_spaces_sort_suffix() {
    assert_eq!(display_algorithm_name("bubbleSort"), "bubble Sort");
    assert_eq!(display_algorithm_name("quickSort"), "quick Sort");
    assert_eq!(display_algorithm_name("heap"), "heap");
}

#[test]
fn upstream_fallback_names_the_algorithm() {
    let response = fallback_response(
        "insertionSort",
        0.25,
        &TutorError::UpstreamFailure("429 quota".to_string()),
    );
    assert!(response.socratic_question.contains("insertion Sort"));
    assert_eq!(response.analysis_of_user_answer, AnswerAnalysis::Continuing);
    assert_eq!(response.learner_mastery_update, MasteryMap::single("insertionSort", 0.25));
    assert_eq!(response.visualizer_state_update, VisualizerStateUpdate::idle());
    assert_eq!(response.xp_awarded, 0);
}

#[test]
fn timeout_uses_the_upstream_fallback() {
    let response = fallback_response("bubbleSort", 0.5, &TutorError::Timeout(30_000));
    assert!(response.socratic_question.starts_with("I'm experiencing a technical issue"));
}

#[test]
fn malformed_fallback_asks_for_elaboration() {
    let response = fallback_response(
        "bubbleSort",
        0.5,
        &TutorError::MalformedOutput("no JSON object".to_string()),
    );
    assert_eq!(response.socratic_question, MALFORMED_FALLBACK_QUESTION);
    assert_eq!(response.xp_awarded, 0);
}
