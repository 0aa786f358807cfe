#![allow(missing_docs)]

use std::fs;

use socratic_tutor::{
    PromptTemplate, PromptVars, QUIZ_FEEDBACK_SLOTS, SOCRATIC_SLOTS, TutorError,
    render_socratic_prompt,
};

#[test]
fn builtin_templates_carry_versions() {
    assert_eq!(PromptTemplate::socratic_default().version(), "socratic.v1");
    assert_eq!(
        PromptTemplate::quiz_feedback_default().version(),
        "quiz_feedback.v1"
    );
}

#[test]
fn parse_rejects_template_missing_an_insertion_point() {
    let error = PromptTemplate::parse("broken", "Teach {algorithm} at {mastery}.", SOCRATIC_SLOTS)
        .expect_err("context slot is missing");
    assert!(matches!(error, TutorError::Config(_)));
    assert!(error.to_string().contains("context"));
}

#[test]
fn render_leaves_json_braces_and_unknown_names_alone() -> anyhow::Result<()> {
    let template = PromptTemplate::parse(
        "t",
        r#"{algorithm} {mastery} {context} {"xpAwarded": 0} {unknown}"#,
        SOCRATIC_SLOTS,
    )?;
    let rendered = template.render(&[
        ("algorithm", "bubbleSort"),
        ("mastery", "0.50"),
        ("context", "USER: hi"),
    ]);
    assert_eq!(
        rendered,
        r#"bubbleSort 0.50 USER: hi {"xpAwarded": 0} {unknown}"#
    );
    Ok(())
}

#[test]
fn inserted_text_is_not_expanded_again() -> anyhow::Result<()> {
    let template = PromptTemplate::parse("t", "{context}|{algorithm}|{mastery}", SOCRATIC_SLOTS)?;
    let rendered = template.render(&[
        ("algorithm", "mergeSort"),
        ("mastery", "0.10"),
        ("context", "USER: what is {algorithm}?"),
    ]);
    assert_eq!(rendered, "USER: what is {algorithm}?|mergeSort|0.10");
    Ok(())
}

#[test]
fn socratic_prompt_formats_mastery_and_requests_json_only() {
    let prompt = render_socratic_prompt(
        &PromptTemplate::socratic_default(),
        PromptVars {
            algorithm: "quickSort",
            mastery: 0.456,
            context: "USER: pivot?",
        },
    );
    assert!(prompt.contains("quickSort"));
    assert!(prompt.contains("0.46"));
    assert!(prompt.contains("USER: pivot?"));
    assert!(prompt.ends_with("Do not include any markdown formatting or additional text."));
    assert!(!prompt.contains("{context}"));
}

#[test]
fn quiz_feedback_template_renders_score_line() {
    let rendered = PromptTemplate::quiz_feedback_default().render(&[
        ("score", "4"),
        ("total", "5"),
        ("skill_level", "intermediate"),
        ("questions", "Question 1 (basics): ..."),
    ]);
    assert!(rendered.contains("Score: 4/5 correct"));
    assert!(rendered.contains("Skill level: intermediate"));
    assert_eq!(QUIZ_FEEDBACK_SLOTS.len(), 4);
}

#[test]
fn load_socratic_uses_file_stem_as_version() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("socratic.v2.md");
    fs::write(&path, "Algorithm {algorithm}, mastery {mastery}.\n{context}\n")?;

    let template = PromptTemplate::load_socratic(&path)?;

    assert_eq!(template.version(), "socratic.v2");
    Ok(())
}

#[test]
fn load_socratic_reports_unreadable_file() {
    let error = PromptTemplate::load_socratic(std::path::Path::new("/nonexistent/tpl.md"))
        .expect_err("missing file");
    assert!(matches!(error, TutorError::Config(_)));
}
