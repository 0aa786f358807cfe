use std::path::Path;

use anyhow::Context;
use socratic_tutor::{QuizEvaluationRequest, RuntimeSettings};

use crate::tutor_builder::{TutorOverrides, build_services, resolve_tutor_config};

pub(crate) async fn run_quiz_mode(
    file: &Path,
    overrides: TutorOverrides,
    runtime_settings: &RuntimeSettings,
) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read quiz {}", file.display()))?;
    let request: QuizEvaluationRequest = serde_json::from_str(&raw)
        .with_context(|| format!("invalid quiz json {}", file.display()))?;
    let config = resolve_tutor_config(overrides, runtime_settings);
    let (_tutor, quiz) = build_services(&config)?;
    let evaluation = quiz.evaluate(&request.questions).await;
    println!("{}", serde_json::to_string_pretty(&evaluation)?);
    Ok(())
}
