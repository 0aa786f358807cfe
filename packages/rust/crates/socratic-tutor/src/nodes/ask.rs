use std::path::PathBuf;

use anyhow::Context;
use socratic_tutor::{ConversationTurn, MasteryMap, RuntimeSettings};

use crate::tutor_builder::{TutorOverrides, build_services, resolve_tutor_config};

pub(crate) struct AskRequest {
    pub(crate) algorithm: String,
    pub(crate) message: String,
    pub(crate) history: Option<PathBuf>,
    pub(crate) mastery: f64,
    pub(crate) array: Vec<i64>,
}

pub(crate) async fn run_ask_mode(
    request: AskRequest,
    overrides: TutorOverrides,
    runtime_settings: &RuntimeSettings,
) -> anyhow::Result<()> {
    let config = resolve_tutor_config(overrides, runtime_settings);
    let (tutor, _quiz) = build_services(&config)?;

    let mut turns: Vec<ConversationTurn> = match request.history {
        Some(ref path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read history {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid history json {}", path.display()))?
        }
        None => Vec::new(),
    };
    turns.push(ConversationTurn::user(request.message.trim()));

    let algorithm = request.algorithm.trim();
    let mut mastery = MasteryMap::single(algorithm, request.mastery);
    let array = (!request.array.is_empty()).then_some(request.array.as_slice());
    let response = tutor.generate(algorithm, &turns, &mastery, array).await;
    mastery.apply_update(algorithm, &response.learner_mastery_update);

    println!("{}", serde_json::to_string_pretty(&response)?);
    println!(
        "mastery: {}",
        serde_json::to_string(&mastery).context("failed to encode mastery")?
    );
    Ok(())
}
