//! socratic-tutor CLI: gateway, ask (one-shot turn), or quiz.
//!
//! Credential: `SOCRATIC_TUTOR_API_KEY` or `GOOGLE_AI_API_KEY` (not needed for a localhost endpoint).
//!
//! Logging: set `RUST_LOG=socratic_tutor=info` (or `warn`, `debug`) to see tutor logs on stderr.

mod cli;
mod nodes;
mod resolve;
mod tutor_builder;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use socratic_tutor::{load_runtime_settings, set_config_home_override};

use crate::cli::{Cli, Command};
use crate::nodes::{AskRequest, run_ask_mode, run_gateway_mode, run_quiz_mode};
use crate::tutor_builder::TutorOverrides;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "socratic_tutor=debug"
        } else {
            "socratic_tutor=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    if let Some(conf_dir) = cli.conf.clone() {
        set_config_home_override(conf_dir);
    }
    let runtime_settings = load_runtime_settings();
    let overrides = TutorOverrides {
        inference_url: cli.inference_url,
        model: cli.model,
        timeout_secs: cli.timeout_secs,
    };

    match cli.command {
        Command::Gateway {
            bind,
            max_concurrent,
        } => run_gateway_mode(bind, max_concurrent, overrides, &runtime_settings).await,
        Command::Ask {
            algorithm,
            message,
            history,
            mastery,
            array,
        } => {
            run_ask_mode(
                AskRequest {
                    algorithm,
                    message,
                    history,
                    mastery,
                    array,
                },
                overrides,
                &runtime_settings,
            )
            .await
        }
        Command::Quiz { file } => run_quiz_mode(&file, overrides, &runtime_settings).await,
    }
}
