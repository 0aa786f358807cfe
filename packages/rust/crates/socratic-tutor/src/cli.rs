use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "socratic-tutor")]
#[command(about = "Socratic sorting-algorithm tutor: HTTP gateway, one-shot turns, quiz evaluation.")]
pub(crate) struct Cli {
    /// Override config directory (user settings live in `<conf>/socratic-tutor/settings.yaml`).
    #[arg(long, global = true)]
    pub(crate) conf: Option<PathBuf>,

    /// Debug-level logs (ignored when RUST_LOG is set).
    #[arg(long, short, global = true)]
    pub(crate) verbose: bool,

    /// Chat completions URL (OpenAI-compatible).
    #[arg(long, global = true)]
    pub(crate) inference_url: Option<String>,

    /// Model id.
    #[arg(long, global = true)]
    pub(crate) model: Option<String>,

    /// Per-completion timeout in seconds (default: 30).
    #[arg(long, global = true)]
    pub(crate) timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run HTTP server (POST /api/v1/chat, POST /api/v1/evaluate-quiz). Default bind: 0.0.0.0:8001
    Gateway {
        /// Listen address (e.g. 0.0.0.0:8001); falls back to `PORT`.
        #[arg(long)]
        bind: Option<String>,

        /// Max concurrent completions (omit for no limit).
        #[arg(long)]
        max_concurrent: Option<usize>,
    },
    /// Run one tutoring turn and print the response JSON.
    Ask {
        /// Algorithm id (e.g. bubbleSort).
        #[arg(long)]
        algorithm: String,

        /// Learner message appended as the latest turn.
        #[arg(long)]
        message: String,

        /// JSON file with earlier turns: `[{"role": "user", "content": "..."}]`.
        #[arg(long)]
        history: Option<PathBuf>,

        /// Current mastery for the algorithm (0.0 - 1.0).
        #[arg(long, default_value_t = 0.0)]
        mastery: f64,

        /// Current exercise array, comma separated (e.g. `3,1,2`).
        #[arg(long, value_delimiter = ',')]
        array: Vec<i64>,
    },
    /// Evaluate a quiz JSON file (`{"questions": [...]}`) and print the result.
    Quiz {
        /// Path to the quiz JSON file.
        file: PathBuf,
    },
}
