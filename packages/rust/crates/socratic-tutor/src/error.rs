//! Error types for the tutoring pipeline.
//!
//! `MalformedOutput`, `UpstreamFailure` and `Timeout` never reach the caller of
//! `Tutor::generate`; they select the fallback response. `Config` is fatal at startup.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TutorError {
    /// Completion text carried no JSON object, or the object failed to parse.
    #[error("malformed model output: {0}")]
    MalformedOutput(String),

    /// Completion call failed (network, quota, provider error).
    #[error("upstream completion failed: {0}")]
    UpstreamFailure(String),

    /// Completion call did not finish within the configured bound.
    #[error("upstream completion timed out after {0}ms")]
    Timeout(u128),

    /// Missing credential, unreadable template, invalid setting.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl TutorError {
    /// Timeouts share the upstream fallback path.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::UpstreamFailure(_) | Self::Timeout(_))
    }
}

pub type Result<T> = std::result::Result<T, TutorError>;
