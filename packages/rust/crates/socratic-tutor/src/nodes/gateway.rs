use socratic_tutor::{RuntimeSettings, run_http};

use crate::resolve::{bind_from_port_env, resolve_optional_positive, resolve_string};
use crate::tutor_builder::{TutorOverrides, build_services, resolve_tutor_config};

const DEFAULT_BIND: &str = "0.0.0.0:8001";

pub(crate) async fn run_gateway_mode(
    bind: Option<String>,
    max_concurrent: Option<usize>,
    overrides: TutorOverrides,
    runtime_settings: &RuntimeSettings,
) -> anyhow::Result<()> {
    let config = resolve_tutor_config(overrides, runtime_settings);
    let (tutor, quiz) = build_services(&config)?;
    let bind_addr = resolve_string(
        bind.or_else(bind_from_port_env),
        "SOCRATIC_TUTOR_BIND",
        runtime_settings.gateway.bind.as_deref(),
        DEFAULT_BIND,
    );
    let max_concurrent = resolve_optional_positive(
        max_concurrent,
        "SOCRATIC_TUTOR_MAX_CONCURRENT",
        runtime_settings.gateway.max_concurrent_requests,
    );
    run_http(tutor, quiz, &bind_addr, max_concurrent).await
}
