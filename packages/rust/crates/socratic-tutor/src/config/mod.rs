//! Config namespace: tutor config and YAML runtime settings.

mod settings;
mod tutor;

pub use settings::{
    GatewaySettings, InferenceSettings, RuntimeSettings, TutorSettings, load_runtime_settings,
    load_runtime_settings_from_paths, runtime_settings_paths, set_config_home_override,
};
pub use tutor::{API_KEY_ENV_VARS, DEFAULT_INFERENCE_URL, DEFAULT_MODEL, TutorConfig};
