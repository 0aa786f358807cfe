//! Runtime settings loader for socratic-tutor.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/conf/settings.yaml`
//! - User overrides:  `<PRJ_CONFIG_HOME>/socratic-tutor/settings.yaml`
//!
//! Merge precedence is user over system.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "conf/settings.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "socratic-tutor/settings.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";
static CONFIG_HOME_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeSettings {
    #[serde(default)]
    pub inference: InferenceSettings,
    #[serde(default)]
    pub tutor: TutorSettings,
    #[serde(default)]
    pub gateway: GatewaySettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InferenceSettings {
    pub url: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_attempts: Option<u32>,
    pub retry_backoff_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TutorSettings {
    pub context_window_turns: Option<usize>,
    pub prompt_template_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewaySettings {
    pub bind: Option<String>,
    pub max_concurrent_requests: Option<usize>,
}

impl RuntimeSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            inference: self.inference.merge(overlay.inference),
            tutor: self.tutor.merge(overlay.tutor),
            gateway: self.gateway.merge(overlay.gateway),
        }
    }
}

impl InferenceSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            url: overlay.url.or(self.url),
            model: overlay.model.or(self.model),
            timeout_secs: overlay.timeout_secs.or(self.timeout_secs),
            max_attempts: overlay.max_attempts.or(self.max_attempts),
            retry_backoff_ms: overlay.retry_backoff_ms.or(self.retry_backoff_ms),
        }
    }
}

impl TutorSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            context_window_turns: overlay.context_window_turns.or(self.context_window_turns),
            prompt_template_path: overlay.prompt_template_path.or(self.prompt_template_path),
        }
    }
}

impl GatewaySettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            bind: overlay.bind.or(self.bind),
            max_concurrent_requests: overlay
                .max_concurrent_requests
                .or(self.max_concurrent_requests),
        }
    }
}

/// Load merged runtime settings (user overrides system).
pub fn load_runtime_settings() -> RuntimeSettings {
    let (system_path, user_path) = runtime_settings_paths();
    load_runtime_settings_from_paths(&system_path, &user_path)
}

#[doc(hidden)]
pub fn runtime_settings_paths() -> (PathBuf, PathBuf) {
    let root = project_root();
    let system_path = root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH);
    let user_path = resolve_config_home(&root).join(DEFAULT_USER_SETTINGS_RELATIVE_PATH);
    (system_path, user_path)
}

#[doc(hidden)]
pub fn load_runtime_settings_from_paths(system: &Path, user: &Path) -> RuntimeSettings {
    load_one(system).merge(load_one(user))
}

fn load_one(path: &Path) -> RuntimeSettings {
    if !path.exists() {
        return RuntimeSettings::default();
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to read settings file; ignoring"
            );
            return RuntimeSettings::default();
        }
    };
    match serde_yaml::from_str::<RuntimeSettings>(&raw) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to parse settings yaml; ignoring file"
            );
            RuntimeSettings::default()
        }
    }
}

fn project_root() -> PathBuf {
    std::env::var("PRJ_ROOT")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Set config-home override (used by CLI `--conf`).
///
/// The path can be absolute, or relative to `PRJ_ROOT`/cwd.
pub fn set_config_home_override(path: impl Into<PathBuf>) {
    let path = path.into();
    if path.as_os_str().is_empty() {
        return;
    }
    if CONFIG_HOME_OVERRIDE.set(path.clone()).is_err()
        && let Some(current) = CONFIG_HOME_OVERRIDE.get()
        && current != &path
    {
        tracing::warn!(
            current = %current.display(),
            ignored = %path.display(),
            "config home override already set; ignoring subsequent value"
        );
    }
}

fn resolve_config_home(project_root: &Path) -> PathBuf {
    if let Some(path) = CONFIG_HOME_OVERRIDE.get() {
        return absolutize(project_root, path.clone());
    }

    let configured = std::env::var("PRJ_CONFIG_HOME")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_HOME_RELATIVE_PATH.to_string());
    absolutize(project_root, PathBuf::from(configured))
}

fn absolutize(project_root: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        project_root.join(path)
    }
}
