//! CLI flag > environment variable > settings file > default.

use std::fmt::Display;
use std::str::FromStr;

pub(crate) fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn resolve_string(
    cli_value: Option<String>,
    env_name: &str,
    settings_value: Option<&str>,
    default: &str,
) -> String {
    resolve_optional_string(cli_value, env_name, settings_value)
        .unwrap_or_else(|| default.to_string())
}

pub(crate) fn resolve_optional_string(
    cli_value: Option<String>,
    env_name: &str,
    settings_value: Option<&str>,
) -> Option<String> {
    cli_value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| non_empty_env(env_name))
        .or_else(|| {
            settings_value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(ToString::to_string)
        })
}

/// First positive value among CLI, env and settings; `default` otherwise.
pub(crate) fn resolve_positive<T>(
    cli_value: Option<T>,
    env_name: &str,
    settings_value: Option<T>,
    default: T,
) -> T
where
    T: FromStr + PartialOrd + Default + Copy,
{
    let positive = |value: &T| *value > T::default();
    cli_value
        .filter(positive)
        .or_else(|| parse_positive_from_env(env_name))
        .or_else(|| settings_value.filter(positive))
        .unwrap_or(default)
}

/// Like `resolve_positive`, but with no default.
pub(crate) fn resolve_optional_positive<T>(
    cli_value: Option<T>,
    env_name: &str,
    settings_value: Option<T>,
) -> Option<T>
where
    T: FromStr + PartialOrd + Default + Copy,
{
    let positive = |value: &T| *value > T::default();
    cli_value
        .filter(positive)
        .or_else(|| parse_positive_from_env(env_name))
        .or_else(|| settings_value.filter(positive))
}

pub(crate) fn parse_positive_from_env<T>(name: &str) -> Option<T>
where
    T: FromStr + PartialOrd + Default,
{
    let raw = non_empty_env(name)?;
    match raw.parse::<T>() {
        Ok(value) if value > T::default() => Some(value),
        _ => {
            tracing::warn!(env_var = %name, value = %raw, "invalid positive integer env value");
            None
        }
    }
}

/// `0.0.0.0:<PORT>` when only `PORT` is set, as hosting platforms expect.
pub(crate) fn bind_from_port_env() -> Option<String> {
    let port: u16 = parse_positive_from_env("PORT")?;
    Some(format!("0.0.0.0:{port}"))
}

pub(crate) fn describe_optional<T: Display>(value: Option<T>, none: &str) -> String {
    value.map_or_else(|| none.to_string(), |value| value.to_string())
}
