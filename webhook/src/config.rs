use anyhow::{Context, Result};
use heartbeat_core::config::Config;
use std::time::Duration;

const CONFIG_ENV: &str = "HEARTBEAT_CONFIG";
const CONFIG_PATH_ENV: &str = "HEARTBEAT_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "heartbeat.json";
const WEATHER_API_KEY_ENV: &str = "OPENWEATHERMAP_API_KEY";
const BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
const TIMEOUT_ENV: &str = "HTTP_TIMEOUT_SECS";
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Loads the configuration from `HEARTBEAT_CONFIG` (inline JSON) or from the
/// file named by `HEARTBEAT_CONFIG_PATH`, then applies secret overrides.
pub(crate) fn load_config() -> Result<Config> {
    let raw = match env_var(CONFIG_ENV) {
        Some(raw) => raw,
        None => {
            let path = env_var(CONFIG_PATH_ENV).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read configuration file {path}"))?
        }
    };
    resolve_config(&raw, env_var)
}

fn resolve_config(raw: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let mut config = Config::from_json(raw)?;
    if let Some(api_key) = lookup(WEATHER_API_KEY_ENV) {
        config = config.with_weather_api_key(api_key);
    }
    if let Some(token) = lookup(BOT_TOKEN_ENV) {
        config = config.with_default_bot_token(token);
    }
    Ok(config)
}

pub(crate) fn http_timeout() -> Duration {
    timeout_from(env_var(TIMEOUT_ENV))
}

fn timeout_from(value: Option<String>) -> Duration {
    let secs = value
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

fn env_var(name: &str) -> Option<String> {
    let value = std::env::var(name).unwrap_or_default();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
