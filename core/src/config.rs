use crate::DEFAULT_KEY;
use crate::geo::{DEFAULT_DISTANCE_THRESHOLD, ReferencePoint};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::HashMap;

const DEFAULT_WEATHER_LANG: &str = "en";

#[derive(Clone, Deserialize)]
pub struct WeatherConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_weather_lang")]
    pub lang: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            lang: default_weather_lang(),
        }
    }
}

/// Static configuration shared by every invocation.
///
/// Build it with [`Config::from_json`] or [`Config::validate`] before use: the
/// router relies on the `default` entries being present.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Bot key → Telegram bot token.
    pub bots: HashMap<String, String>,
    /// Bot key → API key the tracker must send along with that bot.
    pub api_keys: HashMap<String, String>,
    /// Recipient key → Telegram chat id.
    pub recipients: HashMap<String, String>,
    pub reference_points: Vec<ReferencePoint>,
    #[serde(default = "default_distance_threshold")]
    pub distance_threshold: f64,
    #[serde(default)]
    pub weather: WeatherConfig,
    /// English weekday short name → label shown in the forecast.
    #[serde(default)]
    pub weekday_labels: HashMap<String, String>,
}

impl Config {
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(raw).context("Failed to parse heartbeat configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, map) in [
            ("bots", &self.bots),
            ("api_keys", &self.api_keys),
            ("recipients", &self.recipients),
        ] {
            match map.get(DEFAULT_KEY) {
                Some(value) if !value.trim().is_empty() => {}
                _ => bail!("Missing '{DEFAULT_KEY}' entry in '{name}'"),
            }
        }
        for bot in self.bots.keys() {
            if !self.api_keys.contains_key(bot) {
                bail!("Bot '{bot}' has no API key configured");
            }
        }
        if self.reference_points.is_empty() {
            bail!("At least one reference point is required");
        }
        for point in &self.reference_points {
            if !(-90.0..=90.0).contains(&point.latitude)
                || !(-180.0..=180.0).contains(&point.longitude)
            {
                bail!(
                    "Reference point '{}' has invalid coordinates ({}, {})",
                    point.label,
                    point.latitude,
                    point.longitude
                );
            }
        }
        if !self.distance_threshold.is_finite() || self.distance_threshold < 0.0 {
            bail!(
                "Invalid distance threshold: {}",
                self.distance_threshold
            );
        }
        Ok(())
    }

    pub fn with_weather_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.weather.api_key = api_key.into();
        self
    }

    pub fn with_default_bot_token(mut self, token: impl Into<String>) -> Self {
        self.bots.insert(DEFAULT_KEY.to_string(), token.into());
        self
    }

    pub fn bot_token(&self, bot: &str) -> Option<&str> {
        self.bots.get(bot).map(String::as_str)
    }

    pub fn api_key(&self, bot: &str) -> Option<&str> {
        self.api_keys.get(bot).map(String::as_str)
    }

    pub fn chat_id(&self, recipient: &str) -> Option<&str> {
        self.recipients.get(recipient).map(String::as_str)
    }
}

fn default_distance_threshold() -> f64 {
    DEFAULT_DISTANCE_THRESHOLD
}

fn default_weather_lang() -> String {
    DEFAULT_WEATHER_LANG.to_string()
}
