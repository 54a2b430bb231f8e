use chrono::{DateTime, Datelike, Weekday};
use chrono_tz::Tz;
use serde::Deserialize;
use std::collections::HashMap;

const WEATHER_HEADER: &str = "🌤️ weather:";

/// Result of asking the weather collaborator for a forecast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForecastFetch {
    /// Raw response body, not yet validated.
    Body(String),
    /// Network error, timeout or non-success status.
    Unavailable,
}

#[derive(Debug, Deserialize)]
struct OneCallResponse {
    #[serde(default)]
    timezone: Option<String>,
    daily: Vec<DailyEntry>,
}

#[derive(Debug, Deserialize)]
struct DailyEntry {
    dt: i64,
    #[serde(default)]
    weather: Vec<WeatherCondition>,
    temp: DailyTemperature,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct DailyTemperature {
    day: f64,
    night: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub timestamp: i64,
    pub weekday: Weekday,
    pub description: String,
    pub day_temp: f64,
    pub night_temp: f64,
}

impl ForecastDay {
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday, Weekday::Fri | Weekday::Sat | Weekday::Sun)
    }

    /// `Sat: Light rain, 18°C ☀️ / 11°C 🌙`, optionally with a localized weekday label.
    pub fn render(&self, weekday_labels: &HashMap<String, String>) -> String {
        let short = short_weekday(self.weekday);
        let weekday = weekday_labels
            .get(short)
            .map(String::as_str)
            .unwrap_or(short);
        format!(
            "{weekday}: {}, {}°C ☀️ / {}°C 🌙",
            capitalize_first(&self.description),
            self.day_temp.round() as i64,
            self.night_temp.round() as i64,
        )
    }
}

/// Weather block appended at the end of the message.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastBlock {
    Days(Vec<String>),
    NoValidForecast,
    NoData,
    ApiError,
}

impl ForecastBlock {
    pub fn from_fetch(fetch: &ForecastFetch, weekday_labels: &HashMap<String, String>) -> Self {
        let body = match fetch {
            ForecastFetch::Body(body) => body,
            ForecastFetch::Unavailable => return ForecastBlock::ApiError,
        };
        let Some(days) = parse_days(body) else {
            return ForecastBlock::NoData;
        };
        let lines: Vec<String> = days
            .iter()
            .filter(|day| day.is_weekend())
            .map(|day| day.render(weekday_labels))
            .collect();
        if lines.is_empty() {
            ForecastBlock::NoValidForecast
        } else {
            ForecastBlock::Days(lines)
        }
    }

    /// Rendered block, starting with a newline so it is separated from the telemetry lines.
    pub fn render(&self) -> String {
        match self {
            ForecastBlock::Days(lines) => format!("\n{WEATHER_HEADER}\n{}", lines.join("\n")),
            ForecastBlock::NoValidForecast => format!("\n{WEATHER_HEADER} no valid forecast."),
            ForecastBlock::NoData => format!("\n{WEATHER_HEADER} no data available."),
            ForecastBlock::ApiError => format!("\n{WEATHER_HEADER} API error."),
        }
    }
}

/// Daily entries of a One Call response in their original order.
///
/// Weekdays are computed in the timezone reported by the response, UTC when
/// it is missing or unknown. Returns `None` when the body lacks the `daily` list.
pub fn parse_days(body: &str) -> Option<Vec<ForecastDay>> {
    let response: OneCallResponse = serde_json::from_str(body).ok()?;
    let tz = response
        .timezone
        .as_deref()
        .and_then(|name| name.parse::<Tz>().ok())
        .unwrap_or(Tz::UTC);

    let days = response
        .daily
        .into_iter()
        .filter_map(|entry| {
            let weekday = DateTime::from_timestamp(entry.dt, 0)?
                .with_timezone(&tz)
                .weekday();
            let description = entry
                .weather
                .into_iter()
                .next()
                .map(|condition| condition.description)
                .unwrap_or_default();
            Some(ForecastDay {
                timestamp: entry.dt,
                weekday,
                description,
                day_temp: entry.temp.day,
                night_temp: entry.temp.night,
            })
        })
        .collect();
    Some(days)
}

fn short_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // 2025-06-13 12:00:00 UTC, a Friday
    const FRIDAY_NOON: i64 = 1_749_816_000;
    const DAY: i64 = 86_400;

    fn daily(dt: i64, description: &str, day: f64, night: f64) -> serde_json::Value {
        json!({
            "dt": dt,
            "weather": [{"id": 500, "main": "Rain", "description": description}],
            "temp": {"day": day, "night": night, "min": night, "max": day},
        })
    }

    fn body(timezone: &str, days: Vec<serde_json::Value>) -> ForecastFetch {
        ForecastFetch::Body(
            json!({"lat": 50.12, "lon": 5.68, "timezone": timezone, "daily": days}).to_string(),
        )
    }

    fn week() -> Vec<serde_json::Value> {
        (0..7)
            .map(|offset| {
                daily(
                    FRIDAY_NOON - 3 * DAY + offset * DAY,
                    "light rain",
                    18.5,
                    -0.4,
                )
            })
            .collect()
    }

    #[test]
    fn keeps_only_weekend_days_in_order() {
        let block = ForecastBlock::from_fetch(&body("Europe/Rome", week()), &HashMap::new());
        assert_eq!(
            block,
            ForecastBlock::Days(vec![
                "Fri: Light rain, 19°C ☀️ / 0°C 🌙".to_string(),
                "Sat: Light rain, 19°C ☀️ / 0°C 🌙".to_string(),
                "Sun: Light rain, 19°C ☀️ / 0°C 🌙".to_string(),
            ])
        );
        assert_eq!(
            block.render(),
            "\n🌤️ weather:\nFri: Light rain, 19°C ☀️ / 0°C 🌙\nSat: Light rain, 19°C ☀️ / 0°C 🌙\nSun: Light rain, 19°C ☀️ / 0°C 🌙"
        );
    }

    #[test]
    fn rounds_half_away_from_zero() {
        let fetch = body("UTC", vec![daily(FRIDAY_NOON, "clear sky", 12.5, -2.5)]);
        assert_eq!(
            ForecastBlock::from_fetch(&fetch, &HashMap::new()),
            ForecastBlock::Days(vec!["Fri: Clear sky, 13°C ☀️ / -3°C 🌙".to_string()])
        );
    }

    #[test]
    fn weekday_labels_translate_display_only() {
        let labels = HashMap::from([
            ("Fri".to_string(), "Fr".to_string()),
            ("Sat".to_string(), "Sa".to_string()),
        ]);
        let fetch = body(
            "UTC",
            vec![
                daily(FRIDAY_NOON, "überwiegend bewölkt", 20.0, 10.0),
                daily(FRIDAY_NOON + DAY, "klarer himmel", 21.0, 11.0),
                daily(FRIDAY_NOON + 2 * DAY, "regen", 15.0, 9.0),
            ],
        );
        assert_eq!(
            ForecastBlock::from_fetch(&fetch, &labels),
            ForecastBlock::Days(vec![
                "Fr: Überwiegend bewölkt, 20°C ☀️ / 10°C 🌙".to_string(),
                "Sa: Klarer himmel, 21°C ☀️ / 11°C 🌙".to_string(),
                "Sun: Regen, 15°C ☀️ / 9°C 🌙".to_string(),
            ])
        );
    }

    #[test]
    fn weekday_follows_forecast_timezone() {
        // 23:30 UTC on Thursday is already Friday in Rome
        let late_thursday = FRIDAY_NOON - 12 * 3600 - 1800;
        let entries = vec![daily(late_thursday, "fog", 5.0, 3.0)];
        assert_eq!(
            ForecastBlock::from_fetch(&body("UTC", entries.clone()), &HashMap::new()),
            ForecastBlock::NoValidForecast
        );
        assert!(matches!(
            ForecastBlock::from_fetch(&body("Europe/Rome", entries), &HashMap::new()),
            ForecastBlock::Days(_)
        ));
    }

    #[test]
    fn unknown_timezone_falls_back_to_utc() {
        let days = parse_days(
            &json!({"timezone": "Mars/Olympus", "daily": [daily(FRIDAY_NOON, "dust", 1.0, 0.0)]})
                .to_string(),
        )
        .unwrap();
        assert_eq!(days[0].weekday, Weekday::Fri);
    }

    #[test]
    fn weekdays_only_yield_no_valid_forecast() {
        let entries = (1..5)
            .map(|offset| daily(FRIDAY_NOON - offset * DAY, "rain", 10.0, 5.0))
            .collect();
        let block = ForecastBlock::from_fetch(&body("UTC", entries), &HashMap::new());
        assert_eq!(block, ForecastBlock::NoValidForecast);
        assert_eq!(block.render(), "\n🌤️ weather: no valid forecast.");
    }

    #[test]
    fn missing_daily_list_yields_no_data() {
        let fetch = ForecastFetch::Body(json!({"cod": 401, "message": "Invalid API key"}).to_string());
        let block = ForecastBlock::from_fetch(&fetch, &HashMap::new());
        assert_eq!(block, ForecastBlock::NoData);
        assert_eq!(block.render(), "\n🌤️ weather: no data available.");

        let garbage = ForecastFetch::Body("<html>bad gateway</html>".to_string());
        assert_eq!(
            ForecastBlock::from_fetch(&garbage, &HashMap::new()),
            ForecastBlock::NoData
        );
    }

    #[test]
    fn unavailable_forecast_yields_api_error() {
        let block = ForecastBlock::from_fetch(&ForecastFetch::Unavailable, &HashMap::new());
        assert_eq!(block, ForecastBlock::ApiError);
        assert_eq!(block.render(), "\n🌤️ weather: API error.");
    }

    #[test]
    fn missing_condition_leaves_description_empty() {
        let fetch = ForecastFetch::Body(
            json!({"daily": [{"dt": FRIDAY_NOON, "weather": [], "temp": {"day": 7.0, "night": 2.0}}]})
                .to_string(),
        );
        assert_eq!(
            ForecastBlock::from_fetch(&fetch, &HashMap::new()),
            ForecastBlock::Days(vec!["Fri: , 7°C ☀️ / 2°C 🌙".to_string()])
        );
    }
}
