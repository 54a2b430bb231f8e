use crate::logging;
use anyhow::Result;
use heartbeat_core::compose::ForecastSource;
use heartbeat_core::config::WeatherConfig;
use heartbeat_core::forecast::ForecastFetch;
use heartbeat_core::geo::Position;
use reqwest::Client as HTTPClient;

const OPENWEATHERMAP_API_BASE: &str = "https://api.openweathermap.org";
const ONE_CALL_PATH: &str = "/data/3.0/onecall";
const EXCLUDE: &str = "minutely,hourly,alerts";
const UNITS: &str = "metric";

/// OpenWeatherMap One Call 3.0 client.
pub(crate) struct OpenWeatherMap<'a> {
    http_client: &'a HTTPClient,
    config: &'a WeatherConfig,
    api_base: String,
}

impl<'a> OpenWeatherMap<'a> {
    pub(crate) fn new(http_client: &'a HTTPClient, config: &'a WeatherConfig) -> Self {
        Self::with_api_base(http_client, config, OPENWEATHERMAP_API_BASE)
    }

    pub(crate) fn with_api_base(
        http_client: &'a HTTPClient,
        config: &'a WeatherConfig,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            config,
            api_base: api_base.into(),
        }
    }

    async fn fetch(&self, position: Position) -> Result<String> {
        let url = forecast_url(&self.api_base, position, self.config);
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        response
            .error_for_status_ref()
            .map_err(|err| err.without_url())?;
        Ok(response.text().await.map_err(reqwest::Error::without_url)?)
    }
}

impl ForecastSource for OpenWeatherMap<'_> {
    async fn forecast(&self, position: Position) -> ForecastFetch {
        match self.fetch(position).await {
            Ok(body) => ForecastFetch::Body(body),
            Err(err) => {
                logging::Logger::new().error(
                    "forecast.failed",
                    &err,
                    "Failed to fetch weather forecast",
                );
                ForecastFetch::Unavailable
            }
        }
    }
}

fn forecast_url(api_base: &str, position: Position, config: &WeatherConfig) -> String {
    format!(
        "{api_base}{ONE_CALL_PATH}?lat={}&lon={}&exclude={EXCLUDE}&appid={}&units={UNITS}&lang={}",
        position.latitude, position.longitude, config.api_key, config.lang
    )
}
