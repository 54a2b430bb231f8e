use heartbeat_core::config::Config;
use heartbeat_core::pipeline;
use heartbeat_core::request::HeartbeatRequest;
use lambda_runtime::{Error as LambdaError, LambdaEvent, service_fn};
use reqwest::Client as HTTPClient;
use serde_json::Value;
use tracing::instrument;
use tracing_subscriber::EnvFilter;

mod config;
mod event;
mod logging;
mod telegram;
mod weather;

// Query parameters carry the API key: keep the event out of the span.
#[instrument(skip_all)]
async fn lambda_handler(
    http_client: &HTTPClient,
    config: &Config,
    event: LambdaEvent<Value>,
) -> Result<Value, LambdaError> {
    let params = event::query_parameters(&event.payload)?;
    let request = HeartbeatRequest::from_query(&params);

    let forecasts = weather::OpenWeatherMap::new(http_client, &config.weather);
    let sender = telegram::TelegramSender::new(http_client);
    let outcome = pipeline::handle(config, &request, &forecasts, &sender).await;

    logging::outcome_summary(&outcome);
    Ok(event::response(&outcome))
}

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()) // Enable log level filtering via `RUST_LOG` env var
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .with_target(false)
        .without_time()
        .init();

    let config = config::load_config().inspect_err(|err| {
        logging::Logger::new().error("config.load_failed", err, "Failed to load configuration");
    })?;
    logging::Logger::new().info("config.loaded", "Configuration loaded");

    let http_client = HTTPClient::builder()
        .timeout(config::http_timeout())
        .build()?;

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| async {
        lambda_handler(&http_client, &config, event).await
    }))
    .await?;
    Ok(())
}
