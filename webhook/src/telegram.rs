use crate::logging;
use heartbeat_core::dispatch::{DispatchStatus, MessageSender};
use heartbeat_core::router::RoutingContext;
use reqwest::{Client as HTTPClient, StatusCode};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const PARSE_MODE: &str = "HTML";

/// Sends heartbeats through the Bot API `sendMessage` method.
pub(crate) struct TelegramSender<'a> {
    http_client: &'a HTTPClient,
    api_base: String,
}

impl<'a> TelegramSender<'a> {
    pub(crate) fn new(http_client: &'a HTTPClient) -> Self {
        Self::with_api_base(http_client, TELEGRAM_API_BASE)
    }

    pub(crate) fn with_api_base(http_client: &'a HTTPClient, api_base: impl Into<String>) -> Self {
        Self {
            http_client,
            api_base: api_base.into(),
        }
    }
}

impl MessageSender for TelegramSender<'_> {
    async fn send(&self, routing: &RoutingContext, text: &str) -> DispatchStatus {
        let logger = logging::Logger::new()
            .bot(&routing.bot_key)
            .recipient(&routing.recipient_key);
        let response = self
            .http_client
            .post(send_message_url(&self.api_base, &routing.bot_token))
            .form(&send_message_form(&routing.chat_id, text))
            .send()
            .await;

        match response {
            Ok(response) if response.status() == StatusCode::OK => DispatchStatus::Delivered,
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                logger.http_status(status.as_u16()).error_text(body).error(
                    "dispatch.failed",
                    &status,
                    "Telegram rejected the message",
                );
                DispatchStatus::Failed
            }
            Err(err) => {
                logger.error(
                    "dispatch.failed",
                    &err.without_url(),
                    "Failed to reach Telegram",
                );
                DispatchStatus::Failed
            }
        }
    }
}

fn send_message_url(api_base: &str, bot_token: &str) -> String {
    format!("{api_base}/bot{bot_token}/sendMessage")
}

fn send_message_form<'a>(chat_id: &'a str, text: &'a str) -> [(&'static str, &'a str); 3] {
    [("chat_id", chat_id), ("text", text), ("parse_mode", PARSE_MODE)]
}
