use crate::compose::{ForecastSource, Message, MessageComposer};
use crate::config::Config;
use crate::dispatch::{DispatchStatus, MessageSender};
use crate::request::HeartbeatRequest;
use crate::router::{INVALID_API_KEY, RequestRouter, RoutingContext};
use serde_json::{Value, json};

/// Final result of one heartbeat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Unauthorized,
    /// No telemetry produced a line; nothing was sent.
    NothingToSend(RoutingContext),
    Dispatched {
        routing: RoutingContext,
        message: Message,
        status: DispatchStatus,
    },
}

impl Outcome {
    pub fn status_code(&self) -> u16 {
        match self {
            Outcome::Unauthorized => 403,
            Outcome::NothingToSend(_) | Outcome::Dispatched { .. } => 200,
        }
    }

    pub fn body(&self) -> Value {
        match self {
            Outcome::Unauthorized => json!({
                "status": "error",
                "error": INVALID_API_KEY,
            }),
            Outcome::NothingToSend(_) => json!({
                "status": "ok",
                "message": "nothing to send",
            }),
            Outcome::Dispatched { status, .. } => json!({
                "status": status.as_str(),
            }),
        }
    }
}

/// Authorizes, composes and dispatches a single heartbeat.
pub async fn handle<F, S>(
    config: &Config,
    request: &HeartbeatRequest,
    forecasts: &F,
    sender: &S,
) -> Outcome
where
    F: ForecastSource,
    S: MessageSender,
{
    let routing = match RequestRouter::new(config).route(
        request.bot.as_deref(),
        request.api_key.as_deref(),
        request.recipient.as_deref(),
    ) {
        Ok(routing) => routing,
        Err(_) => return Outcome::Unauthorized,
    };

    let message = MessageComposer::new(config)
        .compose(&request.telemetry, forecasts)
        .await;
    if message.is_empty() {
        return Outcome::NothingToSend(routing);
    }

    let status = sender.send(&routing, &message.text()).await;
    Outcome::Dispatched {
        routing,
        message,
        status,
    }
}
