use heartbeat_core::pipeline::Outcome;
use tracing::{error, info, warn};

pub(crate) const TARGET: &str = "heartbeat_webhook";

#[derive(Clone, Default)]
pub(crate) struct Logger {
    bot: Option<String>,
    recipient: Option<String>,
    lines: Option<usize>,
    status: Option<&'static str>,
    http_status: Option<u16>,
    error_text: Option<String>,
}

impl Logger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_outcome(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Unauthorized => Self::new().status("unauthorized"),
            Outcome::NothingToSend(routing) => Self::new()
                .bot(&routing.bot_key)
                .recipient(&routing.recipient_key)
                .lines(0)
                .status("empty"),
            Outcome::Dispatched {
                routing,
                message,
                status,
            } => Self::new()
                .bot(&routing.bot_key)
                .recipient(&routing.recipient_key)
                .lines(message.lines().len())
                .status(status.as_str()),
        }
    }

    pub(crate) fn bot(mut self, bot: impl Into<String>) -> Self {
        self.bot = Some(bot.into());
        self
    }

    pub(crate) fn recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    pub(crate) fn lines(mut self, lines: usize) -> Self {
        self.lines = Some(lines);
        self
    }

    pub(crate) fn status(mut self, status: &'static str) -> Self {
        self.status = Some(status);
        self
    }

    pub(crate) fn http_status(mut self, http_status: u16) -> Self {
        self.http_status = Some(http_status);
        self
    }

    pub(crate) fn error_text(mut self, error_text: impl Into<String>) -> Self {
        self.error_text = Some(error_text.into());
        self
    }

    pub(crate) fn info(&self, event: &'static str, message: &str) {
        info!(
            target: TARGET,
            event,
            bot = self.bot.as_deref(),
            recipient = self.recipient.as_deref(),
            lines = self.lines,
            status = self.status,
            http_status = self.http_status,
            "{}",
            message
        );
    }

    pub(crate) fn warn(&self, event: &'static str, message: &str) {
        warn!(
            target: TARGET,
            event,
            bot = self.bot.as_deref(),
            recipient = self.recipient.as_deref(),
            status = self.status,
            "{}",
            message
        );
    }

    pub(crate) fn error<E: std::fmt::Debug>(&self, event: &'static str, err: &E, message: &str) {
        error!(
            target: TARGET,
            event,
            bot = self.bot.as_deref(),
            recipient = self.recipient.as_deref(),
            lines = self.lines,
            status = self.status,
            http_status = self.http_status,
            error_text = self.error_text.as_deref(),
            error = ?err,
            "{}",
            message
        );
    }
}

/// Logs the final outcome of a request.
pub(crate) fn outcome_summary(outcome: &Outcome) {
    let logger = Logger::from_outcome(outcome);
    match outcome {
        Outcome::Unauthorized => logger.warn("request.unauthorized", "Rejected request"),
        Outcome::NothingToSend(_) => logger.info("request.empty", "No telemetry to send"),
        Outcome::Dispatched { .. } => logger.info("request.dispatched", "Heartbeat processed"),
    }
}
