pub mod compose;
pub mod config;
pub mod dispatch;
pub mod forecast;
pub mod geo;
mod parse;
pub mod pipeline;
pub mod request;
pub mod router;
pub mod sensor;
pub use parse::parse_numeric;

/// Key used for the bot and recipient when the request does not name a configured one.
pub const DEFAULT_KEY: &str = "default";
/// Header of every message sent to the recipient.
pub const MESSAGE_HEADER: &str = "Heartbeat:";
