use crate::DEFAULT_KEY;
use crate::config::Config;
use std::fmt;

pub const INVALID_API_KEY: &str = "Invalid API key for selected bot.";

/// Bot and recipient resolved for one request.
#[derive(Clone, PartialEq, Eq)]
pub struct RoutingContext {
    pub bot_key: String,
    pub bot_token: String,
    pub recipient_key: String,
    pub chat_id: String,
}

impl fmt::Debug for RoutingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingContext")
            .field("bot_key", &self.bot_key)
            .field("bot_token", &"<redacted>")
            .field("recipient_key", &self.recipient_key)
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationError;

impl fmt::Display for AuthorizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(INVALID_API_KEY)
    }
}

impl std::error::Error for AuthorizationError {}

pub struct RequestRouter<'a> {
    config: &'a Config,
}

impl<'a> RequestRouter<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Resolves bot and recipient, falling back to `default` for unknown keys,
    /// then checks the API key configured for the resolved bot.
    pub fn route(
        &self,
        bot: Option<&str>,
        api_key: Option<&str>,
        recipient: Option<&str>,
    ) -> Result<RoutingContext, AuthorizationError> {
        let bot_key = resolve_key(bot, |key| self.config.bot_token(key).is_some());
        let expected = self.config.api_key(bot_key).ok_or(AuthorizationError)?;
        let provided = api_key.ok_or(AuthorizationError)?;
        if !constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
            return Err(AuthorizationError);
        }

        let bot_token = self.config.bot_token(bot_key).ok_or(AuthorizationError)?;
        let recipient_key = resolve_key(recipient, |key| self.config.chat_id(key).is_some());
        let chat_id = self.config.chat_id(recipient_key).ok_or(AuthorizationError)?;

        Ok(RoutingContext {
            bot_key: bot_key.to_string(),
            bot_token: bot_token.to_string(),
            recipient_key: recipient_key.to_string(),
            chat_id: chat_id.to_string(),
        })
    }
}

fn resolve_key<'k>(requested: Option<&'k str>, known: impl Fn(&str) -> bool) -> &'k str {
    match requested {
        Some(key) if known(key) => key,
        _ => DEFAULT_KEY,
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::sample_config;

    #[test]
    fn missing_keys_fall_back_to_default() {
        let config = sample_config();
        let routing = RequestRouter::new(&config)
            .route(None, Some("default-key"), None)
            .unwrap();
        assert_eq!(routing.bot_key, "default");
        assert_eq!(routing.bot_token, "222:default-token");
        assert_eq!(routing.recipient_key, "default");
        assert_eq!(routing.chat_id, "1000");
    }

    #[test]
    fn unknown_keys_fall_back_to_default() {
        let config = sample_config();
        let routing = RequestRouter::new(&config)
            .route(Some("nope"), Some("default-key"), Some("zz"))
            .unwrap();
        assert_eq!(routing.bot_key, "default");
        assert_eq!(routing.chat_id, "1000");
    }

    #[test]
    fn known_keys_are_selected() {
        let config = sample_config();
        let routing = RequestRouter::new(&config)
            .route(Some("mb"), Some("mb-key"), Some("ab"))
            .unwrap();
        assert_eq!(routing.bot_key, "mb");
        assert_eq!(routing.bot_token, "111:mb-token");
        assert_eq!(routing.recipient_key, "ab");
        assert_eq!(routing.chat_id, "1001");
    }

    #[test]
    fn api_key_is_checked_against_resolved_bot() {
        let config = sample_config();
        let router = RequestRouter::new(&config);
        assert_eq!(
            router.route(Some("mb"), Some("default-key"), None),
            Err(AuthorizationError)
        );
        assert_eq!(
            router.route(None, Some("mb-key"), None),
            Err(AuthorizationError)
        );
        // unknown bot resolves to default, so only the default key is accepted
        assert!(router.route(Some("nope"), Some("mb-key"), None).is_err());
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let config = sample_config();
        assert_eq!(
            RequestRouter::new(&config).route(Some("mb"), None, Some("ab")),
            Err(AuthorizationError)
        );
        assert_eq!(AuthorizationError.to_string(), INVALID_API_KEY);
    }

    #[test]
    fn debug_output_hides_bot_token() {
        let config = sample_config();
        let routing = RequestRouter::new(&config)
            .route(Some("mb"), Some("mb-key"), None)
            .unwrap();
        assert!(!format!("{routing:?}").contains("mb-token"));
    }

    #[test]
    fn api_key_must_match_exactly() {
        let config = sample_config();
        let router = RequestRouter::new(&config);
        assert!(router.route(Some("mb"), Some("mb-key"), None).is_ok());
        assert!(router.route(Some("mb"), Some("mb-kez"), None).is_err());
        assert!(router.route(Some("mb"), Some("mb-ke"), None).is_err());
        assert!(router.route(Some("mb"), Some("mb-key "), None).is_err());
        assert!(router.route(Some("mb"), Some(""), None).is_err());
    }
}
