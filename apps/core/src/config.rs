//! Environment-based configuration.
//!
//! Credentials and endpoints are externally managed; the core only reads
//! them. A missing classifier endpoint or token is not an error: the engine
//! then runs with the predictor disabled and every unmatched message routes
//! through the contextual fallback.

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ChatError;

const ENV_CLASSIFIER_URL: &str = "BIZCHAT_CLASSIFIER_URL";
const ENV_CLASSIFIER_TOKEN: &str = "BIZCHAT_CLASSIFIER_TOKEN";
const ENV_TIMEOUT_SECS: &str = "BIZCHAT_TIMEOUT_SECS";
const ENV_USER_ID: &str = "BIZCHAT_USER_ID";

/// Fixed short timeout for the external classification call.
const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Endpoint of the external intent-prediction service, if configured.
    pub classifier_url: Option<Url>,
    /// Bearer token for the prediction service, if configured.
    pub classifier_token: Option<String>,
    /// Timeout applied to each prediction request.
    pub request_timeout: Duration,
    /// Caller identity for the REPL driver; anonymous when absent.
    pub user_id: Option<String>,
}

impl ChatConfig {
    /// Reads configuration from the environment. Only a present-but-invalid
    /// value is an error; absent values fall back to defaults.
    pub fn from_env() -> Result<Self, ChatError> {
        let classifier_url = match env::var(ENV_CLASSIFIER_URL) {
            Ok(raw) => Some(Url::parse(&raw)?),
            Err(_) => None,
        };

        let classifier_token = env::var(ENV_CLASSIFIER_TOKEN).ok();

        let request_timeout = match env::var(ENV_TIMEOUT_SECS) {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    ChatError::Config(format!("{} must be an integer, got '{}'", ENV_TIMEOUT_SECS, raw))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let user_id = env::var(ENV_USER_ID).ok();

        Ok(Self {
            classifier_url,
            classifier_token,
            request_timeout,
            user_id,
        })
    }

    /// True when both the endpoint and the token are present.
    pub fn classifier_enabled(&self) -> bool {
        self.classifier_url.is_some() && self.classifier_token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_env_is_empty() {
        temp_env::with_vars(
            [
                (ENV_CLASSIFIER_URL, None::<&str>),
                (ENV_CLASSIFIER_TOKEN, None),
                (ENV_TIMEOUT_SECS, None),
                (ENV_USER_ID, None),
            ],
            || {
                let config = ChatConfig::from_env().unwrap();
                assert!(config.classifier_url.is_none());
                assert!(config.classifier_token.is_none());
                assert!(!config.classifier_enabled());
                assert_eq!(config.request_timeout, Duration::from_secs(5));
                assert!(config.user_id.is_none());
            },
        );
    }

    #[test]
    fn test_reads_classifier_settings() {
        temp_env::with_vars(
            [
                (ENV_CLASSIFIER_URL, Some("https://intents.example.com/predict")),
                (ENV_CLASSIFIER_TOKEN, Some("secret-token")),
                (ENV_TIMEOUT_SECS, Some("2")),
            ],
            || {
                let config = ChatConfig::from_env().unwrap();
                assert!(config.classifier_enabled());
                assert_eq!(
                    config.classifier_url.unwrap().as_str(),
                    "https://intents.example.com/predict"
                );
                assert_eq!(config.classifier_token.unwrap(), "secret-token");
                assert_eq!(config.request_timeout, Duration::from_secs(2));
            },
        );
    }

    #[test]
    fn test_invalid_url_is_an_error() {
        temp_env::with_var(ENV_CLASSIFIER_URL, Some("not a url"), || {
            assert!(matches!(
                ChatConfig::from_env(),
                Err(ChatError::Config(_))
            ));
        });
    }

    #[test]
    fn test_invalid_timeout_is_an_error() {
        temp_env::with_vars(
            [
                (ENV_CLASSIFIER_URL, None),
                (ENV_TIMEOUT_SECS, Some("soon")),
            ],
            || {
                assert!(matches!(
                    ChatConfig::from_env(),
                    Err(ChatError::Config(_))
                ));
            },
        );
    }
}
