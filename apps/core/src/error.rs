use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
///
/// Only `InvalidInput` ever reaches the caller of a conversation turn; the
/// remaining variants are absorbed inside the pipeline and degrade to the
/// `unknown` conversational path.
#[derive(Debug, Error, Clone)]
pub enum ChatError {
    /// The raw message was rejected by the sanitizer (empty, injection-like
    /// pattern, forbidden control characters).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The external intent-prediction service was unreachable or returned
    /// malformed data.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// A context cache entry could not be serialized or deserialized.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration-related errors (e.g. an unparseable endpoint URL).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::Cache(format!("JSON error: {}", err))
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::ExternalService(format!("HTTP error: {}", err))
    }
}

impl From<url::ParseError> for ChatError {
    fn from(err: url::ParseError) -> Self {
        ChatError::Config(format!("URL parse error: {}", err))
    }
}

impl From<validator::ValidationErrors> for ChatError {
    fn from(err: validator::ValidationErrors) -> Self {
        ChatError::InvalidInput(format!("Validation errors: {}", err))
    }
}
