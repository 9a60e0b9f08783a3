//! External intent-prediction client.
//!
//! Wraps the remote classification service behind the [`IntentPredictor`]
//! trait so the classifier can be tested without a live endpoint. The caller
//! (the classifier) treats every error as recoverable and degrades to a
//! neutral `{unknown, 0.0}` prediction; nothing here ever fails a turn.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::ChatError;

/// A single labeled prediction with its confidence score.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub score: f32,
}

impl Prediction {
    /// The neutral prediction every failure path degrades to.
    pub fn unknown() -> Self {
        Self {
            label: "unknown".to_string(),
            score: 0.0,
        }
    }
}

/// Wire format of the prediction service response.
#[derive(Debug, Deserialize)]
struct PredictionResponse {
    #[serde(default)]
    predictions: Vec<PredictionEntry>,
}

#[derive(Debug, Deserialize)]
struct PredictionEntry {
    label: String,
    score: f32,
}

/// Seam for the external classification call.
#[async_trait]
pub trait IntentPredictor: Send + Sync {
    async fn predict(&self, text: &str) -> Result<Prediction, ChatError>;
}

/// HTTP client for the remote intent-prediction service.
///
/// `POST <endpoint>` with a bearer token and body `{"text": <string>}`,
/// expecting `{"predictions": [{"label": ..., "score": ...}, ...]}`. The
/// request timeout is fixed at construction; there are no retries.
pub struct HttpIntentPredictor {
    client: Client,
    endpoint: Url,
    auth_token: String,
}

impl HttpIntentPredictor {
    pub fn new(endpoint: Url, auth_token: String, timeout: Duration) -> Result<Self, ChatError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            auth_token,
        })
    }
}

#[async_trait]
impl IntentPredictor for HttpIntentPredictor {
    async fn predict(&self, text: &str) -> Result<Prediction, ChatError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", self.auth_token);
        headers.insert(
            AUTHORIZATION,
            auth_value
                .parse()
                .map_err(|_| ChatError::Config("auth token is not a valid header".to_string()))?,
        );

        let payload = serde_json::json!({ "text": text });

        let res = self
            .client
            .post(self.endpoint.clone())
            .headers(headers)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ChatError::ExternalService(format!(
                "Prediction request failed with status {}: {}",
                status, body
            )));
        }

        let parsed: PredictionResponse = res.json().await?;

        // The service returns predictions sorted by score; absence of any
        // prediction maps to the neutral result.
        let best = match parsed.predictions.into_iter().next() {
            Some(entry) => Prediction {
                label: entry.label,
                score: entry.score,
            },
            None => Prediction::unknown(),
        };

        debug!(label = %best.label, score = best.score, "external prediction received");
        Ok(best)
    }
}

/// Predictor used when no classification endpoint is configured. Every call
/// yields the neutral prediction, which routes turns through the contextual
/// fallback.
pub struct DisabledPredictor;

#[async_trait]
impl IntentPredictor for DisabledPredictor {
    async fn predict(&self, _text: &str) -> Result<Prediction, ChatError> {
        Ok(Prediction::unknown())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_predictor_is_neutral() {
        let predictor = DisabledPredictor;
        let prediction = predictor.predict("anything at all").await.unwrap();
        assert_eq!(prediction, Prediction::unknown());
    }

    #[test]
    fn test_response_parsing_tolerates_missing_predictions() {
        let parsed: PredictionResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.predictions.is_empty());
    }
}
