//! Layered intent classification.
//!
//! Stage order, which is load-bearing:
//! 1. Normalization (lowercase, strip to letters/digits/spaces plus intraword
//!    apostrophes and hyphens, collapse whitespace)
//! 2. Keyword stage (substring table, first match wins)
//! 3. Pattern stage (word-boundary regex table, first match wins)
//! 4. External prediction (errors absorbed, never propagated)
//! 5. Confidence gating against the prior conversational context
//!
//! `classify` always returns exactly one label and never errors for a
//! well-formed [`CleanText`].

use tracing::{debug, warn};

use super::intent::{self, Intent};
use super::keywords;
use super::predictor::{IntentPredictor, Prediction};
use crate::context::ConversationContext;
use crate::sanitizer::CleanText;

/// External predictions below this score are not trusted and fall back to the
/// prior context intent.
const CONFIDENCE_THRESHOLD: f32 = 0.5;

pub struct IntentClassifier {
    predictor: Box<dyn IntentPredictor>,
}

impl IntentClassifier {
    pub fn new(predictor: Box<dyn IntentPredictor>) -> Self {
        Self { predictor }
    }

    /// Classify a sanitized message, consulting the prior context only when
    /// the external prediction is low-confidence.
    pub async fn classify(&self, text: &CleanText, context: &ConversationContext) -> Intent {
        let normalized = normalize(text.as_str());

        if let Some(intent) = keywords::match_keywords(&normalized) {
            debug!(intent = %intent, "keyword stage matched");
            return intent;
        }

        if let Some(intent) = intent::match_patterns(&normalized) {
            debug!(intent = %intent, "pattern stage matched");
            return intent;
        }

        let prediction = match self.predictor.predict(&normalized).await {
            Ok(prediction) => prediction,
            Err(e) => {
                warn!("intent prediction failed, degrading to neutral: {}", e);
                Prediction::unknown()
            }
        };

        if prediction.score < CONFIDENCE_THRESHOLD {
            return match context.last_intent {
                Some(prior) if !prior.is_terminal() => {
                    debug!(intent = %prior, "low confidence, falling back to prior intent");
                    prior
                }
                _ => Intent::Unknown,
            };
        }

        Intent::from_label(&prediction.label)
    }
}

/// Lowercases and strips the text to letters, digits and spaces, retaining
/// intraword apostrophes and hyphens, then collapses whitespace runs.
fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '\'' || c == '-' {
                c
            } else {
                ' '
            }
        })
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
