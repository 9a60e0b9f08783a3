//! Conversation orchestrator.
//!
//! Composes sanitizer, classifier, response table and context store into one
//! request-response turn. This is the only component that mutates context,
//! and it writes exactly once per turn, `Unknown` included.

use tracing::info;
use validator::Validate;

use crate::brain::{DisabledPredictor, HttpIntentPredictor, IntentClassifier, IntentPredictor};
use crate::config::ChatConfig;
use crate::context::{ContextStore, ConversationContext};
use crate::error::ChatError;
use crate::models::{TurnReply, TurnRequest};
use crate::responses;
use crate::sanitizer::{self, CleanText};

pub struct ChatEngine {
    classifier: IntentClassifier,
    store: ContextStore,
}

impl ChatEngine {
    /// Builds the engine from configuration. The predictor is constructed
    /// exactly once here and shared across all turns; without classifier
    /// credentials it degrades to the disabled predictor.
    pub fn from_config(config: &ChatConfig) -> Result<Self, ChatError> {
        let predictor: Box<dyn IntentPredictor> =
            match (&config.classifier_url, &config.classifier_token) {
                (Some(url), Some(token)) => Box::new(HttpIntentPredictor::new(
                    url.clone(),
                    token.clone(),
                    config.request_timeout,
                )?),
                _ => {
                    info!("no classifier endpoint configured, external prediction disabled");
                    Box::new(DisabledPredictor)
                }
            };

        Ok(Self::with_parts(
            IntentClassifier::new(predictor),
            ContextStore::new(),
        ))
    }

    /// Assembles an engine from prebuilt parts. Test seam.
    pub fn with_parts(classifier: IntentClassifier, store: ContextStore) -> Self {
        Self { classifier, store }
    }

    /// Handles one full turn from a raw message. Only sanitizer and
    /// validation failures surface; everything downstream degrades to the
    /// `unknown` conversational path.
    pub async fn handle_message(&self, request: &TurnRequest) -> Result<TurnReply, ChatError> {
        request.validate()?;
        let clean = sanitizer::sanitize(&request.message)?;
        Ok(self.handle_turn(&clean, &request.user_id).await)
    }

    /// Handles one turn for already-sanitized text: load context, classify,
    /// select the reply, persist the newly detected intent.
    pub async fn handle_turn(&self, text: &CleanText, user_id: &str) -> TurnReply {
        let context = self.store.get(user_id);
        let intent = self.classifier.classify(text, &context).await;
        let reply = responses::respond(intent);

        self.store
            .set(user_id, &ConversationContext::with_intent(intent));

        info!(user = user_id, intent = %intent, "turn handled");

        TurnReply {
            reply: reply.to_string(),
            intent,
        }
    }

    /// Read-only view of a user's stored context.
    pub fn context_for(&self, user_id: &str) -> ConversationContext {
        self.store.get(user_id)
    }
}
