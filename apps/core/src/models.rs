use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::brain::Intent;

/// A single inbound conversation turn.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TurnRequest {
    /// The raw free-text message. Untrusted; sanitized before classification.
    #[validate(length(min = 1, max = 4096))]
    pub message: String,
    /// Caller identity. Anonymous identities are allowed; the driver mints
    /// one when none is configured.
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,
}

impl TurnRequest {
    pub fn new(message: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            user_id: user_id.into(),
        }
    }
}

/// The structured reply for one turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnReply {
    /// The canned response text.
    pub reply: String,
    /// The intent the message resolved to.
    pub intent: Intent,
}
