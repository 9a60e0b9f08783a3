//! # Brain Module
//!
//! Intent detection for BizChat. Resolves each sanitized message to exactly
//! one intent label, cheapest strategy first.
//!
//! ## Components
//! - `intent`: intent labels and the regex pattern stage
//! - `keywords`: substring keyword stage (runs first)
//! - `predictor`: external intent-prediction client (fallback)
//! - `classifier`: stage orchestration and confidence gating

pub mod classifier;
pub mod intent;
pub mod keywords;
pub mod predictor;

pub use classifier::IntentClassifier;
pub use intent::Intent;
pub use predictor::{DisabledPredictor, HttpIntentPredictor, IntentPredictor, Prediction};
