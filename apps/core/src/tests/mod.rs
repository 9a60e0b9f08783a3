//! Test Module
//!
//! Integration test suite for the conversation core.
//!
//! ## Test Categories
//! - `engine_tests`: full-turn orchestration, context carry-over, fallback
//! - `predictor_tests`: external prediction client against a mock HTTP server
