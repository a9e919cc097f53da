//! SecureFlow - an LLM-backed security reviewer for code and configuration snippets.
//!
//! This crate implements two AWS Lambda handlers:
//! 1. An Analyze Lambda that validates a snippet, asks the model for a security
//!    review, and persists a history summary plus a full audit log entry
//! 2. A History Lambda that lists prior analyses for one application
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda for serverless execution behind API Gateway
//! - Bedrock (or a Bedrock-compatible HTTPS gateway) for model inference
//! - DynamoDB for history records, S3 for audit logs
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use secureflow::core::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     secureflow::setup_logging();
//!
//!     let config = AppConfig::from_env();
//!     let sdk_config = aws_config::from_env().load().await;
//!     let handler = secureflow::wiring::analyze_handler(&config, &sdk_config);
//!
//!     let event = serde_json::json!({
//!         "httpMethod": "POST",
//!         "body": "{\"content\":\"resource \\\"aws_s3_bucket\\\" \\\"x\\\" {}\"}"
//!     });
//!     let response = handler.handle(&event).await;
//!     println!("{response}");
//! }
//! ```

pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod storage;
pub mod utils;
pub mod wiring;

pub use errors::SecureFlowError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Sets up tracing-subscriber with a JSON formatter suitable for `CloudWatch`
/// Logs. Safe to call more than once; later calls are no-ops.
///
/// # Example
///
/// ```
/// secureflow::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
