use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecureFlowError {
    /// Caller-facing validation failure; the message is returned verbatim.
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Model invocation failed: {0}")]
    ModelInvocation(String),

    #[error("{0} not configured")]
    StoreUnavailable(String),

    #[error("Failed to interact with AWS services: {0}")]
    AwsError(String),

    #[error("Failed to serialize payload: {0}")]
    SerializationError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),
}

impl From<reqwest::Error> for SecureFlowError {
    fn from(error: reqwest::Error) -> Self {
        SecureFlowError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for SecureFlowError {
    fn from(error: serde_json::Error) -> Self {
        SecureFlowError::SerializationError(error.to_string())
    }
}

// Every aws-sdk-* crate re-exports the same smithy `SdkError`, so this covers
// DynamoDB and S3 alike.
impl<E, R> From<SdkError<E, R>> for SecureFlowError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    fn from(error: SdkError<E, R>) -> Self {
        SecureFlowError::AwsError(DisplayErrorContext(&error).to_string())
    }
}
