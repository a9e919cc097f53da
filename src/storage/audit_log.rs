use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::primitives::ByteStream;
use serde_json::Value;
use tracing::info;

use crate::errors::SecureFlowError;

/// Append-only sink for full request/response audit payloads.
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn put_json(&self, key: &str, payload: &Value) -> Result<(), SecureFlowError>;
}

pub struct S3AuditLog {
    client: S3Client,
    bucket: String,
}

impl S3AuditLog {
    #[must_use]
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl AuditLog for S3AuditLog {
    async fn put_json(&self, key: &str, payload: &Value) -> Result<(), SecureFlowError> {
        let body = serde_json::to_vec(payload)?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("application/json")
            .body(ByteStream::from(body))
            .send()
            .await?;

        info!(bucket = %self.bucket, key = %key, "Stored audit log entry");
        Ok(())
    }
}
