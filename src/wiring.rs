//! Builds the handlers from configuration and the shared AWS config.
//!
//! Clients are constructed once per cold start and injected into the
//! handlers; unconfigured targets are simply left out.

use std::sync::Arc;

use aws_config::SdkConfig;
use tracing::info;

use crate::ai::{BedrockModelClient, HttpModelClient, ModelClient};
use crate::api::{AnalyzeHandler, HistoryHandler};
use crate::core::config::AppConfig;
use crate::storage::{AuditLog, DynamoHistoryStore, HistoryStore, S3AuditLog};

#[must_use]
pub fn model_client(config: &AppConfig, sdk_config: &SdkConfig) -> Arc<dyn ModelClient> {
    match &config.model_endpoint_url {
        Some(url) => {
            info!(endpoint = %url, "Using HTTP model endpoint");
            Arc::new(HttpModelClient::new(
                url.clone(),
                config.model_api_key.clone(),
                config.model_id.clone(),
            ))
        }
        None => Arc::new(BedrockModelClient::new(
            aws_sdk_bedrockruntime::Client::new(sdk_config),
            config.model_id.clone(),
        )),
    }
}

#[must_use]
pub fn history_store(config: &AppConfig, sdk_config: &SdkConfig) -> Option<Arc<dyn HistoryStore>> {
    config.history_enabled().then(|| {
        Arc::new(DynamoHistoryStore::new(
            aws_sdk_dynamodb::Client::new(sdk_config),
            config.history_table.clone(),
        )) as Arc<dyn HistoryStore>
    })
}

#[must_use]
pub fn audit_log(config: &AppConfig, sdk_config: &SdkConfig) -> Option<Arc<dyn AuditLog>> {
    config.audit_log_enabled().then(|| {
        Arc::new(S3AuditLog::new(
            aws_sdk_s3::Client::new(sdk_config),
            config.log_bucket.clone(),
        )) as Arc<dyn AuditLog>
    })
}

#[must_use]
pub fn analyze_handler(config: &AppConfig, sdk_config: &SdkConfig) -> AnalyzeHandler {
    let mut handler = AnalyzeHandler::new(model_client(config, sdk_config))
        .with_strict_schema(config.strict_model_schema);
    if let Some(history) = history_store(config, sdk_config) {
        handler = handler.with_history(history);
    }
    if let Some(audit_log) = audit_log(config, sdk_config) {
        handler = handler.with_audit_log(audit_log);
    }
    handler
}

#[must_use]
pub fn history_handler(config: &AppConfig, sdk_config: &SdkConfig) -> HistoryHandler {
    HistoryHandler::new(history_store(config, sdk_config))
}
