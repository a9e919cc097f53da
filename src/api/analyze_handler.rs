//! Analyze Lambda handler.
//!
//! Validates the snippet, asks the model for a security review, persists a
//! history summary plus a full audit entry, and returns the result.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::{helpers, parsing};
use crate::ai::prompt_builder::{SYSTEM_PROMPT, build_user_prompt};
use crate::ai::{ModelClient, validate_model_output};
use crate::core::models::{AnalysisRequest, AuditLogEntry, HistoryRecord};
use crate::errors::SecureFlowError;
use crate::storage::{AuditLog, HistoryStore};

pub struct AnalyzeHandler {
    model: Arc<dyn ModelClient>,
    history: Option<Arc<dyn HistoryStore>>,
    audit_log: Option<Arc<dyn AuditLog>>,
    strict_schema: bool,
}

impl AnalyzeHandler {
    #[must_use]
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self {
            model,
            history: None,
            audit_log: None,
            strict_schema: false,
        }
    }

    #[must_use]
    pub fn with_history(mut self, history: Arc<dyn HistoryStore>) -> Self {
        self.history = Some(history);
        self
    }

    #[must_use]
    pub fn with_audit_log(mut self, audit_log: Arc<dyn AuditLog>) -> Self {
        self.audit_log = Some(audit_log);
        self
    }

    #[must_use]
    pub fn with_strict_schema(mut self, strict_schema: bool) -> Self {
        self.strict_schema = strict_schema;
        self
    }

    /// Handles one API Gateway event and returns the proxy response.
    ///
    /// Never fails: validation problems become a 400 and anything after
    /// validation becomes an opaque 500 carrying the request id.
    #[tracing::instrument(level = "info", skip(self, event))]
    pub async fn handle(&self, event: &Value) -> Value {
        if parsing::is_preflight(event) {
            return helpers::preflight();
        }

        let body = parsing::parse_body(event);
        let request = match parsing::normalize_request(&body.payload) {
            Ok(request) => request,
            Err(e) => {
                warn!("Rejected analyze request: {}", e);
                return helpers::err_response(400, &e.to_string());
            }
        };

        let request_id = Uuid::new_v4().to_string();
        let ts = chrono::Utc::now().timestamp();
        info!(
            request_id = %request_id,
            app_name = %request.app_name,
            input_type = %request.input_type,
            content_chars = request.content.chars().count(),
            "Analyze request accepted"
        );

        match self.analyze(&request, &request_id, ts).await {
            Ok(result) => {
                helpers::json_response(200, &json!({ "request_id": request_id, "result": result }))
            }
            Err(e) => {
                error!(request_id = %request_id, "Analysis failed: {}", e);
                let entry = AuditLogEntry::failure(&request_id, &e.to_string(), &body.raw);
                let key = entry.key(&request.app_name, ts, &request_id);
                if let Err(log_err) = self.store_log(&key, &entry).await {
                    error!(request_id = %request_id, "Failed to write error log: {}", log_err);
                }
                helpers::internal_error(&request_id)
            }
        }
    }

    async fn analyze(
        &self,
        request: &AnalysisRequest,
        request_id: &str,
        ts: i64,
    ) -> Result<Value, SecureFlowError> {
        let prompt = build_user_prompt(request);

        #[cfg(feature = "debug-logs")]
        debug!("Using prompt:\n{}", prompt);

        let text = self.model.invoke(SYSTEM_PROMPT, &prompt).await?;
        let output = validate_model_output(text.trim(), self.strict_schema);
        if output.is_fallback() {
            warn!(request_id = %request_id, "Model output was not usable JSON, using fallback result");
        }

        let record = HistoryRecord {
            request_id: request_id.to_string(),
            ts,
            input_type: request.input_type.clone(),
            language: request.language.clone(),
            environment: request.environment.clone(),
            overall_severity: output.overall_severity(),
            summary: output.summary(),
        };
        self.store_history(&request.app_name, &record).await?;

        let result = output.into_value();
        let entry = AuditLogEntry::success(request, request_id, result.clone());
        let key = entry.key(&request.app_name, ts, request_id);
        self.store_log(&key, &entry).await?;

        info!(
            request_id = %request_id,
            overall_severity = %record.overall_severity,
            "Analysis complete"
        );
        Ok(result)
    }

    async fn store_history(
        &self,
        app_name: &str,
        record: &HistoryRecord,
    ) -> Result<(), SecureFlowError> {
        let Some(history) = &self.history else {
            debug!("History table not configured, skipping history write");
            return Ok(());
        };
        history.put(app_name, record).await
    }

    async fn store_log(&self, key: &str, entry: &AuditLogEntry) -> Result<(), SecureFlowError> {
        let Some(audit_log) = &self.audit_log else {
            debug!("Log bucket not configured, skipping audit log write");
            return Ok(());
        };
        audit_log.put_json(key, &serde_json::to_value(entry)?).await
    }
}
