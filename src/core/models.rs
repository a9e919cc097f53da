use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::text::truncate_chars;

pub const DEFAULT_INPUT_TYPE: &str = "iac";
pub const DEFAULT_LANGUAGE: &str = "text";
pub const DEFAULT_APP_NAME: &str = "unknown";
pub const DEFAULT_ENVIRONMENT: &str = "unknown";

/// Max characters of the submitted content kept in the audit log.
pub const CONTENT_PREVIEW_LEN: usize = 500;
/// Max characters of the original raw body kept in an error audit entry.
pub const RAW_BODY_PREVIEW_LEN: usize = 2000;

pub const HISTORY_PARTITION_PREFIX: &str = "APP#";
pub const HISTORY_SORT_PREFIX: &str = "TS#";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }
}

/// A normalized analysis request, built per call from the inbound payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub input_type: String,
    pub language: String,
    pub content: String,
    pub app_name: String,
    pub environment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    pub evidence: String,
    pub impact: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_example: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_severity: Severity,
    pub findings: Vec<Finding>,
    pub summary: String,
    /// Only present when the model reply could not be used as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,
}

/// Compact summary of one past analysis, as stored in and read from the
/// history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub request_id: String,
    pub ts: i64,
    pub input_type: String,
    pub language: String,
    pub environment: String,
    pub overall_severity: String,
    pub summary: String,
}

impl HistoryRecord {
    #[must_use]
    pub fn partition_key(app_name: &str) -> String {
        format!("{HISTORY_PARTITION_PREFIX}{app_name}")
    }

    #[must_use]
    pub fn sort_key(&self) -> String {
        format!("{HISTORY_SORT_PREFIX}{}#{}", self.ts, self.request_id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestPreview {
    pub request_id: String,
    pub input_type: String,
    pub language: String,
    pub environment: String,
    pub content_preview: String,
}

/// One append-only audit blob per request.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AuditLogEntry {
    Success {
        request: RequestPreview,
        response: Value,
    },
    Failure {
        request_id: String,
        error: String,
        raw_body: String,
    },
}

impl AuditLogEntry {
    #[must_use]
    pub fn success(request: &AnalysisRequest, request_id: &str, response: Value) -> Self {
        AuditLogEntry::Success {
            request: RequestPreview {
                request_id: request_id.to_string(),
                input_type: request.input_type.clone(),
                language: request.language.clone(),
                environment: request.environment.clone(),
                content_preview: truncate_chars(&request.content, CONTENT_PREVIEW_LEN)
                    .to_string(),
            },
            response,
        }
    }

    #[must_use]
    pub fn failure(request_id: &str, error: &str, raw_body: &str) -> Self {
        AuditLogEntry::Failure {
            request_id: request_id.to_string(),
            error: error.to_string(),
            raw_body: truncate_chars(raw_body, RAW_BODY_PREVIEW_LEN).to_string(),
        }
    }

    #[must_use]
    pub fn key_prefix(&self) -> &'static str {
        match self {
            AuditLogEntry::Success { .. } => "analysis",
            AuditLogEntry::Failure { .. } => "errors",
        }
    }

    /// Deterministic blob key, namespaced by outcome and application.
    #[must_use]
    pub fn key(&self, app_name: &str, ts: i64, request_id: &str) -> String {
        format!("{}/{app_name}/{ts}-{request_id}.json", self.key_prefix())
    }
}
