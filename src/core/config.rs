use std::env;

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// DynamoDB table for history records. Empty disables history.
    pub history_table: String,
    /// S3 bucket for audit logs. Empty disables audit logging.
    pub log_bucket: String,
    pub model_id: String,
    /// When set, the model is called over HTTPS instead of through Bedrock.
    pub model_endpoint_url: Option<String>,
    pub model_api_key: Option<String>,
    pub strict_model_schema: bool,
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            history_table: env::var("HISTORY_TABLE").unwrap_or_default(),
            log_bucket: env::var("LOG_BUCKET").unwrap_or_default(),
            model_id: env::var("BEDROCK_MODEL_ID").unwrap_or_default(),
            model_endpoint_url: non_empty(env::var("MODEL_ENDPOINT_URL").ok()),
            model_api_key: non_empty(env::var("MODEL_API_KEY").ok()),
            strict_model_schema: env::var("STRICT_MODEL_SCHEMA")
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
        }
    }

    #[must_use]
    pub fn history_enabled(&self) -> bool {
        !self.history_table.is_empty()
    }

    #[must_use]
    pub fn audit_log_enabled(&self) -> bool {
        !self.log_bucket.is_empty()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[must_use]
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_values() {
        for v in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(is_truthy(v), "{v} should be truthy");
        }
        for v in ["", "0", "false", "off", "nope"] {
            assert!(!is_truthy(v), "{v} should not be truthy");
        }
    }

    #[test]
    fn default_config_disables_stores() {
        let config = AppConfig::default();
        assert!(!config.history_enabled());
        assert!(!config.audit_log_enabled());
        assert!(!config.strict_model_schema);
    }
}
