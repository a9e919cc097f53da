//! History Lambda handler: lists prior analyses for one application.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{error, info};

use super::{helpers, parsing};
use crate::errors::SecureFlowError;
use crate::storage::HistoryStore;

pub const DEFAULT_APP_NAME: &str = "demo";
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 50;
/// Name reported when the history table is not configured.
pub const HISTORY_TABLE_SETTING: &str = "HISTORY_TABLE";

/// Parses and clamps the `limit` query parameter into `[1, MAX_LIMIT]`.
#[must_use]
pub fn clamp_limit(raw: Option<&str>) -> usize {
    let requested = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(DEFAULT_LIMIT);
    // Always within 1..=50, so the cast cannot truncate.
    requested.clamp(1, MAX_LIMIT) as usize
}

/// Resolves the `app_name` query parameter, defaulting when absent or empty.
#[must_use]
pub fn resolve_app_name(raw: Option<&str>) -> String {
    raw.filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_APP_NAME)
        .trim()
        .to_string()
}

pub struct HistoryHandler {
    store: Option<Arc<dyn HistoryStore>>,
}

impl HistoryHandler {
    #[must_use]
    pub fn new(store: Option<Arc<dyn HistoryStore>>) -> Self {
        Self { store }
    }

    #[tracing::instrument(level = "info", skip(self, event))]
    pub async fn handle(&self, event: &Value) -> Value {
        if parsing::is_preflight(event) {
            return helpers::preflight();
        }

        let app_name = resolve_app_name(parsing::query_param(event, "app_name").as_deref());
        let limit = clamp_limit(parsing::query_param(event, "limit").as_deref());

        let Some(store) = &self.store else {
            let e = SecureFlowError::StoreUnavailable(HISTORY_TABLE_SETTING.to_string());
            error!("History query failed: {}", e);
            return helpers::err_response(500, &e.to_string());
        };

        match store.latest(&app_name, limit).await {
            Ok(items) => {
                info!(app_name = %app_name, limit, count = items.len(), "History query complete");
                helpers::json_response(
                    200,
                    &json!({ "app_name": app_name, "count": items.len(), "items": items }),
                )
            }
            Err(e) => {
                error!(app_name = %app_name, "History query failed: {}", e);
                helpers::err_response(500, helpers::INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}
