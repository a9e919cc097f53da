use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoClient;
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::info;

use crate::core::models::{HISTORY_SORT_PREFIX, HistoryRecord};
use crate::errors::SecureFlowError;

#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Writes one record under the application's partition.
    async fn put(&self, app_name: &str, record: &HistoryRecord) -> Result<(), SecureFlowError>;

    /// Returns at most `limit` records for the application, newest first.
    async fn latest(
        &self,
        app_name: &str,
        limit: usize,
    ) -> Result<Vec<HistoryRecord>, SecureFlowError>;
}

pub struct DynamoHistoryStore {
    client: DynamoClient,
    table_name: String,
}

impl DynamoHistoryStore {
    #[must_use]
    pub fn new(client: DynamoClient, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[must_use]
pub fn record_to_item(app_name: &str, record: &HistoryRecord) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            "pk".to_string(),
            AttributeValue::S(HistoryRecord::partition_key(app_name)),
        ),
        ("sk".to_string(), AttributeValue::S(record.sort_key())),
        (
            "request_id".to_string(),
            AttributeValue::S(record.request_id.clone()),
        ),
        ("ts".to_string(), AttributeValue::N(record.ts.to_string())),
        (
            "input_type".to_string(),
            AttributeValue::S(record.input_type.clone()),
        ),
        (
            "language".to_string(),
            AttributeValue::S(record.language.clone()),
        ),
        (
            "environment".to_string(),
            AttributeValue::S(record.environment.clone()),
        ),
        (
            "overall_severity".to_string(),
            AttributeValue::S(record.overall_severity.clone()),
        ),
        (
            "summary".to_string(),
            AttributeValue::S(record.summary.clone()),
        ),
    ])
}

fn string_attr(item: &HashMap<String, AttributeValue>, name: &str) -> String {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .unwrap_or_default()
}

/// # Errors
///
/// Returns an error if the item lacks a numeric `ts` attribute.
pub fn item_to_record(item: &HashMap<String, AttributeValue>) -> Result<HistoryRecord, SecureFlowError> {
    let ts = item
        .get("ts")
        .and_then(|v| v.as_n().ok())
        .and_then(|n| n.parse::<i64>().ok())
        .ok_or_else(|| {
            SecureFlowError::SerializationError("history item has no numeric ts".to_string())
        })?;

    Ok(HistoryRecord {
        request_id: string_attr(item, "request_id"),
        ts,
        input_type: string_attr(item, "input_type"),
        language: string_attr(item, "language"),
        environment: string_attr(item, "environment"),
        overall_severity: string_attr(item, "overall_severity"),
        summary: string_attr(item, "summary"),
    })
}

#[async_trait]
impl HistoryStore for DynamoHistoryStore {
    async fn put(&self, app_name: &str, record: &HistoryRecord) -> Result<(), SecureFlowError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record_to_item(app_name, record)))
            .send()
            .await?;

        info!(app_name = %app_name, request_id = %record.request_id, "Stored history record");
        Ok(())
    }

    async fn latest(
        &self,
        app_name: &str,
        limit: usize,
    ) -> Result<Vec<HistoryRecord>, SecureFlowError> {
        let limit = i32::try_from(limit).unwrap_or(i32::MAX);

        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("pk = :pk AND begins_with(sk, :sk_prefix)")
            .expression_attribute_values(
                ":pk",
                AttributeValue::S(HistoryRecord::partition_key(app_name)),
            )
            .expression_attribute_values(
                ":sk_prefix",
                AttributeValue::S(HISTORY_SORT_PREFIX.to_string()),
            )
            // Sort key ascends by time; scan backwards for newest first.
            .scan_index_forward(false)
            .limit(limit)
            .send()
            .await?;

        output.items().iter().map(item_to_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> HistoryRecord {
        HistoryRecord {
            request_id: "b2f4".to_string(),
            ts: 1_700_000_000,
            input_type: "iac".to_string(),
            language: "terraform".to_string(),
            environment: "dev".to_string(),
            overall_severity: "HIGH".to_string(),
            summary: "Public bucket".to_string(),
        }
    }

    #[test]
    fn item_uses_composite_keys() {
        let item = record_to_item("demo", &record());
        assert_eq!(item["pk"].as_s().unwrap(), "APP#demo");
        assert_eq!(item["sk"].as_s().unwrap(), "TS#1700000000#b2f4");
        assert_eq!(item["ts"].as_n().unwrap(), "1700000000");
    }

    #[test]
    fn item_converts_back_to_record() {
        let item = record_to_item("demo", &record());
        assert_eq!(item_to_record(&item).unwrap(), record());
    }

    #[test]
    fn item_without_ts_is_rejected() {
        let mut item = record_to_item("demo", &record());
        item.remove("ts");
        assert!(item_to_record(&item).is_err());
    }
}
