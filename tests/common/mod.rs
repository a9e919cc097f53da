#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use secureflow::SecureFlowError;
use secureflow::ai::ModelClient;
use secureflow::core::models::HistoryRecord;
use secureflow::storage::{AuditLog, HistoryStore};
use serde_json::Value;

/// Replies with a canned text (or error) and records every prompt it sees.
pub struct FakeModel {
    reply: Result<String, String>,
    pub prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl FakeModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelClient for FakeModel {
    async fn invoke(&self, _system: &str, prompt: &str) -> Result<String, SecureFlowError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .map_err(SecureFlowError::ModelInvocation)
    }
}

/// In-memory history table keyed by (app_name, record).
#[derive(Default)]
pub struct InMemoryHistory {
    pub items: Mutex<Vec<(String, HistoryRecord)>>,
    pub fail_writes: bool,
}

impl InMemoryHistory {
    pub fn failing() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            fail_writes: true,
        }
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistory {
    async fn put(&self, app_name: &str, record: &HistoryRecord) -> Result<(), SecureFlowError> {
        if self.fail_writes {
            return Err(SecureFlowError::AwsError("table unavailable".to_string()));
        }
        self.items
            .lock()
            .unwrap()
            .push((app_name.to_string(), record.clone()));
        Ok(())
    }

    async fn latest(
        &self,
        app_name: &str,
        limit: usize,
    ) -> Result<Vec<HistoryRecord>, SecureFlowError> {
        let mut records: Vec<HistoryRecord> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|(app, _)| app == app_name)
            .map(|(_, r)| r.clone())
            .collect();
        records.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
        records.truncate(limit);
        Ok(records)
    }
}

/// Records every blob written, keyed by object key.
#[derive(Default)]
pub struct RecordingAuditLog {
    pub entries: Mutex<Vec<(String, Value)>>,
}

impl RecordingAuditLog {
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|(k, _)| k.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn first(&self) -> (String, Value) {
        self.entries.lock().unwrap()[0].clone()
    }
}

#[async_trait]
impl AuditLog for RecordingAuditLog {
    async fn put_json(&self, key: &str, payload: &Value) -> Result<(), SecureFlowError> {
        self.entries
            .lock()
            .unwrap()
            .push((key.to_string(), payload.clone()));
        Ok(())
    }
}

pub fn history_record(request_id: &str, ts: i64) -> HistoryRecord {
    HistoryRecord {
        request_id: request_id.to_string(),
        ts,
        input_type: "iac".to_string(),
        language: "terraform".to_string(),
        environment: "dev".to_string(),
        overall_severity: "LOW".to_string(),
        summary: format!("record {request_id}"),
    }
}

/// Decodes the JSON string body of a proxy response.
pub fn body_of(response: &Value) -> Value {
    serde_json::from_str(response["body"].as_str().expect("body is a string"))
        .expect("body is JSON")
}
