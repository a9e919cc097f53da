//! Persistence collaborators: the history table and the audit log bucket

pub mod audit_log;
pub mod history;

pub use audit_log::{AuditLog, S3AuditLog};
pub use history::{DynamoHistoryStore, HistoryStore};
