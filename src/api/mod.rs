//! Lambda handlers and their request/response plumbing

pub mod analyze_handler;
pub mod helpers;
pub mod history_handler;
pub mod parsing;

pub use analyze_handler::AnalyzeHandler;
pub use history_handler::HistoryHandler;
