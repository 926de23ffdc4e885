use serde::{Deserialize, Serialize};

/// Persisted system log record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: String,
    /// Rust module path or usecase name that produced the entry
    pub module: String,
    /// Operation (handler, executor step) inside the module
    pub operation: String,
    pub message: String,
    /// Raw error text; never sent to API clients of the failing operation
    pub error: Option<String>,
}
