pub mod repository;

use once_cell::sync::OnceCell;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// One structured business event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub module: String,
    pub operation: String,
    pub message: String,
    pub error: Option<String>,
}

impl LogRecord {
    pub fn info(module: &str, operation: &str, message: impl Into<String>) -> Self {
        Self {
            module: module.to_string(),
            operation: operation.to_string(),
            message: message.into(),
            error: None,
        }
    }

    pub fn failure(
        module: &str,
        operation: &str,
        message: impl Into<String>,
        error: impl ToString,
    ) -> Self {
        Self {
            module: module.to_string(),
            operation: operation.to_string(),
            message: message.into(),
            error: Some(error.to_string()),
        }
    }
}

/// Side channel for business events. Implementations must never fail the caller.
pub trait EventLogger: Send + Sync {
    fn log(&self, record: LogRecord);
}

/// Persists events into `system_log` on a detached task
pub struct DbEventLogger {
    db: DatabaseConnection,
}

impl DbEventLogger {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl EventLogger for DbEventLogger {
    fn log(&self, record: LogRecord) {
        match &record.error {
            Some(error) => tracing::warn!(
                module = %record.module,
                operation = %record.operation,
                error = %error,
                "{}",
                record.message
            ),
            None => tracing::info!(
                module = %record.module,
                operation = %record.operation,
                "{}",
                record.message
            ),
        }

        let db = self.db.clone();
        tokio::spawn(async move {
            if let Err(e) = repository::log_event(
                &db,
                &record.module,
                &record.operation,
                &record.message,
                record.error.as_deref(),
            )
            .await
            {
                eprintln!("Failed to log event: {}", e);
            }
        });
    }
}

static SERVER_LOGGER: OnceCell<Arc<dyn EventLogger>> = OnceCell::new();

pub fn install(logger: Arc<dyn EventLogger>) {
    if SERVER_LOGGER.set(logger).is_err() {
        tracing::warn!("Event logger already installed");
    }
}

/// Process-wide logger used by the HTTP layer
pub fn server_logger() -> Arc<dyn EventLogger> {
    SERVER_LOGGER
        .get_or_init(|| {
            Arc::new(DbEventLogger::new(
                crate::shared::data::db::get_connection().clone(),
            ))
        })
        .clone()
}

#[cfg(test)]
pub use memory::MemoryEventLogger;

#[cfg(test)]
mod memory {
    use super::{EventLogger, LogRecord};
    use std::sync::Mutex;

    /// Captures events for assertions
    #[derive(Default)]
    pub struct MemoryEventLogger {
        records: Mutex<Vec<LogRecord>>,
    }

    impl MemoryEventLogger {
        pub fn records(&self) -> Vec<LogRecord> {
            self.records.lock().unwrap().clone()
        }

        pub fn errors(&self) -> Vec<LogRecord> {
            self.records()
                .into_iter()
                .filter(|r| r.error.is_some())
                .collect()
        }
    }

    impl EventLogger for MemoryEventLogger {
        fn log(&self, record: LogRecord) {
            self.records.lock().unwrap().push(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::test_support::memory_connection;

    #[tokio::test]
    async fn test_db_logger_writes_in_background() {
        let db = memory_connection().await;
        let logger = DbEventLogger::new(db.clone());
        logger.log(LogRecord::failure(
            "u502_merge_feed",
            "merge_record",
            "Record 3 rejected",
            "invalid price",
        ));

        let mut logs = Vec::new();
        for _ in 0..50 {
            logs = repository::get_all_logs(&db).await.unwrap();
            if !logs.is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].module, "u502_merge_feed");
        assert_eq!(logs[0].error.as_deref(), Some("invalid price"));
    }

    #[test]
    fn test_memory_logger_collects_errors() {
        let logger = MemoryEventLogger::default();
        logger.log(LogRecord::info("m", "op", "ok"));
        logger.log(LogRecord::failure("m", "op", "bad", "boom"));
        assert_eq!(logger.records().len(), 2);
        assert_eq!(logger.errors().len(), 1);
    }
}
