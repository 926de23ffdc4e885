use serde::{Deserialize, Serialize};

/// Non-fatal problem recorded while ingesting one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionError {
    /// Where the problem happened, e.g. `category[0].product[3]`
    pub scope: String,
    pub message: String,
}

/// Outcome of one catalog ingestion run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionResult {
    pub imported_count: usize,
    /// Products skipped because a part with the same identity already exists
    pub skipped_count: usize,
    pub errors: Vec<IngestionError>,
}

impl IngestionResult {
    pub fn add_error(&mut self, scope: impl Into<String>, message: impl Into<String>) {
        self.errors.push(IngestionError {
            scope: scope.into(),
            message: message.into(),
        });
    }
}
