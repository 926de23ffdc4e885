use crate::usecases::u501_ingest_catalog::IngestionResult;
use crate::usecases::u502_merge_feed::MergeResult;
use serde::{Deserialize, Serialize};

/// Which pipeline handled an uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UploadSummary {
    Catalog(IngestionResult),
    Feed(MergeResult),
    /// File name matched no pipeline; the upload was accepted and dropped
    Ignored,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub file_path: String,
    pub summary: UploadSummary,
}
