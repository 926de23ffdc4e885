use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeError {
    /// Position of the record in the feed
    pub index: usize,
    pub commercial_code: Option<String>,
    pub message: String,
}

/// Outcome of one feed merge; every record is committed on its own
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeResult {
    pub updated: usize,
    pub created: usize,
    /// Records without a commercial code
    pub skipped: usize,
    pub errors: Vec<MergeError>,
}
