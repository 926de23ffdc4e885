pub mod request;
pub mod response;

pub use request::FeedRecord;
pub use response::{MergeError, MergeResult};

use crate::usecases::common::UseCaseMetadata;

pub struct MergeFeed;

impl UseCaseMetadata for MergeFeed {
    fn usecase_index() -> &'static str {
        "u502"
    }

    fn usecase_name() -> &'static str {
        "merge_feed"
    }

    fn display_name() -> &'static str {
        "B2B price feed merge"
    }

    fn description() -> &'static str {
        "Updates name and price of existing parts by commercial code, creates stubs for unknown codes"
    }
}
