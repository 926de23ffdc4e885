pub mod payload;
pub mod response;

pub use payload::{CatalogPayload, CategoryPayload, ProductPayload};
pub use response::{IngestionError, IngestionResult};

use crate::usecases::common::UseCaseMetadata;

pub struct IngestCatalog;

impl UseCaseMetadata for IngestCatalog {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "ingest_catalog"
    }

    fn display_name() -> &'static str {
        "Catalog ingestion"
    }

    fn description() -> &'static str {
        "Imports a vendor catalog export (categories, products, cars) in one transaction"
    }
}
