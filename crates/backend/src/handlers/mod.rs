pub mod a001_car_brand;
pub mod a002_car;
pub mod a003_part_category;
pub mod a004_part;
pub mod logs;
pub mod upload;

use std::sync::Arc;

use crate::shared::error::CatalogError;
use crate::shared::logger::{server_logger, EventLogger, LogRecord};

/// Records a failed request and hands the error back for rendering.
/// Only unexpected failures reach the event log; client errors are traced.
pub(crate) fn report(module: &str, operation: &str, err: CatalogError) -> CatalogError {
    report_with(module, operation, err, server_logger)
}

/// `report` with an explicit event logger, resolved only for unexpected failures
pub(crate) fn report_with(
    module: &str,
    operation: &str,
    err: CatalogError,
    logger: impl FnOnce() -> Arc<dyn EventLogger>,
) -> CatalogError {
    match &err {
        CatalogError::Unexpected(e) => {
            tracing::error!("{}::{} failed: {:#}", module, operation, e);
            logger().log(LogRecord::failure(
                module,
                operation,
                format!("Error in {}", operation),
                format!("{:#}", e),
            ));
        }
        other => tracing::warn!("{}::{} rejected: {}", module, operation, other),
    }
    err
}
