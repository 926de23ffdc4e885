use axum::extract::Path;
use axum::Json;
use contracts::domain::a004_part::{PartDto, PartListQuery, PartTypeFilterRequest};
use contracts::shared::pagination::{Page, PageRequest};

use super::report;
use crate::domain::a004_part::service;
use crate::shared::config::settings;
use crate::shared::data::db::get_connection;
use crate::shared::error::CatalogError;
use crate::shared::extract::{ApiJson, ApiQuery};

const MODULE: &str = "handlers::a004_part";

/// GET /api/parts/all
pub async fn list_all(
    ApiQuery(page): ApiQuery<PageRequest>,
) -> Result<Json<Page<PartDto>>, CatalogError> {
    service::list_all(get_connection(), &settings().listing, page)
        .await
        .map(Json)
        .map_err(|e| report(MODULE, "list_all", e))
}

/// POST /api/parts/filter-by-type
pub async fn filter_by_type(
    ApiQuery(page): ApiQuery<PageRequest>,
    ApiJson(req): ApiJson<PartTypeFilterRequest>,
) -> Result<Json<Page<PartDto>>, CatalogError> {
    service::filter_by_type(
        get_connection(),
        &settings().listing,
        req.part_type.as_deref(),
        page,
    )
    .await
    .map(Json)
    .map_err(|e| report(MODULE, "filter_by_type", e))
}

/// GET /api/parts/filter-parts
pub async fn filter_parts(
    ApiQuery(query): ApiQuery<PartListQuery>,
) -> Result<Json<Page<PartDto>>, CatalogError> {
    service::filter_parts(get_connection(), &settings().listing, &query)
        .await
        .map(Json)
        .map_err(|e| report(MODULE, "filter_parts", e))
}

/// GET /api/parts/part/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<PartDto>, CatalogError> {
    let id = id
        .trim()
        .parse::<i32>()
        .map_err(|_| {
            report(
                MODULE,
                "get_by_id",
                CatalogError::validation(format!("Invalid part id '{}'", id)),
            )
        })?;

    service::get_by_id(get_connection(), &settings().listing, id)
        .await
        .map(Json)
        .map_err(|e| report(MODULE, "get_by_id", e))
}
