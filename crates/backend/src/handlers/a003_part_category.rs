use axum::Json;
use contracts::domain::a003_part_category::{CategoryPartsRequest, PartCategoryListItem};
use contracts::domain::a004_part::PartDto;
use contracts::shared::pagination::{Page, PageRequest};

use super::report;
use crate::domain::a003_part_category::repository;
use crate::domain::a004_part::service;
use crate::shared::config::settings;
use crate::shared::data::db::get_connection;
use crate::shared::error::CatalogError;
use crate::shared::extract::ApiJson;

const MODULE: &str = "handlers::a003_part_category";

/// GET /api/parts/categories
pub async fn list_categories() -> Result<Json<Vec<PartCategoryListItem>>, CatalogError> {
    match repository::list_all(get_connection()).await {
        Ok(items) => Ok(Json(items.iter().map(|c| c.list_item()).collect())),
        Err(e) => Err(report(MODULE, "list_categories", e.into())),
    }
}

/// POST /api/parts/category-products
pub async fn category_products(
    ApiJson(req): ApiJson<CategoryPartsRequest>,
) -> Result<Json<Page<PartDto>>, CatalogError> {
    let page = PageRequest::new(req.page, req.page_size);
    service::list_by_category(get_connection(), &settings().listing, req.id, page)
        .await
        .map(Json)
        .map_err(|e| report(MODULE, "category_products", e))
}
