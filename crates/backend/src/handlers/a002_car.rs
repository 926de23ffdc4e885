use axum::Json;
use contracts::domain::a002_car::CarPartsRequest;
use contracts::domain::a004_part::PartSummary;
use contracts::shared::pagination::{Page, PageRequest};

use super::report;
use crate::domain::a004_part::service;
use crate::shared::config::settings;
use crate::shared::data::db::get_connection;
use crate::shared::error::CatalogError;
use crate::shared::extract::ApiJson;

/// POST /api/parts/list-car-products
pub async fn list_car_products(
    ApiJson(req): ApiJson<CarPartsRequest>,
) -> Result<Json<Page<PartSummary>>, CatalogError> {
    let page = PageRequest::new(req.page_number, req.page_size);
    service::list_by_car(get_connection(), &settings().listing, req.car_id, page)
        .await
        .map(Json)
        .map_err(|e| report("handlers::a002_car", "list_car_products", e))
}
