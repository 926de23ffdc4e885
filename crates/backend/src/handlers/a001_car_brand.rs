use axum::Json;
use contracts::domain::a001_car_brand::CarBrandWithCars;

use super::report;
use crate::domain::a001_car_brand::service;
use crate::shared::data::db::get_connection;
use crate::shared::error::CatalogError;

/// GET /api/parts/list-brands
pub async fn list_brands() -> Result<Json<Vec<CarBrandWithCars>>, CatalogError> {
    service::list_with_cars(get_connection())
        .await
        .map(Json)
        .map_err(|e| report("handlers::a001_car_brand", "list_brands", e.into()))
}
