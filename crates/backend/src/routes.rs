use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::handlers;

/// Upper bound for a vendor export posted to the upload endpoint
const UPLOAD_BODY_LIMIT: usize = 64 * 1024 * 1024;

/// Configures every route of the application
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // PARTS CATALOG
        // ========================================
        .route(
            "/api/parts/upload-json",
            post(handlers::upload::upload_json).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/parts/all", get(handlers::a004_part::list_all))
        .route(
            "/api/parts/filter-by-type",
            post(handlers::a004_part::filter_by_type),
        )
        .route(
            "/api/parts/filter-parts",
            get(handlers::a004_part::filter_parts),
        )
        .route("/api/parts/part/:id", get(handlers::a004_part::get_by_id))
        .route(
            "/api/parts/list-brands",
            get(handlers::a001_car_brand::list_brands),
        )
        .route(
            "/api/parts/list-car-products",
            post(handlers::a002_car::list_car_products),
        )
        .route(
            "/api/parts/categories",
            get(handlers::a003_part_category::list_categories),
        )
        .route(
            "/api/parts/category-products",
            post(handlers::a003_part_category::category_products),
        )
        // ========================================
        // SYSTEM LOG
        // ========================================
        .route(
            "/api/logs",
            get(handlers::logs::list_all).delete(handlers::logs::clear_all),
        )
}
