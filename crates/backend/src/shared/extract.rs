use axum::extract::{FromRequest, FromRequestParts};

use super::error::CatalogError;

/// JSON body whose rejections render as a 400 `CatalogError`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(CatalogError))]
pub struct ApiJson<T>(pub T);

/// Query string whose rejections render as a 400 `CatalogError`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(CatalogError))]
pub struct ApiQuery<T>(pub T);
