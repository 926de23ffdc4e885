use crate::usecases::common::FlexValue;
use serde::{Deserialize, Serialize};

/// Top level of the vendor catalog export
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogPayload {
    #[serde(default)]
    pub categories: Vec<CategoryPayload>,
}

/// Vendor category with its products.
///
/// Products stay raw JSON here: one malformed product must be rejected on its
/// own instead of failing the whole document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub products: Vec<serde_json::Value>,
}

/// Vendor product. `ekhtesasiCode` is the internal code, `tegaratCode` the
/// commercial code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "ekhtesasiCode", default)]
    pub internal_code: Option<FlexValue>,
    #[serde(rename = "tegaratCode", default)]
    pub commercial_code: Option<FlexValue>,
    #[serde(default)]
    pub price: Option<FlexValue>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cars: Vec<String>,
}
