use crate::domain::common::EntityMetadata;
use serde::{Deserialize, Serialize};

/// A vehicle model. `code` is the identity key, the display name may drift
/// between uploads without creating a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: i32,
    pub code: String,
    pub name: String,
    /// None when the car name was not found in the lookup table
    #[serde(rename = "brandId")]
    pub brand_id: Option<i32>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub slug: String,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Car {
    pub fn new_for_insert(code: String, name: String, brand_id: Option<i32>) -> Self {
        Self {
            id: 0,
            slug: code.clone(),
            code,
            name,
            brand_id,
            description: None,
            image: None,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn summary(&self) -> CarSummary {
        CarSummary {
            id: self.id,
            code: self.code.clone(),
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarSummary {
    pub id: i32,
    pub code: String,
    pub name: String,
}

/// Body of the "parts of one car" listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarPartsRequest {
    pub car_id: Option<i32>,
    #[serde(default)]
    pub page_number: Option<u64>,
    #[serde(default)]
    pub page_size: Option<u64>,
}
