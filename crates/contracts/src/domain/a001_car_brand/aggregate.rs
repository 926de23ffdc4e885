use crate::domain::a002_car::CarSummary;
use crate::domain::common::EntityMetadata;
use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Car manufacturer, identified by its latin code name ("peugeot", "saipa")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarBrand {
    pub id: i32,
    /// Stable code name, unique across brands
    pub name: String,
    /// Localized (Persian) display name
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "profilePhoto")]
    pub profile_photo: Option<String>,
    pub slug: String,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl CarBrand {
    /// Brand that has not been persisted yet; `id` is assigned by storage
    pub fn new_for_insert(name: String, display_name: String) -> Self {
        Self {
            id: 0,
            slug: name.clone(),
            name,
            display_name,
            profile_photo: None,
            metadata: EntityMetadata::new(),
        }
    }
}

// ============================================================================
// Listing shape
// ============================================================================

/// Brand with its cars nested, as returned by the brand listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarBrandWithCars {
    pub id: i32,
    pub name: String,
    pub display_name: String,
    pub cars: Vec<CarSummary>,
}
