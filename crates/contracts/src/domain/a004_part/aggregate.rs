use crate::domain::a003_part_category::CategoryRef;
use serde::{Deserialize, Serialize};

// ============================================================================
// Enumerations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PartType {
    Consumable,
    #[default]
    Spare,
}

impl PartType {
    pub const ALL: [PartType; 2] = [PartType::Consumable, PartType::Spare];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartType::Consumable => "consumable",
            PartType::Spare => "spare",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

/// Turnover class of a part (A moves fastest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turnover {
    A,
    B,
    C,
    D,
}

impl Turnover {
    pub fn as_str(&self) -> &'static str {
        match self {
            Turnover::A => "A",
            Turnover::B => "B",
            Turnover::C => "C",
            Turnover::D => "D",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "A" => Some(Turnover::A),
            "B" => Some(Turnover::B),
            "C" => Some(Turnover::C),
            "D" => Some(Turnover::D),
            _ => None,
        }
    }
}

/// Sort order accepted by the filtered part listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartOrdering {
    PriceAsc,
    PriceDesc,
    InventoryAsc,
    InventoryDesc,
}

impl PartOrdering {
    /// Parses `price`, `-price`, `inventory`, `-inventory`; anything else is None
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "price" => Some(Self::PriceAsc),
            "-price" => Some(Self::PriceDesc),
            "inventory" => Some(Self::InventoryAsc),
            "-inventory" => Some(Self::InventoryDesc),
            _ => None,
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Catalog item. `commercial_code` is the durable identity across feeds;
/// `name` is not unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: i32,
    pub name: String,
    pub internal_code: String,
    pub commercial_code: String,
    pub price: i64,
    pub description: Option<String>,

    // Snapshot of the vendor category taken at ingestion time.
    pub category_title: String,
    pub category_url: String,
    pub category_description: Option<String>,

    pub category_id: Option<i32>,
    pub image_urls: Vec<String>,
    pub part_type: PartType,
    pub turnover: Option<Turnover>,
    pub inventory: i32,
    pub has_warranty: bool,
    pub warranty_name: Option<String>,
}

impl Part {
    /// Minimal record created by the merge feed for an unseen commercial code
    pub fn stub(
        name: String,
        commercial_code: String,
        internal_code: String,
        price: i64,
    ) -> Self {
        Self {
            id: 0,
            name,
            internal_code,
            commercial_code,
            price,
            description: None,
            category_title: String::new(),
            category_url: String::new(),
            category_description: None,
            category_id: None,
            image_urls: Vec::new(),
            part_type: PartType::default(),
            turnover: None,
            inventory: 0,
            has_warranty: false,
            warranty_name: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.price < 0 {
            return Err("Price must not be negative".into());
        }
        if self.commercial_code.trim().is_empty() {
            return Err("Commercial code must not be empty".into());
        }
        Ok(())
    }
}

// ============================================================================
// DTO
// ============================================================================

/// Full serialized part row of the listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDto {
    pub id: i32,
    pub name: String,
    pub internal_code: String,
    pub commercial_code: String,
    pub price: i64,
    pub description: Option<String>,
    pub image_urls: Vec<String>,
    pub part_type: PartType,
    pub car_names: Vec<String>,
    pub category: Option<CategoryRef>,
    pub turnover: Option<Turnover>,
    pub inventory: i32,
    pub inventory_warning: bool,
    pub has_warranty: bool,
    pub warranty_name: Option<String>,
}

/// Short part row used by the per-car listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSummary {
    pub id: i32,
    pub name: String,
    pub price: i64,
    pub image_urls: Vec<String>,
}

impl From<&Part> for PartSummary {
    fn from(part: &Part) -> Self {
        Self {
            id: part.id,
            name: part.name.clone(),
            price: part.price,
            image_urls: part.image_urls.clone(),
        }
    }
}

/// Body of the part-type filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartTypeFilterRequest {
    pub part_type: Option<String>,
}

/// Query string of the filtered listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartListQuery {
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub category_id: Option<i32>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_type_parse() {
        assert_eq!(PartType::parse("spare"), Some(PartType::Spare));
        assert_eq!(PartType::parse("consumable"), Some(PartType::Consumable));
        assert_eq!(PartType::parse("Spare"), None);
        assert_eq!(PartType::parse(""), None);
    }

    #[test]
    fn test_part_type_serde() {
        let json = serde_json::to_string(&PartType::Consumable).unwrap();
        assert_eq!(json, "\"consumable\"");
    }

    #[test]
    fn test_ordering_parse() {
        assert_eq!(PartOrdering::parse("-price"), Some(PartOrdering::PriceDesc));
        assert_eq!(
            PartOrdering::parse("inventory"),
            Some(PartOrdering::InventoryAsc)
        );
        assert_eq!(PartOrdering::parse("name"), None);
    }

    #[test]
    fn test_stub_defaults() {
        let part = Part::stub("Filter".into(), "C9".into(), String::new(), 120);
        assert_eq!(part.part_type, PartType::Spare);
        assert_eq!(part.inventory, 0);
        assert!(part.image_urls.is_empty());
        assert!(part.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let part = Part::stub("Filter".into(), "C9".into(), String::new(), -1);
        assert!(part.validate().is_err());
    }
}
