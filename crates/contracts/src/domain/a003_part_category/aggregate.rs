use serde::{Deserialize, Serialize};

/// Node of the part classification tree. Names are unique across the whole
/// tree, so a name alone identifies a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartCategory {
    pub id: i32,
    pub name: String,
    #[serde(rename = "parentId")]
    pub parent_id: Option<i32>,
    pub description: Option<String>,
}

impl PartCategory {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn list_item(&self) -> PartCategoryListItem {
        PartCategoryListItem {
            id: self.id,
            name: self.name.clone(),
            parent_id: self.parent_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartCategoryListItem {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
}

/// Category name nested inside a serialized part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub name: String,
}

/// Body of the "parts of one category" listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryPartsRequest {
    pub id: Option<i32>,
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub page_size: Option<u64>,
}
