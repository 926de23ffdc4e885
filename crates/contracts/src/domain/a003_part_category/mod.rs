pub mod aggregate;

pub use aggregate::{CategoryPartsRequest, CategoryRef, PartCategory, PartCategoryListItem};
