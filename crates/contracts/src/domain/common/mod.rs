//! Common types shared by all catalog aggregates

pub mod entity_metadata;

pub use entity_metadata::EntityMetadata;
