//! Common types and traits for all UseCases

pub mod flex_value;
pub mod usecase_metadata;

// Re-exports
pub use flex_value::FlexValue;
pub use usecase_metadata::UseCaseMetadata;
