pub mod reconciler;
pub mod repository;
