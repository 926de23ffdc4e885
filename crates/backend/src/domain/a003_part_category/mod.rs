pub mod repository;
pub mod resolver;
