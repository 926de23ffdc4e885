pub mod logger;
pub mod pagination;
