pub mod executor;
pub mod validation;

pub use executor::{IngestExecutor, IngestOptions};
