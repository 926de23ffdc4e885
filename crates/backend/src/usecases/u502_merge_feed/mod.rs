pub mod executor;

pub use executor::merge_feed;
