pub mod common;
pub mod u501_ingest_catalog;
pub mod u502_merge_feed;
pub mod upload;
