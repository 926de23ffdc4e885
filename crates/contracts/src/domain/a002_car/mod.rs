pub mod aggregate;

pub use aggregate::{Car, CarPartsRequest, CarSummary};
