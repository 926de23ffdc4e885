pub mod aggregate;

pub use aggregate::{CarBrand, CarBrandWithCars};
