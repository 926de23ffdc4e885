pub mod a001_car_brand;
pub mod a002_car;
pub mod a003_part_category;
pub mod a004_part;
