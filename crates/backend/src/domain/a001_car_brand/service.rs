use super::repository;
use crate::domain::a002_car::repository as car_repository;
use contracts::domain::a001_car_brand::CarBrandWithCars;
use sea_orm::ConnectionTrait;
use std::collections::HashMap;

/// Every brand with its cars nested. Brandless cars are not listed.
pub async fn list_with_cars<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<CarBrandWithCars>> {
    let brands = repository::list_all(db).await?;
    let mut cars_by_brand: HashMap<i32, Vec<_>> = HashMap::new();
    for car in car_repository::list_all(db).await? {
        if let Some(brand_id) = car.brand_id {
            cars_by_brand.entry(brand_id).or_default().push(car.summary());
        }
    }

    Ok(brands
        .into_iter()
        .map(|brand| CarBrandWithCars {
            cars: cars_by_brand.remove(&brand.id).unwrap_or_default(),
            id: brand.id,
            name: brand.name,
            display_name: brand.display_name,
        })
        .collect())
}
