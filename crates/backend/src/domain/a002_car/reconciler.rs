use super::repository;
use crate::domain::a001_car_brand::repository as brand_repository;
use crate::shared::config::UnknownCarPolicy;
use crate::shared::logger::{EventLogger, LogRecord};
use crate::shared::lookup::LookupTables;
use contracts::domain::a002_car::Car;
use sea_orm::ConnectionTrait;
use std::collections::HashSet;

const MODULE: &str = "a002_car::reconciler";

/// Code for a car missing from the lookup table
pub fn synthetic_code(name_fa: &str) -> String {
    name_fa.trim().replace(' ', "-")
}

/// Binds a vendor car name to a persisted car, creating the car and its
/// brand on first sight. Returns None for blank names and, under
/// [`UnknownCarPolicy::Skip`], for names missing from the lookup table.
pub async fn resolve_car<C: ConnectionTrait>(
    db: &C,
    tables: &LookupTables,
    policy: UnknownCarPolicy,
    logger: &dyn EventLogger,
    name_fa: &str,
) -> anyhow::Result<Option<Car>> {
    let name = name_fa.trim();
    if name.is_empty() {
        return Ok(None);
    }

    match tables.car(name) {
        Some(entry) => {
            let display_name = tables.brand_display_name(&entry.brand_code);
            let brand =
                brand_repository::get_or_create(db, &entry.brand_code, &display_name).await?;
            let car = repository::get_or_create(db, &entry.code, &entry.name_fa, Some(brand.id))
                .await?;
            Ok(Some(car))
        }
        None => match policy {
            UnknownCarPolicy::Brandless => {
                let car = repository::get_or_create(db, &synthetic_code(name), name, None).await?;
                Ok(Some(car))
            }
            UnknownCarPolicy::Skip => {
                logger.log(LogRecord::info(
                    MODULE,
                    "resolve_car",
                    format!("Car '{}' is not in the lookup table, skipped", name),
                ));
                Ok(None)
            }
        },
    }
}

/// Resolves every name of one product, keeping the first car per code
pub async fn resolve_cars<C: ConnectionTrait>(
    db: &C,
    tables: &LookupTables,
    policy: UnknownCarPolicy,
    logger: &dyn EventLogger,
    names: &[String],
) -> anyhow::Result<Vec<Car>> {
    let mut seen = HashSet::new();
    let mut cars = Vec::new();
    for name in names {
        if let Some(car) = resolve_car(db, tables, policy, logger, name).await? {
            if seen.insert(car.code.clone()) {
                cars.push(car);
            }
        }
    }
    Ok(cars)
}
