use super::repository::{self, PartFilter};
use crate::domain::a002_car::repository as car_repository;
use crate::domain::a003_part_category::repository as category_repository;
use crate::shared::config::ListingConfig;
use crate::shared::error::CatalogError;
use contracts::domain::a003_part_category::CategoryRef;
use contracts::domain::a004_part::{
    Part, PartDto, PartListQuery, PartOrdering, PartSummary, PartType,
};
use contracts::shared::pagination::{Page, PageRequest, PageWindow};
use sea_orm::ConnectionTrait;
use std::collections::HashMap;

pub fn to_dto(
    part: Part,
    car_names: Vec<String>,
    category: Option<CategoryRef>,
    warning_threshold: i32,
) -> PartDto {
    PartDto {
        id: part.id,
        inventory_warning: part.inventory <= warning_threshold,
        name: part.name,
        internal_code: part.internal_code,
        commercial_code: part.commercial_code,
        price: part.price,
        description: part.description,
        image_urls: part.image_urls,
        part_type: part.part_type,
        car_names,
        category,
        turnover: part.turnover,
        inventory: part.inventory,
        has_warranty: part.has_warranty,
        warranty_name: part.warranty_name,
    }
}

async fn to_dtos<C: ConnectionTrait>(
    db: &C,
    parts: Vec<Part>,
    listing: &ListingConfig,
) -> anyhow::Result<Vec<PartDto>> {
    let ids: Vec<i32> = parts.iter().map(|p| p.id).collect();
    let mut car_names = repository::car_names_for_parts(db, &ids).await?;

    let mut categories: HashMap<i32, CategoryRef> = HashMap::new();
    for category_id in parts.iter().filter_map(|p| p.category_id) {
        if categories.contains_key(&category_id) {
            continue;
        }
        if let Some(category) = category_repository::get_by_id(db, category_id).await? {
            categories.insert(category_id, CategoryRef { name: category.name });
        }
    }

    Ok(parts
        .into_iter()
        .map(|part| {
            let cars = car_names.remove(&part.id).unwrap_or_default();
            let category = part.category_id.and_then(|id| categories.get(&id).cloned());
            to_dto(part, cars, category, listing.inventory_warning_threshold)
        })
        .collect())
}

async fn page_of_dtos<C: ConnectionTrait>(
    db: &C,
    filter: &PartFilter,
    window: PageWindow,
    listing: &ListingConfig,
) -> anyhow::Result<Page<PartDto>> {
    let (parts, total) = repository::list(db, filter, window).await?;
    let results = to_dtos(db, parts, listing).await?;
    Ok(Page::new(window, total, results))
}

fn window(listing: &ListingConfig, page: PageRequest) -> PageWindow {
    page.resolve(listing.default_page_size, listing.max_page_size)
}

pub async fn list_all<C: ConnectionTrait>(
    db: &C,
    listing: &ListingConfig,
    page: PageRequest,
) -> Result<Page<PartDto>, CatalogError> {
    Ok(page_of_dtos(db, &PartFilter::default(), window(listing, page), listing).await?)
}

/// Validates the part type before touching storage
pub async fn filter_by_type<C: ConnectionTrait>(
    db: &C,
    listing: &ListingConfig,
    part_type: Option<&str>,
    page: PageRequest,
) -> Result<Page<PartDto>, CatalogError> {
    let raw = part_type.map(str::trim).unwrap_or_default();
    let part_type = PartType::parse(raw).ok_or_else(|| {
        let allowed: Vec<&str> = PartType::ALL.iter().map(|t| t.as_str()).collect();
        CatalogError::validation(format!(
            "Invalid part_type '{}'. Allowed values: {}",
            raw,
            allowed.join(", ")
        ))
    })?;

    let filter = PartFilter {
        part_type: Some(part_type),
        ..Default::default()
    };
    Ok(page_of_dtos(db, &filter, window(listing, page), listing).await?)
}

/// Search, ordering and category filter. Unknown orderings are ignored.
pub async fn filter_parts<C: ConnectionTrait>(
    db: &C,
    listing: &ListingConfig,
    query: &PartListQuery,
) -> Result<Page<PartDto>, CatalogError> {
    let filter = PartFilter {
        search: query.search.clone(),
        category_id: query.category_id,
        ordering: query.ordering.as_deref().and_then(PartOrdering::parse),
        ..Default::default()
    };
    let page = PageRequest::new(query.page, query.page_size);
    Ok(page_of_dtos(db, &filter, window(listing, page), listing).await?)
}

pub async fn get_by_id<C: ConnectionTrait>(
    db: &C,
    listing: &ListingConfig,
    id: i32,
) -> Result<PartDto, CatalogError> {
    let part = repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| CatalogError::not_found(format!("Part {}", id)))?;
    let mut dtos = to_dtos(db, vec![part], listing).await?;
    dtos.pop()
        .ok_or_else(|| CatalogError::not_found(format!("Part {}", id)))
}

/// Short rows of the parts fitting one car
pub async fn list_by_car<C: ConnectionTrait>(
    db: &C,
    listing: &ListingConfig,
    car_id: Option<i32>,
    page: PageRequest,
) -> Result<Page<PartSummary>, CatalogError> {
    let car_id = car_id.ok_or_else(|| CatalogError::validation("car_id is required."))?;
    if car_repository::get_by_id(db, car_id).await?.is_none() {
        return Err(CatalogError::not_found("Car"));
    }

    let filter = PartFilter {
        car_id: Some(car_id),
        ..Default::default()
    };
    let window = window(listing, page);
    let (parts, total) = repository::list(db, &filter, window).await?;
    let results = parts.iter().map(PartSummary::from).collect();
    Ok(Page::new(window, total, results))
}

pub async fn list_by_category<C: ConnectionTrait>(
    db: &C,
    listing: &ListingConfig,
    category_id: Option<i32>,
    page: PageRequest,
) -> Result<Page<PartDto>, CatalogError> {
    let category_id =
        category_id.ok_or_else(|| CatalogError::validation("Category id is required."))?;
    if category_repository::get_by_id(db, category_id).await?.is_none() {
        return Err(CatalogError::not_found("Category"));
    }

    let filter = PartFilter {
        category_id: Some(category_id),
        ..Default::default()
    };
    Ok(page_of_dtos(db, &filter, window(listing, page), listing).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::test_support::memory_connection;

    async fn seed<C: ConnectionTrait>(db: &C) -> (i32, i32) {
        let root = category_repository::get_or_create(db, "Brakes", None)
            .await
            .unwrap();
        let car = car_repository::get_or_create(db, "pride", "پراید", None)
            .await
            .unwrap();

        let mut pad = Part::stub("Pad".into(), "C1".into(), "I1".into(), 1000);
        pad.category_id = Some(root.id);
        pad.inventory = 4;
        let pad_id = repository::insert(db, &pad).await.unwrap();
        repository::set_cars(db, pad_id, &[car.id]).await.unwrap();

        let mut oil = Part::stub("Oil".into(), "C2".into(), "I2".into(), 500);
        oil.part_type = PartType::Consumable;
        repository::insert(db, &oil).await.unwrap();

        (root.id, car.id)
    }

    #[tokio::test]
    async fn test_dto_carries_cars_category_and_warning() {
        let db = memory_connection().await;
        seed(&db).await;
        let listing = ListingConfig::default();
        let page = list_all(&db, &listing, PageRequest::default()).await.unwrap();
        assert_eq!(page.count, 2);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 10);

        let pad = &page.results[0];
        assert_eq!(pad.car_names, vec!["پراید".to_string()]);
        assert_eq!(pad.category.as_ref().map(|c| c.name.as_str()), Some("Brakes"));
        assert!(!pad.inventory_warning);

        let oil = &page.results[1];
        assert!(oil.category.is_none());
        assert!(oil.inventory_warning);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let db = memory_connection().await;
        seed(&db).await;
        let listing = ListingConfig::default();
        let page = list_all(&db, &listing, PageRequest::new(Some(u64::MAX), Some(10)))
            .await
            .unwrap();
        assert_eq!(page.count, 2);
        assert_eq!(page.page, u64::MAX);
        assert!(page.results.is_empty());
    }

    #[tokio::test]
    async fn test_filter_by_type() {
        let db = memory_connection().await;
        seed(&db).await;
        let listing = ListingConfig::default();
        let page = filter_by_type(&db, &listing, Some("consumable"), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].name, "Oil");
    }

    #[tokio::test]
    async fn test_invalid_part_type_is_validation_error() {
        let db = memory_connection().await;
        let listing = ListingConfig::default();
        for value in [Some("wheels"), Some(""), None] {
            let err = filter_by_type(&db, &listing, value, PageRequest::default())
                .await
                .unwrap_err();
            assert!(matches!(err, CatalogError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_filter_parts_ignores_unknown_ordering() {
        let db = memory_connection().await;
        let (category_id, _) = seed(&db).await;
        let listing = ListingConfig::default();

        let query = PartListQuery {
            ordering: Some("name".into()),
            ..Default::default()
        };
        let page = filter_parts(&db, &listing, &query).await.unwrap();
        assert_eq!(page.count, 2);

        let query = PartListQuery {
            ordering: Some("price".into()),
            ..Default::default()
        };
        let page = filter_parts(&db, &listing, &query).await.unwrap();
        assert_eq!(page.results[0].name, "Oil");

        let query = PartListQuery {
            category_id: Some(category_id),
            ..Default::default()
        };
        let page = filter_parts(&db, &listing, &query).await.unwrap();
        assert_eq!(page.count, 1);
    }

    #[tokio::test]
    async fn test_lookups_report_missing_records() {
        let db = memory_connection().await;
        let (category_id, car_id) = seed(&db).await;
        let listing = ListingConfig::default();

        assert!(matches!(
            get_by_id(&db, &listing, 999).await,
            Err(CatalogError::NotFound(_))
        ));
        assert!(matches!(
            list_by_car(&db, &listing, None, PageRequest::default()).await,
            Err(CatalogError::Validation(_))
        ));
        assert!(matches!(
            list_by_car(&db, &listing, Some(999), PageRequest::default()).await,
            Err(CatalogError::NotFound(_))
        ));
        assert!(matches!(
            list_by_category(&db, &listing, Some(999), PageRequest::default()).await,
            Err(CatalogError::NotFound(_))
        ));

        let cars = list_by_car(&db, &listing, Some(car_id), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(cars.count, 1);
        assert_eq!(cars.results[0].price, 1000);

        let by_category = list_by_category(&db, &listing, Some(category_id), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(by_category.results[0].name, "Pad");
    }
}
