use contracts::domain::a004_part::{Part, PartOrdering, PartType, Turnover};
use contracts::shared::pagination::PageWindow;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Query;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use std::collections::HashMap;

use crate::domain::a002_car::repository as car_repository;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a004_part")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub internal_code: String,
    pub commercial_code: String,
    pub price: i64,
    pub description: Option<String>,
    pub category_title: String,
    pub category_url: String,
    pub category_description: Option<String>,
    pub category_id: Option<i32>,
    pub image_urls: Option<Json>,
    pub part_type: String,
    pub turnover: Option<String>,
    pub inventory: i32,
    pub has_warranty: bool,
    pub warranty_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Part {
    fn from(m: Model) -> Self {
        let image_urls = m
            .image_urls
            .and_then(|v| serde_json::from_value::<Vec<String>>(v).ok())
            .unwrap_or_default();

        Part {
            id: m.id,
            name: m.name,
            internal_code: m.internal_code,
            commercial_code: m.commercial_code,
            price: m.price,
            description: m.description,
            category_title: m.category_title,
            category_url: m.category_url,
            category_description: m.category_description,
            category_id: m.category_id,
            image_urls,
            part_type: PartType::parse(&m.part_type).unwrap_or_default(),
            turnover: m.turnover.as_deref().and_then(Turnover::parse),
            inventory: m.inventory,
            has_warranty: m.has_warranty,
            warranty_name: m.warranty_name,
        }
    }
}

/// Many-to-many link between parts and cars
pub mod part_car {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "a004_part_car")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub part_id: i32,
        #[sea_orm(primary_key, auto_increment = false)]
        pub car_id: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Filters of the part listings; all optional
#[derive(Debug, Clone, Default)]
pub struct PartFilter {
    pub part_type: Option<PartType>,
    pub search: Option<String>,
    pub category_id: Option<i32>,
    pub car_id: Option<i32>,
    pub ordering: Option<PartOrdering>,
}

pub async fn insert<C: ConnectionTrait>(db: &C, part: &Part) -> anyhow::Result<i32> {
    part.validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        name: Set(part.name.clone()),
        internal_code: Set(part.internal_code.clone()),
        commercial_code: Set(part.commercial_code.clone()),
        price: Set(part.price),
        description: Set(part.description.clone()),
        category_title: Set(part.category_title.clone()),
        category_url: Set(part.category_url.clone()),
        category_description: Set(part.category_description.clone()),
        category_id: Set(part.category_id),
        image_urls: Set(Some(serde_json::to_value(&part.image_urls)?)),
        part_type: Set(part.part_type.as_str().to_string()),
        turnover: Set(part.turnover.map(|t| t.as_str().to_string())),
        inventory: Set(part.inventory),
        has_warranty: Set(part.has_warranty),
        warranty_name: Set(part.warranty_name.clone()),
    };
    let inserted = active.insert(db).await?;
    Ok(inserted.id)
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: i32) -> anyhow::Result<Option<Part>> {
    let result = Entity::find_by_id(id).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn exists_by_name<C: ConnectionTrait>(db: &C, name: &str) -> anyhow::Result<bool> {
    let count = Entity::find()
        .filter(Column::Name.eq(name))
        .count(db)
        .await?;
    Ok(count > 0)
}

pub async fn exists_by_commercial_code<C: ConnectionTrait>(
    db: &C,
    commercial_code: &str,
) -> anyhow::Result<bool> {
    let count = Entity::find()
        .filter(Column::CommercialCode.eq(commercial_code))
        .count(db)
        .await?;
    Ok(count > 0)
}

pub async fn find_by_commercial_code<C: ConnectionTrait>(
    db: &C,
    commercial_code: &str,
) -> anyhow::Result<Vec<Part>> {
    let items = Entity::find()
        .filter(Column::CommercialCode.eq(commercial_code))
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Overwrites name and/or price of every part with this commercial code.
/// Returns the number of rows touched.
pub async fn update_name_price<C: ConnectionTrait>(
    db: &C,
    commercial_code: &str,
    name: Option<&str>,
    price: Option<i64>,
) -> anyhow::Result<u64> {
    use sea_orm::sea_query::Expr;

    if name.is_none() && price.is_none() {
        return Ok(0);
    }

    let mut update = Entity::update_many().filter(Column::CommercialCode.eq(commercial_code));
    if let Some(name) = name {
        update = update.col_expr(Column::Name, Expr::value(name));
    }
    if let Some(price) = price {
        update = update.col_expr(Column::Price, Expr::value(price));
    }
    let result = update.exec(db).await?;
    Ok(result.rows_affected)
}

/// Replaces the car links of a part
pub async fn set_cars<C: ConnectionTrait>(
    db: &C,
    part_id: i32,
    car_ids: &[i32],
) -> anyhow::Result<()> {
    part_car::Entity::delete_many()
        .filter(part_car::Column::PartId.eq(part_id))
        .exec(db)
        .await?;

    if car_ids.is_empty() {
        return Ok(());
    }

    let links = car_ids.iter().map(|car_id| part_car::ActiveModel {
        part_id: Set(part_id),
        car_id: Set(*car_id),
    });
    part_car::Entity::insert_many(links)
        .exec_without_returning(db)
        .await?;
    Ok(())
}

/// One page of parts matching `filter`, plus the total match count
pub async fn list<C: ConnectionTrait>(
    db: &C,
    filter: &PartFilter,
    window: PageWindow,
) -> anyhow::Result<(Vec<Part>, u64)> {
    let mut query = Entity::find();

    if let Some(part_type) = filter.part_type {
        query = query.filter(Column::PartType.eq(part_type.as_str()));
    }
    if let Some(category_id) = filter.category_id {
        query = query.filter(Column::CategoryId.eq(category_id));
    }
    if let Some(car_id) = filter.car_id {
        query = query.filter(
            Column::Id.in_subquery(
                Query::select()
                    .column(part_car::Column::PartId)
                    .from(part_car::Entity)
                    .and_where(part_car::Column::CarId.eq(car_id))
                    .to_owned(),
            ),
        );
    }
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        query = query.filter(
            Condition::any()
                .add(Column::Name.contains(search))
                .add(Column::CommercialCode.contains(search))
                .add(Column::InternalCode.contains(search))
                .add(Column::CategoryTitle.contains(search)),
        );
    }

    query = match filter.ordering {
        Some(PartOrdering::PriceAsc) => query.order_by_asc(Column::Price),
        Some(PartOrdering::PriceDesc) => query.order_by_desc(Column::Price),
        Some(PartOrdering::InventoryAsc) => query.order_by_asc(Column::Inventory),
        Some(PartOrdering::InventoryDesc) => query.order_by_desc(Column::Inventory),
        None => query,
    };
    query = query.order_by_asc(Column::Id);

    let total = query.clone().count(db).await?;
    let items = query
        .offset(window.offset())
        .limit(window.page_size)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((items, total))
}

/// Car display names per part id, ordered by car id
pub async fn car_names_for_parts<C: ConnectionTrait>(
    db: &C,
    part_ids: &[i32],
) -> anyhow::Result<HashMap<i32, Vec<String>>> {
    if part_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let links = part_car::Entity::find()
        .filter(part_car::Column::PartId.is_in(part_ids.iter().copied()))
        .order_by_asc(part_car::Column::CarId)
        .all(db)
        .await?;

    let car_ids: Vec<i32> = links.iter().map(|l| l.car_id).collect();
    let car_names: HashMap<i32, String> = car_repository::Entity::find()
        .filter(car_repository::Column::Id.is_in(car_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|car| (car.id, car.name))
        .collect();

    let mut result: HashMap<i32, Vec<String>> = HashMap::new();
    for link in links {
        if let Some(name) = car_names.get(&link.car_id) {
            result.entry(link.part_id).or_default().push(name.clone());
        }
    }
    Ok(result)
}

pub async fn count<C: ConnectionTrait>(db: &C) -> anyhow::Result<u64> {
    Ok(Entity::find().count(db).await?)
}
