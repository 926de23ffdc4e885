use contracts::domain::a002_car::Car;
use contracts::domain::common::EntityMetadata;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a002_car")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub brand_id: Option<i32>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub slug: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Car {
    fn from(m: Model) -> Self {
        Car {
            id: m.id,
            code: m.code,
            name: m.name,
            brand_id: m.brand_id,
            description: m.description,
            image: m.image,
            slug: m.slug,
            metadata: EntityMetadata {
                created_at: m.created_at,
                updated_at: m.updated_at,
            },
        }
    }
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: i32) -> anyhow::Result<Option<Car>> {
    let result = Entity::find_by_id(id).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_code<C: ConnectionTrait>(db: &C, code: &str) -> anyhow::Result<Option<Car>> {
    let result = Entity::find()
        .filter(Column::Code.eq(code))
        .one(db)
        .await?;
    Ok(result.map(Into::into))
}

/// Inserts the row unless its natural key is already taken
async fn insert_if_absent<C: ConnectionTrait>(db: &C, active: ActiveModel) -> anyhow::Result<()> {
    Entity::insert(active)
        .on_conflict(OnConflict::column(Column::Code).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;
    Ok(())
}

/// Returns the car with this code, inserting it first when absent.
/// Name and brand are creation-only: an existing car is returned unchanged.
pub async fn get_or_create<C: ConnectionTrait>(
    db: &C,
    code: &str,
    name: &str,
    brand_id: Option<i32>,
) -> anyhow::Result<Car> {
    if let Some(existing) = get_by_code(db, code).await? {
        return Ok(existing);
    }

    let car = Car::new_for_insert(code.to_string(), name.to_string(), brand_id);
    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        code: Set(car.code.clone()),
        name: Set(car.name.clone()),
        brand_id: Set(car.brand_id),
        description: Set(None),
        image: Set(None),
        slug: Set(car.slug.clone()),
        created_at: Set(car.metadata.created_at),
        updated_at: Set(car.metadata.updated_at),
    };

    insert_if_absent(db, active).await?;

    get_by_code(db, code)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Car '{}' missing after insert", code))
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<Car>> {
    let items = Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn count<C: ConnectionTrait>(db: &C) -> anyhow::Result<u64> {
    Ok(Entity::find().count(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::test_support::{file_connection, memory_connection};
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_existing_car_keeps_name_and_brand() {
        let db = memory_connection().await;
        let brand = crate::domain::a001_car_brand::repository::get_or_create(&db, "saipa", "سایپا")
            .await
            .unwrap();
        let first = get_or_create(&db, "pride", "پراید", Some(brand.id))
            .await
            .unwrap();
        let second = get_or_create(&db, "pride", "پراید 2", None).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.name, "پراید");
        assert_eq!(second.brand_id, Some(brand.id));
        assert_eq!(count(&db).await.unwrap(), 1);
        assert!(get_by_id(&db, first.id).await.unwrap().is_some());
        assert!(get_by_id(&db, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_conflict_is_absorbed() {
        let db = memory_connection().await;
        let created = get_or_create(&db, "pride", "پراید", None).await.unwrap();
        let duplicate = ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            code: Set("pride".into()),
            name: Set("other".into()),
            brand_id: Set(None),
            description: Set(None),
            image: Set(None),
            slug: Set("pride".into()),
            created_at: Set(created.metadata.created_at),
            updated_at: Set(created.metadata.updated_at),
        };
        insert_if_absent(&db, duplicate).await.unwrap();

        assert_eq!(count(&db).await.unwrap(), 1);
        let stored = get_by_code(&db, "pride").await.unwrap().unwrap();
        assert_eq!(stored.id, created.id);
        assert_eq!(stored.name, "پراید");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_get_or_create_yields_one_row() {
        let db = file_connection("car-race", 16).await;
        let tasks: Vec<_> = (0..32)
            .map(|_| {
                let db = db.clone();
                tokio::spawn(async move { get_or_create(&db, "pride", "پراید", None).await })
            })
            .collect();

        let mut ids = HashSet::new();
        for task in tasks {
            ids.insert(task.await.unwrap().unwrap().id);
        }
        assert_eq!(ids.len(), 1);
        assert_eq!(count(&db).await.unwrap(), 1);
    }
}
