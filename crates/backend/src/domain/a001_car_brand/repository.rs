use contracts::domain::a001_car_brand::CarBrand;
use contracts::domain::common::EntityMetadata;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a001_car_brand")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub display_name: String,
    pub profile_photo: Option<String>,
    pub slug: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CarBrand {
    fn from(m: Model) -> Self {
        CarBrand {
            id: m.id,
            name: m.name,
            display_name: m.display_name,
            profile_photo: m.profile_photo,
            slug: m.slug,
            metadata: EntityMetadata {
                created_at: m.created_at,
                updated_at: m.updated_at,
            },
        }
    }
}

pub async fn get_by_name<C: ConnectionTrait>(db: &C, name: &str) -> anyhow::Result<Option<CarBrand>> {
    let result = Entity::find()
        .filter(Column::Name.eq(name))
        .one(db)
        .await?;
    Ok(result.map(Into::into))
}

/// Inserts the row unless its natural key is already taken
async fn insert_if_absent<C: ConnectionTrait>(db: &C, active: ActiveModel) -> anyhow::Result<()> {
    Entity::insert(active)
        .on_conflict(OnConflict::column(Column::Name).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;
    Ok(())
}

/// Returns the brand with this code name, inserting it first when absent.
/// `display_name` only applies to a newly created row.
pub async fn get_or_create<C: ConnectionTrait>(
    db: &C,
    name: &str,
    display_name: &str,
) -> anyhow::Result<CarBrand> {
    if let Some(existing) = get_by_name(db, name).await? {
        return Ok(existing);
    }

    let brand = CarBrand::new_for_insert(name.to_string(), display_name.to_string());
    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        name: Set(brand.name.clone()),
        display_name: Set(brand.display_name.clone()),
        profile_photo: Set(None),
        slug: Set(brand.slug.clone()),
        created_at: Set(brand.metadata.created_at),
        updated_at: Set(brand.metadata.updated_at),
    };

    // A concurrent writer may have inserted the same name in the meantime
    insert_if_absent(db, active).await?;

    get_by_name(db, name)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Brand '{}' missing after insert", name))
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<CarBrand>> {
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
    async fn test_get_or_create_is_idempotent() {
        let db = memory_connection().await;
        let first = get_or_create(&db, "saipa", "سایپا").await.unwrap();
        let second = get_or_create(&db, "saipa", "other").await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.display_name, "سایپا");
        assert_eq!(second.slug, "saipa");
        assert_eq!(count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_conflict_is_absorbed() {
        let db = memory_connection().await;
        let created = get_or_create(&db, "saipa", "سایپا").await.unwrap();
        let duplicate = ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            name: Set("saipa".into()),
            display_name: Set("other".into()),
            profile_photo: Set(None),
            slug: Set("saipa".into()),
            created_at: Set(created.metadata.created_at),
            updated_at: Set(created.metadata.updated_at),
        };
        insert_if_absent(&db, duplicate).await.unwrap();

        assert_eq!(count(&db).await.unwrap(), 1);
        let stored = get_by_name(&db, "saipa").await.unwrap().unwrap();
        assert_eq!(stored.id, created.id);
        assert_eq!(stored.display_name, "سایپا");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_get_or_create_yields_one_row() {
        let db = file_connection("brand-race", 16).await;
        let tasks: Vec<_> = (0..32)
            .map(|_| {
                let db = db.clone();
                tokio::spawn(async move { get_or_create(&db, "saipa", "سایپا").await })
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
