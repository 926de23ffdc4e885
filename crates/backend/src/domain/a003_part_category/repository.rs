use contracts::domain::a003_part_category::PartCategory;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a003_part_category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub parent_id: Option<i32>,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PartCategory {
    fn from(m: Model) -> Self {
        PartCategory {
            id: m.id,
            name: m.name,
            parent_id: m.parent_id,
            description: m.description,
        }
    }
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: i32) -> anyhow::Result<Option<PartCategory>> {
    let result = Entity::find_by_id(id).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_name<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> anyhow::Result<Option<PartCategory>> {
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

/// Returns the node with this name, creating it under `parent_id` when absent.
/// An existing node keeps its parent.
pub async fn get_or_create<C: ConnectionTrait>(
    db: &C,
    name: &str,
    parent_id: Option<i32>,
) -> anyhow::Result<PartCategory> {
    if let Some(existing) = get_by_name(db, name).await? {
        return Ok(existing);
    }

    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        name: Set(name.to_string()),
        parent_id: Set(parent_id),
        description: Set(None),
    };

    insert_if_absent(db, active).await?;

    get_by_name(db, name)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Category '{}' missing after insert", name))
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<PartCategory>> {
    let items = Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Appends one line to the node description
pub async fn append_description<C: ConnectionTrait>(
    db: &C,
    id: i32,
    line: &str,
) -> anyhow::Result<()> {
    let model = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Category {} not found", id))?;

    let description = match model.description.as_deref() {
        Some(current) if !current.is_empty() => format!("{}\n{}", current, line),
        _ => line.to_string(),
    };

    let mut active: ActiveModel = model.into();
    active.description = Set(Some(description));
    active.update(db).await?;
    Ok(())
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
    async fn test_existing_node_is_not_reparented() {
        let db = memory_connection().await;
        let root = get_or_create(&db, "Spare Parts", None).await.unwrap();
        let brakes = get_or_create(&db, "Brakes", Some(root.id)).await.unwrap();
        let again = get_or_create(&db, "Brakes", None).await.unwrap();
        assert_eq!(again.id, brakes.id);
        assert_eq!(again.parent_id, Some(root.id));
        assert_eq!(count(&db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_append_description() {
        let db = memory_connection().await;
        let node = get_or_create(&db, "Brakes", None).await.unwrap();
        append_description(&db, node.id, "Brake Pad X").await.unwrap();
        append_description(&db, node.id, "Brake Disc Y").await.unwrap();
        let node = get_by_id(&db, node.id).await.unwrap().unwrap();
        assert_eq!(node.description.as_deref(), Some("Brake Pad X\nBrake Disc Y"));
    }

    #[tokio::test]
    async fn test_insert_conflict_is_absorbed() {
        let db = memory_connection().await;
        let root = get_or_create(&db, "لوازم یدکی", None).await.unwrap();
        let created = get_or_create(&db, "فیلتر", Some(root.id)).await.unwrap();
        let duplicate = ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            name: Set("فیلتر".into()),
            parent_id: Set(None),
            description: Set(Some("other".into())),
        };
        insert_if_absent(&db, duplicate).await.unwrap();

        assert_eq!(count(&db).await.unwrap(), 2);
        let stored = get_by_name(&db, "فیلتر").await.unwrap().unwrap();
        assert_eq!(stored.id, created.id);
        assert_eq!(stored.parent_id, Some(root.id));
        assert_eq!(stored.description, None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_get_or_create_yields_one_row() {
        let db = file_connection("category-race", 16).await;
        let tasks: Vec<_> = (0..32)
            .map(|_| {
                let db = db.clone();
                tokio::spawn(async move { get_or_create(&db, "فیلتر", None).await })
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
