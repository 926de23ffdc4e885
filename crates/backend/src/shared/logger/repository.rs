use chrono::Utc;
use contracts::shared::logger::LogEntry;
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "system_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub timestamp: String,
    pub module: String,
    pub operation: String,
    pub message: String,
    pub error: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for LogEntry {
    fn from(m: Model) -> Self {
        LogEntry {
            id: m.id,
            timestamp: m.timestamp,
            module: m.module,
            operation: m.operation,
            message: m.message,
            error: m.error,
        }
    }
}

/// Append one record to the system log
pub async fn log_event<C: ConnectionTrait>(
    db: &C,
    module: &str,
    operation: &str,
    message: &str,
    error: Option<&str>,
) -> anyhow::Result<()> {
    let now = Utc::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();

    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        timestamp: Set(now),
        module: Set(module.to_string()),
        operation: Set(operation.to_string()),
        message: Set(message.to_string()),
        error: Set(error.map(str::to_string)),
    };

    active.insert(db).await?;
    Ok(())
}

/// All log records, newest first
pub async fn get_all_logs<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<LogEntry>> {
    let logs: Vec<LogEntry> = Entity::find()
        .order_by_desc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(logs)
}

pub async fn clear_all_logs<C: ConnectionTrait>(db: &C) -> anyhow::Result<()> {
    Entity::delete_many().exec(db).await?;
    Ok(())
}
