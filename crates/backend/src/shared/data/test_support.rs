use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use super::db::bootstrap_schema;

/// Fresh in-memory database with the catalog schema. One pooled connection,
/// otherwise every connection would see its own empty database.
pub async fn memory_connection() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(options)
        .await
        .expect("in-memory sqlite must open");
    bootstrap_schema(&conn)
        .await
        .expect("schema bootstrap must succeed");
    conn
}

/// File-backed database with a multi-connection pool, for tests where
/// several connections must write at the same time. The file is recreated
/// on every call.
pub async fn file_connection(label: &str, max_connections: u32) -> DatabaseConnection {
    let path = std::env::temp_dir().join(format!(
        "parts-catalog-{}-{}.db",
        label,
        std::process::id()
    ));
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
    }

    let url = format!("sqlite://{}?mode=rwc", path.to_string_lossy().replace('\\', "/"));
    let mut options = ConnectOptions::new(url);
    options
        .max_connections(max_connections)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(options)
        .await
        .expect("file sqlite must open");
    bootstrap_schema(&conn)
        .await
        .expect("schema bootstrap must succeed");
    conn
}
