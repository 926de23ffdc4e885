use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Catalog schema. Natural keys carry UNIQUE constraints so that concurrent
/// get-or-create calls converge on one row per key.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS a001_car_brand (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        display_name TEXT NOT NULL,
        profile_photo TEXT,
        slug TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS a002_car (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        code TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        brand_id INTEGER REFERENCES a001_car_brand(id) ON DELETE SET NULL,
        description TEXT,
        image TEXT,
        slug TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_a002_car_brand_id ON a002_car(brand_id);",
    r#"
    CREATE TABLE IF NOT EXISTS a003_part_category (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        parent_id INTEGER REFERENCES a003_part_category(id) ON DELETE CASCADE,
        description TEXT
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_a003_part_category_parent ON a003_part_category(parent_id);",
    r#"
    CREATE TABLE IF NOT EXISTS a004_part (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        internal_code TEXT NOT NULL,
        commercial_code TEXT NOT NULL,
        price INTEGER NOT NULL CHECK (price >= 0),
        description TEXT,
        category_title TEXT NOT NULL DEFAULT '',
        category_url TEXT NOT NULL DEFAULT '',
        category_description TEXT,
        category_id INTEGER REFERENCES a003_part_category(id) ON DELETE SET NULL,
        image_urls TEXT,
        part_type TEXT NOT NULL DEFAULT 'spare',
        turnover TEXT,
        inventory INTEGER NOT NULL DEFAULT 0,
        has_warranty INTEGER NOT NULL DEFAULT 0,
        warranty_name TEXT
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_a004_part_commercial_code ON a004_part(commercial_code);",
    "CREATE INDEX IF NOT EXISTS idx_a004_part_name ON a004_part(name);",
    "CREATE INDEX IF NOT EXISTS idx_a004_part_category_id ON a004_part(category_id);",
    "CREATE INDEX IF NOT EXISTS idx_a004_part_part_type ON a004_part(part_type);",
    r#"
    CREATE TABLE IF NOT EXISTS a004_part_car (
        part_id INTEGER NOT NULL REFERENCES a004_part(id) ON DELETE CASCADE,
        car_id INTEGER NOT NULL REFERENCES a002_car(id) ON DELETE CASCADE,
        PRIMARY KEY (part_id, car_id)
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_a004_part_car_car_id ON a004_part_car(car_id);",
    r#"
    CREATE TABLE IF NOT EXISTS system_log (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp TEXT NOT NULL,
        module TEXT NOT NULL,
        operation TEXT NOT NULL,
        message TEXT NOT NULL,
        error TEXT
    );
    "#,
];

fn build_sqlite_url(path: &Path) -> String {
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

/// Create every catalog table and index that does not exist yet
pub async fn bootstrap_schema<C: ConnectionTrait>(conn: &C) -> anyhow::Result<()> {
    for sql in SCHEMA {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await?;
    }
    Ok(())
}

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    let db_url = build_sqlite_url(&absolute_path);
    tracing::info!("Opening database {}", db_url);

    // sqlx enables foreign_keys on every pooled sqlite connection
    let conn = Database::connect(&db_url).await?;
    bootstrap_schema(&conn).await?;
    tracing::info!("Database schema is up to date");

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Database connection already initialized"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
