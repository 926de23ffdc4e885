use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub ingestion: IngestionConfig,
    #[serde(default)]
    pub listing: ListingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Directory for transient upload files
    pub dir: String,
    /// Exact file name routed to the catalog ingestion
    pub catalog_file_name: String,
    /// Exact file name routed to the B2B feed merge
    pub merge_file_name: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: "target/uploads".into(),
            catalog_file_name: "final_output".into(),
            merge_file_name: "allData.json".into(),
        }
    }
}

/// Identity used to detect an already ingested part
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PartIdentity {
    #[default]
    CommercialCode,
    /// Legacy behaviour: a product is skipped when any part has the same name
    Name,
}

/// What to do with a car name missing from the lookup table
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCarPolicy {
    /// Attach a brandless car under a synthetic code
    #[default]
    Brandless,
    /// Log the name and leave it out of the part's car list
    Skip,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct IngestionConfig {
    #[serde(default)]
    pub part_identity: PartIdentity,
    #[serde(default)]
    pub unknown_car_policy: UnknownCarPolicy,
    /// Append every ingested part name to its category description
    #[serde(default)]
    pub append_part_names_to_category: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListingConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
    /// `inventory_warning` is raised at or below this stock level
    pub inventory_warning_threshold: i32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_page_size: contracts::shared::pagination::DEFAULT_PAGE_SIZE,
            max_page_size: contracts::shared::pagination::MAX_PAGE_SIZE,
            inventory_warning_threshold: 0,
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/catalog.db"

[server]
host = "0.0.0.0"
port = 3000

[upload]
dir = "target/uploads"
catalog_file_name = "final_output"
merge_file_name = "allData.json"

[ingestion]
part_identity = "commercial_code"
unknown_car_policy = "brandless"
append_part_names_to_category = false

[listing]
default_page_size = 10
max_page_size = 100
inventory_warning_threshold = 0
"#;

fn candidate_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            paths.push(exe_dir.join("config.toml"));
        }
    }
    paths.push(PathBuf::from("config.toml"));
    paths
}

/// Load configuration from config.toml
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. The working directory
/// 3. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    for config_path in candidate_config_paths() {
        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)?;
            return parse_config(&contents);
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.listing.max_page_size == 0 {
        anyhow::bail!("listing.max_page_size must be positive");
    }
    Ok(config)
}

/// Makes `config` the process-wide configuration
pub fn install(config: Config) {
    if CONFIG.set(config).is_err() {
        tracing::warn!("Configuration already installed, keeping the first one");
    }
}

/// Process-wide configuration; loads it on first use
pub fn settings() -> &'static Config {
    CONFIG.get_or_init(|| {
        load_config().unwrap_or_else(|e| {
            tracing::error!("Invalid config.toml, using defaults: {}", e);
            default_config()
        })
    })
}

pub fn default_config() -> Config {
    Config {
        database: DatabaseConfig {
            path: "target/db/catalog.db".into(),
        },
        server: ServerConfig::default(),
        upload: UploadConfig::default(),
        ingestion: IngestionConfig::default(),
        listing: ListingConfig::default(),
    }
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    resolve_relative_to_exe(&config.database.path)
}

pub fn get_upload_dir(config: &Config) -> anyhow::Result<PathBuf> {
    resolve_relative_to_exe(&config.upload.dir)
}

fn resolve_relative_to_exe(path_str: &str) -> anyhow::Result<PathBuf> {
    let path = Path::new(path_str);

    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(path));
        }
    }

    Ok(PathBuf::from(path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/catalog.db");
        assert_eq!(config.upload.merge_file_name, "allData.json");
        assert_eq!(config.upload.catalog_file_name, "final_output");
        assert_eq!(config.ingestion.part_identity, PartIdentity::CommercialCode);
        assert_eq!(config.ingestion.unknown_car_policy, UnknownCarPolicy::Brandless);
        assert_eq!(config.listing.default_page_size, 10);
        assert_eq!(config.listing.max_page_size, 100);
    }

    #[test]
    fn test_missing_sections_take_defaults() {
        let config = parse_config("[database]\npath = \"x.db\"\n").unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(!config.ingestion.append_part_names_to_category);
        assert_eq!(config.listing.max_page_size, 100);
    }

    #[test]
    fn test_strict_name_mode() {
        let config = parse_config(
            "[database]\npath = \"x.db\"\n[ingestion]\npart_identity = \"name\"\nunknown_car_policy = \"skip\"\n",
        )
        .unwrap();
        assert_eq!(config.ingestion.part_identity, PartIdentity::Name);
        assert_eq!(config.ingestion.unknown_car_policy, UnknownCarPolicy::Skip);
    }

    #[test]
    fn test_zero_page_cap_rejected() {
        let raw = "[database]\npath = \"x.db\"\n[listing]\ndefault_page_size = 10\nmax_page_size = 0\ninventory_warning_threshold = 0\n";
        assert!(parse_config(raw).is_err());
    }
}
