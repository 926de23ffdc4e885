use crate::shared::config::{IngestionConfig, UploadConfig};
use crate::shared::logger::EventLogger;
use crate::shared::lookup::LookupTables;
use crate::usecases::u501_ingest_catalog::{IngestExecutor, IngestOptions};
use crate::usecases::u502_merge_feed::merge_feed;
use anyhow::Context;
use contracts::usecases::u501_ingest_catalog::CatalogPayload;
use contracts::usecases::upload::UploadSummary;
use sea_orm::DatabaseConnection;
use std::path::Path;
use std::sync::Arc;

/// Job an uploaded file is routed to, chosen by its exact file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Catalog,
    Feed,
    Ignored,
}

pub fn classify(file_name: &str, config: &UploadConfig) -> UploadKind {
    if file_name == config.merge_file_name {
        UploadKind::Feed
    } else if file_name == config.catalog_file_name {
        UploadKind::Catalog
    } else {
        UploadKind::Ignored
    }
}

/// Final path component of a client supplied file name
pub fn sanitize_file_name(raw: &str) -> Option<String> {
    let name = raw.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default().trim();
    match name {
        "" | "." | ".." => None,
        name => Some(name.to_string()),
    }
}

/// Reads a stored upload and runs the job it is routed to
pub async fn process_file(
    db: &DatabaseConnection,
    path: &Path,
    kind: UploadKind,
    tables: &LookupTables,
    ingestion: &IngestionConfig,
    logger: Arc<dyn EventLogger>,
) -> anyhow::Result<UploadSummary> {
    if kind == UploadKind::Ignored {
        tracing::info!("Upload {} is not routed to any job", path.display());
        return Ok(UploadSummary::Ignored);
    }

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Cannot read upload {}", path.display()))?;

    match kind {
        UploadKind::Catalog => {
            let payload: CatalogPayload =
                serde_json::from_slice(&bytes).context("Catalog upload is not valid JSON")?;
            let executor = IngestExecutor::new(tables, IngestOptions::from(ingestion), logger);
            Ok(UploadSummary::Catalog(executor.ingest(db, payload).await?))
        }
        UploadKind::Feed => {
            let payload: serde_json::Value =
                serde_json::from_slice(&bytes).context("Feed upload is not valid JSON")?;
            Ok(UploadSummary::Feed(
                merge_feed(db, payload, logger.as_ref()).await?,
            ))
        }
        UploadKind::Ignored => Ok(UploadSummary::Ignored),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a004_part::repository as part_repository;
    use crate::shared::data::test_support::memory_connection;
    use crate::shared::logger::MemoryEventLogger;

    #[test]
    fn test_classify_by_exact_name() {
        let config = UploadConfig::default();
        assert_eq!(classify("allData.json", &config), UploadKind::Feed);
        assert_eq!(classify("final_output", &config), UploadKind::Catalog);
        assert_eq!(classify("final_output.json", &config), UploadKind::Ignored);
        assert_eq!(classify("alldata.json", &config), UploadKind::Ignored);
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(
            sanitize_file_name("../../etc/final_output").as_deref(),
            Some("final_output")
        );
        assert_eq!(
            sanitize_file_name("C:\\tmp\\allData.json").as_deref(),
            Some("allData.json")
        );
        assert_eq!(sanitize_file_name("dir/.."), None);
        assert_eq!(sanitize_file_name(""), None);
    }

    #[tokio::test]
    async fn test_process_routes_feed_and_catalog() {
        let db = memory_connection().await;
        let dir = std::env::temp_dir().join(format!("parts-upload-test-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let logger: Arc<dyn EventLogger> = Arc::new(MemoryEventLogger::default());
        let tables = LookupTables::new();
        let ingestion = IngestionConfig::default();

        let catalog = dir.join("final_output");
        tokio::fs::write(
            &catalog,
            r#"{"categories": [{"title": "X", "products": [{"name": "Pad", "ekhtesasiCode": "E", "tegaratCode": "C1", "price": 5}]}]}"#,
        )
        .await
        .unwrap();
        let summary = process_file(
            &db,
            &catalog,
            UploadKind::Catalog,
            &tables,
            &ingestion,
            logger.clone(),
        )
        .await
        .unwrap();
        assert!(matches!(summary, UploadSummary::Catalog(ref r) if r.imported_count == 1));

        let feed = dir.join("allData.json");
        tokio::fs::write(&feed, r#"[{"tegaratCode": "C1", "price": 9}]"#)
            .await
            .unwrap();
        let summary =
            process_file(&db, &feed, UploadKind::Feed, &tables, &ingestion, logger.clone())
                .await
                .unwrap();
        assert!(matches!(summary, UploadSummary::Feed(ref r) if r.updated == 1));
        assert_eq!(
            part_repository::find_by_commercial_code(&db, "C1").await.unwrap()[0].price,
            9
        );

        let broken = dir.join("broken");
        tokio::fs::write(&broken, "{not json").await.unwrap();
        assert!(
            process_file(&db, &broken, UploadKind::Catalog, &tables, &ingestion, logger)
                .await
                .is_err()
        );

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
