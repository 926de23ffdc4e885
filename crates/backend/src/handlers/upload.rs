use axum::extract::multipart::MultipartRejection;
use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::Json;
use contracts::usecases::upload::{UploadResponse, UploadSummary};
use sea_orm::DatabaseConnection;
use std::path::PathBuf;
use std::sync::Arc;

use super::{report, report_with};
use crate::shared::config::{get_upload_dir, settings, IngestionConfig, UploadConfig};
use crate::shared::data::db::get_connection;
use crate::shared::error::CatalogError;
use crate::shared::logger::{server_logger, EventLogger};
use crate::shared::lookup::LookupTables;
use crate::usecases::upload_dispatch::{classify, process_file, sanitize_file_name};

const MODULE: &str = "handlers::upload";

/// Storage, configuration and logging an upload is processed with
pub(crate) struct UploadContext {
    pub db: DatabaseConnection,
    pub upload_dir: PathBuf,
    pub upload: UploadConfig,
    pub ingestion: IngestionConfig,
    pub tables: &'static LookupTables,
    pub logger: Arc<dyn EventLogger>,
}

impl UploadContext {
    fn from_settings() -> anyhow::Result<Self> {
        let config = settings();
        Ok(Self {
            db: get_connection().clone(),
            upload_dir: get_upload_dir(config)?,
            upload: config.upload.clone(),
            ingestion: config.ingestion.clone(),
            tables: LookupTables::builtin(),
            logger: server_logger(),
        })
    }
}

struct UploadedFile {
    name: String,
    data: Vec<u8>,
}

/// Pulls the `file` field out of the multipart body
async fn read_file_field(multipart: &mut Multipart) -> Result<UploadedFile, CatalogError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| CatalogError::field("file", format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field
            .file_name()
            .and_then(sanitize_file_name)
            .ok_or_else(|| {
                CatalogError::field("file", "The submitted data was not a file.")
            })?;
        let data = field
            .bytes()
            .await
            .map_err(|e| CatalogError::field("file", format!("Upload interrupted: {}", e)))?;
        if data.is_empty() {
            return Err(CatalogError::field("file", "The submitted file is empty."));
        }
        return Ok(UploadedFile {
            name,
            data: data.to_vec(),
        });
    }
    Err(CatalogError::field("file", "No file was submitted."))
}

/// Stores the upload, runs the routed job and removes the file whatever the outcome
async fn store_and_process(
    file: UploadedFile,
    ctx: &UploadContext,
) -> anyhow::Result<(PathBuf, UploadSummary)> {
    tokio::fs::create_dir_all(&ctx.upload_dir).await?;
    let path = ctx.upload_dir.join(&file.name);
    tokio::fs::write(&path, &file.data).await?;

    let kind = classify(&file.name, &ctx.upload);
    tracing::info!("Stored upload {} routed as {:?}", path.display(), kind);

    let outcome = process_file(
        &ctx.db,
        &path,
        kind,
        ctx.tables,
        &ctx.ingestion,
        ctx.logger.clone(),
    )
    .await;

    if let Err(e) = tokio::fs::remove_file(&path).await {
        tracing::warn!("Failed to remove upload {}: {}", path.display(), e);
    }
    outcome.map(|summary| (path, summary))
}

async fn handle_upload(
    multipart: Result<Multipart, MultipartRejection>,
    ctx: &UploadContext,
) -> Result<(StatusCode, Json<UploadResponse>), CatalogError> {
    let fail = |e: CatalogError| report_with(MODULE, "upload_json", e, || ctx.logger.clone());

    let mut multipart = multipart.map_err(|e| fail(e.into()))?;
    let file = read_file_field(&mut multipart).await.map_err(fail)?;

    match store_and_process(file, ctx).await {
        Ok((path, summary)) => Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                message: "File uploaded and processed successfully".into(),
                file_path: path.display().to_string(),
                summary,
            }),
        )),
        Err(e) => Err(fail(e.into())),
    }
}

/// POST /api/parts/upload-json
pub async fn upload_json(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), CatalogError> {
    let ctx = UploadContext::from_settings().map_err(|e| report(MODULE, "upload_json", e.into()))?;
    handle_upload(multipart, &ctx).await
}
