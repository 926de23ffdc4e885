use super::validation::{detect_warranty, validate_product};
use crate::domain::a002_car::reconciler;
use crate::domain::a003_part_category::{repository as category_repository, resolver};
use crate::domain::a004_part::repository as part_repository;
use crate::shared::config::{IngestionConfig, PartIdentity, UnknownCarPolicy};
use crate::shared::logger::{EventLogger, LogRecord};
use crate::shared::lookup::LookupTables;
use anyhow::Result;
use contracts::domain::a004_part::Part;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_ingest_catalog::{
    CatalogPayload, CategoryPayload, IngestCatalog, IngestionResult,
};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    pub part_identity: PartIdentity,
    pub unknown_car_policy: UnknownCarPolicy,
    pub append_part_names_to_category: bool,
}

impl From<&IngestionConfig> for IngestOptions {
    fn from(config: &IngestionConfig) -> Self {
        Self {
            part_identity: config.part_identity,
            unknown_car_policy: config.unknown_car_policy,
            append_part_names_to_category: config.append_part_names_to_category,
        }
    }
}

/// Executor for the catalog ingestion. One run is one transaction: product
/// validation failures are recorded and skipped, any other error rolls the
/// whole run back.
pub struct IngestExecutor<'a> {
    tables: &'a LookupTables,
    options: IngestOptions,
    logger: Arc<dyn EventLogger>,
}

impl<'a> IngestExecutor<'a> {
    pub fn new(
        tables: &'a LookupTables,
        options: IngestOptions,
        logger: Arc<dyn EventLogger>,
    ) -> Self {
        Self {
            tables,
            options,
            logger,
        }
    }

    pub async fn ingest(
        &self,
        db: &DatabaseConnection,
        payload: CatalogPayload,
    ) -> Result<IngestionResult> {
        let usecase = IngestCatalog::full_name();
        tracing::info!(
            "Starting {} with {} categories",
            usecase,
            payload.categories.len()
        );

        let txn = db.begin().await?;
        match self.run(&txn, &payload).await {
            Ok(result) => {
                txn.commit().await?;
                self.logger.log(LogRecord::info(
                    &usecase,
                    "ingest",
                    format!(
                        "Imported {}, skipped {}, rejected {}",
                        result.imported_count,
                        result.skipped_count,
                        result.errors.len()
                    ),
                ));
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Rollback of {} failed: {}", usecase, rollback_err);
                }
                self.logger.log(LogRecord::failure(
                    &usecase,
                    "ingest",
                    "Ingestion aborted, transaction rolled back",
                    format!("{:#}", e),
                ));
                Err(e)
            }
        }
    }

    async fn run<C: ConnectionTrait>(
        &self,
        txn: &C,
        payload: &CatalogPayload,
    ) -> Result<IngestionResult> {
        let mut result = IngestionResult::default();
        for category in &payload.categories {
            self.ingest_category(txn, category, &mut result).await?;
        }
        Ok(result)
    }

    async fn ingest_category<C: ConnectionTrait>(
        &self,
        txn: &C,
        category: &CategoryPayload,
        result: &mut IngestionResult,
    ) -> Result<()> {
        let path = resolver::resolve_path(self.tables, &category.title);
        let node = resolver::get_or_create_hierarchy(txn, self.tables, &path).await?;

        for (index, raw) in category.products.iter().enumerate() {
            let product = match validate_product(raw) {
                Ok(product) => product,
                Err(message) => {
                    let scope = format!("{} / product {}", category.title, index + 1);
                    self.logger.log(LogRecord::failure(
                        &IngestCatalog::full_name(),
                        "validate_product",
                        format!("Product rejected in '{}'", scope),
                        &message,
                    ));
                    result.add_error(scope, message);
                    continue;
                }
            };

            let exists = match self.options.part_identity {
                PartIdentity::CommercialCode => {
                    part_repository::exists_by_commercial_code(txn, &product.commercial_code)
                        .await?
                }
                PartIdentity::Name => part_repository::exists_by_name(txn, &product.name).await?,
            };
            if exists {
                result.skipped_count += 1;
                continue;
            }

            let cars = reconciler::resolve_cars(
                txn,
                self.tables,
                self.options.unknown_car_policy,
                self.logger.as_ref(),
                &product.cars,
            )
            .await?;

            let (has_warranty, warranty_name) = detect_warranty(&product.name);
            let mut part = Part::stub(
                product.name.clone(),
                product.commercial_code,
                product.internal_code,
                product.price,
            );
            part.description = product.description;
            part.category_title = category.title.clone();
            part.category_url = category.url.clone();
            part.category_description = category.description.clone();
            part.category_id = Some(node.id);
            part.image_urls = category.images.clone();
            part.has_warranty = has_warranty;
            part.warranty_name = warranty_name;

            let part_id = part_repository::insert(txn, &part).await?;
            let car_ids: Vec<i32> = cars.iter().map(|c| c.id).collect();
            part_repository::set_cars(txn, part_id, &car_ids).await?;

            if self.options.append_part_names_to_category {
                category_repository::append_description(txn, node.id, &product.name).await?;
            }
            result.imported_count += 1;
        }
        Ok(())
    }
}
