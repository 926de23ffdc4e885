use crate::domain::a004_part::repository as part_repository;
use crate::shared::logger::{EventLogger, LogRecord};
use crate::usecases::u501_ingest_catalog::validation::parse_price;
use anyhow::Result;
use contracts::domain::a004_part::Part;
use contracts::usecases::common::{FlexValue, UseCaseMetadata};
use contracts::usecases::u502_merge_feed::{FeedRecord, MergeError, MergeFeed, MergeResult};
use sea_orm::ConnectionTrait;

enum Outcome {
    Updated,
    Created,
}

/// Merges the flat B2B feed into existing parts by commercial code.
/// Every record commits on its own; a failing record is logged, recorded and
/// does not stop the job. Only a payload that is not an array fails the call.
pub async fn merge_feed<C: ConnectionTrait>(
    db: &C,
    payload: serde_json::Value,
    logger: &dyn EventLogger,
) -> Result<MergeResult> {
    let usecase = MergeFeed::full_name();
    let items = match payload {
        serde_json::Value::Array(items) => items,
        other => anyhow::bail!(
            "Merge feed must be a JSON array, got {}",
            json_kind(&other)
        ),
    };
    tracing::info!("Starting {} with {} records", usecase, items.len());

    let mut result = MergeResult::default();
    for (index, raw) in items.into_iter().enumerate() {
        let record: FeedRecord = match serde_json::from_value(raw) {
            Ok(record) => record,
            Err(e) => {
                let message = format!("Malformed record: {}", e);
                record_error(&mut result, logger, index, None, message);
                continue;
            }
        };

        let Some(commercial_code) = record.commercial_code() else {
            result.skipped += 1;
            continue;
        };

        match merge_record(db, &record, &commercial_code).await {
            Ok(Ok(Outcome::Updated)) => result.updated += 1,
            Ok(Ok(Outcome::Created)) => result.created += 1,
            Ok(Err(message)) => {
                record_error(&mut result, logger, index, Some(commercial_code), message)
            }
            Err(e) => record_error(
                &mut result,
                logger,
                index,
                Some(commercial_code),
                format!("{:#}", e),
            ),
        }
    }

    logger.log(LogRecord::info(
        &usecase,
        "merge_feed",
        format!(
            "Updated {}, created {}, skipped {}, failed {}",
            result.updated,
            result.created,
            result.skipped,
            result.errors.len()
        ),
    ));
    Ok(result)
}

/// Inner `Err(String)` is a validation failure of the record itself
async fn merge_record<C: ConnectionTrait>(
    db: &C,
    record: &FeedRecord,
    commercial_code: &str,
) -> Result<std::result::Result<Outcome, String>> {
    let price = match record.price.as_ref().filter(|p| !p.is_blank()) {
        Some(value) => match parse_price(value) {
            Ok(price) => Some(price),
            Err(message) => return Ok(Err(message)),
        },
        None => None,
    };
    let name = record
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    if part_repository::exists_by_commercial_code(db, commercial_code).await? {
        part_repository::update_name_price(db, commercial_code, name, price).await?;
        return Ok(Ok(Outcome::Updated));
    }

    let internal_code = record
        .internal_code
        .as_ref()
        .map(FlexValue::to_text)
        .unwrap_or_default();
    let stub = Part::stub(
        name.unwrap_or_default().to_string(),
        commercial_code.to_string(),
        internal_code,
        price.unwrap_or(0),
    );
    part_repository::insert(db, &stub).await?;
    Ok(Ok(Outcome::Created))
}

fn record_error(
    result: &mut MergeResult,
    logger: &dyn EventLogger,
    index: usize,
    commercial_code: Option<String>,
    message: String,
) {
    logger.log(LogRecord::failure(
        &MergeFeed::full_name(),
        "merge_record",
        format!("Feed record {} rejected", index),
        &message,
    ));
    result.errors.push(MergeError {
        index,
        commercial_code,
        message,
    });
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
