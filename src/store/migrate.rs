use serde::Serialize;

use super::{RecordStore, StoreError};

/// What [`migrate`] copied and what it left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    pub schemas_added: Vec<String>,
    pub schemas_skipped: Vec<String>,
    pub records_added: Vec<String>,
    pub records_skipped: Vec<String>,
}

impl MigrationReport {
    pub fn added(&self) -> usize {
        self.schemas_added.len() + self.records_added.len()
    }

    pub fn skipped(&self) -> usize {
        self.schemas_skipped.len() + self.records_skipped.len()
    }
}

/// Copies every schema and record of `from` into `to`.
///
/// Schemas whose prompt type and records whose id already exist in `to` are
/// skipped, never overwritten. Schemas go first so imported records find
/// their type.
pub async fn migrate<F, T>(from: &F, to: &T) -> Result<MigrationReport, StoreError>
where
    F: RecordStore + ?Sized,
    T: RecordStore + ?Sized,
{
    let mut report = MigrationReport::default();

    for schema in from.all_schemas().await? {
        let prompt_type = schema.prompt_type.clone();
        if to.schema_by_type(&prompt_type).await?.is_some() {
            tracing::info!(%prompt_type, "schema already exists, skipping");
            report.schemas_skipped.push(prompt_type);
            continue;
        }
        to.add_schema(schema).await?;
        tracing::info!(%prompt_type, "migrated schema");
        report.schemas_added.push(prompt_type);
    }

    for record in from.all_records().await? {
        let id = record.id.clone();
        if to.record_by_id(&id).await?.is_some() {
            tracing::info!(%id, title = record.title(), "prompt already exists, skipping");
            report.records_skipped.push(id);
            continue;
        }
        tracing::info!(%id, title = record.title(), "migrated prompt");
        to.add_record(record).await?;
        report.records_added.push(id);
    }

    tracing::info!(
        added = report.added(),
        skipped = report.skipped(),
        "data migration completed"
    );
    Ok(report)
}
