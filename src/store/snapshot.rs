use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Record, Schema};

use super::error::StoreError;

/// Everything a store holds: schemas keyed by prompt type, records by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub schemas: BTreeMap<String, Schema>,
    #[serde(default)]
    pub records: BTreeMap<String, Record>,
}

/// Accepted import layouts: a store document, or plain lists.
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportDocument {
    Snapshot(StoreSnapshot),
    Lists {
        #[serde(default)]
        schemas: Vec<Schema>,
        #[serde(default)]
        records: Vec<Record>,
    },
}

impl StoreSnapshot {
    /// Reads an import document: either the layout a [`FileStore`](super::FileStore)
    /// writes (maps keyed by prompt type and id) or `schemas`/`records` lists.
    pub fn from_document(document: Value) -> Result<Self, serde_json::Error> {
        match serde_json::from_value(document)? {
            ImportDocument::Snapshot(snapshot) => Ok(snapshot),
            ImportDocument::Lists { schemas, records } => {
                let mut snapshot = StoreSnapshot::default();
                for schema in schemas {
                    snapshot.put_schema(schema);
                }
                for record in records {
                    snapshot.put_record(record);
                }
                Ok(snapshot)
            }
        }
    }

    pub(crate) fn add_schema(&mut self, schema: Schema) -> Result<(), StoreError> {
        if self.schemas.contains_key(&schema.prompt_type) {
            return Err(StoreError::DuplicateSchema(schema.prompt_type));
        }
        self.schemas.insert(schema.prompt_type.clone(), schema);
        Ok(())
    }

    pub(crate) fn put_schema(&mut self, schema: Schema) {
        self.schemas.insert(schema.prompt_type.clone(), schema);
    }

    /// Records of one type, oldest first.
    pub(crate) fn records_by_type(&self, prompt_type: &str) -> Vec<Record> {
        self.sorted_records(|record| record.prompt_type == prompt_type)
    }

    /// Every record regardless of type, oldest first.
    pub(crate) fn all_records(&self) -> Vec<Record> {
        self.sorted_records(|_| true)
    }

    fn sorted_records(&self, keep: impl Fn(&Record) -> bool) -> Vec<Record> {
        let mut records: Vec<Record> = self
            .records
            .values()
            .filter(|record| keep(record))
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        records
    }

    pub(crate) fn add_record(&mut self, record: Record) -> Result<(), StoreError> {
        if self.records.contains_key(&record.id) {
            return Err(StoreError::DuplicateRecord(record.id));
        }
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    pub(crate) fn put_record(&mut self, record: Record) {
        self.records.insert(record.id.clone(), record);
    }

    pub(crate) fn delete_record(&mut self, id: &str) -> bool {
        self.records.remove(id).is_some()
    }
}
