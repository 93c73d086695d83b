use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Record, Schema};

use super::{RecordStore, StoreError, StoreSnapshot};

/// Store that lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<StoreSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            inner: RwLock::new(snapshot),
        }
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        self.inner.read().await.clone()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn all_schemas(&self) -> Result<Vec<Schema>, StoreError> {
        Ok(self.inner.read().await.schemas.values().cloned().collect())
    }

    async fn schema_by_type(&self, prompt_type: &str) -> Result<Option<Schema>, StoreError> {
        Ok(self.inner.read().await.schemas.get(prompt_type).cloned())
    }

    async fn add_schema(&self, schema: Schema) -> Result<(), StoreError> {
        self.inner.write().await.add_schema(schema)
    }

    async fn put_schema(&self, schema: Schema) -> Result<(), StoreError> {
        self.inner.write().await.put_schema(schema);
        Ok(())
    }

    async fn records_by_type(&self, prompt_type: &str) -> Result<Vec<Record>, StoreError> {
        Ok(self.inner.read().await.records_by_type(prompt_type))
    }

    async fn all_records(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.inner.read().await.all_records())
    }

    async fn record_by_id(&self, id: &str) -> Result<Option<Record>, StoreError> {
        Ok(self.inner.read().await.records.get(id).cloned())
    }

    async fn add_record(&self, record: Record) -> Result<(), StoreError> {
        self.inner.write().await.add_record(record)
    }

    async fn put_record(&self, record: Record) -> Result<(), StoreError> {
        self.inner.write().await.put_record(record);
        Ok(())
    }

    async fn delete_record(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.delete_record(id))
    }
}
