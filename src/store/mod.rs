//! Persistence for schemas and records.
//!
//! [`RecordStore`] is the seam the controller talks to; [`MemoryStore`] and
//! [`FileStore`] are interchangeable behind it.

mod error;
mod file;
mod memory;
mod migrate;
mod snapshot;

use async_trait::async_trait;

use crate::domain::{Record, Schema};

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use migrate::{MigrationReport, migrate};
pub use snapshot::StoreSnapshot;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All schemas, ordered by prompt type.
    async fn all_schemas(&self) -> Result<Vec<Schema>, StoreError>;

    async fn schema_by_type(&self, prompt_type: &str) -> Result<Option<Schema>, StoreError>;

    /// Fails with [`StoreError::DuplicateSchema`] if the prompt type is taken.
    async fn add_schema(&self, schema: Schema) -> Result<(), StoreError>;

    /// Inserts or replaces the schema for its prompt type.
    async fn put_schema(&self, schema: Schema) -> Result<(), StoreError>;

    /// Records of one prompt type, oldest first.
    async fn records_by_type(&self, prompt_type: &str) -> Result<Vec<Record>, StoreError>;

    /// Records of every type, oldest first.
    async fn all_records(&self) -> Result<Vec<Record>, StoreError>;

    async fn record_by_id(&self, id: &str) -> Result<Option<Record>, StoreError>;

    /// Fails with [`StoreError::DuplicateRecord`] if the id is taken.
    async fn add_record(&self, record: Record) -> Result<(), StoreError>;

    async fn put_record(&self, record: Record) -> Result<(), StoreError>;

    /// Returns whether a record was removed.
    async fn delete_record(&self, id: &str) -> Result<bool, StoreError>;
}
