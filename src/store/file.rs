use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs, sync::RwLock};

use crate::domain::{Record, Schema};

use super::{RecordStore, StoreError, StoreSnapshot};

/// Store persisted as a single JSON document.
///
/// The document is read once on open and rewritten in full after every
/// write, through a sibling temp file so a failed write leaves the previous
/// document in place.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: RwLock<StoreSnapshot>,
}

impl FileStore {
    /// Opens the document at `path`, starting empty if it does not exist.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let snapshot = match fs::read_to_string(&path).await {
            Ok(contents) if contents.trim().is_empty() => StoreSnapshot::default(),
            Ok(contents) => serde_json::from_str(&contents).map_err(|source| {
                StoreError::Serialization {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "store document missing, starting empty");
                StoreSnapshot::default()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        Ok(Self {
            path,
            inner: RwLock::new(snapshot),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, snapshot: &StoreSnapshot) -> Result<(), StoreError> {
        let contents =
            serde_json::to_string_pretty(snapshot).map_err(|source| StoreError::Serialization {
                path: self.path.clone(),
                source,
            })?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await.map_err(|source| self.io_error(source))?;
        }

        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);
        fs::write(&staging, contents)
            .await
            .map_err(|source| self.io_error(source))?;
        fs::rename(&staging, &self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        tracing::trace!(path = %self.path.display(), "store document written");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl RecordStore for FileStore {
    async fn all_schemas(&self) -> Result<Vec<Schema>, StoreError> {
        Ok(self.inner.read().await.schemas.values().cloned().collect())
    }

    async fn schema_by_type(&self, prompt_type: &str) -> Result<Option<Schema>, StoreError> {
        Ok(self.inner.read().await.schemas.get(prompt_type).cloned())
    }

    async fn add_schema(&self, schema: Schema) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        let mut next = guard.clone();
        next.add_schema(schema)?;
        self.persist(&next).await?;
        *guard = next;
        Ok(())
    }

    async fn put_schema(&self, schema: Schema) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        let mut next = guard.clone();
        next.put_schema(schema);
        self.persist(&next).await?;
        *guard = next;
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
        let mut guard = self.inner.write().await;
        let mut next = guard.clone();
        next.add_record(record)?;
        self.persist(&next).await?;
        *guard = next;
        Ok(())
    }

    async fn put_record(&self, record: Record) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        let mut next = guard.clone();
        next.put_record(record);
        self.persist(&next).await?;
        *guard = next;
        Ok(())
    }

    async fn delete_record(&self, id: &str) -> Result<bool, StoreError> {
        let mut guard = self.inner.write().await;
        let mut next = guard.clone();
        if !next.delete_record(id) {
            return Ok(false);
        }
        self.persist(&next).await?;
        *guard = next;
        Ok(true)
    }
}
