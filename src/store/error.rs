use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("a schema for prompt type `{0}` already exists")]
    DuplicateSchema(String),
    #[error("a record with id `{0}` already exists")]
    DuplicateRecord(String),
    #[error("failed to access store at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store at {} is not a valid document: {source}", path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
