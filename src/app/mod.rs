mod controller;
mod error;
mod options;
mod reconcile;
mod status;

pub use controller::{PromptLibrary, RecordRow, SchemaSaveOutcome, parse_schema_text};
pub use error::{LookupError, PromptError};
pub use options::LibraryOptions;
pub use reconcile::{ReconcileIssue, advisory_message, missing_required_fields, reconcile};
pub use status::{NOTICE_LOG_LIMIT, Notice, NoticeLevel, READY_STATUS, StatusLine};
