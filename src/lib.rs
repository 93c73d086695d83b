#![deny(rust_2018_idioms)]

//! Schema-driven prompt forms.
//!
//! A [`Schema`] describes the editable fields of one prompt type. The form
//! engine renders it into a [`FormState`], keeps visibility and inline
//! errors in step with edits, and collects a [`Record`] on submit.
//! [`PromptLibrary`] ties that to a [`RecordStore`] and reconciles stored
//! records whenever a schema changes.

pub mod app;
pub mod domain;
pub mod form;
pub mod io;
pub mod schema;
pub mod store;

#[cfg(test)]
mod tests;

pub use app::{
    LibraryOptions, LookupError, Notice, NoticeLevel, PromptError, PromptLibrary,
    ReconcileIssue, RecordRow, SchemaSaveOutcome, StatusLine, advisory_message,
    missing_required_fields, parse_schema_text, reconcile,
};
pub use domain::{
    DefaultValue, FieldDefinition, FieldKind, Record, Schema, SchemaError, ShowWhen,
    ValidationRule, parse_schema_document, validate_schema,
};
pub use form::{
    Control, EditValue, FieldError, FieldEvent, FieldInputError, FieldPath, FieldState,
    FormSession, FormState, LiveValidator, RenderContext, SubmitError, build_form,
    collect_values, render_field, validate_one,
};
pub use io::{DocumentFormat, OutputDestination, OutputOptions, emit, parse_document_str};
pub use schema::{builtin_schemas, document_meta_schema};
pub use store::{
    FileStore, MemoryStore, MigrationReport, RecordStore, StoreError, StoreSnapshot, migrate,
};

pub mod prelude {
    pub use super::{
        DocumentFormat, FieldPath, LibraryOptions, PromptError, PromptLibrary, RecordStore,
        Schema,
    };
}
