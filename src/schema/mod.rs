mod builtin;
mod meta;

pub use builtin::{BUILTIN_SCHEMA_VERSION, builtin_schemas, code_schema, text_schema};
pub use meta::document_meta_schema;
pub(crate) use meta::check_document_shape;
