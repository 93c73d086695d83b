mod error;
mod parser;
mod record;
mod schema;
mod validator;

pub use error::SchemaError;
pub use parser::parse_schema_document;
pub use record::{Record, UNTITLED};
pub(crate) use schema::SchemaDocument;
pub use schema::{
    CURRENT_DATE_SENTINEL, Conditional, DefaultValue, FieldDefinition, FieldKind, Schema,
    ShowWhen, ValidationRule, prettify_label,
};
pub use validator::validate_schema;
