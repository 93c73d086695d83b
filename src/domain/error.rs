/// Reasons a candidate schema document is refused by the schema editor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("Schema cannot be empty.")]
    Empty,
    #[error("Invalid {format}: {message}")]
    Parse { format: String, message: String },
    #[error("Missing required property: \"{property}\"")]
    MissingProperty { property: &'static str },
    #[error("Conditional field \"{field}\" references non-existent field \"{target}\"")]
    DanglingConditionalReference {
        /// `promptType` of the schema, or the name of the object field for nested scopes.
        scope: String,
        field: String,
        target: String,
    },
    #[error("Malformed schema at {location}: {message}")]
    Malformed { location: String, message: String },
}

impl SchemaError {
    pub(crate) fn malformed(pointer: &str, message: impl Into<String>) -> Self {
        let location = if pointer.is_empty() {
            "<root>".to_string()
        } else {
            pointer.to_string()
        };
        SchemaError::Malformed {
            location,
            message: message.into(),
        }
    }
}
