use indexmap::IndexMap;

use super::{
    error::SchemaError,
    schema::{FieldDefinition, FieldKind, Schema},
};

/// Checks conditional references of a decoded schema.
///
/// Object fields are validated as standalone schemas named after the field,
/// so a conditional may only point at a sibling in its own nesting level.
/// The first failure wins.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaError> {
    validate_scope(&schema.prompt_type, &schema.fields)
}

fn validate_scope(
    scope: &str,
    fields: &IndexMap<String, FieldDefinition>,
) -> Result<(), SchemaError> {
    for (name, field) in fields {
        if let Some(conditional) = &field.conditional
            && !fields.contains_key(&conditional.on_field)
        {
            return Err(SchemaError::DanglingConditionalReference {
                scope: scope.to_string(),
                field: name.clone(),
                target: conditional.on_field.clone(),
            });
        }

        if let FieldKind::Object { fields: nested } = &field.kind {
            validate_scope(name, nested)?;
        }
    }
    Ok(())
}
