use serde_json::{Map, Value};

use crate::domain::{FieldDefinition, FieldKind, Schema};

use super::{
    error::{FieldIssue, SubmitError},
    field::FieldState,
    path::FieldPath,
    state::FormState,
    validation::validate_one,
};

/// Walks `schema` over the form, collecting and checking every value.
///
/// Hidden fields are collected and checked like visible ones. Object fields
/// are collected one level deep; deeper objects are skipped. On failure each
/// failing field carries its inline error and nothing is returned.
pub fn collect_values(
    state: &mut FormState,
    schema: &Schema,
) -> Result<Map<String, Value>, SubmitError> {
    let mut data = Map::new();
    let mut issues = Vec::new();

    for (name, definition) in &schema.fields {
        let path = FieldPath::root().child(name.as_str());
        match &definition.kind {
            FieldKind::Object { fields } => {
                let mut nested = Map::new();
                for (nested_name, nested_definition) in fields {
                    if nested_definition.kind.is_object() {
                        continue;
                    }
                    let nested_path = path.child(nested_name.as_str());
                    if let Some(field) = state.field(&nested_path) {
                        nested.insert(nested_name.clone(), field.collect());
                        check(field, nested_definition, &mut issues);
                    }
                }
                data.insert(name.clone(), Value::Object(nested));
            }
            _ => {
                if let Some(field) = state.field(&path) {
                    data.insert(name.clone(), field.collect());
                    check(field, definition, &mut issues);
                }
            }
        }
    }

    state.clear_errors();
    if issues.is_empty() {
        return Ok(data);
    }
    for issue in &issues {
        state.set_error(&issue.path, issue.error.to_string());
    }
    tracing::debug!(issues = issues.len(), "submission blocked by validation");
    Err(SubmitError::Validation(issues))
}

fn check(field: &FieldState, definition: &FieldDefinition, issues: &mut Vec<FieldIssue>) {
    if let Err(error) = validate_one(&field.control, definition, &field.label) {
        issues.push(FieldIssue {
            path: field.path.clone(),
            error,
        });
    }
}
