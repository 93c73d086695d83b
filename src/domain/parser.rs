use serde_json::Value;

use crate::schema::check_document_shape;

use super::{error::SchemaError, schema::Schema, validator::validate_schema};

const REQUIRED_PROPERTIES: [&str; 3] = ["promptType", "schemaVersion", "fields"];

/// Gate for raw schema documents coming out of the schema editor.
///
/// Top-level properties are checked before anything else, then the document
/// shape, then conditional references.
pub fn parse_schema_document(raw: &Value) -> Result<Schema, SchemaError> {
    let Some(object) = raw.as_object() else {
        return Err(SchemaError::malformed("", "schema must be a JSON object"));
    };
    for property in REQUIRED_PROPERTIES {
        if !object.contains_key(property) {
            return Err(SchemaError::MissingProperty { property });
        }
    }

    check_document_shape(raw)?;

    let schema: Schema = serde_json::from_value(raw.clone())
        .map_err(|err| SchemaError::malformed("", err.to_string()))?;
    validate_schema(&schema)?;
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_is_reported_before_other_checks() {
        let raw = json!({
            "promptType": "Text",
            "schemaVersion": 3,
        });
        assert_eq!(
            parse_schema_document(&raw),
            Err(SchemaError::MissingProperty { property: "fields" })
        );
    }

    #[test]
    fn properties_are_checked_in_order() {
        let raw = json!({"fields": {}});
        assert_eq!(
            parse_schema_document(&raw),
            Err(SchemaError::MissingProperty {
                property: "promptType"
            })
        );
    }

    #[test]
    fn non_objects_are_malformed() {
        assert!(matches!(
            parse_schema_document(&json!(["Text"])),
            Err(SchemaError::Malformed { .. })
        ));
    }

    #[test]
    fn dangling_conditional_is_rejected() {
        let raw = json!({
            "promptType": "Text",
            "schemaVersion": "1.0",
            "fields": {
                "languageOther": {
                    "type": "string",
                    "conditional": {"field": "language", "value": "Other"}
                }
            }
        });
        let err = parse_schema_document(&raw).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::DanglingConditionalReference { .. }
        ));
        assert_eq!(
            err.to_string(),
            "Conditional field \"languageOther\" references non-existent field \"language\""
        );
    }

    #[test]
    fn decodes_valid_documents() {
        let raw = json!({
            "promptType": "Text",
            "schemaVersion": "1.0",
            "fields": {
                "title": {"type": "string", "label": "Title", "required": true}
            }
        });
        let schema = parse_schema_document(&raw).unwrap();
        assert_eq!(schema.prompt_type, "Text");
        assert!(schema.fields["title"].required);
    }
}
