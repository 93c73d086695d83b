use indexmap::IndexMap;
use serde_json::json;

use crate::domain::{DefaultValue, FieldDefinition, FieldKind, Schema, ShowWhen};

pub const BUILTIN_SCHEMA_VERSION: &str = "1.0";

/// Schemas seeded into an empty store: "Text" and "Code".
pub fn builtin_schemas() -> Vec<Schema> {
    vec![text_schema(), code_schema()]
}

pub fn text_schema() -> Schema {
    let mut fields = common_fields();
    fields.insert(
        "content".to_string(),
        FieldDefinition::new(FieldKind::TextArea)
            .with_label("Content")
            .required()
            .with_placeholder("Enter prompt content"),
    );
    push_language_fields(
        &mut fields,
        "Language",
        &["English", "Spanish", "French", "Other"],
        "Enter the language",
    );
    Schema {
        prompt_type: "Text".to_string(),
        schema_version: BUILTIN_SCHEMA_VERSION.to_string(),
        fields,
    }
}

pub fn code_schema() -> Schema {
    let mut fields = common_fields();
    fields.insert(
        "content".to_string(),
        FieldDefinition::new(FieldKind::Code)
            .with_label("Code Snippet")
            .required()
            .with_placeholder("Enter code here"),
    );
    push_language_fields(
        &mut fields,
        "Programming Language",
        &["JavaScript", "Python", "Java", "C++", "Other"],
        "Enter the programming language",
    );
    fields.insert(
        "executable".to_string(),
        FieldDefinition::new(FieldKind::Boolean)
            .with_label("Executable")
            .with_default(DefaultValue::Literal(json!(false))),
    );
    Schema {
        prompt_type: "Code".to_string(),
        schema_version: BUILTIN_SCHEMA_VERSION.to_string(),
        fields,
    }
}

fn common_fields() -> IndexMap<String, FieldDefinition> {
    let mut fields = IndexMap::new();
    fields.insert(
        "title".to_string(),
        FieldDefinition::new(FieldKind::Text)
            .with_label("Title")
            .required()
            .with_placeholder("Enter prompt title"),
    );
    fields.insert(
        "description".to_string(),
        FieldDefinition::new(FieldKind::TextArea)
            .with_label("Description")
            .with_placeholder("Enter prompt description"),
    );
    fields.insert(
        "tags".to_string(),
        FieldDefinition::new(FieldKind::ArrayOfString)
            .with_label("Tags")
            .with_placeholder("Enter tags separated by commas"),
    );
    fields.insert(
        "createdAt".to_string(),
        FieldDefinition::new(FieldKind::Date)
            .with_label("Created At")
            .required()
            .with_default(DefaultValue::CurrentDate),
    );
    fields
}

fn push_language_fields(
    fields: &mut IndexMap<String, FieldDefinition>,
    label: &str,
    options: &[&str],
    other_placeholder: &str,
) {
    fields.insert(
        "language".to_string(),
        FieldDefinition::new(FieldKind::Select {
            options: options.iter().map(|option| option.to_string()).collect(),
        })
        .with_label(label)
        .required(),
    );
    fields.insert(
        "languageOther".to_string(),
        FieldDefinition::new(FieldKind::Text)
            .with_label("Specify Language")
            .required()
            .with_placeholder(other_placeholder)
            .shown_when("language", ShowWhen::Equals(json!("Other"))),
    );
}
