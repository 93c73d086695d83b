use indexmap::IndexMap;
use serde_json::json;

use crate::{
    app::{missing_required_fields, reconcile},
    domain::{FieldDefinition, FieldKind, Record},
    schema::text_schema,
    store::{MemoryStore, RecordStore},
    tests::fixtures::{data, schema},
};

#[tokio::test]
async fn newly_required_field_is_reported_per_record() {
    let store = MemoryStore::new();
    store.add_schema(text_schema()).await.unwrap();
    let with = Record::new(
        "Text",
        data(json!({
            "title": "Has",
            "description": "yes",
            "content": "body",
            "language": "English",
            "languageOther": "n/a",
            "createdAt": "2024-05-17"
        })),
    );
    let without = Record::new("Text", data(json!({"description": ""})));
    let other_type = Record::new("Code", data(json!({"title": "Ignored"})));
    for record in [&with, &without, &other_type] {
        store.add_record(record.clone()).await.unwrap();
    }

    let mut updated = text_schema();
    updated.fields["description"].required = true;
    store.put_schema(updated).await.unwrap();

    let issues = reconcile(&store, "Text").await.unwrap();
    let flagged: Vec<_> = issues.iter().map(|issue| issue.record_id.as_str()).collect();
    assert!(flagged.contains(&without.id.as_str()));
    assert!(!flagged.contains(&with.id.as_str()));

    let entry = issues
        .iter()
        .find(|issue| issue.record_id == without.id)
        .unwrap();
    assert_eq!(entry.title, "Untitled Prompt");
    assert!(entry.missing.contains(&"description".to_string()));
    assert!(entry.missing.contains(&"title".to_string()));
}

#[tokio::test]
async fn unknown_type_reconciles_to_nothing() {
    let store = MemoryStore::new();
    assert!(reconcile(&store, "Nope").await.unwrap().is_empty());
}

#[test]
fn one_missing_nested_child_yields_one_dotted_path() {
    let mut nested = IndexMap::new();
    nested.insert("street".to_string(), FieldDefinition::new(FieldKind::Text).required());
    nested.insert("city".to_string(), FieldDefinition::new(FieldKind::Text).required());
    let schema = schema(
        "Place",
        vec![(
            "address",
            FieldDefinition::new(FieldKind::Object { fields: nested }).required(),
        )],
    );

    let missing = missing_required_fields(&schema, &data(json!({"address": {"street": "Main"}})));
    assert_eq!(missing, ["address.city"]);
}

#[test]
fn required_booleans_never_go_missing() {
    let schema = schema(
        "Flag",
        vec![("enabled", FieldDefinition::new(FieldKind::Boolean).required())],
    );
    assert!(missing_required_fields(&schema, &data(json!({}))).is_empty());
}
