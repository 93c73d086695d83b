use serde_json::json;

use crate::{
    app::missing_required_fields,
    domain::{FieldDefinition, FieldKind, Record},
    form::{FieldError, FieldEvent, FieldPath, FormSession, SubmitError, build_form, collect_values},
    schema::text_schema,
    tests::fixtures::{contact_schema, ctx, data, language_schema, schema},
};

#[test]
fn hidden_empty_required_field_blocks_submission() {
    let schema = language_schema();
    let (mut form, _) = build_form(&schema, FormSession::create("Text"), &ctx());
    form.dispatch(FieldEvent::input("title", "Greeting")).unwrap();
    form.dispatch(FieldEvent::change("language", "English")).unwrap();
    assert!(!form.field(&FieldPath::from("languageOther")).unwrap().visible);

    let err = collect_values(&mut form, &schema).unwrap_err();
    let SubmitError::Validation(issues) = &err;
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].path, FieldPath::from("languageOther"));
    assert_eq!(
        issues[0].error,
        FieldError::Required {
            label: "Specify Language".into()
        }
    );
    assert!(err.to_string().contains("Specify Language is required."));
    assert_eq!(
        form.field(&FieldPath::from("languageOther")).unwrap().error.as_deref(),
        Some("Specify Language is required.")
    );
}

#[test]
fn hidden_fields_are_still_collected() {
    let schema = language_schema();
    let (mut form, _) = build_form(&schema, FormSession::create("Text"), &ctx());
    form.dispatch(FieldEvent::input("title", "Greeting")).unwrap();
    form.dispatch(FieldEvent::change("language", "Other")).unwrap();
    form.dispatch(FieldEvent::input("languageOther", " Klingon ")).unwrap();
    form.dispatch(FieldEvent::change("language", "English")).unwrap();

    let collected = collect_values(&mut form, &schema).unwrap();
    assert_eq!(
        collected,
        data(json!({"title": "Greeting", "language": "English", "languageOther": "Klingon"}))
    );
}

#[test]
fn existing_data_round_trips() {
    let stored = data(json!({
        "title": "Ada",
        "notes": "line one\nline two",
        "snippet": "fn main() {}",
        "kind": "Team",
        "since": "2020-01-01",
        "homepage": "https://example.com",
        "active": true,
        "tags": ["x", " y ", ""],
        "owner": {"name": "Ada", "email": "ada@example.com"}
    }));
    let schema = contact_schema();
    let record = Record::new("Contact", stored.clone());
    let (mut form, _) = build_form(&schema, FormSession::edit(record), &ctx());

    let collected = collect_values(&mut form, &schema).unwrap();
    for key in ["title", "notes", "snippet", "kind", "since", "homepage", "owner"] {
        assert_eq!(collected[key], stored[key], "{key}");
    }
    assert_eq!(collected["active"], json!(true));
    assert_eq!(collected["tags"], json!(["x", "y"]));
}

#[test]
fn failures_are_aggregated_across_levels() {
    let schema = contact_schema();
    let (mut form, _) = build_form(&schema, FormSession::create("Contact"), &ctx());
    form.dispatch(FieldEvent::input("homepage", "bad url")).unwrap();
    form.dispatch(FieldEvent::input("owner.name", "Ada")).unwrap();
    form.dispatch(FieldEvent::input("owner.email", "ada@")).unwrap();

    let err = collect_values(&mut form, &schema).unwrap_err();
    let paths: Vec<_> = err.issues().iter().map(|issue| issue.path.to_string()).collect();
    assert_eq!(paths, ["title", "homepage", "owner.email"]);
    assert_eq!(form.error_count(), 3);
}

#[test]
fn deeper_objects_are_not_collected() {
    let mut inner = indexmap::IndexMap::new();
    inner.insert(
        "code".to_string(),
        FieldDefinition::new(FieldKind::Text).required(),
    );
    let mut middle = indexmap::IndexMap::new();
    middle.insert("label".to_string(), FieldDefinition::new(FieldKind::Text));
    middle.insert(
        "inner".to_string(),
        FieldDefinition::new(FieldKind::Object { fields: inner }),
    );
    let schema = schema(
        "Nested",
        vec![("outer", FieldDefinition::new(FieldKind::Object { fields: middle }))],
    );
    let (mut form, _) = build_form(&schema, FormSession::create("Nested"), &ctx());
    assert!(form.field(&FieldPath::from("outer.inner.code")).is_some());

    let collected = collect_values(&mut form, &schema).unwrap();
    assert_eq!(collected, data(json!({"outer": {"label": ""}})));
}

#[test]
fn successful_submission_clears_previous_errors() {
    let schema = text_schema();
    let (mut form, _) = build_form(&schema, FormSession::create("Text"), &ctx());
    assert!(collect_values(&mut form, &schema).is_err());
    assert!(form.error_count() > 0);

    form.dispatch(FieldEvent::input("title", "Hi")).unwrap();
    form.dispatch(FieldEvent::input("content", "Body")).unwrap();
    form.dispatch(FieldEvent::input("languageOther", "n/a")).unwrap();
    let collected = collect_values(&mut form, &schema).unwrap();
    assert_eq!(form.error_count(), 0);
    assert_eq!(collected["createdAt"], json!("2024-05-17"));
    assert_eq!(collected["tags"], json!([]));
}

#[test]
fn required_list_agrees_with_reconciliation() {
    let schema = schema(
        "Tagged",
        vec![(
            "tags",
            FieldDefinition::new(FieldKind::ArrayOfString)
                .with_label("Tags")
                .required(),
        )],
    );
    let (mut form, _) = build_form(&schema, FormSession::create("Tagged"), &ctx());
    form.dispatch(FieldEvent::input("tags", " , ,")).unwrap();
    let SubmitError::Validation(issues) = collect_values(&mut form, &schema).unwrap_err();
    assert_eq!(issues[0].path, FieldPath::from("tags"));
    assert_eq!(
        issues[0].error,
        FieldError::Required {
            label: "Tags".into()
        }
    );

    form.dispatch(FieldEvent::input("tags", " , rust,")).unwrap();
    let collected = collect_values(&mut form, &schema).unwrap();
    assert_eq!(collected["tags"], json!(["rust"]));
    assert!(missing_required_fields(&schema, &collected).is_empty());
}
