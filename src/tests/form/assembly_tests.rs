use serde_json::json;

use crate::{
    domain::{DefaultValue, FieldDefinition, FieldKind, Record, ShowWhen},
    form::{Control, FieldPath, FormHeading, FormSession, build_form},
    schema::{code_schema, text_schema},
    tests::fixtures::{contact_schema, ctx, data, schema},
};

#[test]
fn create_form_renders_fields_in_declared_order() {
    let schema = text_schema();
    let (form, session) = build_form(&schema, FormSession::create("Text"), &ctx());

    assert_eq!(form.heading(), FormHeading::Create);
    assert_eq!(form.heading().to_string(), "Create Prompt");
    assert!(!session.is_editing());

    let names: Vec<_> = form.fields().iter().map(|field| field.name().to_string()).collect();
    let declared: Vec<_> = schema.fields.keys().cloned().collect();
    assert_eq!(names, declared);
}

#[test]
fn create_form_applies_defaults() {
    let (form, _) = build_form(&code_schema(), FormSession::create("Code"), &ctx());

    let created = form.field(&FieldPath::from("createdAt")).unwrap();
    assert_eq!(created.live_value(), "2024-05-17");
    let language = form.field(&FieldPath::from("language")).unwrap();
    assert_eq!(language.live_value(), "JavaScript");
    let executable = form.field(&FieldPath::from("executable")).unwrap();
    assert_eq!(executable.control, Control::Checkbox(false));
    assert!(!form.field(&FieldPath::from("languageOther")).unwrap().visible);
}

#[test]
fn edit_form_is_seeded_from_the_record() {
    let record = Record::new(
        "Text",
        data(json!({
            "title": "Greeting",
            "tags": ["a", "b"],
            "language": "Other",
            "languageOther": "Klingon",
            "createdAt": null
        })),
    );
    let (form, session) = build_form(&text_schema(), FormSession::edit(record.clone()), &ctx());

    assert_eq!(form.heading().title(), "Edit Prompt");
    assert_eq!(session.record_id(), Some(record.id.as_str()));
    assert_eq!(form.field(&FieldPath::from("title")).unwrap().live_value(), "Greeting");
    assert_eq!(form.field(&FieldPath::from("tags")).unwrap().live_value(), "a, b");
    assert!(form.field(&FieldPath::from("languageOther")).unwrap().visible);
    // null counts as absent, so the default applies
    assert_eq!(
        form.field(&FieldPath::from("createdAt")).unwrap().live_value(),
        "2024-05-17"
    );
}

#[test]
fn visibility_does_not_depend_on_declaration_order() {
    let schema = schema(
        "Text",
        vec![
            (
                "detail",
                FieldDefinition::new(FieldKind::Text)
                    .shown_when("mode", ShowWhen::Equals(json!("Custom"))),
            ),
            (
                "mode",
                FieldDefinition::new(FieldKind::Select {
                    options: vec!["Custom".into(), "Plain".into()],
                }),
            ),
        ],
    );
    let (form, _) = build_form(&schema, FormSession::create("Text"), &ctx());
    assert!(form.field(&FieldPath::from("detail")).unwrap().visible);
}

#[test]
fn object_fields_render_as_groups() {
    let (form, _) = build_form(&contact_schema(), FormSession::create("Contact"), &ctx());

    let groups = form.root().groups();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].legend, "Owner");
    assert_eq!(groups[0].depth(), 1);
    assert!(form.field(&FieldPath::from("owner")).is_none());
    let email = form.field(&FieldPath::from("owner.email")).unwrap();
    assert_eq!(email.caption(), "Email *");
}

#[test]
fn each_kind_gets_its_control() {
    let (form, _) = build_form(&contact_schema(), FormSession::create("Contact"), &ctx());
    let widgets: Vec<_> = form
        .fields()
        .iter()
        .map(|field| field.control.widget())
        .collect();
    assert_eq!(
        widgets,
        ["text", "textarea", "code", "dropdown", "date", "url", "checkbox", "list", "text", "text"]
    );
    match &form.field(&FieldPath::from("notes")).unwrap().control {
        Control::TextArea { rows, .. } => assert_eq!(*rows, 4),
        other => panic!("unexpected control {other:?}"),
    }
    match &form.field(&FieldPath::from("snippet")).unwrap().control {
        Control::CodeArea { rows, .. } => assert_eq!(*rows, 6),
        other => panic!("unexpected control {other:?}"),
    }
}

#[test]
fn locale_format_applies_to_non_date_fields() {
    let schema = schema(
        "Text",
        vec![(
            "stamp",
            FieldDefinition::new(FieldKind::Text).with_default(DefaultValue::CurrentDate),
        )],
    );
    let (form, _) = build_form(
        &schema,
        FormSession::create("Text"),
        &ctx().with_locale_date_format("%d.%m.%Y"),
    );
    assert_eq!(form.field(&FieldPath::from("stamp")).unwrap().live_value(), "17.05.2024");
}

#[test]
fn live_validator_watches_one_nested_level() {
    let (form, _) = build_form(&contact_schema(), FormSession::create("Contact"), &ctx());
    let watched: Vec<_> = form
        .validator()
        .watched_paths()
        .map(ToString::to_string)
        .collect();
    assert!(watched.contains(&"title".to_string()));
    assert!(watched.contains(&"owner.email".to_string()));
    assert!(!watched.contains(&"active".to_string()));
    assert!(!watched.contains(&"owner".to_string()));
}
