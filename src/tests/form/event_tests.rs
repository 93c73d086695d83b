use serde_json::json;

use crate::{
    domain::{FieldDefinition, FieldKind, ShowWhen},
    form::{FieldEvent, FieldInputError, FieldPath, FormSession, VisibilityChange, build_form},
    tests::fixtures::{contact_schema, ctx, language_schema, schema},
};

#[test]
fn changing_the_target_toggles_the_dependent() {
    let (mut form, _) = build_form(&language_schema(), FormSession::create("Text"), &ctx());
    let other = FieldPath::from("languageOther");
    assert!(!form.field(&other).unwrap().visible);

    let update = form
        .dispatch(FieldEvent::change("language", "Other"))
        .unwrap();
    assert_eq!(
        update.visibility,
        vec![VisibilityChange {
            path: other.clone(),
            visible: true
        }]
    );
    form.dispatch(FieldEvent::input("languageOther", "Klingon")).unwrap();

    form.dispatch(FieldEvent::change("language", "English")).unwrap();
    let field = form.field(&other).unwrap();
    assert!(!field.visible);
    assert_eq!(field.live_value(), "Klingon", "hidden fields keep their value");
}

#[test]
fn value_sets_match_by_membership() {
    let schema = schema(
        "Text",
        vec![
            (
                "mode",
                FieldDefinition::new(FieldKind::Select {
                    options: vec!["A".into(), "B".into(), "C".into()],
                }),
            ),
            (
                "extra",
                FieldDefinition::new(FieldKind::Text)
                    .shown_when("mode", ShowWhen::AnyOf(vec![json!("B"), json!("C")])),
            ),
        ],
    );
    let (mut form, _) = build_form(&schema, FormSession::create("Text"), &ctx());
    let extra = FieldPath::from("extra");
    assert!(!form.field(&extra).unwrap().visible);
    form.dispatch(FieldEvent::change("mode", "C")).unwrap();
    assert!(form.field(&extra).unwrap().visible);
    form.dispatch(FieldEvent::input("mode", "B")).unwrap();
    assert!(form.field(&extra).unwrap().visible);
    form.dispatch(FieldEvent::change("mode", "A")).unwrap();
    assert!(!form.field(&extra).unwrap().visible);
}

#[test]
fn checkbox_targets_compare_as_true_or_false() {
    let schema = schema(
        "Text",
        vec![
            ("public", FieldDefinition::new(FieldKind::Boolean)),
            (
                "audience",
                FieldDefinition::new(FieldKind::Text)
                    .shown_when("public", ShowWhen::Equals(json!(true))),
            ),
        ],
    );
    let (mut form, _) = build_form(&schema, FormSession::create("Text"), &ctx());
    let audience = FieldPath::from("audience");
    assert!(!form.field(&audience).unwrap().visible);
    form.dispatch(FieldEvent::change("public", true)).unwrap();
    assert!(form.field(&audience).unwrap().visible);
}

#[test]
fn input_events_toggle_inline_errors() {
    let (mut form, _) = build_form(&language_schema(), FormSession::create("Text"), &ctx());

    let update = form.dispatch(FieldEvent::input("title", "  ")).unwrap();
    assert!(update.validated);
    assert_eq!(update.error.as_deref(), Some("Title is required."));
    assert_eq!(form.error_count(), 1);

    let update = form.dispatch(FieldEvent::input("title", "Hello")).unwrap();
    assert_eq!(update.error, None);
    assert_eq!(form.error_count(), 0);
    assert!(form.is_dirty());
}

#[test]
fn change_events_only_check_select_fields() {
    let (mut form, _) = build_form(&language_schema(), FormSession::create("Text"), &ctx());

    let update = form.dispatch(FieldEvent::change("title", "")).unwrap();
    assert!(!update.validated);
    assert_eq!(update.error, None);

    let update = form.dispatch(FieldEvent::change("language", "")).unwrap();
    assert!(update.validated);
    assert_eq!(update.error.as_deref(), Some("Language is required."));
}

#[test]
fn nested_fields_are_checked_live() {
    let (mut form, _) = build_form(&contact_schema(), FormSession::create("Contact"), &ctx());
    let update = form
        .dispatch(FieldEvent::input("owner.email", "not-an-email"))
        .unwrap();
    assert_eq!(update.error.as_deref(), Some("Email must be a valid email address."));

    let update = form.dispatch(FieldEvent::input("homepage", "no spaces allowed")).unwrap();
    assert_eq!(update.error.as_deref(), Some("Homepage must be a valid URL."));
}

#[test]
fn rejected_events_leave_the_form_untouched() {
    let disabled = schema(
        "Text",
        vec![
            ("locked", FieldDefinition::new(FieldKind::Text).disabled()),
            (
                "pick",
                FieldDefinition::new(FieldKind::Select {
                    options: vec!["A".into()],
                }),
            ),
        ],
    );
    let (mut form, _) = build_form(&disabled, FormSession::create("Text"), &ctx());

    assert!(matches!(
        form.dispatch(FieldEvent::input("missing", "x")),
        Err(FieldInputError::UnknownField { .. })
    ));
    assert!(matches!(
        form.dispatch(FieldEvent::input("locked", "x")),
        Err(FieldInputError::Disabled { .. })
    ));
    assert!(matches!(
        form.dispatch(FieldEvent::change("pick", "Z")),
        Err(FieldInputError::Rejected { .. })
    ));
    assert!(!form.is_dirty());
}
