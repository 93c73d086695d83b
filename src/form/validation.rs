use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{FieldDefinition, FieldKind, Schema};

use super::{
    error::FieldError,
    field::{Control, split_list},
    path::FieldPath,
};

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(https?://)?((([a-z\d]([a-z\d-]*[a-z\d])*)\.?)+[a-z]{2,}|((\d{1,3}\.){3}\d{1,3}))(:\d+)?(/[-a-z\d%_.~+]*)*(\?[;&a-z\d%_.~+=-]*)?(#[-a-z\d_]*)?$",
    )
    .expect("URL pattern compiles")
});

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Checks a control's live value against its definition.
///
/// Order: required, then URL shape, then email shape. The first failure wins.
/// List text counts as empty when it splits into no entries.
pub fn validate_one(
    control: &Control,
    definition: &FieldDefinition,
    label: &str,
) -> Result<(), FieldError> {
    if let Control::ListBox(text) = control
        && definition.required
        && split_list(text).is_empty()
    {
        return Err(FieldError::Required {
            label: label.to_string(),
        });
    }
    validate_text(&control.live_value(), definition, label)
}

pub fn validate_text(raw: &str, definition: &FieldDefinition, label: &str) -> Result<(), FieldError> {
    let value = raw.trim();
    if definition.required && !definition.kind.is_boolean() && value.is_empty() {
        return Err(FieldError::Required {
            label: label.to_string(),
        });
    }
    if matches!(definition.kind, FieldKind::Url) && !value.is_empty() && !URL_PATTERN.is_match(value)
    {
        return Err(FieldError::InvalidUrl {
            label: label.to_string(),
        });
    }
    if definition.is_email() && !value.is_empty() && !EMAIL_PATTERN.is_match(value) {
        return Err(FieldError::InvalidEmail {
            label: label.to_string(),
        });
    }
    Ok(())
}

/// Which kind of edit event reached a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Input,
    Change,
}

#[derive(Debug, Clone, PartialEq)]
struct Watch {
    path: FieldPath,
    label: String,
    definition: FieldDefinition,
}

/// Per-field checks wired to a rendered form.
///
/// Watches top-level fields and one level of object fields, skipping object
/// and boolean kinds. Every `Input` re-runs the check; `Change` only does
/// for select fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveValidator {
    watches: Vec<Watch>,
}

impl LiveValidator {
    pub fn attach(schema: &Schema) -> Self {
        let mut watches = Vec::new();
        for (name, definition) in &schema.fields {
            let path = FieldPath::root().child(name.as_str());
            match definition.kind.nested_fields() {
                Some(nested) => {
                    for (nested_name, nested_definition) in nested {
                        push_watch(
                            &mut watches,
                            path.child(nested_name.as_str()),
                            nested_name,
                            nested_definition,
                        );
                    }
                }
                None => push_watch(&mut watches, path, name, definition),
            }
        }
        Self { watches }
    }

    pub fn watches(&self, path: &FieldPath) -> bool {
        self.watches.iter().any(|watch| watch.path == *path)
    }

    pub fn watched_paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.watches.iter().map(|watch| &watch.path)
    }

    /// Re-checks the control at `path` if this trigger applies to it.
    ///
    /// Returns `None` when the field is not re-checked.
    pub fn on_event(
        &self,
        path: &FieldPath,
        trigger: Trigger,
        control: &Control,
    ) -> Option<Result<(), FieldError>> {
        let watch = self.watches.iter().find(|watch| watch.path == *path)?;
        let applies = match trigger {
            Trigger::Input => true,
            Trigger::Change => matches!(watch.definition.kind, FieldKind::Select { .. }),
        };
        applies.then(|| validate_one(control, &watch.definition, &watch.label))
    }
}

fn push_watch(watches: &mut Vec<Watch>, path: FieldPath, name: &str, definition: &FieldDefinition) {
    if definition.kind.is_object() || definition.kind.is_boolean() {
        return;
    }
    watches.push(Watch {
        path,
        label: definition.display_label(name),
        definition: definition.clone(),
    });
}
