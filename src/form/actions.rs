use super::{path::FieldPath, state::VisibilityChange, validation::Trigger};

/// New value carried by an edit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditValue {
    Text(String),
    Checked(bool),
}

impl From<&str> for EditValue {
    fn from(text: &str) -> Self {
        EditValue::Text(text.to_string())
    }
}

impl From<String> for EditValue {
    fn from(text: String) -> Self {
        EditValue::Text(text)
    }
}

impl From<bool> for EditValue {
    fn from(flag: bool) -> Self {
        EditValue::Checked(flag)
    }
}

/// User edits delivered to the open form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// Keystroke-level edit.
    Input { path: FieldPath, value: EditValue },
    /// Committed edit (selection made, box toggled, focus left).
    Change { path: FieldPath, value: EditValue },
}

impl FieldEvent {
    pub fn input(path: impl Into<FieldPath>, value: impl Into<EditValue>) -> Self {
        FieldEvent::Input {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn change(path: impl Into<FieldPath>, value: impl Into<EditValue>) -> Self {
        FieldEvent::Change {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn path(&self) -> &FieldPath {
        match self {
            FieldEvent::Input { path, .. } | FieldEvent::Change { path, .. } => path,
        }
    }

    pub(crate) fn into_parts(self) -> (FieldPath, EditValue, Trigger) {
        match self {
            FieldEvent::Input { path, value } => (path, value, Trigger::Input),
            FieldEvent::Change { path, value } => (path, value, Trigger::Change),
        }
    }
}

/// What an applied event did to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    pub path: FieldPath,
    /// Whether the live validator re-checked the field.
    pub validated: bool,
    /// Inline error currently shown on the field.
    pub error: Option<String>,
    pub visibility: Vec<VisibilityChange>,
}
