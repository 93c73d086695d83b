mod control;
mod convert;

use serde_json::Value;

use crate::domain::FieldDefinition;

use super::path::FieldPath;

pub use control::{CODE_ROWS, Control, TEXTAREA_ROWS};
pub use convert::is_truthy;
pub(crate) use convert::split_list;

/// One rendered, labelled control plus its edit state.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub path: FieldPath,
    pub label: String,
    pub definition: FieldDefinition,
    pub control: Control,
    pub visible: bool,
    pub dirty: bool,
    pub error: Option<String>,
}

impl FieldState {
    pub fn name(&self) -> &str {
        self.path.name()
    }

    pub fn is_required(&self) -> bool {
        self.definition.required
    }

    pub fn is_disabled(&self) -> bool {
        self.definition.disabled
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.definition.placeholder.as_deref()
    }

    /// Label as shown next to the control, marked when the field is required.
    pub fn caption(&self) -> String {
        if self.is_required() {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        }
    }

    pub fn live_value(&self) -> String {
        self.control.live_value()
    }

    pub fn collect(&self) -> Value {
        self.control.collect()
    }

    pub fn after_edit(&mut self) {
        self.dirty = true;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
