use serde_json::Value;

use crate::domain::FieldKind;

use super::convert::{array_to_string, is_truthy, split_list, value_to_string};

pub const TEXTAREA_ROWS: u8 = 4;
pub const CODE_ROWS: u8 = 6;

/// Editable control backing one rendered field.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    TextBox(String),
    TextArea { text: String, rows: u8 },
    CodeArea { text: String, rows: u8 },
    Dropdown {
        options: Vec<String>,
        selected: Option<usize>,
    },
    DatePicker(String),
    UrlBox(String),
    Checkbox(bool),
    /// Comma-separated entries of an `array` field.
    ListBox(String),
}

impl Control {
    /// Object fields have no control of their own.
    pub fn for_kind(kind: &FieldKind) -> Option<Self> {
        let control = match kind {
            FieldKind::Text => Control::TextBox(String::new()),
            FieldKind::TextArea => Control::TextArea {
                text: String::new(),
                rows: TEXTAREA_ROWS,
            },
            FieldKind::Code => Control::CodeArea {
                text: String::new(),
                rows: CODE_ROWS,
            },
            FieldKind::Select { options } => Control::Dropdown {
                options: options.clone(),
                selected: if options.is_empty() { None } else { Some(0) },
            },
            FieldKind::Date => Control::DatePicker(String::new()),
            FieldKind::Url => Control::UrlBox(String::new()),
            FieldKind::Boolean => Control::Checkbox(false),
            FieldKind::ArrayOfString => Control::ListBox(String::new()),
            FieldKind::Object { .. } => return None,
        };
        Some(control)
    }

    pub fn widget(&self) -> &'static str {
        match self {
            Control::TextBox(_) => "text",
            Control::TextArea { .. } => "textarea",
            Control::CodeArea { .. } => "code",
            Control::Dropdown { .. } => "dropdown",
            Control::DatePicker(_) => "date",
            Control::UrlBox(_) => "url",
            Control::Checkbox(_) => "checkbox",
            Control::ListBox(_) => "list",
        }
    }

    /// What the control reports as its current value, untrimmed.
    ///
    /// Checkboxes report `"true"` or `"false"`.
    pub fn live_value(&self) -> String {
        match self {
            Control::TextBox(text)
            | Control::DatePicker(text)
            | Control::UrlBox(text)
            | Control::ListBox(text)
            | Control::TextArea { text, .. }
            | Control::CodeArea { text, .. } => text.clone(),
            Control::Dropdown { options, selected } => selected
                .and_then(|index| options.get(index))
                .cloned()
                .unwrap_or_default(),
            Control::Checkbox(checked) => checked.to_string(),
        }
    }

    pub fn is_checked(&self) -> Option<bool> {
        match self {
            Control::Checkbox(checked) => Some(*checked),
            _ => None,
        }
    }

    /// Value as it is stored in a record.
    pub fn collect(&self) -> Value {
        match self {
            Control::Checkbox(checked) => Value::Bool(*checked),
            Control::ListBox(text) => Value::Array(split_list(text)),
            other => Value::String(other.live_value().trim().to_string()),
        }
    }

    /// Pre-populates the control from a stored or default value.
    pub(crate) fn seed(&mut self, value: &Value) {
        match self {
            Control::Checkbox(checked) => *checked = is_truthy(value),
            Control::ListBox(text) => {
                *text = match value {
                    Value::Array(items) => array_to_string(items),
                    other => value_to_string(other),
                }
            }
            Control::Dropdown { options, selected } => {
                let wanted = value_to_string(value);
                *selected = options.iter().position(|option| *option == wanted);
            }
            _ => {
                if let Some(text) = self.text_mut() {
                    *text = value_to_string(value);
                }
            }
        }
    }

    pub(crate) fn set_text(&mut self, raw: &str) -> Result<(), String> {
        match self {
            Control::Checkbox(checked) => {
                *checked = parse_flag(raw)?;
                Ok(())
            }
            Control::Dropdown { options, selected } => {
                if raw.is_empty() {
                    *selected = None;
                    return Ok(());
                }
                match options.iter().position(|option| option == raw) {
                    Some(index) => {
                        *selected = Some(index);
                        Ok(())
                    }
                    None => Err(format!(
                        "`{raw}` is not one of: {}",
                        options.join(", ")
                    )),
                }
            }
            _ => {
                if let Some(text) = self.text_mut() {
                    *text = raw.to_string();
                }
                Ok(())
            }
        }
    }

    pub(crate) fn set_checked(&mut self, flag: bool) -> Result<(), String> {
        match self {
            Control::Checkbox(checked) => {
                *checked = flag;
                Ok(())
            }
            other => Err(format!("a {} control cannot be checked", other.widget())),
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self {
            Control::TextBox(text)
            | Control::DatePicker(text)
            | Control::UrlBox(text)
            | Control::ListBox(text)
            | Control::TextArea { text, .. }
            | Control::CodeArea { text, .. } => Some(text),
            Control::Dropdown { .. } | Control::Checkbox(_) => None,
        }
    }
}

fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" | "" => Ok(false),
        other => Err(format!("expected true or false, got `{other}`")),
    }
}
