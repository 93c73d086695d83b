use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentinel accepted in `default` that resolves to today's date at render time.
pub const CURRENT_DATE_SENTINEL: &str = "current_date";

/// A named, versioned definition of a prompt record's editable fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub prompt_type: String,
    pub schema_version: String,
    pub fields: IndexMap<String, FieldDefinition>,
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    TextArea,
    Select { options: Vec<String> },
    Date,
    Url,
    Code,
    Boolean,
    ArrayOfString,
    Object { fields: IndexMap<String, FieldDefinition> },
}

impl FieldKind {
    pub fn tag(&self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::TextArea => "textarea",
            FieldKind::Select { .. } => "select",
            FieldKind::Date => "date",
            FieldKind::Url => "url",
            FieldKind::Code => "code",
            FieldKind::Boolean => "boolean",
            FieldKind::ArrayOfString => "array",
            FieldKind::Object { .. } => "object",
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, FieldKind::Boolean)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, FieldKind::Object { .. })
    }

    pub fn nested_fields(&self) -> Option<&IndexMap<String, FieldDefinition>> {
        match self {
            FieldKind::Object { fields } => Some(fields),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    CurrentDate,
    Literal(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationRule {
    Email,
    /// Tags this version does not check; kept so stored schemas round-trip.
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShowWhen {
    Equals(Value),
    AnyOf(Vec<Value>),
}

impl ShowWhen {
    /// Compares the live value of the target control against the expected value(s).
    pub fn matches(&self, live: &str) -> bool {
        match self {
            ShowWhen::Equals(expected) => value_matches(expected, live),
            ShowWhen::AnyOf(candidates) => candidates
                .iter()
                .any(|candidate| value_matches(candidate, live)),
        }
    }
}

fn value_matches(expected: &Value, live: &str) -> bool {
    match expected {
        Value::String(text) => text == live,
        Value::Bool(flag) => flag.to_string() == live,
        Value::Number(num) => num.to_string() == live,
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub on_field: String,
    pub show_when: ShowWhen,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFieldDefinition", into = "RawFieldDefinition")]
pub struct FieldDefinition {
    pub kind: FieldKind,
    pub label: Option<String>,
    pub required: bool,
    pub placeholder: Option<String>,
    pub default: Option<DefaultValue>,
    pub disabled: bool,
    pub validation: Option<ValidationRule>,
    pub conditional: Option<Conditional>,
}

impl FieldDefinition {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            label: None,
            required: false,
            placeholder: None,
            default: None,
            disabled: false,
            validation: None,
            conditional: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_validation(mut self, rule: ValidationRule) -> Self {
        self.validation = Some(rule);
        self
    }

    pub fn shown_when(mut self, on_field: impl Into<String>, show_when: ShowWhen) -> Self {
        self.conditional = Some(Conditional {
            on_field: on_field.into(),
            show_when,
        });
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn display_label(&self, name: &str) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| prettify_label(name))
    }

    pub fn is_email(&self) -> bool {
        matches!(self.validation, Some(ValidationRule::Email))
    }
}

/// Document shape of a schema, as written in the schema editor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename = "PromptSchema", rename_all = "camelCase")]
pub(crate) struct SchemaDocument {
    pub prompt_type: String,
    pub schema_version: String,
    pub fields: IndexMap<String, RawFieldDefinition>,
}

/// Document shape of a single field definition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename = "FieldDefinition")]
pub(crate) struct RawFieldDefinition {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<RawConditional>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<IndexMap<String, RawFieldDefinition>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename = "Conditional")]
pub(crate) struct RawConditional {
    pub field: String,
    #[serde(default)]
    pub value: Value,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl TryFrom<RawFieldDefinition> for FieldDefinition {
    type Error = String;

    fn try_from(raw: RawFieldDefinition) -> Result<Self, Self::Error> {
        let kind = match raw.kind.as_deref() {
            Some("textarea") => FieldKind::TextArea,
            Some("select") => FieldKind::Select {
                options: raw
                    .options
                    .ok_or_else(|| "select fields must define options".to_string())?,
            },
            Some("date") => FieldKind::Date,
            Some("url") => FieldKind::Url,
            Some("code") => FieldKind::Code,
            Some("boolean") => FieldKind::Boolean,
            Some("array") => FieldKind::ArrayOfString,
            Some("object") => {
                let mut fields = IndexMap::new();
                for (name, nested) in raw.fields.unwrap_or_default() {
                    let nested = FieldDefinition::try_from(nested)
                        .map_err(|err| format!("{name}: {err}"))?;
                    fields.insert(name, nested);
                }
                FieldKind::Object { fields }
            }
            Some("string") | None => FieldKind::Text,
            Some(other) => {
                tracing::debug!(kind = other, "unknown field kind, rendering as string");
                FieldKind::Text
            }
        };

        let default = match raw.default {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) if text == CURRENT_DATE_SENTINEL => {
                Some(DefaultValue::CurrentDate)
            }
            Some(value) => Some(DefaultValue::Literal(value)),
        };

        let validation = raw.validation.map(|tag| {
            if tag.eq_ignore_ascii_case("email") {
                ValidationRule::Email
            } else {
                ValidationRule::Unrecognized(tag)
            }
        });

        let conditional = raw.conditional.map(|cond| Conditional {
            on_field: cond.field,
            show_when: match cond.value {
                Value::Array(items) => ShowWhen::AnyOf(items),
                other => ShowWhen::Equals(other),
            },
        });

        Ok(FieldDefinition {
            kind,
            label: raw.label,
            required: raw.required,
            placeholder: raw.placeholder,
            default,
            disabled: raw.disabled,
            validation,
            conditional,
        })
    }
}

impl From<FieldDefinition> for RawFieldDefinition {
    fn from(field: FieldDefinition) -> Self {
        let kind = Some(field.kind.tag().to_string());
        let (options, fields) = match field.kind {
            FieldKind::Select { options } => (Some(options), None),
            FieldKind::Object { fields } => (
                None,
                Some(
                    fields
                        .into_iter()
                        .map(|(name, nested)| (name, RawFieldDefinition::from(nested)))
                        .collect(),
                ),
            ),
            _ => (None, None),
        };

        RawFieldDefinition {
            kind,
            label: field.label,
            required: field.required,
            placeholder: field.placeholder,
            default: field.default.map(|default| match default {
                DefaultValue::CurrentDate => Value::String(CURRENT_DATE_SENTINEL.to_string()),
                DefaultValue::Literal(value) => value,
            }),
            disabled: field.disabled,
            options,
            validation: field.validation.map(|rule| match rule {
                ValidationRule::Email => "email".to_string(),
                ValidationRule::Unrecognized(tag) => tag,
            }),
            conditional: field.conditional.map(|cond| RawConditional {
                field: cond.on_field,
                value: match cond.show_when {
                    ShowWhen::Equals(value) => value,
                    ShowWhen::AnyOf(values) => Value::Array(values),
                },
            }),
            fields,
        }
    }
}

pub fn prettify_label(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut result = String::with_capacity(raw.len());
    let mut capitalize = true;
    for ch in raw.chars() {
        if ch == '_' || ch == '-' {
            result.push(' ');
            capitalize = true;
            continue;
        }

        if capitalize {
            result.push(ch.to_ascii_uppercase());
            capitalize = false;
        } else {
            result.push(ch);
        }
    }

    result.trim().to_string()
}
