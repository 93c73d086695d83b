use chrono::{Local, NaiveDate};
use serde_json::Value;

use crate::domain::{DefaultValue, FieldDefinition, FieldKind};

use super::{
    field::{Control, FieldState},
    section::{FormNode, SectionState, VisibilityRule},
};

pub const DEFAULT_LOCALE_DATE_FORMAT: &str = "%-m/%-d/%Y";
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Inputs to rendering that do not come from the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub today: NaiveDate,
    /// `chrono` format string for `current_date` defaults on non-date fields.
    pub locale_date_format: String,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            today: Local::now().date_naive(),
            locale_date_format: DEFAULT_LOCALE_DATE_FORMAT.to_string(),
        }
    }
}

impl RenderContext {
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_locale_date_format(mut self, format: impl Into<String>) -> Self {
        self.locale_date_format = format.into();
        self
    }

    fn resolve_default(&self, default: &DefaultValue, kind: &FieldKind) -> Value {
        match default {
            DefaultValue::CurrentDate => {
                let format = if matches!(kind, FieldKind::Date) {
                    ISO_DATE_FORMAT
                } else {
                    self.locale_date_format.as_str()
                };
                Value::String(self.today.format(format).to_string())
            }
            DefaultValue::Literal(value) => value.clone(),
        }
    }
}

/// Appends the control(s) for one field definition to `container`.
///
/// `existing` is the stored value for this field; `null` counts as absent.
/// Object fields become a nested group rendered from the matching slice of
/// `existing`. Conditional fields start hidden unless their target is
/// already rendered with a matching value.
pub fn render_field(
    name: &str,
    definition: &FieldDefinition,
    container: &mut SectionState,
    existing: Option<&Value>,
    ctx: &RenderContext,
) {
    let existing = existing.filter(|value| !value.is_null());
    let path = container.path.child(name);
    let label = definition.display_label(name);

    let Some(mut control) = Control::for_kind(&definition.kind) else {
        let mut group = SectionState::group(path, label);
        if let Some(nested) = definition.kind.nested_fields() {
            for (nested_name, nested_definition) in nested {
                let nested_existing = existing.and_then(|value| value.get(nested_name));
                render_field(nested_name, nested_definition, &mut group, nested_existing, ctx);
            }
        }
        container.nodes.push(FormNode::Group(group));
        return;
    };

    if let Some(value) = existing {
        control.seed(value);
    } else if let Some(default) = &definition.default {
        control.seed(&ctx.resolve_default(default, &definition.kind));
    }

    let mut visible = true;
    if let Some(conditional) = &definition.conditional {
        visible = container
            .sibling(&conditional.on_field)
            .is_some_and(|target| conditional.show_when.matches(&target.live_value()));
        container.rules.push(VisibilityRule {
            dependent: path.clone(),
            target: container.path.child(conditional.on_field.as_str()),
            show_when: conditional.show_when.clone(),
        });
    }

    tracing::trace!(field = %path, widget = control.widget(), "rendered field");
    container.nodes.push(FormNode::Field(FieldState {
        path,
        label,
        definition: definition.clone(),
        control,
        visible,
        dirty: false,
        error: None,
    }));
}
