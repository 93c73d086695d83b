use super::{
    actions::{EditValue, FieldEvent, FieldUpdate},
    error::FieldInputError,
    state::FormState,
};

impl FormState {
    /// Applies an edit event: updates the control, re-checks the field and
    /// re-evaluates dependent visibility.
    pub fn dispatch(&mut self, event: FieldEvent) -> Result<FieldUpdate, FieldInputError> {
        let (path, value, trigger) = event.into_parts();
        let Some(field) = self.root.field_mut(&path) else {
            return Err(FieldInputError::UnknownField { path });
        };
        if field.is_disabled() {
            return Err(FieldInputError::Disabled { path });
        }

        let applied = match value {
            EditValue::Text(text) => field.control.set_text(&text),
            EditValue::Checked(flag) => field.control.set_checked(flag),
        };
        if let Err(message) = applied {
            return Err(FieldInputError::Rejected { path, message });
        }
        field.after_edit();

        let check = self.validator.on_event(&path, trigger, &field.control);
        match &check {
            Some(Ok(())) => field.clear_error(),
            Some(Err(err)) => field.set_error(err.to_string()),
            None => {}
        }
        let error = field.error.clone();

        let visibility = self.refresh_dependents_of(&path);
        tracing::trace!(field = %path, ?trigger, validated = check.is_some(), "applied field event");
        Ok(FieldUpdate {
            path,
            validated: check.is_some(),
            error,
            visibility,
        })
    }
}
