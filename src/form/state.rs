use std::fmt;

use super::{
    field::FieldState,
    path::FieldPath,
    section::{SectionState, VisibilityRule},
    validation::LiveValidator,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormHeading {
    Create,
    Edit,
}

impl FormHeading {
    pub fn title(self) -> &'static str {
        match self {
            FormHeading::Create => "Create Prompt",
            FormHeading::Edit => "Edit Prompt",
        }
    }
}

impl fmt::Display for FormHeading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityChange {
    pub path: FieldPath,
    pub visible: bool,
}

/// A rendered form: the field tree, its show/hide wiring and the attached
/// live validator.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    prompt_type: String,
    heading: FormHeading,
    pub(crate) root: SectionState,
    pub(crate) rules: Vec<VisibilityRule>,
    pub(crate) validator: LiveValidator,
}

impl FormState {
    pub fn new(prompt_type: impl Into<String>, heading: FormHeading, root: SectionState) -> Self {
        let mut rules = Vec::new();
        root.collect_rules(&mut rules);
        Self {
            prompt_type: prompt_type.into(),
            heading,
            root,
            rules,
            validator: LiveValidator::default(),
        }
    }

    pub fn attach_validator(&mut self, validator: LiveValidator) {
        self.validator = validator;
    }

    pub fn validator(&self) -> &LiveValidator {
        &self.validator
    }

    pub fn prompt_type(&self) -> &str {
        &self.prompt_type
    }

    pub fn heading(&self) -> FormHeading {
        self.heading
    }

    pub fn root(&self) -> &SectionState {
        &self.root
    }

    pub fn rules(&self) -> &[VisibilityRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn fields(&self) -> Vec<&FieldState> {
        self.root.fields()
    }

    pub fn visible_fields(&self) -> Vec<&FieldState> {
        self.fields()
            .into_iter()
            .filter(|field| field.visible)
            .collect()
    }

    pub fn field(&self, path: &FieldPath) -> Option<&FieldState> {
        self.root.field(path)
    }

    pub fn field_mut(&mut self, path: &FieldPath) -> Option<&mut FieldState> {
        self.root.field_mut(path)
    }

    /// Re-evaluates every show/hide rule against current values.
    pub fn refresh_visibility(&mut self) -> Vec<VisibilityChange> {
        self.apply_rules(|_| true)
    }

    /// Re-evaluates the rules that depend on `target`.
    pub(crate) fn refresh_dependents_of(&mut self, target: &FieldPath) -> Vec<VisibilityChange> {
        self.apply_rules(|rule| rule.target == *target)
    }

    fn apply_rules(&mut self, applies: impl Fn(&VisibilityRule) -> bool) -> Vec<VisibilityChange> {
        let mut changes = Vec::new();
        for rule in self.rules.iter().filter(|rule| applies(rule)) {
            let shown = self
                .root
                .field(&rule.target)
                .is_some_and(|target| rule.show_when.matches(&target.live_value()));
            if let Some(dependent) = self.root.field_mut(&rule.dependent)
                && dependent.visible != shown
            {
                dependent.visible = shown;
                changes.push(VisibilityChange {
                    path: rule.dependent.clone(),
                    visible: shown,
                });
            }
        }
        changes
    }

    pub fn clear_errors(&mut self) {
        self.root
            .for_each_field_mut(&mut |field: &mut FieldState| field.clear_error());
    }

    pub fn set_error(&mut self, path: &FieldPath, message: impl Into<String>) -> bool {
        match self.root.field_mut(path) {
            Some(field) => {
                field.set_error(message);
                true
            }
            None => false,
        }
    }

    pub fn clear_error(&mut self, path: &FieldPath) {
        if let Some(field) = self.root.field_mut(path) {
            field.clear_error();
        }
    }

    pub fn errors(&self) -> Vec<(&FieldPath, &str)> {
        self.fields()
            .into_iter()
            .filter_map(|field| field.error.as_deref().map(|error| (&field.path, error)))
            .collect()
    }

    pub fn error_count(&self) -> usize {
        self.fields()
            .iter()
            .filter(|field| field.error.is_some())
            .count()
    }

    pub fn is_dirty(&self) -> bool {
        self.fields().iter().any(|field| field.dirty)
    }
}
