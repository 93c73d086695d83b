use std::time::Duration;

use chrono::NaiveDate;

use crate::form::{DEFAULT_LOCALE_DATE_FORMAT, RenderContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryOptions {
    /// Seed the built-in schemas when the store has none.
    pub seed_builtin_schemas: bool,
    /// Ask before deleting a record.
    pub confirm_deletes: bool,
    /// How long success notices stay up. Display-only.
    pub success_dismiss: Duration,
    pub locale_date_format: String,
    /// Fixed "today" for `current_date` defaults; the local date when unset.
    pub today: Option<NaiveDate>,
}

impl Default for LibraryOptions {
    fn default() -> Self {
        Self {
            seed_builtin_schemas: true,
            confirm_deletes: true,
            success_dismiss: Duration::from_millis(1000),
            locale_date_format: DEFAULT_LOCALE_DATE_FORMAT.to_string(),
            today: None,
        }
    }
}

impl LibraryOptions {
    pub fn with_seed_builtin_schemas(mut self, enabled: bool) -> Self {
        self.seed_builtin_schemas = enabled;
        self
    }

    pub fn with_confirm_deletes(mut self, confirm: bool) -> Self {
        self.confirm_deletes = confirm;
        self
    }

    pub fn with_success_dismiss(mut self, delay: Duration) -> Self {
        self.success_dismiss = delay;
        self
    }

    pub fn with_locale_date_format(mut self, format: impl Into<String>) -> Self {
        self.locale_date_format = format.into();
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub(crate) fn render_context(&self) -> RenderContext {
        let ctx = RenderContext::default().with_locale_date_format(self.locale_date_format.clone());
        match self.today {
            Some(today) => ctx.with_today(today),
            None => ctx,
        }
    }
}
