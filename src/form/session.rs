use serde_json::{Map, Value};

use crate::domain::Record;

use super::state::FormHeading;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionMode {
    Create,
    /// Editing a stored record; the original is kept so its id and
    /// creation time survive the save.
    Edit { original: Record },
}

/// What the open form is for.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSession {
    pub prompt_type: String,
    pub mode: SessionMode,
}

impl FormSession {
    pub fn create(prompt_type: impl Into<String>) -> Self {
        Self {
            prompt_type: prompt_type.into(),
            mode: SessionMode::Create,
        }
    }

    pub fn edit(record: Record) -> Self {
        Self {
            prompt_type: record.prompt_type.clone(),
            mode: SessionMode::Edit { original: record },
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, SessionMode::Edit { .. })
    }

    pub fn record_id(&self) -> Option<&str> {
        match &self.mode {
            SessionMode::Create => None,
            SessionMode::Edit { original } => Some(&original.id),
        }
    }

    pub fn existing_data(&self) -> Option<&Map<String, Value>> {
        match &self.mode {
            SessionMode::Create => None,
            SessionMode::Edit { original } => Some(&original.data),
        }
    }

    pub fn heading(&self) -> FormHeading {
        if self.is_editing() {
            FormHeading::Edit
        } else {
            FormHeading::Create
        }
    }

    /// Record to persist for collected form data.
    pub fn finish(&self, data: Map<String, Value>) -> Record {
        match &self.mode {
            SessionMode::Create => Record::new(self.prompt_type.clone(), data),
            SessionMode::Edit { original } => original.revised(data),
        }
    }
}
