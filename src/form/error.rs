use std::fmt;

use super::path::FieldPath;

/// Outcome of checking a single field value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{label} is required.")]
    Required { label: String },
    #[error("{label} must be a valid URL.")]
    InvalidUrl { label: String },
    #[error("{label} must be a valid email address.")]
    InvalidEmail { label: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub path: FieldPath,
    pub error: FieldError,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

/// Blocks a submission; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("Form submission failed:\n{}", list_issues(.0))]
    Validation(Vec<FieldIssue>),
}

impl SubmitError {
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            SubmitError::Validation(issues) => issues,
        }
    }
}

fn list_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("- {issue}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// An edit event that could not be applied to the open form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldInputError {
    #[error("no field `{path}` in the open form")]
    UnknownField { path: FieldPath },
    #[error("field `{path}` is disabled")]
    Disabled { path: FieldPath },
    #[error("field `{path}`: {message}")]
    Rejected { path: FieldPath, message: String },
}
