use crate::{
    domain::SchemaError,
    form::{FieldInputError, SubmitError},
    store::StoreError,
};

/// Something the controller was asked to act on does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Schema for prompt type \"{0}\" not found.")]
    SchemaNotFound(String),
    #[error("Prompt not found.")]
    RecordNotFound(String),
    #[error("No prompt type selected.")]
    NoActiveType,
    #[error("No form is open.")]
    NoOpenForm,
}

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error(transparent)]
    Input(#[from] FieldInputError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    /// Generic message for the user; the cause stays in `source()`.
    #[error("{context}.")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl PromptError {
    pub(crate) fn store(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| {
            tracing::error!(error = %source, "{context}");
            PromptError::Store { context, source }
        }
    }
}
