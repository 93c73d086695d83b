mod actions;
mod assembler;
mod error;
mod field;
mod path;
mod reducers;
mod render;
mod section;
mod session;
mod state;
mod submit;
mod validation;

pub use actions::{EditValue, FieldEvent, FieldUpdate};
pub use assembler::build_form;
pub use error::{FieldError, FieldInputError, FieldIssue, SubmitError};
pub use field::{CODE_ROWS, Control, FieldState, TEXTAREA_ROWS, is_truthy};
pub use path::FieldPath;
pub use render::{DEFAULT_LOCALE_DATE_FORMAT, RenderContext, render_field};
pub use section::{FormNode, SectionState, VisibilityRule};
pub use session::{FormSession, SessionMode};
pub use state::{FormHeading, FormState, VisibilityChange};
pub use submit::collect_values;
pub use validation::{LiveValidator, Trigger, validate_one, validate_text};
