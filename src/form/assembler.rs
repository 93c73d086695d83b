use crate::domain::Schema;

use super::{
    render::{RenderContext, render_field},
    section::SectionState,
    session::FormSession,
    state::FormState,
    validation::LiveValidator,
};

/// Renders a complete form for `schema`, pre-populated from the session's
/// record when editing.
///
/// Visibility is re-evaluated once every field exists, so a conditional
/// field declared before its target still starts in the right state.
pub fn build_form(
    schema: &Schema,
    session: FormSession,
    ctx: &RenderContext,
) -> (FormState, FormSession) {
    let existing = session.existing_data();
    let mut root = SectionState::root(schema.prompt_type.clone());
    for (name, definition) in &schema.fields {
        render_field(
            name,
            definition,
            &mut root,
            existing.and_then(|data| data.get(name)),
            ctx,
        );
    }

    let mut state = FormState::new(schema.prompt_type.clone(), session.heading(), root);
    state.refresh_visibility();
    state.attach_validator(LiveValidator::attach(schema));
    tracing::debug!(
        prompt_type = %schema.prompt_type,
        heading = %state.heading(),
        fields = state.fields().len(),
        "assembled form"
    );
    (state, session)
}
