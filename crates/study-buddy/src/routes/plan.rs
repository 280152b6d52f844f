//! Form route: generate a plan and render it as a page.

use axum::Form;
use axum::extract::State;
use axum::response::Response;

use crate::error::PageError;
use crate::plan::PlanParams;
use crate::render;
use crate::state::AppState;

/// Handle a plan form submission.
///
/// Validates the form, generates (or reuses) the plan text, renders it with
/// embedded players, and returns the full page.
pub async fn plan_page(
    State(state): State<AppState>,
    Form(params): Form<PlanParams>,
) -> Result<Response, PageError> {
    let request = params.validate()?;
    let text = state.generate_plan(&request).await?;

    let rendered = render::render_plan(&text);
    tracing::debug!(
        class_name = %request.class_name,
        embeds = rendered.embeds.len(),
        "rendered plan page"
    );

    let markup = render::plan::render(&request, &rendered);
    Ok(super::html_response(markup.into_string(), "no-store"))
}
