//! JSON API for plan generation.
//!
//! `POST /generate-plan` with `{"className": "...", "hours": 2, "level": 5}`.
//!
//! Response:
//! ```json
//! {
//!   "message": "generated text, URLs wrapped in <a> tags",
//!   "html": "<p>rendered plan with embedded players</p>",
//!   "embeds": 5
//! }
//! ```

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::error::ApiError;
use crate::plan::PlanParams;
use crate::render::{self, links};
use crate::state::AppState;

/// Successful generation response.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    /// Generated text with URLs wrapped in anchors.
    pub message: String,
    /// Rendered HTML with embedded video players.
    pub html: String,
    /// Number of embedded players.
    pub embeds: usize,
}

/// Generate a study plan and return it as JSON.
pub async fn generate_plan(
    State(state): State<AppState>,
    Json(params): Json<PlanParams>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let request = params.validate()?;
    let text = state.generate_plan(&request).await?;

    let rendered = render::render_plan(&text);

    Ok(Json(GenerateResponse {
        message: links::link_urls(&text),
        embeds: rendered.embeds.len(),
        html: rendered.html,
    }))
}
