//! Error types and response formatting.
//!
//! [`ApiError`] renders as JSON for the API route. [`PageError`] wraps the
//! same error and renders a simple HTML error page for the form route.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, html};
use serde::Serialize;

use crate::gemini::GenerateError;
use crate::plan::ValidationError;

/// Error type for plan generation requests.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request parameters were missing or out of range.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The text-generation call failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// JSON error response body.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ApiError {
    /// HTTP status for this error.
    ///
    /// Upstream API failures pass the upstream status through.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Generate(GenerateError::Upstream { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Generate(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client.
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Generate(GenerateError::Upstream { .. }) => "Gemini API Error".to_string(),
            Self::Generate(GenerateError::UnexpectedFormat) => {
                "Unexpected response format from Gemini API".to_string()
            }
            Self::Generate(GenerateError::Transport(_)) => "Error calling Gemini API".to_string(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Generate(GenerateError::Upstream { details, .. }) => Some(details.clone()),
            _ => None,
        }
    }

    fn log(&self) {
        match self {
            Self::Validation(err) => tracing::debug!(error = %err, "rejected plan request"),
            Self::Generate(err) => tracing::error!(error = %err, "plan generation failed"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();

        let body = ErrorResponse {
            error: self.public_message(),
            details: self.details(),
        };

        (self.status(), Json(body)).into_response()
    }
}

/// An [`ApiError`] rendered as an HTML page.
#[derive(Debug)]
pub struct PageError(pub ApiError);

impl From<ApiError> for PageError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for PageError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl From<GenerateError> for PageError {
    fn from(err: GenerateError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let err = self.0;
        err.log();

        let status = err.status();
        let (title, message) = match &err {
            ApiError::Validation(_) => ("Check Your Answers", err.public_message()),
            ApiError::Generate(_) => (
                "Plan Unavailable",
                format!("{} Please try again later.", err.public_message()),
            ),
        };

        let markup = html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (title) " - Study Buddy" }
                    meta name="robots" content="noindex";
                    style { (maud::PreEscaped(crate::render::components::ERROR_CSS)) }
                }
                body {
                    main class="error-page" {
                        h1 { (title) }
                        p { (message) }
                        a href="/" { "Back to Study Buddy" }
                    }
                }
            }
        };

        (status, markup).into_response()
    }
}
