//! Route definitions for the study-plan service.
//!
//! ## Routes
//!
//! - `GET /` - Plan request form
//! - `GET /health` - Health check (JSON)
//! - `GET /robots.txt` - Crawler instructions
//! - `POST /plan` - Form submission, renders the plan page
//! - `POST /generate-plan` - JSON API
//! - anything else - static files, when a static directory is configured

mod generate;
mod health;
mod home;
mod plan;

use axum::Router;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tower_http::services::ServeDir;

use crate::render::components::CSP_HEADER;
use crate::state::AppState;

pub use generate::GenerateResponse;

/// Build the complete service router.
pub fn router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    let router = Router::new()
        .route("/", get(home::home_page))
        .route("/health", get(health::health_check))
        .route("/robots.txt", get(robots_txt))
        .route("/plan", post(plan::plan_page))
        .route("/generate-plan", post(generate::generate_plan))
        .with_state(state);

    match static_dir {
        Some(dir) => {
            tracing::info!(dir = %dir, "serving static files");
            router.fallback_service(ServeDir::new(dir))
        }
        None => router,
    }
}

/// Serve robots.txt. Generated plans are per-request and not worth crawling.
async fn robots_txt() -> impl IntoResponse {
    (
        [("content-type", "text/plain; charset=utf-8")],
        "User-agent: *\nAllow: /$\nDisallow: /plan\nDisallow: /generate-plan\n",
    )
}

/// Build an HTML response with security headers.
fn html_response(html: String, cache_control: &'static str) -> Response {
    let mut headers = HeaderMap::new();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );

    // Security headers
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CSP_HEADER),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_control),
    );

    (StatusCode::OK, headers, html).into_response()
}
