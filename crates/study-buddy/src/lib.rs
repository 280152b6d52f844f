//! Study Buddy - personalized study plans with embedded video lessons.
//!
//! This crate provides a small HTTP service that turns three inputs (a
//! subject, hours per day, and a self-rated level) into a 4-week study plan
//! written by the Gemini API, and renders that plan as HTML with YouTube
//! players embedded next to the videos it recommends.
//!
//! # Architecture
//!
//! - **Plan**: Validates request parameters and builds the generation prompt
//! - **Gemini**: Sends the prompt to the `generateContent` API behind a [`TextGenerator`] trait
//! - **Render**: Converts the returned markdown to HTML with pulldown-cmark and
//!   splices YouTube players after "Video N" title markers
//! - **Cache**: In-process moka cache of generated plan text
//!
//! # Routes
//!
//! ```text
//! GET  /               form page
//! POST /plan           form submission -> HTML plan page
//! POST /generate-plan  JSON API
//! ```
//!
//! # Security
//!
//! - All dynamic values in pages are HTML-escaped by maud
//! - Raw HTML in generated text is escaped, never passed through
//! - Strict Content-Security-Policy: no scripts, frames only from YouTube

pub mod config;
pub mod error;
pub mod gemini;
pub mod plan;
pub mod render;
pub mod routes;
pub mod state;

pub use config::Config;
pub use gemini::{GeminiClient, GenerateError, TextGenerator};
pub use routes::router;
pub use state::AppState;
