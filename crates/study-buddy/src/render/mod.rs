//! HTML rendering for study plans.
//!
//! Generated plans are markdown. [`markdown`] converts them to HTML and
//! splices YouTube players in after their video-title markers; [`embed`]
//! holds the marker and link matching; [`plan`] wraps the result in a page.
//!
//! All page markup uses [maud](https://maud.lambda.xyz/) for compile-time HTML
//! generation with automatic XSS protection (all dynamic values are escaped).

pub mod components;
pub mod embed;
pub mod links;
pub mod markdown;
pub mod plan;

pub use markdown::{RenderedPlan, render_markdown, render_plan};
