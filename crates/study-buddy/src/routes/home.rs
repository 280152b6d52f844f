//! Home page: the study-plan request form.

use axum::response::Response;
use maud::{Markup, html};

use crate::render::components::page_shell;

/// Render the home page.
pub async fn home_page() -> Response {
    super::html_response(home_markup().into_string(), "public, max-age=300")
}

fn home_markup() -> Markup {
    let body = html! {
        div class="card" {
            h1 class="page-title" { "Study Buddy" }
            p class="page-subtitle" {
                "Tell us what you are studying and get a personalized 4-week plan, "
                "with hand-picked videos embedded right in the plan."
            }

            form class="plan-form" method="post" action="/plan" {
                label {
                    "Class or subject"
                    input type="text" name="className" placeholder="e.g. Algebra" required;
                }
                label {
                    "Hours per day"
                    input type="number" name="hours" min="0.25" step="any" placeholder="e.g. 2" required;
                }
                label {
                    "Understanding (1-10)"
                    input type="number" name="level" min="1" max="10" step="any" placeholder="e.g. 5" required;
                }
                button type="submit" { "Generate Study Plan" }
            }
        }
    };

    page_shell(
        "Study Buddy - Personalized Study Plans",
        "Generate a personalized 4-week study plan with embedded video lessons.",
        body,
    )
}
