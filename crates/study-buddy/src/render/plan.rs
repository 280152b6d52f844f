//! Study-plan result page.

use maud::{Markup, PreEscaped, html};

use super::components::{format_number, page_shell, truncate};
use super::markdown::RenderedPlan;
use crate::plan::PlanRequest;

/// Render the full page for a generated plan.
pub fn render(request: &PlanRequest, plan: &RenderedPlan) -> Markup {
    let title = format!("{} Study Plan - Study Buddy", truncate(&request.class_name, 80));
    let description = format!(
        "A 4-week {} study plan for {} hours per day.",
        truncate(&request.class_name, 80),
        format_number(request.hours)
    );

    let body = html! {
        div class="card" {
            h1 class="page-title" { (request.class_name) " Study Plan" }

            div class="plan-summary" {
                span { strong { "Hours per day: " } (format_number(request.hours)) }
                span { strong { "Level: " } (format_number(request.level)) "/10" }
                @if !plan.embeds.is_empty() {
                    span { strong { "Videos: " } (plan.embeds.len()) }
                }
            }

            div class="plan-content" {
                (PreEscaped(&plan.html))
            }
        }
        div class="actions" {
            a class="button-link" href="/" { "Create another plan" }
        }
    };

    page_shell(&title, &description, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_plan;

    fn request() -> PlanRequest {
        PlanRequest {
            class_name: "Biology".to_string(),
            hours: 1.5,
            level: 3.0,
        }
    }

    #[test]
    fn page_contains_summary_and_plan() {
        let plan = render_plan("# Week 1\n\nCells");
        let html = render(&request(), &plan).into_string();

        assert!(html.contains("<title>Biology Study Plan - Study Buddy</title>"));
        assert!(html.contains("Biology Study Plan</h1>"));
        assert!(html.contains("1.5"));
        assert!(html.contains("3</span>") || html.contains("3/10"));
        assert!(html.contains("<h1>Week 1</h1>"));
        assert!(!html.contains("Videos: "));
    }

    #[test]
    fn page_counts_videos() {
        let plan = render_plan("Video #1: Cells\n\nhttps://www.youtube.com/watch?v=abc");
        let html = render(&request(), &plan).into_string();

        assert!(html.contains("Videos: </strong>1"));
        assert!(html.contains("https://www.youtube.com/embed/abc"));
    }

    #[test]
    fn page_escapes_class_name() {
        let req = PlanRequest {
            class_name: "<img src=x>".to_string(),
            ..request()
        };
        let html = render(&req, &render_plan("")).into_string();
        assert!(!html.contains("<img src=x>"));
        assert!(html.contains("&lt;img src=x&gt;"));
    }
}
