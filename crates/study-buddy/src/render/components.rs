//! Shared HTML components used across all pages.
//!
//! These are maud functions that return `Markup` fragments for composition
//! into full pages.

use maud::{Markup, PreEscaped, html};

/// Inline CSS for all pages.
///
/// Flat, modern design. No borders/shadows: spacing and subtle background
/// shifts carry the hierarchy.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#fafafa;--fg:#111;--fg2:#555;--fg3:#999;--accent:#2563eb;--accent-hover:#1d4ed8;--surface:#fff;--border:rgba(37,99,235,.15);--mono:"SF Mono",SFMono-Regular,ui-monospace,Menlo,monospace}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:var(--fg);background:var(--bg);min-height:100vh;display:flex;flex-direction:column;align-items:center;padding:1.5rem 1rem}
main{max-width:760px;width:100%;flex:1}
a{color:var(--accent);text-decoration:none}
a:hover{text-decoration:underline}

.card{padding:1.5rem;border:1px solid var(--border);border-radius:10px;background:var(--surface)}

.page-title{font-size:1.75rem;font-weight:700;letter-spacing:-.02em;margin-bottom:.25rem}
.page-subtitle{color:var(--fg2);margin-bottom:1.25rem}

.plan-form{display:flex;flex-direction:column;gap:1rem}
.plan-form label{display:flex;flex-direction:column;gap:.35rem;font-weight:600;font-size:.9rem;color:var(--fg2)}
.plan-form input{font:inherit;padding:.55rem .75rem;border:1px solid var(--border);border-radius:6px;background:var(--bg);color:var(--fg)}
.plan-form input:focus{outline:2px solid var(--accent);outline-offset:1px}
.plan-form button{font:inherit;font-weight:600;padding:.65rem 1.1rem;border:none;border-radius:6px;background:var(--accent);color:#fff;cursor:pointer}
.plan-form button:hover{background:var(--accent-hover)}

.plan-summary{display:flex;gap:1.25rem;flex-wrap:wrap;font-size:.9rem;color:var(--fg3);margin-bottom:1rem}
.plan-summary strong{color:var(--fg2)}

.plan-content{font-size:1.05rem;line-height:1.75;color:var(--fg)}
.plan-content h1,.plan-content h2,.plan-content h3,.plan-content h4{font-weight:700;margin:1.5rem 0 .75rem;letter-spacing:-.01em}
.plan-content h1{font-size:1.4rem}
.plan-content h2{font-size:1.25rem}
.plan-content h3{font-size:1.1rem}
.plan-content h4{font-size:1rem}
.plan-content p{margin:.75rem 0}
.plan-content ul,.plan-content ol{margin:.75rem 0;padding-left:1.5rem}
.plan-content li{margin:.3rem 0}
.plan-content blockquote{border-left:3px solid var(--border);padding:.5rem 0 .5rem 1rem;margin:.75rem 0;color:var(--fg2)}
.plan-content pre{background:var(--bg);border:1px solid var(--border);border-radius:6px;padding:.75rem 1rem;overflow-x:auto;margin:.75rem 0;font-size:.85rem;line-height:1.5}
.plan-content code{font-family:var(--mono);font-size:.88em}
.plan-content hr{border:none;border-top:1px solid var(--border);margin:1.5rem 0}
.plan-content table{border-collapse:collapse;width:100%;margin:.75rem 0;font-size:.9rem}
.plan-content th,.plan-content td{border:1px solid var(--border);padding:.4rem .75rem;text-align:left}

.video-container{position:relative;padding-bottom:56.25%;height:0;overflow:hidden;max-width:100%;margin:20px 0;border-radius:8px;background:#000}
.video-container iframe{position:absolute;top:0;left:0;width:100%;height:100%;border:0}

.actions{margin-top:1.25rem;display:flex;justify-content:center}
.button-link{display:inline-flex;align-items:center;gap:.5rem;padding:.55rem 1.1rem;background:var(--accent);color:#fff;border-radius:6px;font-size:.9rem;font-weight:500}
.button-link:hover{background:var(--accent-hover);text-decoration:none}

.footer{text-align:center;margin-top:1rem;padding-top:.75rem;font-size:.8rem;color:var(--fg3);width:100%;max-width:760px}

@media(prefers-color-scheme:dark){
:root{--bg:#0a0a0f;--fg:#e5e5e5;--fg2:#a0a0a0;--fg3:#666;--accent:#60a5fa;--accent-hover:#93c5fd;--surface:#111118;--border:rgba(96,165,250,.2)}
}
"#;

/// Inline CSS for error pages.
pub const ERROR_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;display:flex;justify-content:center;align-items:center;min-height:100vh;background:#fafafa;color:#1a1a2e;padding:1rem}
.error-page{text-align:center;max-width:420px}
.error-page h1{font-size:1.5rem;margin-bottom:.75rem}
.error-page p{color:#666;margin-bottom:1rem;line-height:1.5}
.error-page a{color:#2563eb}
@media(prefers-color-scheme:dark){
body{background:#0f0f17;color:#e0e0e8}
.error-page p{color:#aaa}
.error-page a{color:#60a5fa}
}
"#;

/// Content-Security-Policy header value.
///
/// Inline styles only, no scripts. Frames are limited to the YouTube player
/// and forms may only post back to this origin.
pub const CSP_HEADER: &str = "default-src 'none'; style-src 'unsafe-inline'; img-src https: data:; frame-src https://www.youtube.com; form-action 'self'; frame-ancestors 'none'";

/// Render the full HTML page shell with `<head>` and body content.
pub fn page_shell(title: &str, description: &str, body_content: Markup) -> Markup {
    html! {
        (maud::DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta name="description" content=(description);
                meta name="robots" content="noindex";
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                main { (body_content) }
                footer class="footer" {
                    "Study Buddy v" (env!("CARGO_PKG_VERSION"))
                }
            }
        }
    }
}

/// Format a number the way users typed it: no trailing ".0" on whole values.
pub fn format_number(n: f64) -> String {
    n.to_string()
}

/// Truncate a string to a maximum length, appending "..." if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let mut end = max_len;
        while !s.is_char_boundary(end) && end > 0 {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- truncate() tests --

    #[test]
    fn truncate_empty_string() {
        assert_eq!(truncate("", 10), "");
    }

    #[test]
    fn truncate_shorter_than_max() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn truncate_longer_than_max() {
        assert_eq!(truncate("hello world", 5), "hello...");
    }

    #[test]
    fn truncate_unicode_multibyte() {
        // byte 4 lands inside 'é', so it backs up to byte 3
        assert_eq!(truncate("café", 4), "caf...");
    }

    #[test]
    fn truncate_unicode_cjk() {
        assert_eq!(truncate("你好世界", 6), "你好...");
    }

    // -- format_number() tests --

    #[test]
    fn format_number_whole() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(10.0), "10");
    }

    #[test]
    fn format_number_fraction() {
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(0.25), "0.25");
    }

    // -- page_shell() tests --

    #[test]
    fn page_shell_escapes_title() {
        let html = page_shell("<b>x</b>", "desc", html! { p { "body" } }).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>&lt;b&gt;x&lt;/b&gt;</title>"));
        assert!(html.contains("<main><p>body</p></main>"));
    }

    #[test]
    fn csp_allows_only_youtube_frames() {
        assert!(CSP_HEADER.contains("frame-src https://www.youtube.com;"));
        assert!(CSP_HEADER.contains("default-src 'none'"));
        assert!(!CSP_HEADER.contains("script-src"));
    }
}
