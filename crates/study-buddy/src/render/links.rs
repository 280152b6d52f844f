//! URL detection for generated text.

use std::sync::LazyLock;

use maud::{Markup, html};
use regex::Regex;

/// Any `http(s)://` URL up to the next whitespace.
static RAW_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s]+").expect("raw URL regex should compile"));

/// URLs inside prose, stopping at characters that usually close surrounding
/// punctuation rather than belong to the URL.
static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s<>\)\]]+").expect("URL regex should compile"));

/// Characters trimmed from the end of a URL found in prose.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '"', '\''];

/// Wrap every URL in `text` in an anchor opening in a new tab.
///
/// This is the `message` format of the JSON API: the text is otherwise left
/// untouched, so clients that render it as markdown keep working.
pub fn link_urls(text: &str) -> String {
    RAW_URL_REGEX
        .replace_all(text, r#"<a href="$0" target="_blank">$0</a>"#)
        .into_owned()
}

/// A piece of prose: either plain text or a URL.
#[derive(Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Url(&'a str),
}

/// Split prose into text and URL segments.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut last = 0;

    for m in URL_REGEX.find_iter(text) {
        let url = m.as_str().trim_end_matches(TRAILING_PUNCTUATION);
        if url.len() <= "https://".len() {
            continue;
        }
        if m.start() > last {
            out.push(Segment::Text(&text[last..m.start()]));
        }
        out.push(Segment::Url(url));
        last = m.start() + url.len();
    }

    if last < text.len() {
        out.push(Segment::Text(&text[last..]));
    }

    out
}

/// Render a URL found in prose as an external link.
pub fn external_link(url: &str) -> Markup {
    html! {
        a href=(url) rel="nofollow noopener" target="_blank" { (url) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- link_urls() tests --

    #[test]
    fn link_urls_wraps_each_url() {
        let out = link_urls("see https://a.example/x and http://b.example");
        assert_eq!(
            out,
            r#"see <a href="https://a.example/x" target="_blank">https://a.example/x</a> and <a href="http://b.example" target="_blank">http://b.example</a>"#
        );
    }

    #[test]
    fn link_urls_leaves_plain_text() {
        assert_eq!(link_urls("no links here"), "no links here");
        assert_eq!(link_urls(""), "");
    }

    #[test]
    fn link_urls_takes_url_up_to_whitespace() {
        let out = link_urls("(https://www.youtube.com/watch?v=abc)\nnext");
        assert!(out.starts_with(r#"(<a href="https://www.youtube.com/watch?v=abc)""#));
        assert!(out.ends_with("\nnext"));
    }

    // -- segments() tests --

    #[test]
    fn segments_plain_text() {
        assert_eq!(segments("hello"), vec![Segment::Text("hello")]);
        assert!(segments("").is_empty());
    }

    #[test]
    fn segments_url_in_middle() {
        assert_eq!(
            segments("go to https://example.com/a?b=1 now"),
            vec![
                Segment::Text("go to "),
                Segment::Url("https://example.com/a?b=1"),
                Segment::Text(" now"),
            ]
        );
    }

    #[test]
    fn segments_trailing_punctuation_stays_text() {
        assert_eq!(
            segments("Watch https://www.youtube.com/watch?v=abc."),
            vec![
                Segment::Text("Watch "),
                Segment::Url("https://www.youtube.com/watch?v=abc"),
                Segment::Text("."),
            ]
        );
    }

    #[test]
    fn segments_stop_at_closing_paren() {
        assert_eq!(
            segments("(http://example.com)"),
            vec![
                Segment::Text("("),
                Segment::Url("http://example.com"),
                Segment::Text(")"),
            ]
        );
    }

    #[test]
    fn segments_skip_bare_scheme() {
        assert_eq!(segments("https://"), vec![Segment::Text("https://")]);
    }

    #[test]
    fn external_link_escapes() {
        let html = external_link("https://example.com/?a=1&b=\"2\"").into_string();
        assert_eq!(
            html,
            r#"<a href="https://example.com/?a=1&amp;b=&quot;2&quot;" rel="nofollow noopener" target="_blank">https://example.com/?a=1&amp;b=&quot;2&quot;</a>"#
        );
    }
}
