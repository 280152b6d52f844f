//! Markdown rendering for generated plans.
//!
//! Markdown is converted with pulldown-cmark and then post-processed on the
//! event stream:
//! - raw HTML from the model is escaped and shown as text
//! - bare URLs in prose become external links
//! - YouTube players are spliced after the block holding their video marker
//!
//! Splicing happens at block granularity (paragraph, heading, list item,
//! table cell) so players never land inside inline markup.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, TextMergeStream, html};

use super::embed::{self, Embed, EmbedPlan};
use super::links::{self, Segment};

/// Markdown rendered to HTML with its embed plan.
#[derive(Debug, Clone)]
pub struct RenderedPlan {
    /// HTML fragment (no surrounding page).
    pub html: String,
    /// Marker/video pairs that were embedded.
    pub embeds: EmbedPlan,
}

/// Render generated markdown to HTML with embedded video players.
///
/// Markers and YouTube links are collected from the rendered text, so
/// anything inside a code block is ignored.
pub fn render_plan(markdown: &str) -> RenderedPlan {
    let events = parse(markdown);
    let plan = plan_embeds(&events);
    let html = render_with_plan(events, &plan);

    RenderedPlan { html, embeds: plan }
}

/// Render markdown to HTML, splicing in the players from `plan`.
///
/// The plan's embeds are handed out to the document's markers in order; a
/// block receives one player per marker it holds until the plan runs out.
pub fn render_markdown(markdown: &str, plan: &EmbedPlan) -> String {
    render_with_plan(parse(markdown), plan)
}

/// Pair the document's markers with its YouTube links.
fn plan_embeds(events: &[Event<'_>]) -> EmbedPlan {
    let markers = host_block_text(events)
        .iter()
        .flat_map(|text| embed::find_markers(text))
        .collect();

    EmbedPlan::new(markers, embed::find_youtube_links(&link_text(events)))
}

fn render_with_plan(events: Vec<Event<'_>>, plan: &EmbedPlan) -> String {
    // Hand each host block the embeds for its own markers.
    let mut remaining = plan.embeds().iter();
    let per_block: Vec<Vec<&Embed>> = host_block_text(&events)
        .iter()
        .map(|text| {
            let markers = embed::find_markers(text).len();
            remaining.by_ref().take(markers).collect()
        })
        .collect();

    render_events(events, &per_block)
}

/// Parse markdown into events with raw HTML neutralized.
fn parse(markdown: &str) -> Vec<Event<'_>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let events = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::HtmlBlock) => Event::Start(Tag::Paragraph),
        Event::End(TagEnd::HtmlBlock) => Event::End(TagEnd::Paragraph),
        other => other,
    });

    TextMergeStream::new(events).collect()
}

/// Blocks that a video player may follow.
fn is_host_start(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Paragraph | Tag::Heading { .. } | Tag::Item | Tag::TableCell
    )
}

fn is_host_end(tag: &TagEnd) -> bool {
    matches!(
        tag,
        TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::TableCell
    )
}

/// Blocks that may open inside a list item, after the item's own text.
fn is_block_start(tag: &Tag<'_>) -> bool {
    is_host_start(tag)
        || matches!(
            tag,
            Tag::BlockQuote(..)
                | Tag::CodeBlock(_)
                | Tag::List(_)
                | Tag::Table(_)
                | Tag::FootnoteDefinition(_)
        )
}

/// Players go after a closed paragraph or heading, but inside list items and
/// table cells so the surrounding structure stays valid.
fn embeds_inside(tag: &TagEnd) -> bool {
    matches!(tag, TagEnd::Item | TagEnd::TableCell)
}

/// Collect the text of each host block, indexed by opening order.
///
/// Text belongs to the innermost open host block. Code blocks are skipped.
fn host_block_text(events: &[Event<'_>]) -> Vec<String> {
    let mut blocks: Vec<String> = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut in_code_block = false;

    for event in events {
        match event {
            Event::Start(tag) if is_host_start(tag) => {
                open.push(blocks.len());
                blocks.push(String::new());
            }
            Event::End(tag) if is_host_end(tag) => {
                open.pop();
            }
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(text) | Event::Code(text) if !in_code_block => {
                if let Some(&idx) = open.last() {
                    blocks[idx].push_str(text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(&idx) = open.last() {
                    blocks[idx].push('\n');
                }
            }
            _ => {}
        }
    }

    blocks
}

/// Text and link targets outside code blocks, one per line, in document order.
fn link_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    let mut in_code_block = false;

    for event in events {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Start(Tag::Link { dest_url, .. }) => {
                text.push_str(dest_url);
                text.push('\n');
            }
            Event::Text(t) | Event::Code(t) if !in_code_block => {
                text.push_str(t);
                text.push('\n');
            }
            _ => {}
        }
    }

    text
}

/// Rewrite the event stream and render it to HTML.
fn render_events(events: Vec<Event<'_>>, per_block: &[Vec<&Embed>]) -> String {
    let mut out: Vec<Event<'_>> = Vec::with_capacity(events.len());
    let mut next_block = 0;
    // Player markup still owed by each open host block.
    let mut pending: Vec<String> = Vec::new();
    let mut link_depth = 0usize;
    let mut in_code_block = false;

    for event in events {
        match event {
            Event::Start(ref tag) if is_block_start(tag) => {
                // A nested block ends the enclosing item's own text, so its
                // players go here to stay in document order.
                if let Some(players) = pending.last_mut()
                    && !players.is_empty()
                {
                    out.push(Event::Html(std::mem::take(players).into()));
                }
                if is_host_start(tag) {
                    let players = per_block
                        .get(next_block)
                        .map(|embeds| players_html(embeds))
                        .unwrap_or_default();
                    pending.push(players);
                    next_block += 1;
                }
                if matches!(tag, Tag::CodeBlock(_)) {
                    in_code_block = true;
                }
                out.push(event);
            }
            Event::End(ref tag) if is_host_end(tag) => {
                let players = pending.pop().unwrap_or_default();

                if players.is_empty() {
                    out.push(event);
                } else if embeds_inside(tag) {
                    out.push(Event::Html(players.into()));
                    out.push(event);
                } else {
                    out.push(event);
                    out.push(Event::Html(players.into()));
                }
            }
            Event::Start(Tag::Link { .. } | Tag::Image { .. }) => {
                link_depth += 1;
                out.push(event);
            }
            Event::End(TagEnd::Link | TagEnd::Image) => {
                link_depth = link_depth.saturating_sub(1);
                out.push(event);
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                out.push(event);
            }
            Event::Text(text) if link_depth == 0 && !in_code_block => {
                linkify(text, &mut out);
            }
            other => out.push(other),
        }
    }

    let mut html_output = String::with_capacity(out.len() * 32);
    html::push_html(&mut html_output, out.into_iter());
    html_output
}

/// Emit `text`, turning bare URLs into external links.
fn linkify<'a>(text: CowStr<'a>, out: &mut Vec<Event<'a>>) {
    let segments = links::segments(&text);
    if !segments.iter().any(|s| matches!(s, Segment::Url(_))) {
        out.push(Event::Text(text));
        return;
    }

    for segment in segments {
        match segment {
            Segment::Text(t) => out.push(Event::Text(t.to_string().into())),
            Segment::Url(url) => {
                out.push(Event::InlineHtml(links::external_link(url).into_string().into()));
            }
        }
    }
}

/// Concatenated player markup for a block's embeds.
fn players_html(embeds: &[&Embed]) -> String {
    embeds
        .iter()
        .map(|e| embed::video_player(&e.link).into_string())
        .collect()
}
