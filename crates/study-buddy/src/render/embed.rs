//! Video-title marker detection and YouTube player embedding.
//!
//! Generated plans list their videos as a title line ("YouTube Video #1:
//! Intro to Limits") followed somewhere later by a watch URL. Markers and
//! links are paired in document order: the first marker gets the first
//! distinct video, the second marker the second, and so on. Surplus markers
//! or links are left alone.

use std::collections::HashSet;
use std::sync::LazyLock;

use maud::{Markup, html};
use regex::Regex;

/// Matches "video #N", or "video N" followed by a title separator or the end
/// of the line, optionally preceded by "YouTube".
///
/// A bare number followed by more prose ("video 2 concepts") is not a marker.
static MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)\b(?:youtube\s+)?video\s*(?:#\s*(\d+)|(\d+)(?:\s*[:\-–—()]|\.(?:\s|$)|[ \t]*$))")
        .expect("marker regex should compile")
});

/// Matches full-length YouTube watch URLs and captures the video id.
static YOUTUBE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://www\.youtube\.com/watch\?v=([a-zA-Z0-9_-]+)")
        .expect("YouTube regex should compile")
});

/// Permissions granted to the embedded player.
const PLAYER_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

/// A "video N" title marker found in text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMarker {
    /// The number after "video".
    pub number: u32,
    /// The matched marker text.
    pub text: String,
}

/// A YouTube video referenced by a watch URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YoutubeLink {
    /// The `v=` parameter.
    pub video_id: String,
}

impl YoutubeLink {
    /// The URL the player iframe loads.
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.video_id)
    }
}

/// A marker paired with the video that will be embedded after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub marker: VideoMarker,
    pub link: YoutubeLink,
}

/// Marker-to-video pairing for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedPlan {
    embeds: Vec<Embed>,
}

impl EmbedPlan {
    /// Pair markers with links in document order.
    ///
    /// Each link is used at most once, so the i-th marker receives the i-th
    /// link. With no markers or no links the plan is empty.
    pub fn new(markers: Vec<VideoMarker>, links: Vec<YoutubeLink>) -> Self {
        let embeds = markers
            .into_iter()
            .zip(links)
            .map(|(marker, link)| Embed { marker, link })
            .collect();
        Self { embeds }
    }

    /// Paired embeds in document order.
    pub fn embeds(&self) -> &[Embed] {
        &self.embeds
    }

    pub fn len(&self) -> usize {
        self.embeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.embeds.is_empty()
    }
}

/// Find every video-title marker in `text`, in order.
pub fn find_markers(text: &str) -> Vec<VideoMarker> {
    MARKER_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let number = caps.get(1).or_else(|| caps.get(2))?.as_str().parse().ok()?;
            Some(VideoMarker {
                number,
                text: caps[0].trim_end().to_string(),
            })
        })
        .collect()
}

/// Find YouTube watch links in `text`, in order of first appearance.
///
/// A video that appears more than once (e.g., as both link text and link
/// target) is reported once.
pub fn find_youtube_links(text: &str) -> Vec<YoutubeLink> {
    let mut seen = HashSet::new();
    YOUTUBE_REGEX
        .captures_iter(text)
        .filter(|caps| seen.insert(caps[1].to_string()))
        .map(|caps| YoutubeLink {
            video_id: caps[1].to_string(),
        })
        .collect()
}

/// Render a responsive 16:9 YouTube player for `link`.
pub fn video_player(link: &YoutubeLink) -> Markup {
    html! {
        div class="video-container" {
            iframe
                width="560"
                height="315"
                src=(link.embed_url())
                title="YouTube video player"
                frameborder="0"
                allow=(PLAYER_ALLOW)
                allowfullscreen="" {}
        }
    }
}
