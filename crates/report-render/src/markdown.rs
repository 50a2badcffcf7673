//! Markdown-ish prose to HTML
//!
//! Model output uses a small informal subset of markdown: `**bold**`,
//! `*italic*`, `*`/`-` bullet lines, blank-line paragraphs, parenthesised
//! bare URLs and numeric citation markers such as `[1]` or `[2, 3]`.
//! Rendering is a fixed sequence of string rewrites. Input is escaped first,
//! so every tag in the output is one this module emitted.
//!
//! Rendering never fails: malformed markers degrade to literal text.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use report_core::Source;

use crate::escape::{escape_html, SLOT_CLOSE, SLOT_OPEN};

const LINK_ATTRS: &str =
    r#"target="_blank" rel="noopener noreferrer" class="text-blue-400 hover:underline""#;

static CITATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([0-9,\s]+)\]").expect("citation pattern"));

static CITATION_SLOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{E000}([0-9]+)\x{E001}").expect("citation slot pattern"));

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern"));

// The opener must touch its text, so a leading "* " bullet is never read as one.
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^\s*].*?)\*").expect("italic pattern"));

static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[*-][ \t]+(.*)$").expect("list item pattern"));

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("paragraph break pattern"));

static BARE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((https?://[^\s)<\x{E000}]+)\)").expect("bare url pattern")
});

/// Render model prose to an HTML fragment.
///
/// Citation markers are 1-based positions into `sources`. A marker that
/// points past the end of the list keeps its number as plain text.
/// Empty input renders to an empty string.
pub fn render_markdown(text: &str, sources: &[Source]) -> String {
    if text.is_empty() {
        return String::new();
    }

    let normalized = text.replace("\r\n", "\n");
    let escaped = escape_html(&normalized);
    let (html, citations) = resolve_citations(&escaped, sources);
    let html = apply_bold(&html);
    let html = apply_italic(&html);
    let html = mark_list_items(&html);
    let html = group_list_items(&html);
    let html = split_paragraphs(&html);
    let html = link_bare_urls(&html);
    fill_citation_slots(&html, &citations)
}

/// One number inside a citation marker.
#[derive(Debug, PartialEq)]
struct CitationRef {
    label: String,
    index: Option<usize>,
}

impl CitationRef {
    /// Reads the leading digits of a trimmed token; `None` when there are none.
    fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        let end = token
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(token.len());
        let digits = &token[..end];
        if digits.is_empty() {
            return None;
        }

        let label = match digits.trim_start_matches('0') {
            "" => "0",
            significant => significant,
        };
        let index = label.parse::<usize>().ok().and_then(|n| n.checked_sub(1));

        Some(Self {
            label: label.to_string(),
            index,
        })
    }

    fn to_html(&self, sources: &[Source]) -> String {
        match self.index.and_then(|i| sources.get(i)) {
            Some(source) => format!(
                r#"<a href="{}" {LINK_ATTRS} title="{}">{}</a>"#,
                escape_html(&source.uri),
                escape_html(&source.title),
                self.label
            ),
            None => self.label.clone(),
        }
    }
}

/// Replaces each citation marker with a slot token and returns the rendered
/// markup per slot.
///
/// The markup carries source titles and URIs inside attributes; keeping it
/// out of the text until the end stops the emphasis and link passes from
/// rewriting attribute values.
fn resolve_citations(text: &str, sources: &[Source]) -> (String, Vec<String>) {
    let mut citations = Vec::new();
    let html = CITATION
        .replace_all(text, |caps: &Captures| {
            let refs: Vec<CitationRef> = caps[1].split(',').filter_map(CitationRef::parse).collect();
            if refs.is_empty() {
                return caps[0].to_string();
            }

            let links = refs
                .iter()
                .map(|r| r.to_html(sources))
                .collect::<Vec<_>>()
                .join(", ");
            citations.push(format!("<sup>[{links}]</sup>"));
            format!("{SLOT_OPEN}{}{SLOT_CLOSE}", citations.len() - 1)
        })
        .into_owned();

    (html, citations)
}

fn apply_bold(text: &str) -> String {
    BOLD.replace_all(text, "<strong>${1}</strong>").into_owned()
}

fn apply_italic(text: &str) -> String {
    ITALIC.replace_all(text, "<em>${1}</em>").into_owned()
}

fn mark_list_items(text: &str) -> String {
    LIST_ITEM.replace_all(text, "<li>${1}</li>").into_owned()
}

fn is_list_item(line: &str) -> bool {
    line.starts_with("<li>") && line.ends_with("</li>")
}

fn is_list(line: &str) -> bool {
    line.starts_with("<ul>") && line.ends_with("</ul>")
}

/// Collapses each run of consecutive item lines into a single `<ul>` line.
fn group_list_items(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut items = String::new();

    for line in text.split('\n') {
        if is_list_item(line) {
            items.push_str(line);
            continue;
        }
        if !items.is_empty() {
            lines.push(format!("<ul>{items}</ul>"));
            items.clear();
        }
        lines.push(line.to_string());
    }
    if !items.is_empty() {
        lines.push(format!("<ul>{items}</ul>"));
    }

    lines.join("\n")
}

/// Wraps blank-line separated blocks in `<p>`, single newlines become `<br>`.
/// Lists are block-level and stay outside paragraphs.
fn split_paragraphs(text: &str) -> String {
    let mut html = String::with_capacity(text.len() + 32);

    for block in BLANK_LINES.split(text) {
        let mut lines: Vec<&str> = Vec::new();
        for line in block.split('\n') {
            if is_list(line) {
                push_paragraph(&mut html, &mut lines);
                html.push_str(line);
            } else {
                lines.push(line);
            }
        }
        push_paragraph(&mut html, &mut lines);
    }

    html
}

fn push_paragraph(html: &mut String, lines: &mut Vec<&str>) {
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    if let (Some(first), Some(last)) = (first, last) {
        html.push_str("<p>");
        html.push_str(&lines[first..=last].join("<br>"));
        html.push_str("</p>");
    }
    lines.clear();
}

fn link_bare_urls(text: &str) -> String {
    BARE_URL
        .replace_all(text, |caps: &Captures| {
            format!(r#" <a href="{}" {LINK_ATTRS}>[Link]</a>"#, &caps[1])
        })
        .into_owned()
}

fn fill_citation_slots(text: &str, citations: &[String]) -> String {
    if citations.is_empty() {
        return text.to_string();
    }

    CITATION_SLOT
        .replace_all(text, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| citations.get(i))
                .cloned()
                .unwrap_or_default()
        })
        .into_owned()
}
