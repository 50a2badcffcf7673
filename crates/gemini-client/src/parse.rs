use std::sync::LazyLock;

use regex::Regex;
use report_core::Source;

use crate::types::GroundingChunk;

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("json fence pattern"));

/// Pull the JSON object out of free-form model output.
///
/// Prefers the body of a ```` ```json ```` fence, then the span from the
/// first `{` to the last `}`, and otherwise returns the trimmed input.
pub fn clean_json_string(text: &str) -> &str {
    if let Some(body) = JSON_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|body| !body.is_empty())
    {
        return body.trim();
    }

    if let (Some(first), Some(last)) = (text.find('{'), text.rfind('}')) {
        if last > first {
            return text[first..=last].trim();
        }
    }

    text.trim()
}

/// Map grounding chunks to citation sources, in order.
///
/// Chunks without a web URI are dropped; a missing title becomes `N/A`.
pub fn extract_sources(chunks: &[GroundingChunk]) -> Vec<Source> {
    chunks
        .iter()
        .map(|chunk| {
            let web = chunk.web.as_ref();
            Source {
                title: web
                    .and_then(|w| w.title.clone())
                    .unwrap_or_else(|| "N/A".to_string()),
                uri: web
                    .and_then(|w| w.uri.clone())
                    .unwrap_or_else(|| "#".to_string()),
            }
        })
        .filter(|source| source.uri != "#")
        .collect()
}
