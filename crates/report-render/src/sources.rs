use report_core::Source;

use crate::escape::escape_html;

/// Bulleted list of every source, in citation order.
///
/// Returns an empty string when there is nothing to list so callers can skip
/// the whole section.
pub fn render_sources_list(sources: &[Source]) -> String {
    if sources.is_empty() {
        return String::new();
    }

    let items: String = sources
        .iter()
        .map(|source| {
            format!(
                r#"<li><a href="{}" target="_blank" rel="noopener noreferrer" class="text-blue-400 hover:text-blue-300 hover:underline">{}</a></li>"#,
                escape_html(&source.uri),
                escape_html(&source.title)
            )
        })
        .collect();

    format!(r#"<ul class="list-disc pl-5 space-y-2 text-gray-300">{items}</ul>"#)
}
