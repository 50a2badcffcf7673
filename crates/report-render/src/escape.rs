/// Characters reserved by the markdown pipeline for its own bookkeeping.
/// Input occurrences are entity-encoded so they can never collide.
pub(crate) const SLOT_OPEN: char = '\u{E000}';
pub(crate) const SLOT_CLOSE: char = '\u{E001}';

/// Escape text for use in HTML element content or a quoted attribute value.
///
/// Covers `& < > " '`, with `&` handled first so entities are never
/// double-escaped.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            SLOT_OPEN => out.push_str("&#57344;"),
            SLOT_CLOSE => out.push_str("&#57345;"),
            other => out.push(other),
        }
    }
    out
}
