//! Minimal markdown dialect for chat bubbles.
//!
//! The widget renders only what the agents actually emit: bold via double
//! asterisks and line breaks. Escaping happens first, so the markdown pass
//! operates on already-safe text and its output can be inserted as markup.

use once_cell::sync::Lazy;
use regex::Regex;

/// Bold spans: non-greedy so adjacent pairs don't merge.
static BOLD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("Invalid bold regex pattern"));

/// Escape text for insertion into markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Convert the minimal markdown dialect to HTML: escape, then bold, then
/// newlines to `<br>`.
pub fn markdown_to_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let escaped = escape_html(text);
    let bolded = BOLD_REGEX.replace_all(&escaped, "<strong>$1</strong>");
    bolded.replace('\n', "<br>")
}
