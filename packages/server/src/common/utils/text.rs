//! Pure text helpers for titles and rendered markup.
//!
//! These functions contain NO side effects - they take inputs and return
//! outputs without performing any I/O, which keeps them trivially testable.

/// Collapse all runs of whitespace (including newlines) into single spaces
/// and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max_chars` characters, appending "..." when
/// truncation actually happened. Char-based, so multi-byte text is safe.
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}...", truncated.trim_end())
    }
}

/// Capitalize the first letter of each whitespace-separated word and
/// lowercase the rest: "NEW THIS WEEK" -> "New This Week".
pub fn capitalize_words(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape text for inclusion in HTML element content.
pub fn escape_html_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Escape text for inclusion in a double-quoted HTML attribute value.
pub fn escape_html_attr(s: &str) -> String {
    escape_html_text(s).replace('"', "&quot;")
}
