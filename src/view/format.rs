//! Formatting helpers for page text.

use chrono::DateTime;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Format a count with thousands separators.
///
/// Examples:
/// - `format_count(0)` → "0"
/// - `format_count(66020)` → "66,020"
/// - `format_count(1234567)` → "1,234,567"
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let len = digits.len();
    let mut result = String::with_capacity(len + len / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// One decimal place, as shown on the security score card.
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// Render an RFC 3339 timestamp as `Month D, YYYY`.
///
/// Anything that does not parse is returned unchanged.
pub fn format_published(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.format("%B %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Truncate to at most `max_width` display columns, ending in `…` when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Greedy word wrap to `width` display columns.
///
/// Words wider than a line are kept whole on their own line.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.width() + 1 + word.width() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
