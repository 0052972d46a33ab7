//! Result formatters.
//!
//! Pure functions turning one backend record into a display string. Missing
//! optional fields render documented placeholders; timestamp parsing is
//! defensive and falls back to a fixed-width prefix of the raw value.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::models::{DocResult, LogRecord};

/// Character budget for documentation content before truncation.
pub const DOC_CONTENT_BUDGET: usize = 300;

/// Formats a single log record as a short multi-line block.
#[must_use]
pub fn format_log_record(record: &LogRecord) -> String {
    let timestamp = record
        .timestamp
        .as_deref()
        .map_or_else(|| "unknown time".to_string(), |raw| format_timestamp(raw, "%Y-%m-%d %H:%M:%S", 19));
    let level = record
        .level
        .as_deref()
        .unwrap_or("unknown")
        .to_ascii_uppercase();
    let source = record.source.as_deref().unwrap_or("unknown");
    let message = record.message.as_deref().unwrap_or("");

    let mut out = format!("[{timestamp}] [{level}] {source}\n   {message}");
    if let Some(similarity) = record.similarity {
        out.push_str(&format!("\n   (similarity: {similarity:.3})"));
    }
    out
}

/// Formats a single documentation result as a numbered entry.
#[must_use]
pub fn format_doc_result(index: usize, result: &DocResult) -> String {
    let name = result
        .source
        .as_ref()
        .and_then(|source| source.name.as_deref())
        .unwrap_or("Unknown");
    let content = result.content.as_deref().unwrap_or("");
    let (body, truncated) = truncate_chars(content, DOC_CONTENT_BUDGET);
    let ellipsis = if truncated { "..." } else { "" };
    format!("{index}. **{name}**\n   {body}{ellipsis}")
}

/// Reformats a raw timestamp string, falling back to a prefix of the raw
/// value when it parses as neither RFC 3339 nor `%Y-%m-%d %H:%M:%S`.
#[must_use]
pub fn format_timestamp(raw: &str, format: &str, prefix_len: usize) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Utc).format(format).to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return parsed.format(format).to_string();
    }
    raw.chars().take(prefix_len).collect()
}

/// Truncates to at most `budget` characters on a char boundary.
///
/// Returns the visible slice and whether anything was cut.
#[must_use]
pub fn truncate_chars(text: &str, budget: usize) -> (&str, bool) {
    match text.char_indices().nth(budget) {
        Some((idx, _)) => (&text[..idx], true),
        None => (text, false),
    }
}

/// Formats an integer with `,` thousands separators.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
