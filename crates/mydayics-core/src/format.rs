//! Text helpers shared by the classifier and the preview output.

use std::borrow::Cow;

use crate::event::EventRecord;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Bullet used by [`bulletize`].
pub const BULLET: &str = "•";

/// Truncates a string to `max_len` characters, ending with [`ELLIPSIS`] when cut.
///
/// The returned string never exceeds `max_len` characters. Limits too small
/// to hold the marker get a plain cut.
pub fn ellipsis(s: &str, max_len: usize) -> Cow<'_, str> {
    if s.chars().count() <= max_len {
        return Cow::Borrowed(s);
    }

    if max_len <= ELLIPSIS.len() {
        return Cow::Owned(s.chars().take(max_len).collect());
    }

    let truncated: String = s.chars().take(max_len - ELLIPSIS.len()).collect();
    Cow::Owned(format!("{}{}", truncated, ELLIPSIS))
}

/// Joins items as a bulleted list, one per line.
pub fn bulletize(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("{} {}", BULLET, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One preview line: `2026-02-10 09:00-10:00  Subject  @ Location`.
///
/// Times are shown as written by the provider, offsets dropped. Unrenderable
/// timestamps fall back to their raw text.
pub fn preview_line(record: &EventRecord, max_subject: usize) -> String {
    let start = record
        .start
        .wall_clock()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| record.start.to_string());
    let end = record
        .end
        .wall_clock()
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| record.end.to_string());

    format!(
        "{}-{}  {}  @ {}",
        start,
        end,
        ellipsis(&record.subject, max_subject),
        record.location_or_placeholder()
    )
}
