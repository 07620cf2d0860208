//! Formatting and display logic
//!
//! Pure functions for formatting data for human-readable display.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Format an epoch-millis timestamp for the "Last saved" column
///
/// Returns an empty string for missing or out-of-range values.
pub fn format_last_saved(millis: Option<i64>) -> String {
    millis
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .map(|utc| {
            let local: DateTime<Local> = utc.with_timezone(&Local);
            local.format("%Y-%m-%d %H:%M").to_string()
        })
        .unwrap_or_default()
}

/// Same as [`format_last_saved`] but pinned to UTC
///
/// # Examples
/// ```
/// use repotui::logic::formatting::format_last_saved_utc;
///
/// assert_eq!(format_last_saved_utc(Some(0)), "1970-01-01 00:00");
/// assert_eq!(format_last_saved_utc(None), "");
/// ```
pub fn format_last_saved_utc(millis: Option<i64>) -> String {
    millis
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .map(|utc| utc.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Truncate to `max` display columns, marking the cut with an ellipsis
pub fn truncate_to_width(text: &str, max: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
