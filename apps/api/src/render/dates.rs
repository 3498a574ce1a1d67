//! Date display for entry sub-lines.

use chrono::NaiveDate;

/// Literal shown in place of the end date of an ongoing entry.
pub const PRESENT: &str = "Present";

/// Formats a stored date value as `"Month YYYY"`.
///
/// Accepts `YYYY-MM-DD` (what a date input produces) and `YYYY-MM`. Blank input
/// gives an empty string; anything unparseable is shown as entered.
pub fn format_month_year(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    parse_date(raw)
        .map(|date| date.format("%B %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d"))
        .ok()
}

/// Builds the `"start - end"` part of an entry sub-line.
///
/// `ongoing` replaces the end with [`PRESENT`] whatever the stored end date is.
/// Returns `None` when neither end has anything to show. A lone start is shown
/// alone; a lone end keeps its leading `"- "` so it never reads as a start.
pub fn date_range(start: &str, end: &str, ongoing: bool) -> Option<String> {
    let start = format_month_year(start);
    let end = if ongoing {
        PRESENT.to_string()
    } else {
        format_month_year(end)
    };

    match (start.is_empty(), end.is_empty()) {
        (true, true) => None,
        (false, true) => Some(start),
        (true, false) => Some(format!("- {end}")),
        (false, false) => Some(format!("{start} - {end}")),
    }
}
