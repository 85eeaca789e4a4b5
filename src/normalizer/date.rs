//! Tolerant timestamp parsing for feed dates.
//!
//! RSS feeds use RFC 822/1123 style dates, Atom uses RFC 3339, and real
//! feeds mix in whatever their generator felt like. [`parse_date`] tries a
//! fixed list of layouts in order and returns the first one that matches.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

use crate::app::{FeedbellError, Result};

#[derive(Debug, Clone, Copy)]
enum Layout {
    /// chrono pattern whose last field is a numeric `%z` offset.
    Offset(&'static str),
    /// chrono pattern followed by a whitespace separated zone abbreviation.
    Named(&'static str),
    /// RFC 3339, with or without fractional seconds.
    Rfc3339,
    /// chrono pattern without any zone information, read as UTC.
    Naive(&'static str),
}

/// Known layouts in priority order. The leading weekday of RFC 1123 dates
/// is stripped before matching, so the patterns start at the day of month.
const LAYOUTS: &[Layout] = &[
    Layout::Offset("%d %b %Y %H:%M:%S %z"),
    Layout::Named("%d %b %Y %H:%M:%S"),
    Layout::Named("%d %b %y %H:%M"),
    Layout::Offset("%d %b %y %H:%M %z"),
    Layout::Rfc3339,
    Layout::Naive("%Y-%m-%d %H:%M:%S"),
];

/// Parse a feed timestamp into an absolute UTC instant.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();
    let undecorated = strip_weekday(trimmed);

    LAYOUTS
        .iter()
        .find_map(|layout| layout.parse(undecorated))
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| FeedbellError::DateParse(input.to_string()))
}

impl Layout {
    fn parse(self, s: &str) -> Option<DateTime<FixedOffset>> {
        match self {
            Layout::Offset(pattern) => DateTime::parse_from_str(s, pattern).ok(),
            Layout::Named(pattern) => {
                let (head, zone) = s.rsplit_once(char::is_whitespace)?;
                let offset = zone_offset(zone)?;
                let naive = NaiveDateTime::parse_from_str(head.trim_end(), pattern).ok()?;
                naive.and_local_timezone(offset).single()
            }
            Layout::Rfc3339 => DateTime::parse_from_rfc3339(s).ok(),
            Layout::Naive(pattern) => NaiveDateTime::parse_from_str(s, pattern)
                .ok()
                .map(|naive| naive.and_utc().fixed_offset()),
        }
    }
}

/// Drop a leading `"Mon, "` style weekday.
///
/// chrono rejects dates whose weekday disagrees with the calendar, and feed
/// generators get the weekday wrong often enough that it is ignored here.
fn strip_weekday(s: &str) -> &str {
    match s.split_once(',') {
        Some((day, rest)) if !day.is_empty() && day.chars().all(|c| c.is_ascii_alphabetic()) => {
            rest.trim_start()
        }
        _ => s,
    }
}

/// Offset for a zone abbreviation. Unknown alphabetic abbreviations are
/// read as UTC; anything that is not an abbreviation does not match.
fn zone_offset(zone: &str) -> Option<FixedOffset> {
    if zone.is_empty() || !zone.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let hours = match zone.to_ascii_uppercase().as_str() {
        "EDT" => -4,
        "EST" | "CDT" => -5,
        "CST" | "MDT" => -6,
        "MST" | "PDT" => -7,
        "PST" => -8,
        _ => 0,
    };

    FixedOffset::east_opt(hours * 3600)
}
