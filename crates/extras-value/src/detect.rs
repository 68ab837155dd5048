//! String classifiers consumed by the transform engine

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use regex::Regex;

use crate::pattern::Pattern;

/// `%r/<source>/<flags>` inline regular-expression literal.
pub static REGEXP_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^%r/(.+)/([gims]*)$").unwrap());

/// ISO-8601-like date-time: minutes required, seconds and fraction optional,
/// zone optional (`Z` or `±HH:MM`).
pub static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4}-[01]\d-[0-3]\dT[0-2]\d:[0-5]\d(?::[0-5]\d(?:\.\d+)?)?)(Z|[+-][0-2]\d:[0-5]\d)?$",
    )
    .unwrap()
});

/// Whether `text` is written in the inline regular-expression literal syntax.
pub fn is_regexp(text: &str) -> bool {
    REGEXP_LITERAL.is_match(text)
}

/// Compile an inline regular-expression literal.
///
/// Returns `None` when the text is not a literal or the pattern does not
/// compile.
pub fn parse_regexp(text: &str) -> Option<Pattern> {
    let caps = REGEXP_LITERAL.captures(text)?;
    Pattern::new(&caps[1], &caps[2]).ok()
}

/// Whether `text` has the shape of a date-time (it may still fail to parse as
/// a calendar date).
pub fn is_date(text: &str) -> bool {
    DATE_TIME.is_match(text)
}

/// Parse a date-time into an instant.
///
/// Text without a zone designator is read as UTC.
pub fn parse_date(text: &str) -> Option<DateTime<FixedOffset>> {
    let caps = DATE_TIME.captures(text)?;
    let local = &caps[1];

    // "YYYY-MM-DDTHH:MM" is 16 bytes; pad missing seconds
    let local = if local.len() == 16 {
        format!("{local}:00")
    } else {
        local.to_string()
    };
    let naive = NaiveDateTime::parse_from_str(&local, "%Y-%m-%dT%H:%M:%S%.f").ok()?;

    let offset = match caps.get(2).map(|m| m.as_str()) {
        None | Some("Z") => FixedOffset::east_opt(0)?,
        Some(zone) => parse_offset(zone)?,
    };
    offset.from_local_datetime(&naive).single()
}

fn parse_offset(zone: &str) -> Option<FixedOffset> {
    let sign = if zone.starts_with('-') { -1 } else { 1 };
    let hours: i32 = zone.get(1..3)?.parse().ok()?;
    let minutes: i32 = zone.get(4..6)?.parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
