//! Release-date and timestamp parsing.
//!
//! Editors type release dates by hand, so the catalog holds them in whatever
//! shape they were entered. Three encodings are recognized:
//!
//! - `DD.MM.YYYY` (dotted, the display format)
//! - `YYYY-MM-DD` (ISO)
//! - `YYYYMMDD` (eight bare digits, what the form input mask receives)
//!
//! Anything else, including impossible calendar dates, is "no date".

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::types::Game;

/// Parse a release date in any of the accepted encodings.
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Some(date) = parse_dotted(s) {
        return Some(date);
    }
    if let Some(date) = parse_iso(s) {
        return Some(date);
    }
    parse_compact(s)
}

/// `DD.MM.YYYY`
fn parse_dotted(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('.');
    let day = digits(parts.next()?, 2)?;
    let month = digits(parts.next()?, 2)?;
    let year = digits(parts.next()?, 4)?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// `YYYY-MM-DD`
fn parse_iso(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('-');
    let year = digits(parts.next()?, 4)?;
    let month = digits(parts.next()?, 2)?;
    let day = digits(parts.next()?, 2)?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// `YYYYMMDD`
fn parse_compact(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 {
        return None;
    }
    let year = digits(s.get(0..4)?, 4)?;
    let month = digits(s.get(4..6)?, 2)?;
    let day = digits(s.get(6..8)?, 2)?;
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// Parse a fixed-width run of ASCII digits.
fn digits(s: &str, width: usize) -> Option<u32> {
    if s.len() != width || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Format a date the way the storefront displays it (`DD.MM.YYYY`).
pub fn format_release_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Live input mask for the release-date field.
///
/// Non-digits are ignored when counting. Once exactly eight digits have been
/// typed they are rewritten to the dotted display format: read as
/// `YYYYMMDD` when that is a real date, otherwise as `DDMMYYYY`. Every other
/// input is returned unchanged so the editor can keep typing.
pub fn mask_release_date_input(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 8 {
        return input.to_string();
    }
    if let Some(date) = parse_compact(&digits) {
        return format_release_date(date);
    }
    format!("{}.{}.{}", &digits[0..2], &digits[2..4], &digits[4..])
}

/// Current local calendar date.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// A game is free to play when its price is exactly zero.
pub fn is_free_to_play(game: &Game) -> bool {
    game.price == 0.0
}

/// A game is a pre-order when it has a parseable release date after `today`.
///
/// Games releasing today, or with no usable date, are not pre-orders.
pub fn is_pre_order(game: &Game, today: NaiveDate) -> bool {
    game.release_date
        .as_deref()
        .and_then(parse_release_date)
        .is_some_and(|date| date > today)
}

/// Parse a backend timestamp (`created_at`, `purchased_at`).
///
/// Accepts RFC 3339 with an offset, naive ISO date-times with or without
/// fractional seconds (what the backend emits), and plain dates.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    parse_release_date(s).map(|d| d.and_time(NaiveTime::MIN))
}

#[cfg(test)]
#[path = "tests/dates_tests.rs"]
mod tests;
