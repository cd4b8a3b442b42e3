// ABOUTME: Loose date normalization for scraped date strings.
// ABOUTME: Strips ordinal suffixes and converts free-text dates to ISO YYYY-MM-DD.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static ORDINAL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d)(?:st|nd|rd|th)\b").unwrap());
static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").unwrap());
static DAY_MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})\s+([A-Za-z]{3,})\.?,?\s+(\d{4})\b").unwrap());
static MONTH_DAY_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Za-z]{3,})\.?\s+(\d{1,2}),?\s+(\d{4})\b").unwrap());
static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(1\d{3}|2\d{3})\b").unwrap());

/// Removes English ordinal suffixes: "16th November" → "16 November".
pub fn strip_ordinals(s: &str) -> String {
    ORDINAL_SUFFIX.replace_all(s, "$1").into_owned()
}

/// Finds a date inside free text and returns it as `YYYY-MM-DD`.
///
/// Tries ISO dates, then "16 November 2023", then "November 16, 2023", then
/// dateparser on the whole string when it names a year. Falls back to that
/// bare four-digit year.
pub fn to_iso_date(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(caps) = ISO_DATE.captures(s) {
        let date = NaiveDate::from_ymd_opt(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        );
        if let Some(date) = date {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }

    for caps in DAY_MONTH_YEAR.captures_iter(s) {
        let candidate = format!("{} {} {}", &caps[1], &caps[2], &caps[3]);
        if let Ok(date) = NaiveDate::parse_from_str(&candidate, "%d %B %Y") {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }

    for caps in MONTH_DAY_YEAR.captures_iter(s) {
        let candidate = format!("{} {} {}", &caps[2], &caps[1], &caps[3]);
        if let Ok(date) = NaiveDate::parse_from_str(&candidate, "%d %B %Y") {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }

    // dateparser fills missing parts from the clock; only trust it with a year.
    let year = YEAR.captures(s).map(|caps| caps[1].to_string())?;
    if let Ok(dt) = dateparser::parse(s) {
        return Some(dt.date_naive().format("%Y-%m-%d").to_string());
    }

    Some(year)
}
