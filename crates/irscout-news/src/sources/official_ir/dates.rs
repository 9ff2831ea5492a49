//! Loose date recognition for free text on IR pages.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

const MONTH_TOKENS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

static DATE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,2},?\s+\d{4}|\b\d{4}-\d{2}-\d{2}\b").expect("valid date shape regex")
});

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").expect("valid ISO date regex")
});

static MONTH_DAY_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})\b",
    )
    .expect("valid month-day-year regex")
});

static DAY_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?\s+(\d{4})\b",
    )
    .expect("valid day-month-year regex")
});

/// Cheap pre-filter: the text has a date shape and a month name or a hyphen.
#[must_use]
pub fn looks_like_date(text: &str) -> bool {
    if !DATE_SHAPE.is_match(text) {
        return false;
    }
    let lower = text.to_lowercase();
    lower.contains('-') || MONTH_TOKENS.iter().any(|m| lower.contains(m))
}

/// Extracts the earliest-positioned date in `text`.
///
/// Understands `2026-10-14`, `Oct 14, 2026`, `October 14th 2026` and
/// `14 Oct. 2026`. Returns `None` when nothing parses to a real calendar day.
#[must_use]
pub fn parse_lenient_date(text: &str) -> Option<NaiveDate> {
    let iso = ISO_DATE.captures(text).and_then(|c| {
        let start = c.get(0)?.start();
        let month = month_number(c.get(2)?.as_str())?;
        let date = ymd(c.get(1)?.as_str(), month, c.get(3)?.as_str())?;
        Some((start, date))
    });

    let month_first = MONTH_DAY_YEAR.captures(text).and_then(|c| {
        let start = c.get(0)?.start();
        let month = month_from_name(c.get(1)?.as_str())?;
        let date = ymd(c.get(3)?.as_str(), month, c.get(2)?.as_str())?;
        Some((start, date))
    });

    let day_first = DAY_MONTH_YEAR.captures(text).and_then(|c| {
        let start = c.get(0)?.start();
        let month = month_from_name(c.get(2)?.as_str())?;
        let date = ymd(c.get(3)?.as_str(), month, c.get(1)?.as_str())?;
        Some((start, date))
    });

    [iso, month_first, day_first]
        .into_iter()
        .flatten()
        .min_by_key(|(start, _)| *start)
        .map(|(_, date)| date)
}

fn month_number(raw: &str) -> Option<u32> {
    raw.parse().ok()
}

fn month_from_name(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    let index = MONTH_TOKENS.iter().position(|m| *m == prefix)?;
    u32::try_from(index + 1).ok()
}

fn ymd(year: &str, month: u32, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, day.parse().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn shape_filter_needs_month_or_hyphen() {
        assert!(looks_like_date("October 14, 2026"));
        assert!(looks_like_date("Posted 2026-10-14"));
        assert!(looks_like_date("Oct 3 2026 press release"));
        assert!(!looks_like_date("Call us at 12 2026"));
        assert!(!looks_like_date("Acme Corp. All rights reserved."));
        assert!(!looks_like_date("© 2026 Acme"));
    }

    #[test]
    fn parses_common_formats() {
        assert_eq!(parse_lenient_date("2026-10-14"), Some(day(2026, 10, 14)));
        assert_eq!(parse_lenient_date("Oct 14, 2026"), Some(day(2026, 10, 14)));
        assert_eq!(parse_lenient_date("October 14th, 2026"), Some(day(2026, 10, 14)));
        assert_eq!(parse_lenient_date("Sept. 2 2026"), Some(day(2026, 9, 2)));
        assert_eq!(parse_lenient_date("14 Oct 2026"), Some(day(2026, 10, 14)));
        assert_eq!(parse_lenient_date("3rd March, 2026"), Some(day(2026, 3, 3)));
    }

    #[test]
    fn picks_date_embedded_in_surrounding_text() {
        assert_eq!(
            parse_lenient_date("Press Release | Oct 12, 2026 | Acme announces pricing"),
            Some(day(2026, 10, 12))
        );
    }

    #[test]
    fn earliest_date_in_text_wins() {
        assert_eq!(
            parse_lenient_date("2026-10-01 (updated Oct 9, 2026)"),
            Some(day(2026, 10, 1))
        );
    }

    #[test]
    fn impossible_dates_are_rejected() {
        assert_eq!(parse_lenient_date("Feb 30, 2026"), None);
        assert_eq!(parse_lenient_date("2026-13-01"), None);
        assert_eq!(parse_lenient_date("no date here"), None);
    }
}
