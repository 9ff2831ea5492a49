use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Headlines longer than this are cut, counted in characters.
pub const MAX_HEADLINE_CHARS: usize = 150;

/// Where a [`NewsItem`] was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewsSource {
    /// Finance-news syndication feed.
    Aggregate,
    /// Social discussion forum search feed.
    Social,
    /// Heuristic scrape of the company's own IR page.
    #[serde(rename = "OfficialIR")]
    OfficialIr,
}

impl NewsSource {
    /// All sources in their conventional merge order.
    pub const ALL: [NewsSource; 3] = [
        NewsSource::Aggregate,
        NewsSource::Social,
        NewsSource::OfficialIr,
    ];

    /// Short label used in logs and CLI output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            NewsSource::Aggregate => "Aggregate",
            NewsSource::Social => "Social",
            NewsSource::OfficialIr => "OfficialIR",
        }
    }
}

impl std::fmt::Display for NewsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A dated headline about one ticker.
///
/// Items are immutable after construction. Two items are the same story when
/// their `link`s are byte-for-byte equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsItem {
    ticker: String,
    date: NaiveDate,
    headline: String,
    link: String,
    source: NewsSource,
}

impl NewsItem {
    /// Builds an item, collapsing whitespace in `headline` and cutting it to
    /// [`MAX_HEADLINE_CHARS`] characters.
    #[must_use]
    pub fn new(
        ticker: &str,
        date: NaiveDate,
        headline: &str,
        link: &str,
        source: NewsSource,
    ) -> Self {
        Self {
            ticker: ticker.to_string(),
            date,
            headline: truncate_headline(headline),
            link: link.to_string(),
            source,
        }
    }

    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn headline(&self) -> &str {
        &self.headline
    }

    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    #[must_use]
    pub fn source(&self) -> NewsSource {
        self.source
    }
}

fn truncate_headline(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(MAX_HEADLINE_CHARS).collect()
}

/// A regulatory filing as reported by the filings search API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingItem {
    /// Filing date, `YYYY-MM-DD`.
    pub date: String,
    /// Form type such as `10-K` or `8-K`.
    #[serde(rename = "type")]
    pub form_type: String,
    pub description: String,
    pub link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn headline_is_truncated_to_150_chars() {
        let long = "x".repeat(400);
        let item = NewsItem::new(
            "AAPL",
            day(2026, 10, 1),
            &long,
            "https://a.example/1",
            NewsSource::Aggregate,
        );
        assert_eq!(item.headline().chars().count(), MAX_HEADLINE_CHARS);
    }

    #[test]
    fn headline_truncation_respects_multibyte_chars() {
        let long = "é".repeat(200);
        let item = NewsItem::new(
            "AAPL",
            day(2026, 10, 1),
            &long,
            "https://a.example/1",
            NewsSource::Social,
        );
        assert_eq!(item.headline().chars().count(), MAX_HEADLINE_CHARS);
    }

    #[test]
    fn headline_whitespace_is_collapsed() {
        let item = NewsItem::new(
            "AAPL",
            day(2026, 10, 1),
            "  Apple\n\n  reports   results ",
            "https://a.example/1",
            NewsSource::OfficialIr,
        );
        assert_eq!(item.headline(), "Apple reports results");
    }

    #[test]
    fn serializes_date_as_iso_and_source_label() {
        let item = NewsItem::new(
            "NVDA",
            day(2026, 1, 5),
            "Headline",
            "https://n.example/a",
            NewsSource::OfficialIr,
        );
        let json = serde_json::to_value(&item).expect("serializes");
        assert_eq!(json["date"], "2026-01-05");
        assert_eq!(json["source"], "OfficialIR");
        assert_eq!(json["ticker"], "NVDA");
    }

    #[test]
    fn source_display_matches_label() {
        assert_eq!(NewsSource::Aggregate.to_string(), "Aggregate");
        assert_eq!(NewsSource::Social.to_string(), "Social");
        assert_eq!(NewsSource::OfficialIr.to_string(), "OfficialIR");
    }
}
