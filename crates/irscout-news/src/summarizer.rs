//! Keyword-based one-line digest of news and filings.

use irscout_core::{FilingItem, NewsItem};

/// Topic buckets, in the order they are tried and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Financials,
    Dividends,
    Strategic,
    Operations,
    Regulatory,
    Equity,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Financials,
        Category::Dividends,
        Category::Strategic,
        Category::Operations,
        Category::Regulatory,
        Category::Equity,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Financials => "Financials",
            Category::Dividends => "Dividends",
            Category::Strategic => "Strategic",
            Category::Operations => "Operations",
            Category::Regulatory => "Regulatory",
            Category::Equity => "Equity",
        }
    }

    /// Lowercase substrings that place a text in this category.
    #[must_use]
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Financials => &[
                "earnings", "quarterly", "result", "revenue", "eps", "fiscal", "profit", "loss",
                "income",
            ],
            Category::Dividends => &["dividend", "yield", "distribution", "payout"],
            Category::Strategic => &[
                "merger",
                "acquisition",
                "m&a",
                "purchase",
                "divestiture",
                "partnership",
                "alliance",
                "deal",
                "agreement",
            ],
            Category::Operations => &[
                "expansion",
                "hiring",
                "layoff",
                "facility",
                "manufacturing",
                "launch",
                "product",
            ],
            Category::Regulatory => &[
                "sec",
                "filing",
                "10-k",
                "10-q",
                "8-k",
                "litigation",
                "settlement",
                "audit",
                "non-compliance",
                "edgar",
            ],
            Category::Equity => &[
                "buyback", "offering", "share", "stock", "split", "warrants", "capital", "shelf",
            ],
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// First category whose keywords appear in `text`, case-insensitively.
#[must_use]
pub fn categorize(text: &str) -> Option<Category> {
    let lower = text.to_lowercase();
    Category::ALL
        .into_iter()
        .find(|category| category.keywords().iter().any(|kw| lower.contains(kw)))
}

/// Counts items per category, e.g. `"2 Financials | 1 Equity"`.
///
/// Returns an empty string when there is nothing to summarize and
/// `"<n> News Updates"` when no item matched any category.
#[must_use]
pub fn summarize(news: &[NewsItem], filings: &[FilingItem]) -> String {
    let total = news.len() + filings.len();
    if total == 0 {
        return String::new();
    }

    let texts = news
        .iter()
        .map(|n| n.headline().to_string())
        .chain(
            filings
                .iter()
                .map(|f| format!("{} {}", f.form_type, f.description)),
        );

    let mut counts = [0usize; Category::ALL.len()];
    for text in texts {
        if let Some(category) = categorize(&text) {
            counts[category as usize] += 1;
        }
    }

    let parts: Vec<String> = Category::ALL
        .iter()
        .zip(counts)
        .filter(|(_, n)| *n > 0)
        .map(|(category, n)| format!("{n} {category}"))
        .collect();

    if parts.is_empty() {
        format!("{total} News Updates")
    } else {
        parts.join(" | ")
    }
}
