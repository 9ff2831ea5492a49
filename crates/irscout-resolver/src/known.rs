//! Curated IR pages for well-known tickers.

const KNOWN_IR_PAGES: &[(&str, &str)] = &[
    ("NVDA", "https://nvidianews.nvidia.com/"),
    ("TSLA", "https://ir.tesla.com"),
    ("AAPL", "https://www.apple.com/newsroom/"),
    ("AMZN", "https://ir.aboutamazon.com"),
    ("MSFT", "https://www.microsoft.com/en-us/investor"),
    ("META", "https://investor.fb.com"),
    ("GOOG", "https://abc.xyz/investor"),
    ("GOOGL", "https://abc.xyz/investor"),
    ("AMD", "https://ir.amd.com"),
    ("GME", "https://news.gamestop.com/"),
    ("PETV", "https://www.petv.com/investors/"),
    ("PLTR", "https://investors.palantir.com"),
    ("SOFI", "https://investors.sofi.com"),
    ("RKLB", "https://investors.rocketlabusa.com"),
];

/// Curated IR page for an uppercase ticker.
#[must_use]
pub fn known_ir_page(ticker: &str) -> Option<&'static str> {
    KNOWN_IR_PAGES
        .iter()
        .find(|(symbol, _)| *symbol == ticker)
        .map(|(_, url)| *url)
}

#[cfg(test)]
mod tests {
    use super::known_ir_page;

    #[test]
    fn nvda_is_known() {
        assert_eq!(known_ir_page("NVDA"), Some("https://nvidianews.nvidia.com/"));
    }

    #[test]
    fn lookup_is_case_sensitive_on_normalized_input() {
        assert!(known_ir_page("nvda").is_none());
        assert!(known_ir_page("ZZZZ").is_none());
    }
}
