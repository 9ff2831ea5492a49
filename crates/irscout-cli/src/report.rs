//! Output shapes for the CLI commands.

use std::fmt;

use irscout_core::{FilingItem, NewsItem};
use serde::Serialize;

/// Everything gathered for one ticker.
#[derive(Debug, Serialize)]
pub(crate) struct TickerReport {
    pub ticker: String,
    pub ir_url: String,
    pub summary: String,
    pub news: Vec<NewsItem>,
    pub filings: Vec<FilingItem>,
}

impl fmt::Display for TickerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}  {}", self.ticker, self.ir_url)?;
        if self.summary.is_empty() {
            writeln!(f, "  Summary: no recent activity")?;
        } else {
            writeln!(f, "  Summary: {}", self.summary)?;
        }

        if !self.news.is_empty() {
            writeln!(f, "  News ({}):", self.news.len())?;
            for item in &self.news {
                writeln!(
                    f,
                    "    {}  {:<10}  {}",
                    item.date(),
                    item.source().label(),
                    item.headline()
                )?;
                writeln!(f, "    {:<10}  {:<10}  {}", "", "", item.link())?;
            }
        }

        if !self.filings.is_empty() {
            writeln!(f, "  Filings ({}):", self.filings.len())?;
            for filing in &self.filings {
                writeln!(
                    f,
                    "    {:<10}  {:<10}  {}",
                    filing.date, filing.form_type, filing.description
                )?;
                writeln!(f, "    {:<10}  {:<10}  {}", "", "", filing.link)?;
            }
        }

        writeln!(f)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ResolvedTicker {
    pub ticker: String,
    pub ir_url: String,
}

impl fmt::Display for ResolvedTicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.ticker, self.ir_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use irscout_core::NewsSource;

    fn sample() -> TickerReport {
        TickerReport {
            ticker: "ACME".to_string(),
            ir_url: "https://ir.acme.example".to_string(),
            summary: "1 Financials | 1 Regulatory".to_string(),
            news: vec![NewsItem::new(
                "ACME",
                NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
                "Acme Reports Third Quarter Results",
                "https://ir.acme.example/q3",
                NewsSource::OfficialIr,
            )],
            filings: vec![FilingItem {
                date: "2026-10-14".to_string(),
                form_type: "8-K".to_string(),
                description: "Current report".to_string(),
                link: "https://filings.example/8k.htm".to_string(),
            }],
        }
    }

    #[test]
    fn text_report_lists_news_and_filings() {
        let text = sample().to_string();
        assert!(text.starts_with("ACME  https://ir.acme.example\n"));
        assert!(text.contains("  Summary: 1 Financials | 1 Regulatory\n"));
        assert!(text.contains("2026-10-14  OfficialIR  Acme Reports Third Quarter Results"));
        assert!(text.contains("  Filings (1):\n"));
        assert!(text.contains("2026-10-14  8-K         Current report"));
    }

    #[test]
    fn empty_report_says_no_activity() {
        let report = TickerReport {
            news: Vec::new(),
            filings: Vec::new(),
            summary: String::new(),
            ..sample()
        };
        let text = report.to_string();
        assert!(text.contains("no recent activity"));
        assert!(!text.contains("News ("));
    }

    #[test]
    fn json_uses_wire_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["news"][0]["source"], "OfficialIR");
        assert_eq!(value["news"][0]["date"], "2026-10-14");
        assert_eq!(value["filings"][0]["type"], "8-K");
    }

    #[test]
    fn resolved_ticker_is_tab_separated() {
        let entry = ResolvedTicker {
            ticker: "TSLA".to_string(),
            ir_url: "https://ir.tesla.com".to_string(),
        };
        assert_eq!(entry.to_string(), "TSLA\thttps://ir.tesla.com");
    }
}
