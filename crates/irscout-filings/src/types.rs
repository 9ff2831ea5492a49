//! Wire types for the filings search response.

use irscout_core::FilingItem;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub total: Option<Total>,
    #[serde(default)]
    pub filings: Vec<RawFiling>,
}

impl SearchResponse {
    pub fn total(&self) -> u64 {
        self.total.as_ref().map_or(0, Total::value)
    }
}

/// The API reports `total` either as a bare count or as `{ "value": n }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Total {
    Count(u64),
    Object {
        #[serde(default)]
        value: u64,
    },
}

impl Total {
    pub fn value(&self) -> u64 {
        match self {
            Total::Count(n) | Total::Object { value: n } => *n,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawFiling {
    #[serde(default)]
    pub filed_at: String,
    #[serde(default)]
    pub form_type: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link_to_filing_details: String,
}

impl From<RawFiling> for FilingItem {
    fn from(raw: RawFiling) -> Self {
        FilingItem {
            date: raw.filed_at.chars().take(10).collect(),
            form_type: raw.form_type.unwrap_or_else(|| "Unknown".to_string()),
            description: raw.description,
            link: raw.link_to_filing_details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_accepts_number_or_object() {
        let bare: SearchResponse = serde_json::from_str(r#"{"total": 7, "filings": []}"#).unwrap();
        assert_eq!(bare.total(), 7);

        let object: SearchResponse =
            serde_json::from_str(r#"{"total": {"value": 3, "relation": "eq"}}"#).unwrap();
        assert_eq!(object.total(), 3);

        let missing: SearchResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.total(), 0);
    }

    #[test]
    fn raw_filing_maps_to_item() {
        let raw: RawFiling = serde_json::from_str(
            r#"{
                "filedAt": "2026-10-14T16:05:12-04:00",
                "formType": "8-K",
                "description": "Form 8-K - Current report",
                "linkToFilingDetails": "https://filings.example/a/8k.htm"
            }"#,
        )
        .unwrap();
        let item = FilingItem::from(raw);
        assert_eq!(item.date, "2026-10-14");
        assert_eq!(item.form_type, "8-K");
        assert_eq!(item.link, "https://filings.example/a/8k.htm");
    }

    #[test]
    fn missing_fields_get_defaults() {
        let raw: RawFiling = serde_json::from_str(r#"{"filedAt": "2026"}"#).unwrap();
        let item = FilingItem::from(raw);
        assert_eq!(item.date, "2026");
        assert_eq!(item.form_type, "Unknown");
        assert!(item.description.is_empty());
        assert!(item.link.is_empty());
    }
}
