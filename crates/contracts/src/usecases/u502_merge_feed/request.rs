use crate::usecases::common::FlexValue;
use serde::{Deserialize, Serialize};

/// One flat record of the B2B feed. The commercial code arrives either as
/// `tegaratCode` or as `commercial_code`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedRecord {
    #[serde(rename = "commercial_code", alias = "tegaratCode", default)]
    pub commercial_code: Option<FlexValue>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<FlexValue>,
    #[serde(rename = "internal_code", alias = "ekhtesasiCode", default)]
    pub internal_code: Option<FlexValue>,
}

impl FeedRecord {
    /// Commercial code if present and not blank
    pub fn commercial_code(&self) -> Option<String> {
        self.commercial_code
            .as_ref()
            .map(FlexValue::to_text)
            .filter(|code| !code.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_code_spellings() {
        let a: FeedRecord = serde_json::from_str(r#"{"tegaratCode": "C1", "price": 500}"#).unwrap();
        let b: FeedRecord =
            serde_json::from_str(r#"{"commercial_code": "C1", "name": "Oil"}"#).unwrap();
        assert_eq!(a.commercial_code().as_deref(), Some("C1"));
        assert_eq!(b.commercial_code().as_deref(), Some("C1"));
        assert!(a.name.is_none());
    }

    #[test]
    fn test_blank_code_is_missing() {
        let r: FeedRecord = serde_json::from_str(r#"{"tegaratCode": "  "}"#).unwrap();
        assert!(r.commercial_code().is_none());
    }
}
