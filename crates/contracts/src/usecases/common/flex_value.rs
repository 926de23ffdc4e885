use serde::{Deserialize, Serialize};

/// Scalar that vendors send either as a JSON string or as a JSON number
/// (codes and prices are both observed in either form).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlexValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FlexValue {
    /// Numeric value as an `i64`. Floats qualify only when integral and inside
    /// the `i64` range; JSON integers beyond `i64` arrive as floats and fail here.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FlexValue::Integer(v) => Some(*v),
            FlexValue::Float(v)
                if v.is_finite()
                    && v.fract() == 0.0
                    && *v >= i64::MIN as f64
                    && *v < i64::MAX as f64 =>
            {
                Some(*v as i64)
            }
            _ => None,
        }
    }

    /// Trimmed textual form; integral floats lose their fraction (`12.0` -> `"12"`)
    pub fn to_text(&self) -> String {
        match self {
            FlexValue::Text(s) => s.trim().to_string(),
            FlexValue::Float(v) => match self.as_integer() {
                Some(i) => i.to_string(),
                None => v.to_string(),
            },
            FlexValue::Integer(v) => v.to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, FlexValue::Text(s) if s.trim().is_empty())
    }
}

impl From<&str> for FlexValue {
    fn from(value: &str) -> Self {
        FlexValue::Text(value.to_string())
    }
}

impl From<i64> for FlexValue {
    fn from(value: i64) -> Self {
        FlexValue::Integer(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_both_forms() {
        let text: FlexValue = serde_json::from_str(r#"" 1000 ""#).unwrap();
        let number: FlexValue = serde_json::from_str("1000").unwrap();
        let float: FlexValue = serde_json::from_str("1000.0").unwrap();
        assert_eq!(text.to_text(), "1000");
        assert_eq!(number.to_text(), "1000");
        assert_eq!(float.to_text(), "1000");
    }

    #[test]
    fn test_integer_range() {
        assert_eq!(FlexValue::Float(1000.0).as_integer(), Some(1000));
        assert_eq!(FlexValue::Float(1.5).as_integer(), None);
        assert_eq!(FlexValue::Float(1e30).as_integer(), None);
        assert_eq!(FlexValue::Float(f64::NAN).as_integer(), None);
        assert_eq!(FlexValue::from("12").as_integer(), None);

        let huge: FlexValue = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(huge.as_integer(), None);
        assert_eq!(huge.to_text(), "18446744073709552000");
    }

    #[test]
    fn test_blank() {
        assert!(FlexValue::from("  ").is_blank());
        assert!(!FlexValue::from(0).is_blank());
    }
}
