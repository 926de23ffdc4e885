use contracts::usecases::common::FlexValue;
use contracts::usecases::u501_ingest_catalog::ProductPayload;

const WARRANTY_MARKER: &str = "گارانتی";
const WARRANTY_PLUS: &str = "گارانتی پلاس";

/// Product that passed validation and is ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct ValidProduct {
    pub name: String,
    pub internal_code: String,
    pub commercial_code: String,
    pub price: i64,
    pub description: Option<String>,
    pub cars: Vec<String>,
}

/// Maps Persian and Arabic-Indic digits to ASCII and drops digit-group separators
pub fn normalize_digits(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ',' | '٬' | '_') && !c.is_whitespace())
        .map(|c| match c {
            '۰'..='۹' => char::from(b'0' + (c as u32 - '۰' as u32) as u8),
            '٠'..='٩' => char::from(b'0' + (c as u32 - '٠' as u32) as u8),
            other => other,
        })
        .collect()
}

/// Parses a price sent as a number or as text into a non-negative integer
pub fn parse_price(value: &FlexValue) -> Result<i64, String> {
    let price = match value {
        FlexValue::Integer(v) => *v,
        FlexValue::Float(v) => value
            .as_integer()
            .ok_or_else(|| format!("Price '{}' is not an integer", v))?,
        FlexValue::Text(s) => {
            let normalized = normalize_digits(s);
            normalized
                .parse::<i64>()
                .map_err(|_| format!("Price '{}' is not an integer", s.trim()))?
        }
    };

    if price < 0 {
        return Err(format!("Price {} must not be negative", price));
    }
    Ok(price)
}

fn required_text(field: &str, value: Option<&FlexValue>) -> Result<String, String> {
    value
        .map(FlexValue::to_text)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required field '{}'", field))
}

/// Checks one raw product; the error names the first offending field
pub fn validate_product(raw: &serde_json::Value) -> Result<ValidProduct, String> {
    if !raw.is_object() {
        return Err("Product is not a JSON object".into());
    }
    let product: ProductPayload =
        serde_json::from_value(raw.clone()).map_err(|e| format!("Malformed product: {}", e))?;

    let name = product
        .name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing required field 'name'".to_string())?
        .to_string();
    let internal_code = required_text("ekhtesasiCode", product.internal_code.as_ref())?;
    let commercial_code = required_text("tegaratCode", product.commercial_code.as_ref())?;
    let price = match product.price.as_ref() {
        Some(value) if !value.is_blank() => parse_price(value)?,
        _ => return Err("Missing required field 'price'".into()),
    };

    Ok(ValidProduct {
        name,
        internal_code,
        commercial_code,
        price,
        description: product.description.filter(|d| !d.trim().is_empty()),
        cars: product.cars,
    })
}

/// `(has_warranty, warranty_name)` derived from the raw product name
pub fn detect_warranty(name: &str) -> (bool, Option<String>) {
    let has_warranty = name.contains(WARRANTY_MARKER);
    let warranty_name = name
        .contains(WARRANTY_PLUS)
        .then(|| WARRANTY_PLUS.to_string());
    (has_warranty, warranty_name)
}
