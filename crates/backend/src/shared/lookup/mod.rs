pub mod car_data;

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Name of the single node every unmatched title falls back to
pub const DEFAULT_CATEGORY: &str = "لوازم یدکی";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarEntry {
    pub code: String,
    pub name_fa: String,
    pub brand_code: String,
}

/// Read-only reference data used by ingestion. The built-in set is loaded
/// once; tests and alternative vendors build their own.
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    cars: HashMap<String, CarEntry>,
    brand_display_names: HashMap<String, String>,
    category_keywords: Vec<(String, Vec<String>)>,
    category_paths: HashMap<String, Vec<String>>,
    default_path: Vec<String>,
}

static BUILTIN: Lazy<LookupTables> = Lazy::new(|| {
    let mut tables = LookupTables::new();
    for (name_fa, (code, canonical, brand)) in car_data::car_map() {
        tables = tables.with_car(name_fa, code, canonical, brand);
    }
    for (code, display) in car_data::brand_display_names() {
        tables = tables.with_brand(code, display);
    }
    for (key, keywords) in car_data::CATEGORY_KEYWORDS {
        tables = tables.with_category_keywords(key, keywords);
    }
    for (key, path) in car_data::category_paths() {
        tables = tables.with_category_path(key, &path);
    }
    tables
});

impl LookupTables {
    /// Empty tables with the default category path
    pub fn new() -> Self {
        Self {
            default_path: vec![DEFAULT_CATEGORY.to_string()],
            ..Default::default()
        }
    }

    pub fn builtin() -> &'static LookupTables {
        &BUILTIN
    }

    pub fn with_car(
        mut self,
        name_fa: &str,
        code: &str,
        canonical_name: &str,
        brand_code: &str,
    ) -> Self {
        self.cars.insert(
            name_fa.trim().to_string(),
            CarEntry {
                code: code.to_string(),
                name_fa: canonical_name.to_string(),
                brand_code: brand_code.to_string(),
            },
        );
        self
    }

    pub fn with_brand(mut self, code: &str, display_name: &str) -> Self {
        self.brand_display_names
            .insert(code.to_string(), display_name.to_string());
        self
    }

    /// Appends a keyword rule; rules are matched in insertion order
    pub fn with_category_keywords(mut self, key: &str, keywords: &[&str]) -> Self {
        self.category_keywords.push((
            key.to_string(),
            keywords.iter().map(|k| k.to_lowercase()).collect(),
        ));
        self
    }

    pub fn with_category_path(mut self, key: &str, path: &[&str]) -> Self {
        self.category_paths
            .insert(key.to_string(), path.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_default_path(mut self, path: &[&str]) -> Self {
        self.default_path = path.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn car(&self, name_fa: &str) -> Option<&CarEntry> {
        self.cars.get(name_fa.trim())
    }

    /// Display name of a brand, falling back to its code
    pub fn brand_display_name(&self, code: &str) -> String {
        self.brand_display_names
            .get(code)
            .cloned()
            .unwrap_or_else(|| code.to_string())
    }

    pub fn category_keywords(&self) -> &[(String, Vec<String>)] {
        &self.category_keywords
    }

    pub fn category_path(&self, key: &str) -> Option<&[String]> {
        self.category_paths.get(key).map(Vec::as_slice)
    }

    pub fn default_path(&self) -> &[String] {
        &self.default_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_loaded() {
        let tables = LookupTables::builtin();
        let pride = tables.car("پراید").unwrap();
        assert_eq!(pride.code, "pride");
        assert_eq!(pride.brand_code, "saipa");
        assert_eq!(tables.brand_display_name("saipa"), "سایپا");
        assert_eq!(tables.default_path(), &[DEFAULT_CATEGORY.to_string()]);
    }

    #[test]
    fn test_oil_filter_rule_precedes_oil() {
        let keys: Vec<&str> = LookupTables::builtin()
            .category_keywords()
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        let filter = keys.iter().position(|k| *k == "oil_filter").unwrap();
        let oil = keys.iter().position(|k| *k == "engine_oil").unwrap();
        assert!(filter < oil);
    }

    #[test]
    fn test_car_lookup_trims_name() {
        let tables = LookupTables::new().with_car("Car206", "pars206", "Car206", "saipa");
        assert!(tables.car("  Car206 ").is_some());
        assert_eq!(tables.brand_display_name("saipa"), "saipa");
    }
}
