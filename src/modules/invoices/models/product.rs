use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Catalog product as returned by the products API (read-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub price_usd: Option<Decimal>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub stock: Option<Decimal>,
    #[serde(default)]
    pub allows_fractional: bool,
}

impl ProductRecord {
    /// Whether `quantity` can be served from the reported stock.
    /// Products without stock tracking always can.
    pub fn has_stock_for(&self, quantity: Decimal) -> bool {
        self.stock.map(|stock| stock >= quantity).unwrap_or(true)
    }
}

// The products API returns numeric ids, other endpoints return strings
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}
