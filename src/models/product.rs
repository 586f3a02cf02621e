//! Product reference data with price normalization.
//!
//! The products endpoint is not consistent about the price field name: depending
//! on the backend version it is `list_price`, `price` or `listPrice`, and the value
//! may be a JSON number or a numeric string. [`Product`] is always built through
//! [`RawProduct`] so the rest of the crate only sees one canonical [`Price`].

use serde::Deserialize;
use serde_json::Value;

/// Canonical product price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Price {
    Amount(f64),
    /// A price field was sent but none of them held a number.
    Unavailable,
}

impl Price {
    /// Two-decimal rendering, or `N/A`.
    pub fn label(&self) -> String {
        match self {
            Price::Amount(v) => format!("{v:.2}"),
            Price::Unavailable => "N/A".to_string(),
        }
    }

    /// Resolve the price from the three candidate fields.
    ///
    /// Fallback order is `list_price`, `price`, `listPrice`. The first field holding
    /// a finite number wins. With no field present at all the price is zero.
    pub fn from_candidates(candidates: [Option<&Value>; 3]) -> Self {
        let mut any_present = false;
        for value in candidates.into_iter().flatten() {
            any_present = true;
            if let Some(amount) = numeric_value(value) {
                return Price::Amount(amount);
            }
        }
        if any_present {
            Price::Unavailable
        } else {
            Price::Amount(0.0)
        }
    }
}

fn numeric_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Wire shape of a product before price normalization.
#[derive(Debug, Deserialize)]
pub struct RawProduct {
    pub product_id: i64,
    pub name: String,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub list_price: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default, rename = "listPrice")]
    pub list_price_camel: Option<Value>,
}

/// Product as used by the composer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawProduct")]
pub struct Product {
    pub product_id: i64,
    pub name: String,
    pub product_type: Option<String>,
    pub price: Price,
}

impl From<RawProduct> for Product {
    fn from(raw: RawProduct) -> Self {
        let price = Price::from_candidates([
            raw.list_price.as_ref(),
            raw.price.as_ref(),
            raw.list_price_camel.as_ref(),
        ]);
        Self {
            product_id: raw.product_id,
            name: raw.name,
            product_type: raw.product_type,
            price,
        }
    }
}

impl Product {
    /// Label used in the line-item product picker.
    pub fn option_label(&self) -> String {
        format!("{} - ${}", self.name, self.price.label())
    }
}
