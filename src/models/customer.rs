//! Customer reference data.

use serde::{Deserialize, Serialize};

/// Customer as returned by `GET /customers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: i64,
    pub name: String,
    #[serde(default)]
    pub customer_type: String,
    #[serde(default)]
    pub credit_terms_days: Option<i64>,
}

impl Customer {
    /// Label used in the composer's customer picker.
    pub fn option_label(&self) -> String {
        let terms = self
            .credit_terms_days
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        format!("{} ({}, {}d)", self.name, self.customer_type, terms)
    }
}
