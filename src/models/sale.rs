//! Sale records and the payload used to create a new sale.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Sale as returned by `GET /sales/`.
///
/// Money fields are decimal text; they are parsed only when displayed or summed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub sale_id: i64,
    pub customer_id: i64,
    pub payment_method: String,
    #[serde(deserialize_with = "decimal_text")]
    pub subtotal: String,
    #[serde(deserialize_with = "decimal_text")]
    pub tax: String,
    #[serde(deserialize_with = "decimal_text")]
    pub total: String,
    #[serde(deserialize_with = "decimal_text", default)]
    pub total_discounts_amount: String,
    pub sale_datetime: String,
}

/// Accept decimals sent either as strings or as bare JSON numbers.
fn decimal_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Payment methods offered when composing a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    CreditCard,
    #[default]
    Cash,
    StoreCredit,
}

impl PaymentMethod {
    /// Options in picker order.
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::CreditCard,
        PaymentMethod::Cash,
        PaymentMethod::StoreCredit,
    ];

    /// Wire and display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::StoreCredit => "Store Credit",
        }
    }
}

impl Serialize for PaymentMethod {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One line of a new sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSaleItem {
    pub product_id: i64,
    pub quantity: u32,
}

/// Body of `POST /sales`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSale {
    pub customer_id: i64,
    pub payment_method: PaymentMethod,
    pub items: Vec<NewSaleItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_decimal_strings() {
        let json = r#"{
            "sale_id": 12,
            "customer_id": 4,
            "payment_method": "Cash",
            "subtotal": "10.00",
            "tax": "1.60",
            "total": "11.60",
            "total_discounts_amount": "0.00",
            "sale_datetime": "2025-03-01T10:15:00"
        }"#;
        let sale: Sale = serde_json::from_str(json).unwrap();
        assert_eq!(sale.sale_id, 12);
        assert_eq!(sale.total, "11.60");
        assert_eq!(sale.total_discounts_amount, "0.00");
    }

    #[test]
    fn test_deserialize_numeric_decimals_and_missing_discount() {
        let json = r#"{
            "sale_id": 1,
            "customer_id": 2,
            "payment_method": "Credit Card",
            "subtotal": 10.5,
            "tax": 0,
            "total": 10.5,
            "sale_datetime": "2025-03-01 10:15:00"
        }"#;
        let sale: Sale = serde_json::from_str(json).unwrap();
        assert_eq!(sale.subtotal, "10.5");
        assert_eq!(sale.tax, "0");
        assert_eq!(sale.total_discounts_amount, "");
    }

    #[test]
    fn test_new_sale_wire_shape() {
        let sale = NewSale {
            customer_id: 7,
            payment_method: PaymentMethod::StoreCredit,
            items: vec![NewSaleItem {
                product_id: 3,
                quantity: 2,
            }],
        };
        let value = serde_json::to_value(&sale).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "customer_id": 7,
                "payment_method": "Store Credit",
                "items": [{"product_id": 3, "quantity": 2}]
            })
        );
    }

    #[test]
    fn test_default_payment_method_is_cash() {
        assert_eq!(PaymentMethod::default().as_str(), "Cash");
    }
}
