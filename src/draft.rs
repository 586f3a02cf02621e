//! In-memory draft of a sale being composed.
//!
//! The draft is a plain value owned by the composer panel; it is never persisted
//! and is replaced wholesale after a successful submit.

use crate::models::{Customer, NewSale, NewSaleItem, PaymentMethod};

/// One product + quantity row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub product_id: Option<i64>,
    pub quantity: u32,
}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            product_id: None,
            quantity: 1,
        }
    }
}

impl LineItem {
    fn is_complete(&self) -> bool {
        self.product_id.is_some() && self.quantity > 0
    }
}

/// The user's unsaved sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSale {
    pub customer_id: Option<i64>,
    pub payment_method: PaymentMethod,
    pub items: Vec<LineItem>,
}

impl Default for DraftSale {
    fn default() -> Self {
        Self {
            customer_id: None,
            payment_method: PaymentMethod::default(),
            items: vec![LineItem::default()],
        }
    }
}

impl DraftSale {
    /// Fresh draft with the first customer preselected.
    pub fn for_customers(customers: &[Customer]) -> Self {
        Self {
            customer_id: customers.first().map(|c| c.customer_id),
            ..Default::default()
        }
    }

    /// Append a row, preselecting `default_product` when given.
    pub fn add_row(&mut self, default_product: Option<i64>) {
        self.items.push(LineItem {
            product_id: default_product,
            quantity: 1,
        });
    }

    /// Remove the row at `idx`. The draft may end up with no rows.
    pub fn remove_row(&mut self, idx: usize) {
        if idx < self.items.len() {
            self.items.remove(idx);
        }
    }

    pub fn set_product(&mut self, idx: usize, product_id: Option<i64>) {
        if let Some(item) = self.items.get_mut(idx) {
            item.product_id = product_id;
        }
    }

    pub fn set_quantity(&mut self, idx: usize, quantity: u32) {
        if let Some(item) = self.items.get_mut(idx) {
            item.quantity = quantity;
        }
    }

    /// Drop all rows and start again from a single empty one.
    pub fn clear_items(&mut self) {
        self.items = vec![LineItem::default()];
    }

    /// Submittable when a customer is chosen and every row is complete.
    pub fn is_valid(&self) -> bool {
        self.customer_id.is_some() && !self.items.is_empty() && self.items.iter().all(LineItem::is_complete)
    }

    /// Request body for this draft, or `None` if it is not valid.
    pub fn to_new_sale(&self) -> Option<NewSale> {
        if !self.is_valid() {
            return None;
        }
        let items = self
            .items
            .iter()
            .map(|item| {
                item.product_id.map(|product_id| NewSaleItem {
                    product_id,
                    quantity: item.quantity,
                })
            })
            .collect::<Option<Vec<_>>>()?;

        Some(NewSale {
            customer_id: self.customer_id?,
            payment_method: self.payment_method,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customers() -> Vec<Customer> {
        vec![
            Customer {
                customer_id: 5,
                name: "First".to_string(),
                customer_type: "Retail".to_string(),
                credit_terms_days: Some(0),
            },
            Customer {
                customer_id: 6,
                name: "Second".to_string(),
                customer_type: "Retail".to_string(),
                credit_terms_days: None,
            },
        ]
    }

    #[test]
    fn test_new_draft_defaults() {
        let draft = DraftSale::for_customers(&customers());
        assert_eq!(draft.customer_id, Some(5));
        assert_eq!(draft.payment_method, PaymentMethod::Cash);
        assert_eq!(draft.items, vec![LineItem::default()]);
        assert!(!draft.is_valid());
    }

    #[test]
    fn test_no_customers_leaves_customer_unset() {
        let draft = DraftSale::for_customers(&[]);
        assert_eq!(draft.customer_id, None);
    }

    #[test]
    fn test_valid_after_selecting_product() {
        let mut draft = DraftSale::for_customers(&customers());
        draft.set_product(0, Some(11));
        assert!(draft.is_valid());
    }

    #[test]
    fn test_zero_quantity_is_invalid() {
        let mut draft = DraftSale::for_customers(&customers());
        draft.set_product(0, Some(11));
        draft.set_quantity(0, 0);
        assert!(!draft.is_valid());
        assert!(draft.to_new_sale().is_none());
    }

    #[test]
    fn test_missing_product_in_any_row_is_invalid() {
        let mut draft = DraftSale::for_customers(&customers());
        draft.set_product(0, Some(11));
        draft.add_row(None);
        assert!(!draft.is_valid());
        draft.set_product(1, Some(12));
        assert!(draft.is_valid());
    }

    #[test]
    fn test_missing_customer_is_invalid() {
        let mut draft = DraftSale::for_customers(&[]);
        draft.set_product(0, Some(11));
        assert!(!draft.is_valid());
    }

    #[test]
    fn test_remove_to_zero_rows_is_invalid() {
        let mut draft = DraftSale::for_customers(&customers());
        draft.set_product(0, Some(11));
        draft.remove_row(0);
        assert!(draft.items.is_empty());
        assert!(!draft.is_valid());
    }

    #[test]
    fn test_edits_replace_only_target_row() {
        let mut draft = DraftSale::for_customers(&customers());
        draft.add_row(Some(20));
        draft.add_row(Some(30));
        draft.set_quantity(1, 4);
        draft.set_product(2, Some(31));

        assert_eq!(draft.items[0], LineItem::default());
        assert_eq!(
            draft.items[1],
            LineItem {
                product_id: Some(20),
                quantity: 4
            }
        );
        assert_eq!(draft.items[2].product_id, Some(31));
    }

    #[test]
    fn test_remove_middle_row_keeps_order() {
        let mut draft = DraftSale::for_customers(&customers());
        draft.set_product(0, Some(1));
        draft.add_row(Some(2));
        draft.add_row(Some(3));
        draft.remove_row(1);
        let ids: Vec<_> = draft.items.iter().map(|i| i.product_id).collect();
        assert_eq!(ids, vec![Some(1), Some(3)]);
    }

    #[test]
    fn test_out_of_range_edits_ignored() {
        let mut draft = DraftSale::default();
        draft.set_product(3, Some(1));
        draft.set_quantity(3, 9);
        draft.remove_row(3);
        assert_eq!(draft.items, vec![LineItem::default()]);
    }

    #[test]
    fn test_to_new_sale() {
        let mut draft = DraftSale::for_customers(&customers());
        draft.customer_id = Some(6);
        draft.payment_method = PaymentMethod::CreditCard;
        draft.set_product(0, Some(11));
        draft.set_quantity(0, 3);

        let sale = draft.to_new_sale().unwrap();
        assert_eq!(sale.customer_id, 6);
        assert_eq!(sale.payment_method, PaymentMethod::CreditCard);
        assert_eq!(
            sale.items,
            vec![NewSaleItem {
                product_id: 11,
                quantity: 3
            }]
        );
    }

    #[test]
    fn test_clear_items() {
        let mut draft = DraftSale::for_customers(&customers());
        draft.add_row(Some(2));
        draft.clear_items();
        assert_eq!(draft.items, vec![LineItem::default()]);
        assert_eq!(draft.customer_id, Some(5));
    }
}
