//! Filtering, sorting and totals for the sales list.
//!
//! Everything here is a pure function of the fetched data plus a [`ListQuery`],
//! recomputed on every frame by the list panel.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::format::parse_amount;
use crate::models::{Customer, Sale};

/// Sortable columns of the sales table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    SaleId,
    SaleDatetime,
    PaymentMethod,
    Subtotal,
    Tax,
    Discount,
    Total,
}

impl SortColumn {
    /// Money columns compare as numbers rather than text.
    fn is_amount(&self) -> bool {
        matches!(
            self,
            SortColumn::Subtotal | SortColumn::Tax | SortColumn::Discount | SortColumn::Total
        )
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Search text and sort selection of the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub sort_by: SortColumn,
    pub order: SortOrder,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_by: SortColumn::SaleDatetime,
            order: SortOrder::Desc,
        }
    }
}

impl ListQuery {
    /// Header click: flip the order on the active column, otherwise select it ascending.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        if self.sort_by == column {
            self.order = self.order.flipped();
        } else {
            self.sort_by = column;
            self.order = SortOrder::Asc;
        }
    }

    /// Indicator shown next to a header label.
    pub fn sort_indicator(&self, column: SortColumn) -> &'static str {
        if self.sort_by != column {
            return "↕";
        }
        match self.order {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        }
    }
}

/// Customer names keyed by id.
pub struct CustomerLookup<'a> {
    names: HashMap<i64, &'a str>,
}

impl<'a> CustomerLookup<'a> {
    pub fn new(customers: &'a [Customer]) -> Self {
        let names = customers
            .iter()
            .map(|c| (c.customer_id, c.name.as_str()))
            .collect();
        Self { names }
    }

    /// Resolved name, or `Cliente {id}` for unknown customers.
    pub fn label(&self, customer_id: i64) -> String {
        match self.names.get(&customer_id) {
            Some(name) => (*name).to_string(),
            None => format!("Cliente {customer_id}"),
        }
    }
}

/// A sale ready for rendering, with its customer resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRow<'a> {
    pub sale: &'a Sale,
    pub customer: String,
}

/// Filter then sort the sales according to `query`.
pub fn visible_sales<'a>(sales: &'a [Sale], customers: &[Customer], query: &ListQuery) -> Vec<SaleRow<'a>> {
    let lookup = CustomerLookup::new(customers);
    let needle = query.search.to_lowercase();

    let mut rows: Vec<SaleRow<'a>> = sales
        .iter()
        .map(|sale| SaleRow {
            customer: lookup.label(sale.customer_id),
            sale,
        })
        .filter(|row| matches_search(row, &needle))
        .collect();

    rows.sort_by(|a, b| {
        let ord = compare(a.sale, b.sale, query.sort_by);
        match query.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });

    rows
}

fn matches_search(row: &SaleRow<'_>, needle: &str) -> bool {
    row.customer.to_lowercase().contains(needle)
        || row.sale.payment_method.to_lowercase().contains(needle)
        || row.sale.sale_id.to_string().contains(needle)
}

fn compare(a: &Sale, b: &Sale, column: SortColumn) -> Ordering {
    if column.is_amount() {
        let (x, y) = (amount_field(a, column), amount_field(b, column));
        // Unparseable amounts sort after every number.
        return match (parse_amount(x), parse_amount(y)) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
    }
    match column {
        SortColumn::SaleId => a.sale_id.cmp(&b.sale_id),
        SortColumn::SaleDatetime => a.sale_datetime.cmp(&b.sale_datetime),
        SortColumn::PaymentMethod => a.payment_method.cmp(&b.payment_method),
        _ => Ordering::Equal,
    }
}

fn amount_field(sale: &Sale, column: SortColumn) -> &str {
    match column {
        SortColumn::Subtotal => &sale.subtotal,
        SortColumn::Tax => &sale.tax,
        SortColumn::Discount => &sale.total_discounts_amount,
        _ => &sale.total,
    }
}

/// Totals over the visible rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    /// `None` when any subtotal is not a number.
    pub subtotal: Option<f64>,
    /// `None` when any total is not a number.
    pub total: Option<f64>,
}

/// Sum subtotals and totals of the rows currently shown.
pub fn summarize(rows: &[SaleRow<'_>]) -> Summary {
    Summary {
        count: rows.len(),
        subtotal: sum_field(rows, |s| s.subtotal.as_str()),
        total: sum_field(rows, |s| s.total.as_str()),
    }
}

fn sum_field(rows: &[SaleRow<'_>], field: fn(&Sale) -> &str) -> Option<f64> {
    rows.iter().map(|row| parse_amount(field(row.sale))).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(id: i64, customer_id: i64, method: &str, subtotal: &str, total: &str, when: &str) -> Sale {
        Sale {
            sale_id: id,
            customer_id,
            payment_method: method.to_string(),
            subtotal: subtotal.to_string(),
            tax: "0.00".to_string(),
            total: total.to_string(),
            total_discounts_amount: "0.00".to_string(),
            sale_datetime: when.to_string(),
        }
    }

    fn customer(id: i64, name: &str) -> Customer {
        Customer {
            customer_id: id,
            name: name.to_string(),
            customer_type: "Retail".to_string(),
            credit_terms_days: Some(0),
        }
    }

    fn fixture() -> (Vec<Sale>, Vec<Customer>) {
        let sales = vec![
            sale(1, 10, "Cash", "9.00", "10.00", "2025-01-03T10:00:00"),
            sale(2, 11, "Credit Card", "4.50", "5.00", "2025-01-01T09:00:00"),
            sale(3, 10, "Store Credit", "18.00", "20.00", "2025-01-02T12:00:00"),
            sale(4, 99, "Cash", "1.00", "2.50", "2025-01-04T08:30:00"),
        ];
        let customers = vec![customer(10, "María López"), customer(11, "Juan Pérez")];
        (sales, customers)
    }

    fn ids(rows: &[SaleRow<'_>]) -> Vec<i64> {
        rows.iter().map(|r| r.sale.sale_id).collect()
    }

    #[test]
    fn test_default_sort_is_datetime_desc() {
        let (sales, customers) = fixture();
        let rows = visible_sales(&sales, &customers, &ListQuery::default());
        assert_eq!(ids(&rows), vec![4, 1, 3, 2]);
    }

    #[test]
    fn test_unknown_customer_label() {
        let (sales, customers) = fixture();
        let rows = visible_sales(&sales, &customers, &ListQuery::default());
        let row = rows.iter().find(|r| r.sale.sale_id == 4).unwrap();
        assert_eq!(row.customer, "Cliente 99");
    }

    #[test]
    fn test_filter_by_customer_name_case_insensitive() {
        let (sales, customers) = fixture();
        let query = ListQuery {
            search: "LÓPEZ".to_lowercase(),
            ..Default::default()
        };
        let mut got = ids(&visible_sales(&sales, &customers, &query));
        got.sort();
        assert_eq!(got, vec![1, 3]);

        let query = ListQuery {
            search: "maría".to_string(),
            ..Default::default()
        };
        let rows = visible_sales(&sales, &customers, &query);
        assert!(rows.iter().all(|r| r.customer == "María López"));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_filter_exactly_matching_customers() {
        let (sales, customers) = fixture();
        let query = ListQuery {
            search: "PÉR".to_string(),
            ..Default::default()
        };
        // Uppercase search is lowered before matching.
        let rows = visible_sales(&sales, &customers, &query);
        assert_eq!(ids(&rows), vec![2]);
    }

    #[test]
    fn test_filter_by_payment_method_and_id() {
        let (sales, customers) = fixture();
        let query = ListQuery {
            search: "credit".to_string(),
            ..Default::default()
        };
        let mut got = ids(&visible_sales(&sales, &customers, &query));
        got.sort();
        assert_eq!(got, vec![2, 3]);

        let query = ListQuery {
            search: "4".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&visible_sales(&sales, &customers, &query)), vec![4]);
    }

    #[test]
    fn test_filter_matches_fallback_label() {
        let (sales, customers) = fixture();
        let query = ListQuery {
            search: "cliente 99".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&visible_sales(&sales, &customers, &query)), vec![4]);
    }

    #[test]
    fn test_sort_total_asc_then_desc_reverses() {
        let (sales, customers) = fixture();
        let mut query = ListQuery::default();
        query.toggle_sort(SortColumn::Total);
        assert_eq!(query.order, SortOrder::Asc);
        let asc = ids(&visible_sales(&sales, &customers, &query));
        assert_eq!(asc, vec![4, 2, 1, 3]);

        query.toggle_sort(SortColumn::Total);
        assert_eq!(query.sort_by, SortColumn::Total);
        assert_eq!(query.order, SortOrder::Desc);
        let mut desc = ids(&visible_sales(&sales, &customers, &query));
        desc.reverse();
        assert_eq!(desc, asc);
    }

    #[test]
    fn test_amounts_compare_numerically() {
        let sales = vec![
            sale(1, 1, "Cash", "100.00", "100.00", "a"),
            sale(2, 1, "Cash", "9.00", "9.00", "b"),
        ];
        let query = ListQuery {
            sort_by: SortColumn::Subtotal,
            order: SortOrder::Asc,
            ..Default::default()
        };
        assert_eq!(ids(&visible_sales(&sales, &[], &query)), vec![2, 1]);
    }

    #[test]
    fn test_sort_with_unparseable_totals_keeps_numbers_ordered() {
        // Enough rows to leave the small-slice insertion path.
        let mut seed: u64 = 7;
        let sales: Vec<Sale> = (1..=64)
            .map(|id| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let total = match seed >> 60 {
                    0..=3 => "N/A".to_string(),
                    4 => String::new(),
                    n => format!("{}.00", (seed >> 33) % 100 + n),
                };
                sale(id, 1, "Cash", "1.00", &total, "x")
            })
            .collect();

        for order in [SortOrder::Asc, SortOrder::Desc] {
            let query = ListQuery {
                sort_by: SortColumn::Total,
                order,
                ..Default::default()
            };
            let rows = visible_sales(&sales, &[], &query);
            assert_eq!(rows.len(), sales.len());

            let totals: Vec<Option<f64>> = rows.iter().map(|r| parse_amount(&r.sale.total)).collect();
            let (numbers, missing): (Vec<_>, Vec<_>) = match order {
                SortOrder::Asc => {
                    let split = totals.iter().position(Option::is_none).unwrap_or(totals.len());
                    (totals[..split].to_vec(), totals[split..].to_vec())
                }
                SortOrder::Desc => {
                    let split = totals.iter().position(Option::is_some).unwrap_or(totals.len());
                    (totals[split..].to_vec(), totals[..split].to_vec())
                }
            };
            assert!(missing.iter().all(Option::is_none), "{order:?}: {totals:?}");
            assert!(numbers.iter().all(Option::is_some), "{order:?}: {totals:?}");
            assert!(!numbers.is_empty() && !missing.is_empty());

            let numbers: Vec<f64> = numbers.into_iter().flatten().collect();
            let monotone = numbers.windows(2).all(|w| match order {
                SortOrder::Asc => w[0] <= w[1],
                SortOrder::Desc => w[0] >= w[1],
            });
            assert!(monotone, "{order:?}: {numbers:?}");
        }
    }

    #[test]
    fn test_text_columns_compare_as_text() {
        let (sales, customers) = fixture();
        let query = ListQuery {
            sort_by: SortColumn::PaymentMethod,
            order: SortOrder::Asc,
            ..Default::default()
        };
        assert_eq!(ids(&visible_sales(&sales, &customers, &query)), vec![1, 4, 2, 3]);
    }

    #[test]
    fn test_toggle_to_new_column_resets_ascending() {
        let mut query = ListQuery::default();
        assert_eq!(query.order, SortOrder::Desc);
        query.toggle_sort(SortColumn::SaleId);
        assert_eq!(query.sort_by, SortColumn::SaleId);
        assert_eq!(query.order, SortOrder::Asc);
        assert_eq!(query.sort_indicator(SortColumn::SaleId), "↑");
        assert_eq!(query.sort_indicator(SortColumn::Total), "↕");
    }

    #[test]
    fn test_summary_grand_total() {
        let sales = vec![
            sale(1, 1, "Cash", "9.00", "10.00", "a"),
            sale(2, 1, "Cash", "4.00", "5.00", "b"),
        ];
        let rows = visible_sales(&sales, &[], &ListQuery::default());
        let summary = summarize(&rows);
        assert_eq!(summary.count, 2);
        assert_eq!(crate::format::format_amount(summary.total), "$15.00");
        assert_eq!(crate::format::format_amount(summary.subtotal), "$13.00");
    }

    #[test]
    fn test_summary_covers_only_visible_rows() {
        let (sales, customers) = fixture();
        let query = ListQuery {
            search: "juan".to_string(),
            ..Default::default()
        };
        let rows = visible_sales(&sales, &customers, &query);
        let summary = summarize(&rows);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.total, Some(5.0));
    }

    #[test]
    fn test_summary_unparseable_total_is_unavailable() {
        let sales = vec![
            sale(1, 1, "Cash", "9.00", "10.00", "a"),
            sale(2, 1, "Cash", "4.00", "oops", "b"),
        ];
        let rows = visible_sales(&sales, &[], &ListQuery::default());
        let summary = summarize(&rows);
        assert_eq!(summary.total, None);
        assert_eq!(summary.subtotal, Some(13.0));
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.total, Some(0.0));
    }
}
