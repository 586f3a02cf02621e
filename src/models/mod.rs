//! Data models for sales, customers, products, and new-sale payloads.

pub mod customer;
pub mod product;
pub mod sale;

pub use customer::Customer;
pub use product::{Price, Product};
pub use sale::{NewSale, NewSaleItem, PaymentMethod, Sale};
