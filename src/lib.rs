pub mod client;
pub mod config;
pub mod draft;
pub mod error;
pub mod export;
pub mod format;
pub mod listing;
pub mod logging;
pub mod models;
pub mod state;
pub mod ui;

pub use error::{AppError, Result};
