//! GUI panels and application state.

pub mod app;
pub mod components;
pub mod composer_panel;
pub mod sales_list_panel;

pub use app::{App, Panel};
pub use composer_panel::ComposerPanel;
pub use sales_list_panel::SalesListPanel;
