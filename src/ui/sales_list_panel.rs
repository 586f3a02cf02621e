//! Sales list panel with search, column sorting, totals and Excel export.

use std::sync::Arc;

use eframe::egui::{self, Align, Layout, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use egui_phosphor::regular::{
    ARROWS_CLOCKWISE, COINS, CREDIT_CARD, FILE_XLS, MAGNIFYING_GLASS, MONEY, TICKET, TRAY, X_CIRCLE,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use super::components::{colors, error_view, loading_view, panel_header, styled_button_with_icon};
use crate::client::{SalesApi, load_sales_and_customers};
use crate::export::{export_sales_to_excel, generate_export_filename, show_save_dialog};
use crate::format::{PaymentIcon, format_amount, format_currency, format_datetime, payment_icon};
use crate::listing::{ListQuery, SaleRow, SortColumn, summarize, visible_sales};
use crate::models::{Customer, Sale};
use crate::state::LoadState;

/// Messages from the panel's async tasks.
pub enum ListMessage {
    Loaded(Result<(Vec<Sale>, Vec<Customer>), String>),
}

/// Sales list screen state.
pub struct SalesListPanel {
    api: Arc<dyn SalesApi>,
    rt: Handle,
    tx: mpsc::UnboundedSender<ListMessage>,
    rx: mpsc::UnboundedReceiver<ListMessage>,

    pub state: LoadState,
    pub sales: Vec<Sale>,
    pub customers: Vec<Customer>,
    pub query: ListQuery,

    /// Result line of the last export.
    pub export_status: Option<Result<String, String>>,
}

impl SalesListPanel {
    /// Create the panel and immediately start fetching.
    pub fn new(api: Arc<dyn SalesApi>, rt: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut panel = Self {
            api,
            rt,
            tx,
            rx,
            state: LoadState::default(),
            sales: Vec::new(),
            customers: Vec::new(),
            query: ListQuery::default(),
            export_status: None,
        };
        panel.load();
        panel
    }

    /// Fetch sales and customers. Also used for retry and refresh.
    pub fn load(&mut self) {
        if !self.state.start() {
            return;
        }
        info!("Loading sales and customers from {}", self.api.base_url());

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = load_sales_and_customers(api.as_ref())
                .await
                .map_err(|e| format!("Failed to load data: {e}"));
            let _ = tx.send(ListMessage::Loaded(result));
        });
    }

    /// True while a fetch is in flight.
    pub fn is_busy(&self) -> bool {
        self.state.is_loading()
    }

    /// Poll async operation results.
    pub fn poll(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.apply(msg);
        }
    }

    fn apply(&mut self, msg: ListMessage) {
        match msg {
            ListMessage::Loaded(Ok((sales, customers))) => {
                info!("Loaded {} sales, {} customers", sales.len(), customers.len());
                self.sales = sales;
                self.customers = customers;
                self.state.succeed();
            }
            ListMessage::Loaded(Err(e)) => {
                // Previously loaded data stays put until a retry succeeds.
                warn!("{e}");
                self.state.fail(e);
            }
        }
    }

    fn export_visible(&mut self) {
        let Some(path) = show_save_dialog(&generate_export_filename("sales")) else {
            return;
        };
        let rows = visible_sales(&self.sales, &self.customers, &self.query);
        let filename = path.display().to_string();

        self.export_status = Some(match export_sales_to_excel(&rows, &path) {
            Ok(()) => {
                info!("Exported {} sales to {filename}", rows.len());
                Ok(format!("Exported to: {filename}"))
            }
            Err(e) => {
                error!("Export failed: {e}");
                Err(format!("Export failed: {e}"))
            }
        });
    }

    /// Render the panel.
    pub fn show(&mut self, ui: &mut Ui) {
        match &self.state {
            LoadState::Uninitialized | LoadState::Loading => {
                loading_view(ui, "Loading sales...", "Connecting to the API...");
            }
            LoadState::Error(message) => {
                let message = message.clone();
                if error_view(ui, X_CIRCLE, &message, None) {
                    self.load();
                }
            }
            LoadState::Ready => self.show_ready(ui),
        }
    }

    fn show_ready(&mut self, ui: &mut Ui) {
        let rows = visible_sales(&self.sales, &self.customers, &self.query);
        panel_header(ui, "Sales", Some(&format!("Total: {} ventas", rows.len())));

        let mut refresh = false;
        let mut export = false;

        // Toolbar
        ui.horizontal(|ui| {
            ui.label(MAGNIFYING_GLASS);
            ui.add(
                egui::TextEdit::singleline(&mut self.query.search)
                    .desired_width(280.0)
                    .hint_text("Search by customer, payment method or ID..."),
            );

            ui.add_space(10.0);

            refresh = styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked();

            ui.add_space(10.0);

            export = styled_button_with_icon(ui, FILE_XLS, "Export to Excel").clicked();

            match &self.export_status {
                Some(Ok(msg)) => {
                    ui.colored_label(colors::SUCCESS, msg);
                }
                Some(Err(msg)) => {
                    ui.colored_label(colors::ERROR, msg);
                }
                None => {}
            }
        });

        ui.add_space(15.0);

        let clicked = show_table(ui, &rows, &self.query);

        if rows.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(30.0);
                ui.label(RichText::new(TRAY).size(40.0).weak());
                ui.label(RichText::new("No sales found").strong());
                ui.label(RichText::new("Try adjusting the search filter").weak());
            });
        } else {
            show_summary(ui, &rows);
        }

        drop(rows);

        if let Some(column) = clicked {
            self.query.toggle_sort(column);
        }
        if export {
            self.export_visible();
        }
        if refresh {
            self.load();
        }
    }
}

/// Sortable headers, in display order. `None` marks the customer column.
const HEADERS: [(&str, Option<SortColumn>); 8] = [
    ("ID", Some(SortColumn::SaleId)),
    ("Date", Some(SortColumn::SaleDatetime)),
    ("Customer", None),
    ("Payment Method", Some(SortColumn::PaymentMethod)),
    ("Subtotal", Some(SortColumn::Subtotal)),
    ("Tax", Some(SortColumn::Tax)),
    ("Discounts", Some(SortColumn::Discount)),
    ("Total", Some(SortColumn::Total)),
];

/// Render the sales table. Returns the header the user clicked, if any.
fn show_table(ui: &mut Ui, rows: &[SaleRow<'_>], query: &ListQuery) -> Option<SortColumn> {
    let mut clicked = None;

    ScrollArea::horizontal().id_salt("sales_table_scroll").show(ui, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(480.0)
            .cell_layout(Layout::left_to_right(Align::Center))
            .column(Column::auto().at_least(50.0))
            .column(Column::auto().at_least(150.0))
            .column(Column::auto().at_least(160.0))
            .column(Column::auto().at_least(140.0))
            .columns(Column::auto().at_least(90.0), 3)
            .column(Column::remainder().at_least(90.0))
            .header(26.0, |mut header| {
                for (label, column) in HEADERS {
                    header.col(|ui| match column {
                        Some(column) => {
                            let text = format!("{label} {}", query.sort_indicator(column));
                            if ui
                                .add(egui::Button::new(RichText::new(text).strong()).frame(false))
                                .clicked()
                            {
                                clicked = Some(column);
                            }
                        }
                        None => {
                            ui.strong(label);
                        }
                    });
                }
            })
            .body(|mut body| {
                for row in rows {
                    let sale = row.sale;
                    body.row(24.0, |mut table_row| {
                        table_row.col(|ui| {
                            ui.label(RichText::new(format!("#{}", sale.sale_id)).strong().color(colors::PRIMARY));
                        });
                        table_row.col(|ui| {
                            ui.label(RichText::new(format_datetime(&sale.sale_datetime)).weak());
                        });
                        table_row.col(|ui| {
                            ui.label(&row.customer);
                        });
                        table_row.col(|ui| {
                            ui.label(format!("{} {}", payment_glyph(&sale.payment_method), sale.payment_method));
                        });
                        table_row.col(|ui| {
                            amount_cell(ui, format_currency(&sale.subtotal), None);
                        });
                        table_row.col(|ui| {
                            amount_cell(ui, format_currency(&sale.tax), Some(colors::ERROR));
                        });
                        table_row.col(|ui| {
                            let text = format!("-{}", format_currency(&sale.total_discounts_amount));
                            amount_cell(ui, text, Some(colors::SUCCESS));
                        });
                        table_row.col(|ui| {
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                ui.label(
                                    RichText::new(format_currency(&sale.total))
                                        .strong()
                                        .color(colors::SUCCESS),
                                );
                            });
                        });
                    });
                }
            });
    });

    clicked
}

fn amount_cell(ui: &mut Ui, text: String, color: Option<egui::Color32>) {
    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
        let text = RichText::new(text);
        ui.label(match color {
            Some(c) => text.color(c),
            None => text,
        });
    });
}

fn payment_glyph(method: &str) -> &'static str {
    match payment_icon(method) {
        PaymentIcon::Cash => MONEY,
        PaymentIcon::CreditCard => CREDIT_CARD,
        PaymentIcon::StoreCredit => TICKET,
        PaymentIcon::Other => COINS,
    }
}

fn show_summary(ui: &mut Ui, rows: &[SaleRow<'_>]) {
    let summary = summarize(rows);

    ui.add_space(15.0);
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(egui::Margin::same(15))
        .corner_radius(egui::CornerRadius::same(8))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Sales shown:").strong());
                ui.label(summary.count.to_string());

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(format_amount(summary.total));
                    ui.label(RichText::new("Grand total:").strong());
                    ui.add_space(20.0);
                    ui.label(format_amount(summary.subtotal));
                    ui.label(RichText::new("Subtotal:").strong());
                });
            });
        });
}
