//! Sale composer panel: pick a customer and payment method, edit line items, submit.

use std::sync::Arc;

use eframe::egui::{self, Align, Layout, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{PAPER_PLANE_RIGHT, PLUS, ROCKET_LAUNCH, SHOPPING_CART, TRASH, WARNING, X_CIRCLE};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::components::{
    colors, danger_action_button, error_view, loading_view, panel_header, primary_button_with_icon,
    styled_button_with_icon,
};
use crate::client::{SalesApi, SubmitOutcome, load_customers_and_products, submit_sale};
use crate::draft::DraftSale;
use crate::models::{Customer, PaymentMethod, Product};
use crate::state::LoadState;

/// Messages from the panel's async tasks.
pub enum ComposerMessage {
    Loaded(Result<(Vec<Customer>, Vec<Product>), String>),
    Submitted(SubmitOutcome),
}

/// Sale composer screen state.
pub struct ComposerPanel {
    api: Arc<dyn SalesApi>,
    rt: Handle,
    tx: mpsc::UnboundedSender<ComposerMessage>,
    rx: mpsc::UnboundedReceiver<ComposerMessage>,

    pub state: LoadState,
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub draft: DraftSale,

    /// Last backend answer to a submit, shown verbatim.
    pub result: Option<SubmitOutcome>,
    /// Draft as it was sent, while a submit is in flight.
    in_flight: Option<DraftSale>,
}

impl ComposerPanel {
    /// Create the panel. Nothing is fetched until [`ComposerPanel::initialize`].
    pub fn new(api: Arc<dyn SalesApi>, rt: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            rt,
            tx,
            rx,
            state: LoadState::default(),
            customers: Vec::new(),
            products: Vec::new(),
            draft: DraftSale::default(),
            result: None,
            in_flight: None,
        }
    }

    /// Fetch customers and products. Also used for retry and reload.
    pub fn initialize(&mut self) {
        if !self.state.start() {
            return;
        }
        info!("Loading customers and products from {}", self.api.base_url());

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = load_customers_and_products(api.as_ref())
                .await
                .map_err(|e| format!("Failed to load data: {e}"));
            let _ = tx.send(ComposerMessage::Loaded(result));
        });
    }

    /// Submit the draft if it is valid and nothing is in flight.
    pub fn submit(&mut self) {
        if !self.can_submit() {
            return;
        }
        let Some(sale) = self.draft.to_new_sale() else {
            return;
        };
        info!(
            "Submitting sale for customer {} with {} items",
            sale.customer_id,
            sale.items.len()
        );
        self.in_flight = Some(self.draft.clone());

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let outcome = submit_sale(api.as_ref(), &sale).await;
            let _ = tx.send(ComposerMessage::Submitted(outcome));
        });
    }

    /// Submit button state.
    pub fn can_submit(&self) -> bool {
        self.state.is_ready() && !self.is_submitting() && self.draft.is_valid()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// True while a fetch or submit is in flight.
    pub fn is_busy(&self) -> bool {
        self.state.is_loading() || self.is_submitting()
    }

    /// Poll async operation results.
    pub fn poll(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.apply(msg);
        }
    }

    fn apply(&mut self, msg: ComposerMessage) {
        match msg {
            ComposerMessage::Loaded(Ok((customers, products))) => {
                info!("Loaded {} customers, {} products", customers.len(), products.len());
                self.draft = DraftSale::for_customers(&customers);
                self.customers = customers;
                self.products = products;
                self.state.succeed();
            }
            ComposerMessage::Loaded(Err(e)) => {
                warn!("{e}");
                self.state.fail(e);
            }
            ComposerMessage::Submitted(outcome) => {
                let sent = self.in_flight.take();
                if outcome.is_success() {
                    info!("Sale accepted with status {:?}", outcome.status);
                    // Edits made after sending belong to the next sale.
                    if sent.as_ref() == Some(&self.draft) {
                        self.draft.clear_items();
                    }
                } else {
                    warn!("Sale not accepted, status {:?}", outcome.status);
                }
                self.result = Some(outcome);
            }
        }
    }

    /// Product preselected on newly added rows.
    fn default_product(&self) -> Option<i64> {
        self.products.first().map(|p| p.product_id)
    }

    /// Render the panel.
    pub fn show(&mut self, ui: &mut Ui) {
        panel_header(ui, "New Sale", None);

        match &self.state {
            LoadState::Uninitialized => self.show_start(ui),
            LoadState::Loading => {
                let detail = format!("Connecting to {}", self.api.base_url());
                loading_view(ui, "Loading data from the API...", &detail);
            }
            LoadState::Error(message) => {
                let message = message.clone();
                let hint = format!("Check that the backend is running at {}", self.api.base_url());
                if error_view(ui, X_CIRCLE, &message, Some(&hint)) {
                    self.initialize();
                }
            }
            LoadState::Ready if self.customers.is_empty() || self.products.is_empty() => {
                self.show_empty_data(ui);
            }
            LoadState::Ready => self.show_editor(ui),
        }
    }

    fn show_start(&mut self, ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(RichText::new(SHOPPING_CART).size(40.0));
            ui.add_space(10.0);
            ui.label("Load customers and products to start composing a sale.");
            ui.add_space(15.0);
            if primary_button_with_icon(ui, true, ROCKET_LAUNCH, "Initialize").clicked() {
                self.initialize();
            }
            ui.add_space(10.0);
            ui.label(RichText::new(format!("API: {}", self.api.base_url())).weak());
        });
    }

    fn show_empty_data(&mut self, ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(30.0);
            ui.colored_label(
                colors::WARNING,
                format!("{WARNING} Data loaded but there are no customers or products available"),
            );
            ui.label(format!(
                "Customers: {}, Products: {}",
                self.customers.len(),
                self.products.len()
            ));
            ui.add_space(10.0);
            if ui.button("Reload Data").clicked() {
                self.initialize();
            }
        });
    }

    fn show_editor(&mut self, ui: &mut Ui) {
        let editable = !self.is_submitting();

        ui.add_enabled_ui(editable, |ui| {
            self.show_pickers(ui);
            ui.add_space(15.0);
            self.show_items(ui);
        });

        ui.add_space(15.0);

        ui.horizontal(|ui| {
            let add_row = ui
                .add_enabled_ui(editable, |ui| styled_button_with_icon(ui, PLUS, "Add Row"))
                .inner;
            if add_row.clicked() {
                let default_product = self.default_product();
                self.draft.add_row(default_product);
            }

            ui.add_space(10.0);

            if primary_button_with_icon(ui, self.can_submit(), PAPER_PLANE_RIGHT, "Submit Sale").clicked() {
                self.submit();
            }

            if !editable {
                ui.spinner();
                ui.label("Submitting...");
            }
        });

        if let Some(result) = &self.result {
            ui.add_space(20.0);
            show_result(ui, result);
        }
    }

    fn show_pickers(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("Customer:");
            let selected = self
                .draft
                .customer_id
                .and_then(|id| self.customers.iter().find(|c| c.customer_id == id))
                .map(Customer::option_label)
                .unwrap_or_else(|| "Select...".to_string());
            egui::ComboBox::from_id_salt("composer_customer")
                .width(280.0)
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    for customer in &self.customers {
                        let is_selected = self.draft.customer_id == Some(customer.customer_id);
                        if ui.selectable_label(is_selected, customer.option_label()).clicked() {
                            self.draft.customer_id = Some(customer.customer_id);
                        }
                    }
                });

            ui.add_space(20.0);

            ui.label("Payment:");
            egui::ComboBox::from_id_salt("composer_payment")
                .width(150.0)
                .selected_text(self.draft.payment_method.as_str())
                .show_ui(ui, |ui| {
                    for method in PaymentMethod::ALL {
                        ui.selectable_value(&mut self.draft.payment_method, method, method.as_str());
                    }
                });
        });
    }

    fn show_items(&mut self, ui: &mut Ui) {
        let mut remove = None;

        egui::Grid::new("composer_items_grid")
            .num_columns(3)
            .striped(true)
            .min_col_width(80.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.strong("Product");
                ui.strong("Qty");
                ui.strong("");
                ui.end_row();

                for idx in 0..self.draft.items.len() {
                    let item = &self.draft.items[idx];
                    let mut product_id = item.product_id;
                    let mut quantity = item.quantity;

                    let selected = product_id
                        .and_then(|id| self.products.iter().find(|p| p.product_id == id))
                        .map(Product::option_label)
                        .unwrap_or_else(|| "Select Product".to_string());
                    egui::ComboBox::from_id_salt(("composer_item_product", idx))
                        .width(300.0)
                        .selected_text(selected)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut product_id, None, "Select Product");
                            for product in &self.products {
                                ui.selectable_value(&mut product_id, Some(product.product_id), product.option_label());
                            }
                        });

                    ui.add(egui::DragValue::new(&mut quantity).range(0..=9999));

                    if danger_action_button(ui, TRASH, "Remove").clicked() {
                        remove = Some(idx);
                    }
                    ui.end_row();

                    if product_id != self.draft.items[idx].product_id {
                        self.draft.set_product(idx, product_id);
                    }
                    if quantity != self.draft.items[idx].quantity {
                        self.draft.set_quantity(idx, quantity);
                    }
                }
            });

        if let Some(idx) = remove {
            self.draft.remove_row(idx);
        }

        if self.draft.items.is_empty() {
            ui.label(RichText::new("No line items. Add a row to continue.").weak());
        }
    }
}

fn show_result(ui: &mut Ui, result: &SubmitOutcome) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(egui::Margin::same(15))
        .corner_radius(egui::CornerRadius::same(8))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Result:").strong());
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| match result.status {
                    Some(status) => {
                        let color = if result.is_success() {
                            colors::SUCCESS
                        } else {
                            colors::ERROR
                        };
                        ui.colored_label(color, format!("HTTP {status}"));
                    }
                    None => {
                        ui.colored_label(colors::ERROR, "Request failed");
                    }
                });
            });
            ui.add_space(8.0);
            ScrollArea::vertical()
                .id_salt("composer_result_scroll")
                .max_height(240.0)
                .show(ui, |ui| {
                    ui.monospace(result.pretty_body());
                });
        });
}
