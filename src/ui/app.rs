//! Main application UI.

use std::sync::Arc;

use eframe::egui::{self, Align, Layout};
use egui_phosphor::regular::{LIST_BULLETS, PLUS_CIRCLE};
use tokio::runtime::Runtime;

use crate::client::SalesApi;
use crate::config::AppConfig;

use super::components::colors;
use super::{ComposerPanel, SalesListPanel};

/// Current panel being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    SalesList,
    Composer,
}

impl Panel {
    /// Get the display name for the panel.
    pub fn name(&self) -> &'static str {
        match self {
            Panel::SalesList => "Sales",
            Panel::Composer => "New Sale",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Panel::SalesList => LIST_BULLETS,
            Panel::Composer => PLUS_CIRCLE,
        }
    }
}

/// The screen on display. Each screen owns its state, so switching drops it.
enum Screen {
    SalesList(SalesListPanel),
    Composer(ComposerPanel),
}

impl Screen {
    fn open(panel: Panel, api: &Arc<dyn SalesApi>, rt: &Runtime) -> Self {
        match panel {
            Panel::SalesList => Screen::SalesList(SalesListPanel::new(Arc::clone(api), rt.handle().clone())),
            Panel::Composer => Screen::Composer(ComposerPanel::new(Arc::clone(api), rt.handle().clone())),
        }
    }

    fn panel(&self) -> Panel {
        match self {
            Screen::SalesList(_) => Panel::SalesList,
            Screen::Composer(_) => Panel::Composer,
        }
    }
}

/// Main application state.
pub struct App {
    // Runtime must outlive every spawned panel task
    rt: Runtime,
    api: Arc<dyn SalesApi>,
    config: AppConfig,
    screen: Screen,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, rt: Runtime, api: Arc<dyn SalesApi>) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let screen = Screen::open(Panel::default(), &api, &rt);
        Self {
            rt,
            api,
            config,
            screen,
        }
    }

    /// Switch screens. Re-selecting the current one reopens it fresh.
    pub fn navigate(&mut self, panel: Panel) {
        tracing::debug!("Navigating to {}", panel.name());
        self.screen = Screen::open(panel, &self.api, &self.rt);
    }

    fn is_busy(&self) -> bool {
        match &self.screen {
            Screen::SalesList(p) => p.is_busy(),
            Screen::Composer(p) => p.is_busy(),
        }
    }

    /// Render menu bar.
    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let current = self.screen.panel();
                for panel in [Panel::SalesList, Panel::Composer] {
                    let label = format!("{} {}", panel.icon(), panel.name());
                    if ui.selectable_label(current == panel, label).clicked() {
                        self.navigate(panel);
                    }
                }
            });
        });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.disable();
                ui.horizontal(|ui| {
                    ui.colored_label(colors::NEUTRAL, format!("API: {}", self.config.api.base_url));

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.is_busy() {
                            ui.spinner();
                            ui.colored_label(colors::WARNING, "Working...");
                        }
                    });
                });
            });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        match &mut self.screen {
            Screen::SalesList(p) => p.poll(),
            Screen::Composer(p) => p.poll(),
        }

        // Request repaint during async operations
        if self.is_busy() {
            ctx.request_repaint();
        }

        self.show_menu_bar(ctx);
        self.show_status_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match &mut self.screen {
            Screen::SalesList(p) => p.show(ui),
            Screen::Composer(p) => p.show(ui),
        });
    }
}
