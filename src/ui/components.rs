//! Shared UI components.

use eframe::egui::{self, Color32, Response, RichText, Ui};

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
    pub const PRIMARY: Color32 = Color32::from_rgb(0, 123, 255);
}

/// Render a panel header with title and an optional subtitle.
pub fn panel_header(ui: &mut Ui, title: &str, subtitle: Option<&str>) {
    ui.heading(RichText::new(title).size(24.0));
    if let Some(subtitle) = subtitle {
        ui.label(RichText::new(subtitle).weak());
    }
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);
}

/// Plain button with a leading phosphor icon.
pub fn styled_button_with_icon(ui: &mut Ui, icon: &str, label: &str) -> Response {
    ui.button(format!("{icon} {label}"))
}

/// Filled primary button with a leading icon.
pub fn primary_button_with_icon(ui: &mut Ui, enabled: bool, icon: &str, label: &str) -> Response {
    let text = RichText::new(format!("{icon} {label}")).color(Color32::WHITE);
    let fill = if enabled { colors::PRIMARY } else { colors::NEUTRAL };
    ui.add_enabled(enabled, egui::Button::new(text).fill(fill))
}

/// Small red action button (row removal and the like).
pub fn danger_action_button(ui: &mut Ui, icon: &str, label: &str) -> Response {
    ui.add(egui::Button::new(RichText::new(format!("{icon} {label}")).color(colors::ERROR)))
}

/// Centered spinner with a title and a detail line.
pub fn loading_view(ui: &mut Ui, title: &str, detail: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.spinner();
        ui.add_space(10.0);
        ui.label(RichText::new(title).strong().size(18.0));
        ui.label(RichText::new(detail).weak());
    });
}

/// Centered error message with a retry button. Returns `true` when retry is clicked.
pub fn error_view(ui: &mut Ui, icon: &str, message: &str, hint: Option<&str>) -> bool {
    let mut retry = false;
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(RichText::new(icon).size(40.0).color(colors::ERROR));
        ui.add_space(10.0);
        ui.colored_label(colors::ERROR, message);
        if let Some(hint) = hint {
            ui.label(RichText::new(hint).weak());
        }
        ui.add_space(15.0);
        if ui.button("Retry").clicked() {
            retry = true;
        }
    });
    retry
}
