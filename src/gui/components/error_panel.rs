// src/gui/components/error_panel.rs
use eframe::egui::{self, Color32, RichText};
use crate::{gui::app::App, refresh::RefreshState};

const ERR_FILL: Color32 = Color32::from_rgb(0x5a, 0x1e, 0x1e);
const ERR_TEXT: Color32 = Color32::from_rgb(0xff, 0xb4, 0xa8);

/// Shown only while the last reload failed. Stale rows stay visible below.
pub fn draw(ui: &mut egui::Ui, app: &App) {
    if app.ctl.state() != RefreshState::Error {
        return;
    }
    let Some(msg) = app.ctl.error_message() else { return };

    egui::Frame::new()
        .fill(ERR_FILL)
        .corner_radius(4)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(msg).color(ERR_TEXT));
            if !app.ctl.board().is_empty() {
                ui.label(RichText::new("Showing the last data that loaded successfully.").color(ERR_TEXT).small());
            }
        });
    ui.add_space(4.0);
}
