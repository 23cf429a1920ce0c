// src/gui/components/top_bar.rs
//
// Title, source, last update time, manual reload and the status line.

use eframe::egui::{self, RichText, widgets::Spinner};
use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        ui.heading("Arcade Leaderboard");
        ui.separator();
        ui.label(RichText::new(app.ctl.source().describe()).monospace().weak());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let reload = ui.add_enabled(!app.ctl.is_loading(), egui::Button::new("⟳ Reload"));
            if reload.clicked() {
                logf!("UI: Manual reload");
                actions::spawn_reload(app, ui.ctx());
            }
            if app.ctl.is_loading() {
                ui.add(Spinner::new().size(16.0));
            }

            let updated = match app.ctl.last_refresh() {
                Some(t) => format!("Last updated {}", t.format("%H:%M:%S")),
                None => s!("Not loaded yet"),
            };
            ui.label(updated);
            ui.separator();
            ui.label(app.status_text());
        });
    });
}
