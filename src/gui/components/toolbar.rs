// src/gui/components/toolbar.rs
//
// Search, status filter, display options and the Copy/Export buttons.

use eframe::egui;
use crate::{
    config::options::{ExportFormat, RankDisplay},
    filter::StatusFilter,
    gui::{actions, app::App},
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let total = app.ctl.board().len();
    let shown = {
        let board = app.board();
        app.view(&board).len()
    };

    ui.horizontal(|ui| {
        let query = &mut app.state.gui.query;

        ui.label("Search:");
        let search = ui.add(
            egui::TextEdit::singleline(&mut query.search)
                .hint_text("Name…")
                .desired_width(200.0),
        );
        if search.changed() {
            logd!("UI: search → {:?}", query.search);
        }
        if !query.search.is_empty() && ui.small_button("✖").on_hover_text("Clear search").clicked() {
            query.search.clear();
        }

        ui.separator();

        let before = query.status;
        egui::ComboBox::from_id_salt("status_filter")
            .selected_text(query.status.label())
            .show_ui(ui, |ui| {
                for f in StatusFilter::ALL {
                    ui.selectable_value(&mut query.status, f, f.label());
                }
            });
        if query.status != before {
            logf!("UI: status filter → {}", query.status);
        }

        let policy = &mut app.state.options.policy;
        let mut renumber = policy.rank_display == RankDisplay::Renumber;
        if ui.checkbox(&mut renumber, "Renumber").on_hover_text("Number rows by position in this view").changed() {
            policy.rank_display = if renumber { RankDisplay::Renumber } else { RankDisplay::Canonical };
            logf!("UI: rank display → {:?}", policy.rank_display);
        }

        ui.separator();
        ui.label(format!("Showing {} of {}", shown, total));
    });

    ui.horizontal(|ui| {
        let export = &mut app.state.options.export;
        ui.label("Format:");
        ui.selectable_value(&mut export.format, ExportFormat::Csv, "CSV");
        ui.selectable_value(&mut export.format, ExportFormat::Tsv, "TSV");

        if ui.button("Copy").clicked() {
            actions::copy(app, ui.ctx());
        }
        let export_btn = ui
            .button("Export")
            .on_hover_text(app.state.options.export.out_path().display().to_string());
        if export_btn.clicked() {
            actions::export(app);
        }
    });
}
