// src/gui/actions/copy.rs
use eframe::egui;
use crate::{gui::app::App, file};

pub fn copy(app: &mut App, ui_ctx: &egui::Context) {
    let board = app.board();
    let view = app.view(&board);

    if view.is_empty() {
        app.status("Nothing to copy");
        logd!("Copy: Clicked, but there's nothing to copy");
        return;
    }

    let format = app.state.options.export.format;
    logf!("Copy: rows={} format={:?}", view.len(), format);

    ui_ctx.copy_text(file::to_export_string(&view, format));
    app.status(format!("Copied {} row(s) to clipboard", view.len()));
}
