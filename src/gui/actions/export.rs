// src/gui/actions/export.rs
use crate::{gui::app::App, file};

pub fn export(app: &mut App) {
    let board = app.board();
    let view = app.view(&board);

    let status_msg = if view.is_empty() {
        logd!("Export: Clicked, but there's nothing to export");
        s!("Nothing to export")
    } else {
        logf!(
            "Export: Begin rows={} path={}",
            view.len(),
            app.state.options.export.out_path().display()
        );
        match file::write_export(&app.state.options.export, &view) {
            Ok(path) => format!("Exported {} row(s) to {}", view.len(), path.display()),
            Err(e) => {
                loge!("Export: Error: {}", e);
                format!("Export error: {e}")
            }
        }
    };

    app.status(status_msg);
}
