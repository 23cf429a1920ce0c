// src/gui/actions/refresh.rs
//
// Reloads and change checks run on worker threads; results come back over
// the app's channel and are applied on the UI thread in `poll_jobs`.

use std::{thread, time::Instant};

use chrono::{DateTime, Utc};
use eframe::egui;

use crate::{
    error::LoadError,
    gui::{app::App, progress::GuiProgress},
    refresh::Snapshot,
};

pub enum JobResult {
    Reload(Result<Snapshot, LoadError>),
    Check(Result<Option<DateTime<Utc>>, LoadError>),
}

/// Start a full reload unless one is already running.
pub fn spawn_reload(app: &mut App, ctx: &egui::Context) {
    let Some(job) = app.ctl.begin_reload() else {
        app.status("Already loading…");
        return;
    };

    let tx = app.tx.clone();
    let ctx = ctx.clone();
    let status = app.status.clone();

    thread::spawn(move || {
        let mut prog = GuiProgress::new(status);
        let outcome = job.run(Some(&mut prog));
        if tx.send(JobResult::Reload(outcome)).is_err() {
            logd!("Reload: UI gone, result dropped");
        }
        ctx.request_repaint();
    });
}

/// Start a metadata probe if one is due.
pub fn spawn_check(app: &mut App, ctx: &egui::Context, now: Instant) {
    let Some(job) = app.ctl.begin_check(now) else { return };

    let tx = app.tx.clone();
    let ctx = ctx.clone();

    thread::spawn(move || {
        let _ = tx.send(JobResult::Check(job.run()));
        ctx.request_repaint();
    });
}

/// Apply finished jobs. A check that sees a newer version chains a reload.
pub fn poll_jobs(app: &mut App, ctx: &egui::Context) {
    while let Ok(result) = app.rx.try_recv() {
        match result {
            JobResult::Reload(outcome) => {
                let ok = outcome.is_ok();
                app.ctl.finish_reload(outcome);
                if ok {
                    app.status(format!("Loaded {} participants", app.ctl.board().len()));
                } else {
                    app.status("Load failed");
                }
            }
            JobResult::Check(outcome) => {
                if app.ctl.finish_check(outcome) {
                    spawn_reload(app, ctx);
                }
            }
        }
    }
}
