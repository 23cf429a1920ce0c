// src/gui/app.rs
use std::{
    error::Error,
    sync::{Arc, Mutex, mpsc::{self, Receiver, Sender}},
    time::Instant,
};

use eframe::egui;

use crate::{
    config::state::AppState,
    data::Leaderboard,
    filter::View,
    refresh::RefreshController,
    source::{self, Source},
};

use super::actions::{self, JobResult};

pub fn run(options: eframe::NativeOptions, state: AppState) -> Result<(), Box<dyn Error>> {
    let src = source::open(&state.options.source.location)?;
    eframe::run_native(
        "Arcade Leaderboard",
        options,
        Box::new(move |_cc| Ok(Box::new(App::new(state, src)))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth for UI choices (UI thread only)
    pub state: AppState,

    // canonical leaderboard + reload lifecycle
    pub ctl: RefreshController,

    // status line (workers write here)
    pub status: Arc<Mutex<String>>,

    // finished jobs from worker threads
    pub tx: Sender<JobResult>,
    pub rx: Receiver<JobResult>,

    started: bool,
}

impl App {
    pub fn new(state: AppState, src: Arc<dyn Source>) -> Self {
        logf!(
            "Init: source={} poll={}s metric={:?}",
            src.describe(),
            state.options.source.poll_secs,
            state.options.policy.metric
        );
        let ctl = RefreshController::new(src, state.options.clone());
        let (tx, rx) = mpsc::channel();

        Self {
            state,
            ctl,
            status: Arc::new(Mutex::new(s!("Idle"))),
            tx,
            rx,
            started: false,
        }
    }

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Cheap handle on the current leaderboard (shares the rows).
    pub fn board(&self) -> Leaderboard {
        self.ctl.board().clone()
    }

    /// Current filtered/sorted view over `board`.
    pub fn view<'a>(&self, board: &'a Leaderboard) -> View<'a> {
        let policy = &self.state.options.policy;
        View::build(board, &self.state.gui.query, policy.yes_match, policy.rank_display)
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        if !self.started {
            self.started = true;
            self.ctl.schedule(now);
            actions::spawn_reload(self, ctx);
        }

        actions::poll_jobs(self, ctx);
        actions::spawn_check(self, ctx, now);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            crate::gui::components::top_bar::draw(ui, self);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            crate::gui::components::error_panel::draw(ui, self);
            crate::gui::components::stats_panel::draw(ui, self);

            ui.separator();

            crate::gui::components::toolbar::draw(ui, self);

            ui.separator();

            crate::gui::components::data_table::draw(ui, self);
        });

        ctx.request_repaint_after(self.ctl.time_until_check(Instant::now()));
    }
}
