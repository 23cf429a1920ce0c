// src/gui/components/stats_panel.rs
//
// Summary counters and tier progress bars. Always computed from the
// canonical leaderboard, never from the filtered view.

use eframe::egui::{self, ProgressBar, RichText};
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &App) {
    let board = app.ctl.board();
    let opts = &app.state.options;
    let s = board.summary(opts);

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 18.0;
        stat(ui, "Participants", s.total);
        stat(ui, "Redeemed", s.redeemed);
        stat(ui, "Not redeemed", s.not_redeemed);
        stat(ui, "Completed", s.completed);
        stat(ui, "In progress", s.in_progress);
        stat(ui, "Not started", s.not_started);
        stat(ui, "Redeemed, not started", s.redeemed_not_started);
        stat(ui, &format!("{} skill badges", opts.goals.skill_goal), s.skill_goal_reached);
        stat(ui, "Arcade started", s.arcade_started);
    });

    ui.add_space(4.0);

    for t in board.tiers(opts) {
        ui.horizontal(|ui| {
            ui.add_sized([60.0, 18.0], egui::Label::new(RichText::new(&t.label).strong()));
            ui.add(
                ProgressBar::new(t.fraction())
                    .desired_width(ui.available_width().min(520.0))
                    .text(format!("{}/{} ({}%)", s.completed, t.goal, t.raw_percent)),
            );
        });
    }
}

fn stat(ui: &mut egui::Ui, label: &str, value: usize) {
    ui.vertical(|ui| {
        ui.label(RichText::new(value.to_string()).heading().strong());
        ui.label(RichText::new(label).small().weak());
    });
}
