// src/gui/components/data_table.rs
//
// Draws the leaderboard table for the current view. Header clicks change the
// display sort; hovering a count lists the names behind it; clicking a row
// opens its details underneath.

use eframe::egui::{self, Align, Color32, Layout, RichText, Sense, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::{
    filter::{Sort, SortKey},
    gui::app::App,
    model::{Participant, Progress},
};

const DONE: Color32 = Color32::from_rgb(0x4c, 0xaf, 0x50);
const BUSY: Color32 = Color32::from_rgb(0xf0, 0xd2, 0x3c);
const IDLE: Color32 = Color32::from_rgb(0x9e, 0x9e, 0x9e);

const ROW_H: f32 = 22.0;
const DETAILS_H: f32 = 150.0;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let board = app.board();
    let view = app.view(&board);
    let yes = app.state.options.policy.yes_match;

    if board.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label(if app.ctl.is_loading() { "Loading…" } else { "No participants" });
        });
        return;
    }

    // Details for the expanded row, drawn last at the bottom.
    let expanded = app.state.gui.expanded_in(&board);

    let table_h = ui.available_height() - if expanded.is_some() { DETAILS_H } else { 0.0 };
    let sort = app.state.gui.query.sort;
    let mut clicked_sort: Option<SortKey> = None;
    let mut clicked_row: Option<usize> = None;

    ui.style_mut().spacing.scroll.floating = false;

    TableBuilder::new(ui)
        .striped(true)
        .sense(Sense::click())
        .max_scroll_height(table_h.max(80.0))
        .column(Column::exact(48.0))
        .column(Column::initial(220.0).at_least(80.0).resizable(true).clip(true))
        .column(Column::initial(110.0).resizable(true))
        .column(Column::initial(100.0))
        .column(Column::initial(100.0))
        .column(Column::remainder().at_least(90.0))
        .header(24.0, |mut header| {
            for (label, key) in [
                ("#", Some(SortKey::Rank)),
                ("Name", Some(SortKey::Name)),
                ("Access code", None),
                ("Skill badges", Some(SortKey::SkillBadges)),
                ("Arcade games", Some(SortKey::ArcadeGames)),
                ("Status", None),
            ] {
                header.col(|ui| {
                    ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                    let text = match key {
                        Some(k) if k == sort.key && sort != Sort::default() => {
                            format!("{} {}", label, if sort.descending { "⏷" } else { "⏶" })
                        }
                        _ => s!(label),
                    };
                    let resp = ui.add(
                        egui::Label::new(RichText::new(text).strong())
                            .selectable(false)
                            .sense(if key.is_some() { Sense::click() } else { Sense::hover() }),
                    );
                    if let Some(k) = key {
                        if resp.on_hover_text("Click to sort").clicked() {
                            clicked_sort = Some(k);
                        }
                    }
                });
            }
        })
        .body(|body| {
            body.rows(ROW_H, view.len(), |mut row| {
                let i = row.index();
                let (Some(rank), Some(p)) = (view.display_rank(i), view.row(i)) else { return };
                row.set_selected(app.state.gui.is_expanded(p));

                row.col(|ui| {
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(rank.to_string());
                    });
                });
                row.col(|ui| {
                    ui.style_mut().wrap_mode = Some(TextWrapMode::Truncate);
                    ui.label(&p.name);
                });
                row.col(|ui| {
                    let redeemed = p.is_redeemed(yes);
                    let txt = RichText::new(if p.access_status.is_empty() { "—" } else { p.access_status.as_str() });
                    ui.label(if redeemed { txt } else { txt.color(IDLE) });
                });
                row.col(|ui| {
                    count_cell(ui, p.skill_badge_count, &p.skill_badge_names, "skill badges");
                });
                row.col(|ui| {
                    count_cell(ui, p.arcade_count, &p.arcade_names, "arcade games");
                });
                row.col(|ui| {
                    let (txt, color) = match p.progress() {
                        Progress::Completed => ("Completed", DONE),
                        Progress::InProgress => ("In progress", BUSY),
                        Progress::NotStarted => ("Not started", IDLE),
                    };
                    ui.label(RichText::new(txt).color(color));
                });

                if row.response().clicked() {
                    clicked_row = Some(p.original_index);
                }
            });
        });

    if let Some(p) = expanded {
        ui.separator();
        details(ui, p);
    }

    if let Some(k) = clicked_sort {
        let q = &mut app.state.gui.query;
        q.sort = q.sort.toggle(k);
        logf!("UI: sort → {:?} desc={}", q.sort.key, q.sort.descending);
    }
    if let Some(ix) = clicked_row {
        app.state.gui.toggle_expanded(ix);
    }
}

fn count_cell(ui: &mut egui::Ui, count: u32, names: &[String], what: &str) {
    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
        let resp = ui.label(count.to_string());
        if !names.is_empty() {
            resp.on_hover_ui(|ui| {
                ui.label(RichText::new(format!("Completed {what}:")).strong());
                for n in names {
                    ui.label(format!("• {n}"));
                }
            });
        }
    });
}

fn details(ui: &mut egui::Ui, p: &Participant) {
    ui.horizontal(|ui| {
        ui.heading(&p.name);
        ui.label(RichText::new(format!("rank {}", p.rank)).weak());
    });
    egui::ScrollArea::vertical()
        .id_salt("participant_details")
        .max_height(DETAILS_H - 40.0)
        .show(ui, |ui| {
            ui.columns(2, |cols| {
                name_list(&mut cols[0], "Skill badges", &p.skill_badge_names);
                name_list(&mut cols[1], "Arcade games", &p.arcade_names);
            });
        });
}

fn name_list(ui: &mut egui::Ui, title: &str, names: &[String]) {
    ui.label(RichText::new(format!("{title} ({})", names.len())).strong());
    if names.is_empty() {
        ui.label(RichText::new("none yet").weak());
    }
    for n in names {
        ui.label(n);
    }
}
