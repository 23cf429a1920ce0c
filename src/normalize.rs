// src/normalize.rs
//! Record normalizer: raw header-keyed row → [`Participant`].
//!
//! Total over rows with a name. Counts that don't parse become 0, missing
//! lists become empty. A blank name yields `None`; callers drop the row.

use crate::{
    config::consts::*,
    config::options::{Completion, Goals, Policy},
    csv::{Record, Table},
    model::Participant,
};

/// Column-name → value lookup. `csv::Record` is the production impl.
pub trait RawRow {
    fn field(&self, column: &str) -> Option<&str>;
}

impl RawRow for Record<'_> {
    fn field(&self, column: &str) -> Option<&str> { self.get(column) }
}

impl RawRow for std::collections::HashMap<String, String> {
    fn field(&self, column: &str) -> Option<&str> { self.get(column).map(|s| s.as_str()) }
}

pub fn normalize_row(
    row: &impl RawRow,
    original_index: usize,
    policy: &Policy,
    goals: &Goals,
) -> Option<Participant> {
    let name = row.field(COL_NAME).map(str::trim).unwrap_or("");
    if name.is_empty() {
        return None;
    }

    let skill_badge_count = parse_count(row.field(COL_SKILL_COUNT));
    let arcade_count = parse_count(row.field(COL_ARCADE_COUNT));

    let all_completed = match policy.completion {
        Completion::Trusted => row
            .field(COL_COMPLETED)
            .is_some_and(|v| policy.yes_match.is_yes(v)),
        Completion::Derived => {
            skill_badge_count >= goals.skill_goal && arcade_count >= goals.arcade_goal
        }
    };

    Some(Participant {
        name: s!(name),
        access_status: s!(row.field(COL_ACCESS).map(str::trim).unwrap_or("")),
        skill_badge_count,
        skill_badge_names: parse_list(row.field(COL_SKILL_NAMES)),
        arcade_count,
        arcade_names: parse_list(row.field(COL_ARCADE_NAMES)),
        all_completed,
        original_index,
        rank: 0,
    })
}

/// Normalize every data row; blank-name rows still consume an index.
pub fn normalize_table(table: &Table, policy: &Policy, goals: &Goals) -> Vec<Participant> {
    let out: Vec<Participant> = table
        .records()
        .enumerate()
        .filter_map(|(ix, rec)| normalize_row(&rec, ix, policy, goals))
        .collect();

    let dropped = table.row_count() - out.len();
    if dropped > 0 {
        logd!("Normalize: dropped {} row(s) without a name", dropped);
    }
    out
}

/// Leading decimal digits after trimming and one optional `+`; anything else
/// is 0. Saturates instead of overflowing.
pub fn parse_count(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else { return 0 };
    let raw = raw.trim();
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    let mut n: u32 = 0;
    for ch in digits.chars() {
        let Some(d) = ch.to_digit(10) else { break };
        n = n.saturating_mul(10).saturating_add(d);
    }
    n
}

pub fn parse_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(LIST_SEP)
            .map(str::trim)
            .filter(|seg| !seg.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}
