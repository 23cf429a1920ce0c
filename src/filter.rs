// src/filter.rs
//! Filter engine: search + status category + display sort over the
//! canonical leaderboard.
//!
//! A [`View`] is zero-copy: it borrows the [`Leaderboard`] and keeps only the
//! positions of matching rows. Building one never touches the canonical
//! data, so it can be rebuilt on every keystroke.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::{
    config::options::{RankDisplay, YesMatch},
    data::Leaderboard,
    model::{Participant, Progress},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    InProgress,
    NotStarted,
    NotRedeemed,
    RedeemedNotStarted,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 6] = [
        StatusFilter::All,
        StatusFilter::Completed,
        StatusFilter::InProgress,
        StatusFilter::NotStarted,
        StatusFilter::NotRedeemed,
        StatusFilter::RedeemedNotStarted,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Completed => "completed",
            StatusFilter::InProgress => "in-progress",
            StatusFilter::NotStarted => "not-started",
            StatusFilter::NotRedeemed => "not-redeemed",
            StatusFilter::RedeemedNotStarted => "redeemed-not-started",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All participants",
            StatusFilter::Completed => "Completed",
            StatusFilter::InProgress => "In progress",
            StatusFilter::NotStarted => "Not started",
            StatusFilter::NotRedeemed => "Code not redeemed",
            StatusFilter::RedeemedNotStarted => "Redeemed, not started",
        }
    }

    pub fn matches(self, p: &Participant, yes: YesMatch) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => p.progress() == Progress::Completed,
            StatusFilter::InProgress => p.progress() == Progress::InProgress,
            StatusFilter::NotStarted => p.progress() == Progress::NotStarted,
            StatusFilter::NotRedeemed => !p.is_redeemed(yes),
            StatusFilter::RedeemedNotStarted => {
                p.is_redeemed(yes) && p.progress() == Progress::NotStarted
            }
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s.is_empty() { return Ok(StatusFilter::All); }
        StatusFilter::ALL
            .into_iter()
            .find(|f| f.keyword() == s)
            .ok_or_else(|| format!("unknown status `{}`", s))
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Rank,
    Name,
    SkillBadges,
    ArcadeGames,
}

impl FromStr for SortKey {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rank" => Ok(SortKey::Rank),
            "name" => Ok(SortKey::Name),
            "badges" => Ok(SortKey::SkillBadges),
            "arcade" => Ok(SortKey::ArcadeGames),
            other => Err(format!("unknown sort key `{}`", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub descending: bool,
}

impl Sort {
    /// Header click: same column flips direction, a new column starts at its natural order.
    pub fn toggle(self, key: SortKey) -> Sort {
        if self.key == key {
            Sort { key, descending: !self.descending }
        } else {
            let descending = matches!(key, SortKey::SkillBadges | SortKey::ArcadeGames);
            Sort { key, descending }
        }
    }

    fn compare(&self, a: &Participant, b: &Participant) -> Ordering {
        let primary = match self.key {
            SortKey::Rank => a.rank.cmp(&b.rank),
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::SkillBadges => a.skill_badge_count.cmp(&b.skill_badge_count),
            SortKey::ArcadeGames => a.arcade_count.cmp(&b.arcade_count),
        };
        let primary = if self.descending { primary.reverse() } else { primary };
        primary.then(a.rank.cmp(&b.rank))
    }
}

/// Everything the user can vary about the displayed list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    pub search: String,
    pub status: StatusFilter,
    pub sort: Sort,
}

impl Query {
    pub fn search(text: &str) -> Self {
        Self { search: s!(text), ..Self::default() }
    }

    fn needle(&self) -> String {
        self.search.trim().to_lowercase()
    }
}

/// Filtered, optionally re-sorted projection of a leaderboard.
#[derive(Clone, Debug)]
pub struct View<'a> {
    /// Positions of kept rows in the leaderboard
    pub row_ix: Vec<usize>,
    board: &'a Leaderboard,
    rank_display: RankDisplay,
}

impl<'a> View<'a> {
    pub fn build(board: &'a Leaderboard, query: &Query, yes: YesMatch, rank_display: RankDisplay) -> Self {
        let needle = query.needle();
        let ps = board.participants();

        let mut row_ix: Vec<usize> = ps
            .iter()
            .enumerate()
            .filter(|(_, p)| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .filter(|(_, p)| query.status.matches(p, yes))
            .map(|(i, _)| i)
            .collect();

        if query.sort != Sort::default() {
            row_ix.sort_by(|&a, &b| query.sort.compare(&ps[a], &ps[b]));
        }

        Self { row_ix, board, rank_display }
    }

    /// Whole leaderboard in rank order.
    pub fn all(board: &'a Leaderboard) -> Self {
        Self { row_ix: (0..board.len()).collect(), board, rank_display: RankDisplay::Canonical }
    }

    pub fn len(&self) -> usize { self.row_ix.len() }
    pub fn is_empty(&self) -> bool { self.row_ix.is_empty() }

    /// Borrow a row by its position in the view.
    pub fn row(&self, i: usize) -> Option<&'a Participant> {
        self.row_ix.get(i).and_then(|&ix| self.board.get(ix))
    }

    /// Rank to show next to row `i`.
    pub fn display_rank(&self, i: usize) -> Option<usize> {
        match self.rank_display {
            RankDisplay::Canonical => self.row(i).map(|p| p.rank),
            RankDisplay::Renumber => (i < self.len()).then_some(i + 1),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a Participant)> + '_ {
        (0..self.len()).filter_map(move |i| Some((self.display_rank(i)?, self.row(i)?)))
    }

    /// Owned rows for export/copy: Rank, Name, Access Code, Skill Badges,
    /// Arcade Games, Completed, badge names, arcade names.
    pub fn to_export_rows(&self) -> Vec<Vec<String>> {
        self.iter()
            .map(|(rank, p)| vec![
                rank.to_string(),
                p.name.clone(),
                p.access_status.clone(),
                p.skill_badge_count.to_string(),
                p.arcade_count.to_string(),
                s!(if p.all_completed { "Yes" } else { "No" }),
                p.skill_badge_names.join("|"),
                p.arcade_names.join("|"),
            ])
            .collect()
    }
}

pub const EXPORT_HEADERS: [&str; 8] = [
    "Rank", "Name", "Access Code", "Skill Badges", "Arcade Games", "Completed",
    "Skill Badge Names", "Arcade Game Names",
];
