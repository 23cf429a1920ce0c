// src/model.rs
//! Participant records as the rest of the pipeline sees them.

use crate::config::options::{Metric, YesMatch};

/// One normalized row: a single person's progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    pub access_status: String,
    pub skill_badge_count: u32,
    pub skill_badge_names: Vec<String>,
    pub arcade_count: u32,
    pub arcade_names: Vec<String>,
    pub all_completed: bool,
    /// Position among the decoded data rows. Tie-breaker only.
    pub original_index: usize,
    /// 1-based, assigned by `rank::rank`. Zero until ranked.
    pub rank: usize,
}

/// Mutually exclusive progress category. `Completed` wins over the counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Completed,
    InProgress,
    NotStarted,
}

impl Participant {
    pub fn score(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Combined => self.skill_badge_count as u64 + self.arcade_count as u64,
            Metric::SkillBadges => self.skill_badge_count as u64,
        }
    }

    pub fn has_started(&self) -> bool {
        self.skill_badge_count > 0 || self.arcade_count > 0
    }

    pub fn progress(&self) -> Progress {
        if self.all_completed {
            Progress::Completed
        } else if self.has_started() {
            Progress::InProgress
        } else {
            Progress::NotStarted
        }
    }

    pub fn is_redeemed(&self, yes: YesMatch) -> bool {
        yes.is_yes(&self.access_status)
    }
}

#[cfg(test)]
pub(crate) fn participant(name: &str, badges: u32, arcade: u32, completed: bool) -> Participant {
    Participant {
        name: s!(name),
        access_status: s!("Yes"),
        skill_badge_count: badges,
        skill_badge_names: Vec::new(),
        arcade_count: arcade,
        arcade_names: Vec::new(),
        all_completed: completed,
        original_index: 0,
        rank: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_flag_wins_over_counts() {
        assert_eq!(participant("a", 0, 0, true).progress(), Progress::Completed);
        assert_eq!(participant("b", 0, 1, false).progress(), Progress::InProgress);
        assert_eq!(participant("c", 0, 0, false).progress(), Progress::NotStarted);
    }

    #[test]
    fn score_by_metric() {
        let p = participant("a", 5, 2, false);
        assert_eq!(p.score(Metric::Combined), 7);
        assert_eq!(p.score(Metric::SkillBadges), 5);
    }
}
