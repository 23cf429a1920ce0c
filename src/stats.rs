// src/stats.rs
//! Aggregate calculator. Pure data; recomputed from the full collection on
//! every call, no running counters.

use crate::{
    config::options::{Goals, Tier, YesMatch},
    model::{Participant, Progress},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub redeemed: usize,
    pub not_redeemed: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub redeemed_not_started: usize,
    /// Skill badge count exactly at the skill goal
    pub skill_goal_reached: usize,
    /// At least one arcade game
    pub arcade_started: usize,
}

impl Summary {
    pub fn compute(participants: &[Participant], yes: YesMatch, goals: &Goals) -> Self {
        let mut s = Summary { total: participants.len(), ..Summary::default() };

        for p in participants {
            let redeemed = p.is_redeemed(yes);
            if redeemed { s.redeemed += 1; } else { s.not_redeemed += 1; }

            match p.progress() {
                Progress::Completed => s.completed += 1,
                Progress::InProgress => s.in_progress += 1,
                Progress::NotStarted => {
                    s.not_started += 1;
                    if redeemed { s.redeemed_not_started += 1; }
                }
            }

            if p.skill_badge_count == goals.skill_goal { s.skill_goal_reached += 1; }
            if p.arcade_count >= 1 { s.arcade_started += 1; }
        }
        s
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TierProgress {
    pub label: String,
    pub goal: u32,
    /// `round(completed / goal * 100)`, may exceed 100
    pub raw_percent: u32,
    /// `raw_percent` clamped to 0..=100 for bars
    pub percent: u8,
}

impl TierProgress {
    pub fn fraction(&self) -> f32 {
        self.percent as f32 / 100.0
    }
}

pub fn tier_progress(completed: usize, tier: &Tier) -> TierProgress {
    let raw_percent = if tier.goal == 0 {
        100
    } else {
        (completed as f64 / tier.goal as f64 * 100.0).round() as u32
    };
    TierProgress {
        label: tier.label.clone(),
        goal: tier.goal,
        raw_percent,
        percent: raw_percent.min(100) as u8,
    }
}

pub fn tiers(completed: usize, goals: &Goals) -> Vec<TierProgress> {
    goals.tiers.iter().map(|t| tier_progress(completed, t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::participant;

    #[test]
    fn example_partition() {
        let ps = vec![
            participant("C", 19, 1, true),
            participant("A", 5, 0, false),
            participant("B", 5, 0, false),
        ];
        let s = Summary::compute(&ps, YesMatch::IgnoreCase, &Goals::default());
        assert_eq!((s.total, s.completed, s.in_progress, s.not_started), (3, 1, 2, 0));
        assert_eq!(s.arcade_started, 1);
    }

    #[test]
    fn partition_holds_with_trusted_flag_on_empty_row() {
        let mut odd = participant("odd", 0, 0, true);
        odd.access_status = s!("No");
        let ps = vec![odd, participant("idle", 0, 0, false), participant("busy", 3, 0, false)];
        let s = Summary::compute(&ps, YesMatch::IgnoreCase, &Goals::default());
        assert_eq!(s.completed + s.in_progress + s.not_started, s.total);
        assert_eq!(s.redeemed + s.not_redeemed, s.total);
        assert_eq!(s.not_redeemed, 1);
        assert_eq!(s.redeemed_not_started, 1);
    }

    #[test]
    fn skill_goal_is_exact_match() {
        let goals = Goals::default();
        let ps = vec![
            participant("at", goals.skill_goal, 0, false),
            participant("over", goals.skill_goal + 1, 0, false),
        ];
        assert_eq!(Summary::compute(&ps, YesMatch::IgnoreCase, &goals).skill_goal_reached, 1);
    }

    #[test]
    fn tier_percent_rounds_and_clamps() {
        let t = Tier { label: s!("T"), goal: 30 };
        let p = tier_progress(10, &t);
        assert_eq!((p.raw_percent, p.percent), (33, 33));
        let over = tier_progress(45, &t);
        assert_eq!((over.raw_percent, over.percent), (150, 100));
        let half = tier_progress(1, &Tier { label: s!("T"), goal: 8 });
        assert_eq!(half.raw_percent, 13); // 12.5 rounds away from zero
        assert_eq!(tier_progress(0, &Tier { label: s!("T"), goal: 0 }).percent, 100);
    }

    #[test]
    fn empty_collection_is_all_zero() {
        let s = Summary::compute(&[], YesMatch::IgnoreCase, &Goals::default());
        assert_eq!(s, Summary::default());
        assert!(tiers(0, &Goals::default()).iter().all(|t| t.percent == 0));
    }
}
