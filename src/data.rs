// src/data.rs
//
// Canonical leaderboard holder.
//
// - Leaderboard: ranked, unfiltered participants from the last successful
//                reload. Immutable; a reload builds a new one and the
//                refresh controller swaps it in whole.
// - Views over it (search/status/sort) live in src/filter.rs and only hold
//   row indices.

use std::sync::Arc;

use crate::{
    config::options::AppOptions,
    csv::Table,
    model::Participant,
    normalize, rank,
    stats::{self, Summary, TierProgress},
};

#[derive(Clone, Debug, Default)]
pub struct Leaderboard {
    participants: Arc<[Participant]>,
}

impl Leaderboard {
    pub fn empty() -> Self { Self::default() }

    /// Participants must already be ranked.
    pub fn from_ranked(ranked: Vec<Participant>) -> Self {
        debug_assert!(ranked.iter().enumerate().all(|(i, p)| p.rank == i + 1));
        Self { participants: ranked.into() }
    }

    /// normalize → rank, in one go.
    pub fn build(table: &Table, opts: &AppOptions) -> Self {
        let participants = normalize::normalize_table(table, &opts.policy, &opts.goals);
        Self::from_ranked(rank::rank(participants, opts.policy.metric))
    }

    pub fn participants(&self) -> &[Participant] { &self.participants }
    pub fn get(&self, ix: usize) -> Option<&Participant> { self.participants.get(ix) }
    pub fn len(&self) -> usize { self.participants.len() }
    pub fn is_empty(&self) -> bool { self.participants.is_empty() }

    /// Same allocation, i.e. nothing was swapped in between.
    pub fn same_as(&self, other: &Leaderboard) -> bool {
        Arc::ptr_eq(&self.participants, &other.participants)
    }

    pub fn summary(&self, opts: &AppOptions) -> Summary {
        Summary::compute(&self.participants, opts.policy.yes_match, &opts.goals)
    }

    pub fn tiers(&self, opts: &AppOptions) -> Vec<TierProgress> {
        stats::tiers(self.summary(opts).completed, &opts.goals)
    }
}
