// src/rank.rs
use std::cmp::Reverse;

use crate::{config::options::Metric, model::Participant};

/// Full reorder: descending score, ties by ascending `original_index`.
/// Ranks are 1..N in the resulting order; equal scores still get distinct ranks.
pub fn rank(mut participants: Vec<Participant>, metric: Metric) -> Vec<Participant> {
    participants.sort_by_key(|p| (Reverse(p.score(metric)), p.original_index));
    for (i, p) in participants.iter_mut().enumerate() {
        p.rank = i + 1;
    }
    participants
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::participant;

    fn at(name: &str, badges: u32, arcade: u32, ix: usize) -> Participant {
        Participant { original_index: ix, ..participant(name, badges, arcade, false) }
    }

    #[test]
    fn descending_with_index_tie_break() {
        let ranked = rank(
            vec![at("A", 5, 0, 0), at("B", 5, 0, 1), at("C", 19, 1, 2)],
            Metric::Combined,
        );
        let got: Vec<(&str, usize)> = ranked.iter().map(|p| (p.name.as_str(), p.rank)).collect();
        assert_eq!(got, vec![("C", 1), ("A", 2), ("B", 3)]);
    }

    #[test]
    fn tie_break_ignores_input_order() {
        let ranked = rank(vec![at("late", 3, 0, 9), at("early", 2, 1, 1)], Metric::Combined);
        assert_eq!(ranked[0].name, "early");
        assert_eq!(ranked[1].name, "late");
    }

    #[test]
    fn badges_only_metric_ignores_arcade() {
        let ranked = rank(vec![at("arcade", 1, 9, 0), at("badges", 2, 0, 1)], Metric::SkillBadges);
        assert_eq!(ranked[0].name, "badges");
    }

    #[test]
    fn ranks_are_exactly_one_to_n() {
        let input: Vec<Participant> = (0..25).map(|i| at("p", (i % 4) as u32, 0, i)).collect();
        let ranked = rank(input, Metric::Combined);
        let ranks: Vec<usize> = ranked.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, (1..=25).collect::<Vec<_>>());
        assert!(ranked.windows(2).all(|w| {
            let (a, b) = (&w[0], &w[1]);
            a.score(Metric::Combined) > b.score(Metric::Combined)
                || (a.score(Metric::Combined) == b.score(Metric::Combined) && a.original_index < b.original_index)
        }));
    }

    #[test]
    fn rerank_recomputes_from_scratch() {
        let once = rank(vec![at("x", 1, 0, 0), at("y", 2, 0, 1)], Metric::Combined);
        let twice = rank(once.clone(), Metric::Combined);
        assert_eq!(once, twice);
    }
}
