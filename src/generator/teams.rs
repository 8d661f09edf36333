//! Team formation: splitting a race's four competitors into two teams.
//!
//! # Algorithm
//!
//! Four competitors `[s0, s1, s2, s3]` (chain-group slot order) admit
//! three 2-vs-2 splits, enumerated in a fixed order:
//!
//! | # | team_a | team_b |
//! |---|--------|--------|
//! | 0 | s0, s1 | s2, s3 |
//! | 1 | s0, s2 | s1, s3 |
//! | 2 | s0, s3 | s1, s2 |
//!
//! Each split is costed by the teammate pairs it would repeat, then by
//! the cross-team pairs that have already raced each other. The cheapest
//! split wins; remaining ties go to the first enumerated, so the choice
//! is deterministic for a given seed.
//!
//! The chosen split is applied even if it repeats a teammate; the attempt
//! is then rejected downstream.

use super::history::GenerationContext;
use crate::models::{Competitor, Race, Team};

/// The three splits as slot indices: `[a1, a2, b1, b2]`.
pub const PARTITIONS: [[usize; 4]; 3] = [[0, 1, 2, 3], [0, 2, 1, 3], [0, 3, 1, 2]];

/// Cost of a split, compared lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct PartitionCost {
    /// Teammate pairs that already sailed together.
    pub repeated_teammates: usize,
    /// Opposing pairs that already faced each other.
    pub repeated_opponents: usize,
}

/// Teams produced by a split, in boat order.
pub fn split(group: [Competitor; 4], partition: [usize; 4]) -> (Team, Team) {
    let [a1, a2, b1, b2] = partition.map(|i| group[i]);
    (Team::new(a1, a2), Team::new(b1, b2))
}

/// Costs a split against the history so far.
pub fn partition_cost(
    group: [Competitor; 4],
    partition: [usize; 4],
    ctx: &GenerationContext,
) -> PartitionCost {
    let (team_a, team_b) = split(group, partition);
    let repeated_teammates = [team_a, team_b]
        .iter()
        .filter(|t| ctx.teammates.contains(t.competitor1, t.competitor2))
        .count();
    let repeated_opponents = team_a
        .members()
        .iter()
        .flat_map(|&a| team_b.members().map(|b| (a, b)))
        .filter(|&(a, b)| ctx.opponents.contains(a, b))
        .count();
    PartitionCost {
        repeated_teammates,
        repeated_opponents,
    }
}

/// Picks the cheapest split; ties go to the first enumerated.
pub fn best_partition(group: [Competitor; 4], ctx: &GenerationContext) -> [usize; 4] {
    let mut best = PARTITIONS[0];
    let mut best_cost = partition_cost(group, best, ctx);
    for &partition in &PARTITIONS[1..] {
        let cost = partition_cost(group, partition, ctx);
        if cost < best_cost {
            best = partition;
            best_cost = cost;
        }
    }
    best
}

/// Forms race `number` from a chain group and folds it into the history.
pub fn form_race(number: usize, group: [Competitor; 4], ctx: &mut GenerationContext) -> Race {
    let (team_a, team_b) = split(group, best_partition(group, ctx));
    let race = Race::new(number, team_a, team_b);
    ctx.record_race(&race);
    race
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BoatSet;

    fn group(ids: [usize; 4]) -> [Competitor; 4] {
        ids.map(Competitor)
    }

    #[test]
    fn test_first_partition_on_fresh_history() {
        let mut ctx = GenerationContext::new(8);
        let race = form_race(1, group([0, 1, 2, 3]), &mut ctx);
        assert_eq!(race.team_a, Team::new(Competitor(0), Competitor(1)));
        assert_eq!(race.team_b, Team::new(Competitor(2), Competitor(3)));
        assert_eq!(race.boat_set, BoatSet::A);
    }

    #[test]
    fn test_avoids_repeated_teammates() {
        let mut ctx = GenerationContext::new(8);
        form_race(1, group([0, 1, 2, 3]), &mut ctx);
        // 0 and 1 sailed together; 2 and 3 too.
        let race = form_race(3, group([0, 1, 4, 5]), &mut ctx);
        assert!(!race.team_a.same_members(&Team::new(Competitor(0), Competitor(1))));
        assert_eq!(ctx.teammates.duplicates(), 0);
    }

    #[test]
    fn test_prefers_teaming_previous_opponents() {
        let mut ctx = GenerationContext::new(8);
        form_race(1, group([0, 1, 2, 3]), &mut ctx);
        // Split 0 repeats both teams. Splits 1 and 2 each repeat two
        // opponent pairs, so they tie and the first (0,2 | 1,3) wins.
        let race = form_race(3, group([0, 1, 2, 3]), &mut ctx);
        assert_eq!(race.team_a, Team::new(Competitor(0), Competitor(2)));
        assert_eq!(race.team_b, Team::new(Competitor(1), Competitor(3)));
    }

    #[test]
    fn test_opponent_tie_break() {
        let mut ctx = GenerationContext::new(8);
        // 4 faced 6 and 7; 5 faced 6 and 7.
        form_race(1, group([4, 5, 6, 7]), &mut ctx);
        // Group [4, 6, 5, 7]: split 0 teams {4,6} vs {5,7}: opponents
        // 4-5 (fresh), 4-7 (seen), 6-5 (seen), 6-7 (fresh) → cost (0, 2).
        // Split 1 re-forms both original teams.
        // Split 2 teams {4,7} vs {6,5}: opponents 4-6 seen, 4-5 fresh,
        // 7-6 fresh, 7-5 seen → cost (0, 2). Tie → split 0.
        let cost0 = partition_cost(group([4, 6, 5, 7]), PARTITIONS[0], &ctx);
        let cost1 = partition_cost(group([4, 6, 5, 7]), PARTITIONS[1], &ctx);
        assert_eq!(
            cost0,
            PartitionCost {
                repeated_teammates: 0,
                repeated_opponents: 2
            }
        );
        assert_eq!(cost1.repeated_teammates, 2);
        assert_eq!(best_partition(group([4, 6, 5, 7]), &ctx), PARTITIONS[0]);
    }

    #[test]
    fn test_all_splits_repeat_still_applies() {
        let mut ctx = GenerationContext::new(4);
        form_race(1, group([0, 1, 2, 3]), &mut ctx);
        form_race(3, group([0, 2, 1, 3]), &mut ctx);
        form_race(5, group([0, 3, 1, 2]), &mut ctx);
        assert_eq!(ctx.teammates.duplicates(), 0);
        // Every pairing of four has now been used.
        let race = form_race(7, group([0, 1, 2, 3]), &mut ctx);
        assert!(race.has_distinct_competitors());
        assert_eq!(ctx.teammates.duplicates(), 2);
    }

    #[test]
    fn test_cost_ordering_is_lexicographic() {
        let a = PartitionCost {
            repeated_teammates: 0,
            repeated_opponents: 4,
        };
        let b = PartitionCost {
            repeated_teammates: 1,
            repeated_opponents: 0,
        };
        assert!(a < b);
    }
}
