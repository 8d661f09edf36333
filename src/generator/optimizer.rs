//! Double-outing optimizer.
//!
//! Competitors sailing races N and N+2 on the same boat set stay on the
//! water between the two; they have a *proper* double outing when they
//! keep the same boat (same team, same column) in both races.
//!
//! # Algorithm
//!
//! For every outing pair (N, N+2) and every shared competitor whose slot
//! differs between the two races, try in order:
//! - swap `team_a` boats in N, swap `team_b` boats in N,
//! - swap `team_a` boats in N+2, swap `team_b` boats in N+2.
//!
//! A swap is kept only if it strictly raises the aligned count of
//! (N, N+2) and does not lower the aligned count of the other pair the
//! swapped race belongs to ((N-2, N) or (N+2, N+4)). Passes repeat until
//! a full pass keeps nothing.
//!
//! Every kept swap strictly raises the total aligned count, which is
//! bounded, so the loop terminates. Swaps stay within a team, so
//! teammate and opponent relations never change.

use tracing::debug;

use crate::models::{Race, Schedule, TeamSide};

/// Outcome of an optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptimizeStats {
    /// Swaps kept.
    pub swaps: usize,
    /// Full passes made, including the final pass with no swaps.
    pub passes: usize,
}

/// Local search aligning boat positions across outing pairs.
///
/// # Example
///
/// ```
/// use regatta_schedule::generator::DoubleOutingOptimizer;
/// use regatta_schedule::models::{Competitor, Race, Schedule, Team};
///
/// let c = Competitor;
/// let mut schedule = Schedule::with_races(
///     Competitor::roster(8),
///     vec![
///         Race::new(1, Team::new(c(0), c(1)), Team::new(c(2), c(3))),
///         Race::new(2, Team::new(c(4), c(5)), Team::new(c(6), c(7))),
///         Race::new(3, Team::new(c(2), c(0)), Team::new(c(5), c(6))),
///     ],
/// );
/// let stats = DoubleOutingOptimizer::new().optimize(&mut schedule);
/// assert_eq!(stats.swaps, 1);
/// assert_eq!(schedule.races[0].slot_of(c(0)), schedule.races[2].slot_of(c(0)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DoubleOutingOptimizer;

impl DoubleOutingOptimizer {
    /// Creates an optimizer.
    pub fn new() -> Self {
        Self
    }

    /// Optimizes a schedule in place.
    pub fn optimize(&self, schedule: &mut Schedule) -> OptimizeStats {
        let stats = self.optimize_races(&mut schedule.races);
        debug!(
            swaps = stats.swaps,
            passes = stats.passes,
            "double-outing optimization"
        );
        stats
    }

    /// Optimizes a race slice in place. Outing pairs are `(i, i + 2)` by
    /// index.
    pub fn optimize_races(&self, races: &mut [Race]) -> OptimizeStats {
        let mut stats = OptimizeStats::default();
        loop {
            stats.passes += 1;
            let mut changed = false;
            for first in 0..races.len().saturating_sub(2) {
                while self.improve_pair(races, first) {
                    stats.swaps += 1;
                    changed = true;
                }
            }
            if !changed {
                return stats;
            }
        }
    }

    /// Tries to keep one swap improving pair `(first, first + 2)`.
    fn improve_pair(&self, races: &mut [Race], first: usize) -> bool {
        let second = first + 2;
        let misaligned = races[first].competitors().into_iter().any(|c| {
            matches!(races[second].slot_of(c), Some(s) if Some(s) != races[first].slot_of(c))
        });
        if !misaligned {
            return false;
        }

        let moves = [
            (first, TeamSide::A),
            (first, TeamSide::B),
            (second, TeamSide::A),
            (second, TeamSide::B),
        ];
        let target_before = aligned_count(races, first);
        for (race, side) in moves {
            // The other pair the swapped race belongs to.
            let other = if race == first {
                first.checked_sub(2)
            } else {
                Some(second)
            };
            let other_before = other.map(|p| aligned_count(races, p));

            races[race].team_mut(side).swap_boats();
            let target_after = aligned_count(races, first);
            let other_after = other.map(|p| aligned_count(races, p));
            if target_after > target_before && other_after >= other_before {
                return true;
            }
            races[race].team_mut(side).swap_boats();
        }
        false
    }
}

/// Shared competitors holding the same slot in races `first` and
/// `first + 2`. Zero when either race is missing.
pub fn aligned_count(races: &[Race], first: usize) -> usize {
    let (Some(a), Some(b)) = (races.get(first), races.get(first + 2)) else {
        return 0;
    };
    a.competitors()
        .into_iter()
        .filter(|&c| b.slot_of(c).is_some() && b.slot_of(c) == a.slot_of(c))
        .count()
}
