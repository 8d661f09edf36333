//! Schedule quality metrics.
//!
//! Soft-objective indicators computed from a finished schedule. The seed
//! search ranks valid candidates by [`ScheduleMetrics::quality`].
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Visibility | Unique others a competitor races with or against |
//! | Unique opponents | Unique others faced on the opposing team |
//! | Single outing | A race not paired with race N±2 on the same boat set |
//! | Potential double | Races N and N+2 sailed back to back |
//! | Proper double | A potential double in the same boat both times |
//! | Duplicate teammates | Repeat pairings beyond the first |

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::models::{Competitor, Schedule};

/// Schedule quality indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleMetrics {
    /// Lowest visibility of any competitor.
    pub min_visibility: usize,
    /// Highest visibility of any competitor.
    pub max_visibility: usize,
    /// Mean visibility.
    pub avg_visibility: f64,
    /// Sum of visibilities.
    pub total_visibility: usize,
    /// Single outings across all competitors.
    pub total_single_outings: usize,
    /// Back-to-back (N, N+2) outings across all competitors.
    pub total_potential_double_outings: usize,
    /// Back-to-back outings in the same boat.
    pub total_proper_double_outings: usize,
    /// Repeat teammate pairings (0 in a valid schedule).
    pub duplicate_teammates: usize,
    /// Fewest unique opponents of any competitor.
    pub min_unique_opponents: usize,
    /// Most unique opponents of any competitor.
    pub max_unique_opponents: usize,
}

/// Ranking key for valid schedules; greater is better.
///
/// Compares proper double outings first, then fewer single outings, then
/// the higher minimum visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QualityScore {
    /// Proper double outings (more is better).
    pub proper_double_outings: usize,
    /// Single outings (fewer is better).
    pub single_outings: Reverse<usize>,
    /// Minimum visibility (more is better).
    pub min_visibility: usize,
}

impl ScheduleMetrics {
    /// Computes metrics for every competitor on the schedule's roster.
    pub fn calculate(schedule: &Schedule) -> Self {
        let mut visibilities = Vec::with_capacity(schedule.competitors.len());
        let mut unique_opponents = Vec::with_capacity(schedule.competitors.len());
        let mut total_single = 0;
        let mut total_potential = 0;
        let mut total_proper = 0;
        let mut duplicates = 0;

        for &competitor in &schedule.competitors {
            visibilities.push(visibility(schedule, competitor));
            unique_opponents.push(
                schedule
                    .opponents_for(competitor)
                    .into_iter()
                    .collect::<BTreeSet<_>>()
                    .len(),
            );

            let (single, potential) = count_outings(&schedule.race_numbers_for(competitor));
            total_single += single;
            total_potential += potential;
            total_proper += proper_double_outings(schedule, competitor);
            duplicates += duplicate_teammates(schedule, competitor);
        }

        let total_visibility: usize = visibilities.iter().sum();
        let avg_visibility = if visibilities.is_empty() {
            0.0
        } else {
            total_visibility as f64 / visibilities.len() as f64
        };

        Self {
            min_visibility: visibilities.iter().copied().min().unwrap_or(0),
            max_visibility: visibilities.iter().copied().max().unwrap_or(0),
            avg_visibility,
            total_visibility,
            total_single_outings: total_single,
            total_potential_double_outings: total_potential,
            total_proper_double_outings: total_proper,
            duplicate_teammates: duplicates,
            min_unique_opponents: unique_opponents.iter().copied().min().unwrap_or(0),
            max_unique_opponents: unique_opponents.iter().copied().max().unwrap_or(0),
        }
    }

    /// Ranking key used by the seed search.
    pub fn quality(&self) -> QualityScore {
        QualityScore {
            proper_double_outings: self.total_proper_double_outings,
            single_outings: Reverse(self.total_single_outings),
            min_visibility: self.min_visibility,
        }
    }
}

impl fmt::Display for ScheduleMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Schedule Quality Metrics")?;
        writeln!(f, "{}", "=".repeat(40))?;
        writeln!(f, "Visibility (unique others seen per competitor):")?;
        writeln!(
            f,
            "  Min: {}, Max: {}, Avg: {:.1}",
            self.min_visibility, self.max_visibility, self.avg_visibility
        )?;
        writeln!(f, "  Total across all competitors: {}", self.total_visibility)?;
        writeln!(f, "Outings:")?;
        writeln!(f, "  Single outings: {}", self.total_single_outings)?;
        writeln!(
            f,
            "  Potential double outings: {}",
            self.total_potential_double_outings
        )?;
        writeln!(
            f,
            "  Proper double outings (same boat): {}",
            self.total_proper_double_outings
        )?;
        writeln!(f, "Teammates:")?;
        writeln!(f, "  Duplicate teammates: {}", self.duplicate_teammates)?;
        writeln!(f, "Opponents:")?;
        writeln!(
            f,
            "  Unique opponents: min={}, max={}",
            self.min_unique_opponents, self.max_unique_opponents
        )?;
        write!(f, "{}", "=".repeat(40))
    }
}

/// Unique competitors seen (teammates and opponents).
pub fn visibility(schedule: &Schedule, competitor: Competitor) -> usize {
    schedule
        .races_for(competitor)
        .into_iter()
        .flat_map(|r| r.competitors())
        .filter(|&c| c != competitor)
        .collect::<BTreeSet<_>>()
        .len()
}

/// Splits sorted race numbers into `(single, double)` outings.
///
/// Walks left to right; a race followed by race + 2 forms a double and
/// both are consumed, anything else is a single.
pub fn count_outings(race_numbers: &[usize]) -> (usize, usize) {
    let mut single = 0;
    let mut double = 0;
    let mut i = 0;
    while i < race_numbers.len() {
        if i + 1 < race_numbers.len() && race_numbers[i + 1] == race_numbers[i] + 2 {
            double += 1;
            i += 2;
        } else {
            single += 1;
            i += 1;
        }
    }
    (single, double)
}

/// Double outings in which the competitor keeps the same boat.
pub fn proper_double_outings(schedule: &Schedule, competitor: Competitor) -> usize {
    let mut races = schedule.races_for(competitor);
    races.sort_by_key(|r| r.number);

    let mut proper = 0;
    let mut i = 0;
    while i + 1 < races.len() {
        let (first, second) = (races[i], races[i + 1]);
        if second.number == first.number + 2 {
            if first.slot_of(competitor) == second.slot_of(competitor) {
                proper += 1;
            }
            i += 2;
        } else {
            i += 1;
        }
    }
    proper
}

/// Teammate pairings beyond the first, for one competitor.
pub fn duplicate_teammates(schedule: &Schedule, competitor: Competitor) -> usize {
    let mut counts: BTreeMap<Competitor, usize> = BTreeMap::new();
    for teammate in schedule.teammates_for(competitor) {
        *counts.entry(teammate).or_insert(0) += 1;
    }
    counts.values().map(|&n| n.saturating_sub(1)).sum()
}
