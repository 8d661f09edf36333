//! Schedule (solution) model.
//!
//! A schedule is the ordered list of races together with the roster it
//! was built for. Races are numbered sequentially from 1, so race `n`
//! lives at index `n - 1`.

use serde::{Deserialize, Serialize};

use super::{Competitor, Race};

/// A complete race schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Races in race-number order.
    pub races: Vec<Race>,
    /// Competitors the schedule was generated for.
    pub competitors: Vec<Competitor>,
}

impl Schedule {
    /// Creates an empty schedule for the given roster.
    pub fn new(competitors: Vec<Competitor>) -> Self {
        Self {
            races: Vec::new(),
            competitors,
        }
    }

    /// Creates a schedule from already-built races.
    pub fn with_races(competitors: Vec<Competitor>, races: Vec<Race>) -> Self {
        Self { races, competitors }
    }

    /// Appends a race.
    pub fn add_race(&mut self, race: Race) {
        self.races.push(race);
    }

    /// Number of races.
    pub fn race_count(&self) -> usize {
        self.races.len()
    }

    /// Race by 1-indexed number.
    pub fn race(&self, number: usize) -> Option<&Race> {
        number
            .checked_sub(1)
            .and_then(|idx| self.races.get(idx))
            .filter(|r| r.number == number)
    }

    /// All races a competitor sails in, in schedule order.
    pub fn races_for(&self, competitor: Competitor) -> Vec<&Race> {
        self.races.iter().filter(|r| r.contains(competitor)).collect()
    }

    /// Sorted race numbers for a competitor.
    pub fn race_numbers_for(&self, competitor: Competitor) -> Vec<usize> {
        let mut numbers: Vec<usize> = self
            .races
            .iter()
            .filter(|r| r.contains(competitor))
            .map(|r| r.number)
            .collect();
        numbers.sort_unstable();
        numbers
    }

    /// Teammates across all races, one entry per race (duplicates kept).
    pub fn teammates_for(&self, competitor: Competitor) -> Vec<Competitor> {
        self.races
            .iter()
            .filter_map(|r| r.teammate_of(competitor))
            .collect()
    }

    /// Opponents across all races, two entries per race (duplicates kept).
    pub fn opponents_for(&self, competitor: Competitor) -> Vec<Competitor> {
        self.races
            .iter()
            .filter_map(|r| r.opponents_of(competitor))
            .flatten()
            .collect()
    }

    /// Races grouped into rounds of `races_per_round`. The last chunk may
    /// be short if the schedule is incomplete.
    pub fn rounds(&self, races_per_round: usize) -> impl Iterator<Item = &[Race]> {
        self.races.chunks(races_per_round.max(1))
    }
}
