//! Per-attempt generation history.
//!
//! Bookkeeping read and written while races are formed: who has been
//! teamed with whom, who has faced whom, and which races each competitor
//! occupies on each boat set. A fresh [`GenerationContext`] is created
//! for every seed attempt and passed `&mut` into each race-forming step;
//! nothing here is shared between attempts.

use std::collections::BTreeSet;

use crate::config::GeneratorConfig;
use crate::models::{BoatSet, Competitor, Race};
use crate::validation::ValidationErrorKind;

/// Teammates seen so far, per competitor.
#[derive(Debug, Clone, Default)]
pub struct TeammateHistory {
    sets: Vec<BTreeSet<Competitor>>,
    duplicates: usize,
}

impl TeammateHistory {
    /// Empty history for `competitors` competitors.
    pub fn new(competitors: usize) -> Self {
        Self {
            sets: vec![BTreeSet::new(); competitors],
            duplicates: 0,
        }
    }

    /// Whether the two have already been teammates.
    #[inline]
    pub fn contains(&self, a: Competitor, b: Competitor) -> bool {
        self.sets[a.index()].contains(&b)
    }

    /// Records a pairing. Returns `false` (and counts a duplicate) if the
    /// pair was already recorded.
    pub fn record(&mut self, a: Competitor, b: Competitor) -> bool {
        let fresh = self.sets[a.index()].insert(b);
        self.sets[b.index()].insert(a);
        if !fresh {
            self.duplicates += 1;
        }
        fresh
    }

    /// Repeated pairings recorded so far.
    #[inline]
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

/// Opponents faced so far, per competitor.
#[derive(Debug, Clone, Default)]
pub struct OpponentHistory {
    sets: Vec<BTreeSet<Competitor>>,
}

impl OpponentHistory {
    /// Empty history for `competitors` competitors.
    pub fn new(competitors: usize) -> Self {
        Self {
            sets: vec![BTreeSet::new(); competitors],
        }
    }

    /// Whether the two have already raced against each other.
    #[inline]
    pub fn contains(&self, a: Competitor, b: Competitor) -> bool {
        self.sets[a.index()].contains(&b)
    }

    /// Records that the two raced on opposing teams.
    pub fn record(&mut self, a: Competitor, b: Competitor) {
        self.sets[a.index()].insert(b);
        self.sets[b.index()].insert(a);
    }

    /// Unique opponents of a competitor.
    pub fn unique_count(&self, competitor: Competitor) -> usize {
        self.sets[competitor.index()].len()
    }
}

/// Race numbers per competitor per boat set, in the order recorded.
#[derive(Debug, Clone, Default)]
pub struct OutingLedger {
    entries: Vec<[Vec<usize>; 2]>,
}

impl OutingLedger {
    /// Empty ledger for `competitors` competitors.
    pub fn new(competitors: usize) -> Self {
        Self {
            entries: vec![[Vec::new(), Vec::new()]; competitors],
        }
    }

    /// Records that the competitor sails race `number`.
    pub fn record(&mut self, competitor: Competitor, number: usize) {
        self.entries[competitor.index()][BoatSet::for_race(number).index()].push(number);
    }

    /// Races on one boat set.
    pub fn races(&self, competitor: Competitor, boat_set: BoatSet) -> &[usize] {
        &self.entries[competitor.index()][boat_set.index()]
    }

    /// Races on both boat sets.
    pub fn total(&self, competitor: Competitor) -> usize {
        self.entries[competitor.index()].iter().map(Vec::len).sum()
    }

    /// Races inside round `round` (0-indexed).
    pub fn in_round(&self, competitor: Competitor, round: usize, races_per_round: usize) -> usize {
        let range = round * races_per_round + 1..=(round + 1) * races_per_round;
        self.entries[competitor.index()]
            .iter()
            .flatten()
            .filter(|n| range.contains(n))
            .count()
    }

    /// Longest run of races spaced exactly two apart on one boat set.
    pub fn longest_run(&self, competitor: Competitor, boat_set: BoatSet) -> usize {
        let mut races = self.races(competitor, boat_set).to_vec();
        races.sort_unstable();
        let mut longest = 0;
        let mut current = 0;
        let mut prev: Option<usize> = None;
        for n in races {
            current = match prev {
                Some(p) if n == p + 2 => current + 1,
                _ => 1,
            };
            longest = longest.max(current);
            prev = Some(n);
        }
        longest
    }
}

/// All mutable state owned by one generation attempt.
#[derive(Debug, Clone, Default)]
pub struct GenerationContext {
    /// Teammate pairings.
    pub teammates: TeammateHistory,
    /// Opponent pairings.
    pub opponents: OpponentHistory,
    /// Outings per boat set.
    pub outings: OutingLedger,
}

impl GenerationContext {
    /// Fresh context for `competitors` competitors.
    pub fn new(competitors: usize) -> Self {
        Self {
            teammates: TeammateHistory::new(competitors),
            opponents: OpponentHistory::new(competitors),
            outings: OutingLedger::new(competitors),
        }
    }

    /// Folds a formed race into the history.
    pub fn record_race(&mut self, race: &Race) {
        for team in [race.team_a, race.team_b] {
            self.teammates.record(team.competitor1, team.competitor2);
        }
        for a in race.team_a.members() {
            for b in race.team_b.members() {
                self.opponents.record(a, b);
            }
        }
        for c in race.competitors() {
            self.outings.record(c, race.number);
        }
    }

    /// Whether the two have shared a race, on either side.
    #[inline]
    pub fn have_met(&self, a: Competitor, b: Competitor) -> bool {
        self.teammates.contains(a, b) || self.opponents.contains(a, b)
    }

    /// Cheap screen run before the full validator: the first hard
    /// constraint the accumulated history already shows to be broken.
    ///
    /// Adjacent races are not visible here; the validator covers them.
    pub fn first_violation(&self, config: &GeneratorConfig) -> Option<ValidationErrorKind> {
        if self.teammates.duplicates() > 0 {
            return Some(ValidationErrorKind::DuplicateTeammate);
        }
        let roster = Competitor::roster(config.competitors);
        if roster
            .iter()
            .any(|&c| self.outings.total(c) != config.races_per_competitor())
        {
            return Some(ValidationErrorKind::RaceCount);
        }
        if roster.iter().any(|&c| {
            (0..config.rounds).any(|r| self.outings.in_round(c, r, config.races_per_round()) != 2)
        }) {
            return Some(ValidationErrorKind::RoundStructure);
        }
        if roster.iter().any(|&c| {
            BoatSet::ALL
                .iter()
                .any(|&b| self.outings.longest_run(c, b) > 2)
        }) {
            return Some(ValidationErrorKind::TripleOuting);
        }
        if roster
            .iter()
            .any(|&c| self.opponents.unique_count(c) < config.min_unique_opponents)
        {
            return Some(ValidationErrorKind::OpponentDiversity);
        }
        None
    }
}
