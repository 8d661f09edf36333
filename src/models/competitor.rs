//! Competitor identity and boat sets.
//!
//! A competitor carries nothing but its identity; everything the
//! generator learns about a competitor (teammates, opponents, outings)
//! lives in per-attempt history structures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a competitor (0-based).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Competitor(pub usize);

impl Competitor {
    /// Zero-based index, usable for per-competitor tables.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    /// Display name used in exports and reports.
    pub fn name(self) -> String {
        format!("Competitor_{}", self.0)
    }

    /// Builds the roster `0..count`.
    pub fn roster(count: usize) -> Vec<Competitor> {
        (0..count).map(Competitor).collect()
    }
}

impl fmt::Display for Competitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the two physical equipment sets.
///
/// Races alternate between the sets: odd race numbers sail set A,
/// even race numbers sail set B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoatSet {
    /// Cambridge Pink (7, 8) and Black Stripe (10, 11).
    A,
    /// RHS Green Circle (7, 8) and Black Diamond (10, 11).
    B,
}

impl BoatSet {
    /// Both sets, in race order.
    pub const ALL: [BoatSet; 2] = [BoatSet::A, BoatSet::B];

    /// Boat set used by a 1-indexed race number.
    #[inline]
    pub fn for_race(number: usize) -> Self {
        if number % 2 == 1 {
            BoatSet::A
        } else {
            BoatSet::B
        }
    }

    /// Position in [`BoatSet::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            BoatSet::A => 0,
            BoatSet::B => 1,
        }
    }

    /// Club label for the whole set.
    pub fn label(self) -> &'static str {
        match self {
            BoatSet::A => "Cambridge Pink and Black Stripe",
            BoatSet::B => "RHS Green Circle/Black Diamond",
        }
    }

    /// Boat names for `team_a` and `team_b` respectively.
    pub fn boat_names(self) -> [&'static str; 2] {
        match self {
            BoatSet::A => ["Pink(7, 8)", "Black Stripe(10, 11)"],
            BoatSet::B => ["Green Circle(7, 8)", "Black Diamond(10, 11)"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boat_set_parity() {
        assert_eq!(BoatSet::for_race(1), BoatSet::A);
        assert_eq!(BoatSet::for_race(2), BoatSet::B);
        assert_eq!(BoatSet::for_race(47), BoatSet::A);
        assert_eq!(BoatSet::for_race(48), BoatSet::B);
    }

    #[test]
    fn test_roster() {
        let roster = Competitor::roster(24);
        assert_eq!(roster.len(), 24);
        assert_eq!(roster[0], Competitor(0));
        assert_eq!(roster[23].index(), 23);
        assert_eq!(roster[5].name(), "Competitor_5");
    }

    #[test]
    fn test_competitor_serializes_as_number() {
        let json = serde_json::to_string(&Competitor(7)).unwrap();
        assert_eq!(json, "7");
    }
}
