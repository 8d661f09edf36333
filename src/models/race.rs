//! Race and team models.
//!
//! A race pits two teams of two against each other on one boat set.
//! Slot order inside a team is physical: `competitor1` sails the first
//! boat of the team's pair (7 or 10), `competitor2` the second (8 or 11).
//! Slot order never affects teammate or opponent relations.

use serde::{Deserialize, Serialize};

use super::{BoatSet, Competitor};

/// Which side of a race a team sails on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamSide {
    /// First team (boats 7 and 8).
    A,
    /// Second team (boats 10 and 11).
    B,
}

/// One of the four boat positions of a race, in export column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// `team_a.competitor1`
    TeamA1,
    /// `team_a.competitor2`
    TeamA2,
    /// `team_b.competitor1`
    TeamB1,
    /// `team_b.competitor2`
    TeamB2,
}

impl Slot {
    /// All slots in column order. This order maps to physical boats and
    /// must not be permuted.
    pub const ALL: [Slot; 4] = [Slot::TeamA1, Slot::TeamA2, Slot::TeamB1, Slot::TeamB2];

    /// Team side the slot belongs to.
    pub fn side(self) -> TeamSide {
        match self {
            Slot::TeamA1 | Slot::TeamA2 => TeamSide::A,
            Slot::TeamB1 | Slot::TeamB2 => TeamSide::B,
        }
    }

    /// Export column (0..4).
    pub fn column(self) -> usize {
        match self {
            Slot::TeamA1 => 0,
            Slot::TeamA2 => 1,
            Slot::TeamB1 => 2,
            Slot::TeamB2 => 3,
        }
    }
}

/// Two competitors racing together, in boat order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team {
    /// First boat of the pair (7 or 10).
    pub competitor1: Competitor,
    /// Second boat of the pair (8 or 11).
    pub competitor2: Competitor,
}

impl Team {
    /// Creates a team. Order is kept as given.
    pub fn new(competitor1: Competitor, competitor2: Competitor) -> Self {
        Self {
            competitor1,
            competitor2,
        }
    }

    /// Members in boat order.
    #[inline]
    pub fn members(&self) -> [Competitor; 2] {
        [self.competitor1, self.competitor2]
    }

    /// Whether the competitor sails in this team.
    #[inline]
    pub fn contains(&self, competitor: Competitor) -> bool {
        self.competitor1 == competitor || self.competitor2 == competitor
    }

    /// The other member, if `competitor` is in the team.
    pub fn partner_of(&self, competitor: Competitor) -> Option<Competitor> {
        if self.competitor1 == competitor {
            Some(self.competitor2)
        } else if self.competitor2 == competitor {
            Some(self.competitor1)
        } else {
            None
        }
    }

    /// Same two members regardless of boat order.
    pub fn same_members(&self, other: &Team) -> bool {
        (self.competitor1 == other.competitor1 && self.competitor2 == other.competitor2)
            || (self.competitor1 == other.competitor2 && self.competitor2 == other.competitor1)
    }

    /// Exchanges the two boats of the team.
    pub fn swap_boats(&mut self) {
        std::mem::swap(&mut self.competitor1, &mut self.competitor2);
    }
}

/// A single race between two teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    /// 1-indexed race number.
    pub number: usize,
    /// Boat set, derived from the race number's parity.
    pub boat_set: BoatSet,
    /// Team on boats 7/8.
    pub team_a: Team,
    /// Team on boats 10/11.
    pub team_b: Team,
}

impl Race {
    /// Creates a race; the boat set follows from `number`.
    pub fn new(number: usize, team_a: Team, team_b: Team) -> Self {
        Self {
            number,
            boat_set: BoatSet::for_race(number),
            team_a,
            team_b,
        }
    }

    /// All four competitors in column order.
    pub fn competitors(&self) -> [Competitor; 4] {
        [
            self.team_a.competitor1,
            self.team_a.competitor2,
            self.team_b.competitor1,
            self.team_b.competitor2,
        ]
    }

    /// Competitor sailing the given slot.
    pub fn at(&self, slot: Slot) -> Competitor {
        match slot {
            Slot::TeamA1 => self.team_a.competitor1,
            Slot::TeamA2 => self.team_a.competitor2,
            Slot::TeamB1 => self.team_b.competitor1,
            Slot::TeamB2 => self.team_b.competitor2,
        }
    }

    /// Whether the competitor sails in this race.
    pub fn contains(&self, competitor: Competitor) -> bool {
        self.team_a.contains(competitor) || self.team_b.contains(competitor)
    }

    /// Slot occupied by the competitor, if present.
    pub fn slot_of(&self, competitor: Competitor) -> Option<Slot> {
        Slot::ALL.into_iter().find(|&slot| self.at(slot) == competitor)
    }

    /// Mutable team of the given side.
    pub fn team_mut(&mut self, side: TeamSide) -> &mut Team {
        match side {
            TeamSide::A => &mut self.team_a,
            TeamSide::B => &mut self.team_b,
        }
    }

    /// Teammate of the competitor in this race.
    pub fn teammate_of(&self, competitor: Competitor) -> Option<Competitor> {
        self.team_a
            .partner_of(competitor)
            .or_else(|| self.team_b.partner_of(competitor))
    }

    /// Opposing team members for the competitor in this race.
    pub fn opponents_of(&self, competitor: Competitor) -> Option<[Competitor; 2]> {
        if self.team_a.contains(competitor) {
            Some(self.team_b.members())
        } else if self.team_b.contains(competitor) {
            Some(self.team_a.members())
        } else {
            None
        }
    }

    /// Whether all four slots hold different competitors.
    pub fn has_distinct_competitors(&self) -> bool {
        let c = self.competitors();
        (0..4).all(|i| (i + 1..4).all(|j| c[i] != c[j]))
    }
}
