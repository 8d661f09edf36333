//! Regatta domain models.
//!
//! Provides the data types the generator produces and every downstream
//! consumer (validator, metrics, export) reads.
//!
//! # Physical Mapping
//!
//! | Slot | Boat set A | Boat set B |
//! |------|-----------|-----------|
//! | `team_a.competitor1` | Pink 7 | Green Circle 7 |
//! | `team_a.competitor2` | Pink 8 | Green Circle 8 |
//! | `team_b.competitor1` | Black Stripe 10 | Black Diamond 10 |
//! | `team_b.competitor2` | Black Stripe 11 | Black Diamond 11 |

mod competitor;
mod race;
mod schedule;

pub use competitor::{BoatSet, Competitor};
pub use race::{Race, Slot, Team, TeamSide};
pub use schedule::Schedule;
