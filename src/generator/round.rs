//! Round assignment: competitors onto chain positions.
//!
//! # Algorithm
//!
//! 1. Shuffle the roster uniformly.
//! 2. The first P competitors take boat-set-A positions `0..P`, the
//!    remaining P take boat-set-B positions `0..P`.
//! 3. From the second round on, check the boundary with the previous
//!    round; reshuffle the positions of an offending boat set until it
//!    holds or the retry budget is spent.
//! 4. Optionally [`refine`](RoundAssignment::refine): random position
//!    swaps, kept when they do not raise the number of chain-group pairs
//!    that have already met and the boundary still holds.
//!
//! Every position belongs to exactly two chain groups, so every
//! competitor races exactly twice per round, both times on the same
//! boat set.
//!
//! # Boundary
//!
//! The last group of a round holds the terminal positions and the first
//! group the initial ones. Across a round transition:
//! - a competitor terminal on boat set X may not start on boat set X
//!   (it would extend a double outing into a triple);
//! - a competitor terminal on boat set B may not start on boat set A,
//!   because the last race of a round (set B) is immediately followed by
//!   the first race of the next (set A).

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use super::chain::{ChainLayout, INITIAL_POSITIONS};
use super::history::GenerationContext;
use crate::error::GenerationError;
use crate::models::{BoatSet, Competitor};

/// Position → competitor mapping for one round on both boat sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundAssignment {
    round: usize,
    chains: [Vec<Competitor>; 2],
}

impl RoundAssignment {
    /// Builds an assignment from explicit chains (index = position).
    pub fn from_chains(round: usize, chain_a: Vec<Competitor>, chain_b: Vec<Competitor>) -> Self {
        Self {
            round,
            chains: [chain_a, chain_b],
        }
    }

    /// Randomly assigns `roster` to the chain positions of round `round`
    /// (0-indexed), honoring the boundary with `previous`.
    ///
    /// # Errors
    /// [`GenerationError::BoundaryRetryExhausted`] when a boat set still
    /// violates the boundary after `retries` reshuffles.
    pub fn assign<R: Rng>(
        round: usize,
        roster: &[Competitor],
        layout: &ChainLayout,
        previous: Option<&RoundAssignment>,
        retries: usize,
        rng: &mut R,
    ) -> Result<Self, GenerationError> {
        let positions = layout.positions();
        let mut order = roster.to_vec();
        order.shuffle(rng);
        let chain_b = order.split_off(positions);
        let mut assignment = Self::from_chains(round, order, chain_b);

        if let Some(prev) = previous {
            for boat in BoatSet::ALL {
                let forbidden = prev.forbidden_initial(boat, layout);
                let mut attempts = 0;
                while !assignment.initial_clear(boat, &forbidden) {
                    if attempts == retries {
                        return Err(GenerationError::BoundaryRetryExhausted {
                            round: round + 1,
                            retries,
                        });
                    }
                    assignment.chains[boat.index()].shuffle(rng);
                    attempts += 1;
                }
                if attempts > 0 {
                    trace!(round = round + 1, ?boat, attempts, "boundary reshuffles");
                }
            }
        }

        Ok(assignment)
    }

    /// 0-indexed round.
    #[inline]
    pub fn round(&self) -> usize {
        self.round
    }

    /// Competitors in position order for a boat set.
    #[inline]
    pub fn chain(&self, boat: BoatSet) -> &[Competitor] {
        &self.chains[boat.index()]
    }

    /// The four competitors of chain group `k`, in group slot order.
    pub fn group(&self, boat: BoatSet, k: usize, layout: &ChainLayout) -> [Competitor; 4] {
        let chain = self.chain(boat);
        layout.groups()[k].map(|p| chain[p])
    }

    /// Competitors on the terminal positions of a boat set.
    pub fn terminal_competitors(&self, boat: BoatSet, layout: &ChainLayout) -> [Competitor; 4] {
        let chain = self.chain(boat);
        layout.terminal_positions().map(|p| chain[p])
    }

    /// Competitors that may not take an initial position of `boat` in the
    /// round following this one.
    pub fn forbidden_initial(&self, boat: BoatSet, layout: &ChainLayout) -> Vec<Competitor> {
        let mut forbidden = self.terminal_competitors(boat, layout).to_vec();
        if boat == BoatSet::A {
            forbidden.extend(self.terminal_competitors(BoatSet::B, layout));
        }
        forbidden
    }

    /// Pairs sharing a chain group this round that have already met.
    pub fn meeting_cost(&self, layout: &ChainLayout, ctx: &GenerationContext) -> usize {
        let mut cost = 0;
        for boat in BoatSet::ALL {
            for k in 0..layout.groups().len() {
                let group = self.group(boat, k, layout);
                for i in 0..4 {
                    for j in i + 1..4 {
                        if ctx.have_met(group[i], group[j]) {
                            cost += 1;
                        }
                    }
                }
            }
        }
        cost
    }

    /// Hill-climbs on [`meeting_cost`](Self::meeting_cost) with up to
    /// `iterations` random position swaps, across both boat sets.
    ///
    /// Sideways moves are kept. Swaps that break the boundary with
    /// `previous` are undone. Returns the final cost.
    pub fn refine<R: Rng>(
        &mut self,
        layout: &ChainLayout,
        previous: Option<&RoundAssignment>,
        ctx: &GenerationContext,
        iterations: usize,
        rng: &mut R,
    ) -> usize {
        let forbidden = previous.map(|prev| BoatSet::ALL.map(|b| prev.forbidden_initial(b, layout)));
        let positions = layout.positions();
        let start = self.meeting_cost(layout, ctx);
        let mut cost = start;

        for _ in 0..iterations {
            if cost == 0 {
                break;
            }
            let first = (rng.random_range(0..2), rng.random_range(0..positions));
            let second = (rng.random_range(0..2), rng.random_range(0..positions));
            self.swap_positions(first, second);

            let clear = match &forbidden {
                Some(f) => BoatSet::ALL
                    .iter()
                    .all(|&b| self.initial_clear(b, &f[b.index()])),
                None => true,
            };
            if clear {
                let next = self.meeting_cost(layout, ctx);
                if next <= cost {
                    cost = next;
                    continue;
                }
            }
            self.swap_positions(first, second);
        }

        trace!(round = self.round + 1, start, cost, "round refined");
        cost
    }

    fn swap_positions(&mut self, (b1, p1): (usize, usize), (b2, p2): (usize, usize)) {
        let held = self.chains[b1][p1];
        self.chains[b1][p1] = self.chains[b2][p2];
        self.chains[b2][p2] = held;
    }

    /// Whether this round respects the boundary left by `previous`.
    pub fn satisfies_boundary(&self, previous: &RoundAssignment, layout: &ChainLayout) -> bool {
        BoatSet::ALL
            .iter()
            .all(|&boat| self.initial_clear(boat, &previous.forbidden_initial(boat, layout)))
    }

    fn initial_clear(&self, boat: BoatSet, forbidden: &[Competitor]) -> bool {
        let chain = self.chain(boat);
        INITIAL_POSITIONS
            .iter()
            .all(|&p| !forbidden.contains(&chain[p]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::teams::form_race;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn roster() -> Vec<Competitor> {
        Competitor::roster(24)
    }

    #[test]
    fn test_every_competitor_on_one_position() {
        let layout = ChainLayout::new(12);
        let mut rng = StdRng::seed_from_u64(42);
        let a = RoundAssignment::assign(0, &roster(), &layout, None, 100, &mut rng).unwrap();

        let mut all: Vec<Competitor> = a
            .chain(BoatSet::A)
            .iter()
            .chain(a.chain(BoatSet::B))
            .copied()
            .collect();
        assert_eq!(a.chain(BoatSet::A).len(), 12);
        all.sort();
        assert_eq!(all, roster());
    }

    #[test]
    fn test_each_competitor_in_two_groups() {
        let layout = ChainLayout::new(12);
        let mut rng = StdRng::seed_from_u64(1);
        let a = RoundAssignment::assign(0, &roster(), &layout, None, 100, &mut rng).unwrap();

        for c in roster() {
            let count: usize = BoatSet::ALL
                .iter()
                .map(|&boat| {
                    (0..6)
                        .filter(|&k| a.group(boat, k, &layout).contains(&c))
                        .count()
                })
                .sum();
            assert_eq!(count, 2, "competitor {c}");
        }
    }

    #[test]
    fn test_boundary_respected_across_rounds() {
        let layout = ChainLayout::new(12);
        let mut rng = StdRng::seed_from_u64(7);
        let mut prev = RoundAssignment::assign(0, &roster(), &layout, None, 1000, &mut rng).unwrap();
        for round in 1..4 {
            let next =
                RoundAssignment::assign(round, &roster(), &layout, Some(&prev), 1000, &mut rng)
                    .unwrap();
            assert!(next.satisfies_boundary(&prev, &layout));
            assert_eq!(next.round(), round);
            prev = next;
        }
    }

    #[test]
    fn test_forbidden_initial_sets() {
        let layout = ChainLayout::new(12);
        let ids = roster();
        let prev = RoundAssignment::from_chains(0, ids[..12].to_vec(), ids[12..].to_vec());

        let b = prev.forbidden_initial(BoatSet::B, &layout);
        assert_eq!(b.len(), 4);
        assert!(b.contains(&Competitor(22)));
        let a = prev.forbidden_initial(BoatSet::A, &layout);
        assert_eq!(a.len(), 8);
        assert!(a.contains(&Competitor(10)));
        assert!(a.contains(&Competitor(12)));
    }

    #[test]
    fn test_boundary_violation_detected() {
        let layout = ChainLayout::new(12);
        let ids = roster();
        let prev = RoundAssignment::from_chains(0, ids[..12].to_vec(), ids[12..].to_vec());
        // Same layout again: competitor 0 is terminal and initial on set A.
        let same = RoundAssignment::from_chains(1, ids[..12].to_vec(), ids[12..].to_vec());
        assert!(!same.satisfies_boundary(&prev, &layout));
    }

    #[test]
    fn test_refine_lowers_cost_and_keeps_boundary() {
        let layout = ChainLayout::new(12);
        let ids = roster();
        let mut rng = StdRng::seed_from_u64(11);
        let prev = RoundAssignment::assign(0, &ids, &layout, None, 1000, &mut rng).unwrap();

        // Round one formed and recorded.
        let mut ctx = GenerationContext::new(24);
        for boat in BoatSet::ALL {
            for k in 0..6 {
                let number = layout.race_number(0, k, boat.index());
                let race = form_race(number, prev.group(boat, k, &layout), &mut ctx);
                assert!(race.has_distinct_competitors());
            }
        }

        let mut next = RoundAssignment::assign(1, &ids, &layout, Some(&prev), 1000, &mut rng).unwrap();
        let before = next.meeting_cost(&layout, &ctx);
        let after = next.refine(&layout, Some(&prev), &ctx, 500, &mut rng);

        assert!(after <= before);
        assert_eq!(after, next.meeting_cost(&layout, &ctx));
        assert!(next.satisfies_boundary(&prev, &layout));
        let mut all: Vec<Competitor> = next
            .chain(BoatSet::A)
            .iter()
            .chain(next.chain(BoatSet::B))
            .copied()
            .collect();
        all.sort();
        assert_eq!(all, ids);
    }

    #[test]
    fn test_refine_without_history_is_noop() {
        let layout = ChainLayout::new(12);
        let mut rng = StdRng::seed_from_u64(5);
        let mut a = RoundAssignment::assign(0, &roster(), &layout, None, 100, &mut rng).unwrap();
        let original = a.clone();
        let cost = a.refine(&layout, None, &GenerationContext::new(24), 100, &mut rng);
        assert_eq!(cost, 0);
        assert_eq!(a, original);
    }

    #[test]
    fn test_retry_exhaustion() {
        let layout = ChainLayout::new(12);
        let ids = roster();
        let prev = RoundAssignment::from_chains(0, ids[..12].to_vec(), ids[12..].to_vec());
        let mut rng = StdRng::seed_from_u64(3);
        // A budget of one reshuffle is nearly always too small; loop over
        // seeds until exhaustion is observed.
        let exhausted = (0..50).any(|_| {
            matches!(
                RoundAssignment::assign(1, &ids, &layout, Some(&prev), 1, &mut rng),
                Err(GenerationError::BoundaryRetryExhausted { round: 2, retries: 1 })
            )
        });
        assert!(exhausted);
    }
}
