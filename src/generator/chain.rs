//! Chain layout: the fixed cyclic grouping of chain positions into races.
//!
//! With P positions per boat set, group k covers positions
//! `[2k, 2k+1, 2k+2, 2k+3] mod P`. Consecutive groups overlap by two
//! positions and the last group wraps onto the first, so every position
//! sits in exactly two groups:
//!
//! ```text
//! P = 12:  [0 1 2 3] [2 3 4 5] [4 5 6 7] [6 7 8 9] [8 9 10 11] [10 11 0 1]
//! ```
//!
//! Positions 2..P-1 race in two consecutive groups (a double outing, N
//! and N+2); positions 0 and 1 race in the first and last group.

/// Chain positions whose occupant races in the first group of a round.
pub const INITIAL_POSITIONS: [usize; 4] = [0, 1, 2, 3];

/// Read-only chain layout shared by every round and attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLayout {
    positions: usize,
    groups: Vec<[usize; 4]>,
}

impl ChainLayout {
    /// Builds the layout for `positions` chain positions.
    ///
    /// `positions` must be even and at least 8; the generator checks this
    /// through `GeneratorConfig::validate` before building a layout.
    pub fn new(positions: usize) -> Self {
        let groups = (0..positions / 2)
            .map(|k| {
                let base = 2 * k;
                [
                    base % positions,
                    (base + 1) % positions,
                    (base + 2) % positions,
                    (base + 3) % positions,
                ]
            })
            .collect();
        Self { positions, groups }
    }

    /// Positions per boat set.
    #[inline]
    pub fn positions(&self) -> usize {
        self.positions
    }

    /// Groups in race order.
    #[inline]
    pub fn groups(&self) -> &[[usize; 4]] {
        &self.groups
    }

    /// Positions whose occupant races in the last group of a round.
    pub fn terminal_positions(&self) -> [usize; 4] {
        [0, 1, self.positions - 2, self.positions - 1]
    }

    /// 1-indexed race number for group `k` of `round` (0-indexed) on the
    /// boat set at `boat_index` (0 = A, 1 = B).
    #[inline]
    pub fn race_number(&self, round: usize, k: usize, boat_index: usize) -> usize {
        self.positions * round + 2 * k + boat_index + 1
    }
}
