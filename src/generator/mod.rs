//! Schedule generation engine.
//!
//! Chain-based construction with a seeded multi-attempt search on top.
//!
//! # Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Chain layout | `chain` | Overlapping position groups per boat set |
//! | Round assignment | `round` | Competitor per chain position |
//! | Team formation | `teams` | 2-vs-2 split per race |
//! | Double-outing optimizer | `optimizer` | Boat positions aligned across N, N+2 |
//! | Seed search | `search` | Best valid schedule |
//!
//! Per-attempt bookkeeping lives in `history`.

mod chain;
mod history;
mod optimizer;
mod round;
mod search;
mod teams;

pub use chain::{ChainLayout, INITIAL_POSITIONS};
pub use history::{GenerationContext, OpponentHistory, OutingLedger, TeammateHistory};
pub use optimizer::{aligned_count, DoubleOutingOptimizer, OptimizeStats};
pub use round::RoundAssignment;
pub use search::{generate_schedule, AttemptOutcome, Candidate, SearchStats, SeedSearch};
pub use teams::{best_partition, form_race, partition_cost, split, PartitionCost, PARTITIONS};
