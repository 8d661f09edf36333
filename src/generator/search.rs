//! Seed search: many randomized attempts, best valid schedule wins.
//!
//! # Algorithm
//!
//! Attempt `i` seeds its own [`StdRng`] with `seed + i` and runs:
//! 1. Round assignment (plus refinement) for every round.
//! 2. Team formation for every race, in ascending race number.
//! 3. The double-outing optimizer.
//! 4. The history screen, then the full validator.
//!
//! Survivors are ranked by [`QualityScore`](crate::metrics::QualityScore);
//! ties go to the lowest attempt index. Attempts are independent, so
//! running them on the rayon pool yields the same schedule as running
//! them in order.

use std::collections::BTreeMap;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{debug, info};

use super::chain::ChainLayout;
use super::history::GenerationContext;
use super::optimizer::DoubleOutingOptimizer;
use super::round::RoundAssignment;
use super::teams::form_race;
use crate::config::GeneratorConfig;
use crate::error::{GenerationError, Result};
use crate::metrics::ScheduleMetrics;
use crate::models::{BoatSet, Competitor, Schedule};
use crate::validation::{validate_schedule, ValidationErrorKind};

/// A schedule that passed every hard constraint.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Attempt index that produced it.
    pub attempt: usize,
    /// The schedule.
    pub schedule: Schedule,
    /// Its quality metrics.
    pub metrics: ScheduleMetrics,
}

/// Result of a single attempt.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// Every hard constraint holds.
    Accepted(Box<Candidate>),
    /// Complete schedule with violations (distinct kinds, sorted).
    Rejected(Vec<ValidationErrorKind>),
    /// Generation stopped before a schedule was complete.
    Abandoned(GenerationError),
}

/// Tallies over a finished search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Attempts run.
    pub attempts: usize,
    /// Attempts accepted.
    pub accepted: usize,
    /// Attempts rejected by a hard constraint.
    pub rejected: usize,
    /// Attempts abandoned.
    pub abandoned: usize,
    /// Rejections per violation kind.
    pub rejections: BTreeMap<ValidationErrorKind, usize>,
}

impl SearchStats {
    fn record(&mut self, outcome: &AttemptOutcome) {
        self.attempts += 1;
        match outcome {
            AttemptOutcome::Accepted(_) => self.accepted += 1,
            AttemptOutcome::Rejected(kinds) => {
                self.rejected += 1;
                for &kind in kinds {
                    *self.rejections.entry(kind).or_insert(0) += 1;
                }
            }
            AttemptOutcome::Abandoned(_) => self.abandoned += 1,
        }
    }

    /// Kind that rejected the most attempts; ties go to the first kind.
    pub fn most_frequent_rejection(&self) -> Option<ValidationErrorKind> {
        self.rejections
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(&kind, _)| kind)
    }
}

/// Multi-seed schedule search.
///
/// # Example
///
/// ```no_run
/// use regatta_schedule::generator::SeedSearch;
/// use regatta_schedule::GeneratorConfig;
///
/// let search = SeedSearch::new(GeneratorConfig::default().with_seed(42)).unwrap();
/// let best = search.run().unwrap();
/// assert_eq!(best.schedule.race_count(), 48);
/// println!("{}", best.metrics);
/// ```
#[derive(Debug, Clone)]
pub struct SeedSearch {
    config: GeneratorConfig,
    layout: ChainLayout,
}

impl SeedSearch {
    /// Creates a search after checking the configuration.
    ///
    /// # Errors
    /// [`GenerationError::DegenerateInput`] for inconsistent constants.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let layout = ChainLayout::new(config.positions_per_boat);
        Ok(Self { config, layout })
    }

    /// Loads the configuration from a TOML file and creates a search.
    ///
    /// # Errors
    /// [`GenerationError::Config`] when the file cannot be read or parsed,
    /// [`GenerationError::DegenerateInput`] for inconsistent constants.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(GeneratorConfig::from_toml_file(path)?)
    }

    /// The configuration in use.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Runs every attempt and returns the best candidate.
    ///
    /// # Errors
    /// [`GenerationError::NoValidScheduleFound`] when no attempt survives.
    pub fn run(&self) -> Result<Candidate> {
        let (best, _) = self.run_with_stats()?;
        Ok(best)
    }

    /// Like [`run`](Self::run), also returning the attempt tallies.
    pub fn run_with_stats(&self) -> Result<(Candidate, SearchStats)> {
        info!(
            attempts = self.config.attempts,
            seed = self.config.seed,
            parallel = self.config.parallel,
            "starting seed search"
        );

        let outcomes: Vec<AttemptOutcome> = if self.config.parallel {
            (0..self.config.attempts)
                .into_par_iter()
                .map(|i| self.run_attempt(i))
                .collect()
        } else {
            (0..self.config.attempts)
                .map(|i| self.run_attempt(i))
                .collect()
        };

        let mut stats = SearchStats::default();
        let mut best: Option<Candidate> = None;
        for outcome in outcomes {
            stats.record(&outcome);
            if let AttemptOutcome::Accepted(candidate) = outcome {
                // Outcomes are in attempt order: strict improvement keeps
                // the lowest index on ties.
                let better = best
                    .as_ref()
                    .map_or(true, |b| candidate.metrics.quality() > b.metrics.quality());
                if better {
                    best = Some(*candidate);
                }
            }
        }

        match best {
            Some(candidate) => {
                info!(
                    accepted = stats.accepted,
                    rejected = stats.rejected,
                    abandoned = stats.abandoned,
                    attempt = candidate.attempt,
                    proper_doubles = candidate.metrics.total_proper_double_outings,
                    single_outings = candidate.metrics.total_single_outings,
                    "seed search finished"
                );
                Ok((candidate, stats))
            }
            None => Err(GenerationError::NoValidScheduleFound {
                attempts: stats.attempts,
                abandoned: stats.abandoned,
                most_frequent_rejection: stats.most_frequent_rejection(),
            }),
        }
    }

    /// Runs attempt `attempt` end to end.
    pub fn run_attempt(&self, attempt: usize) -> AttemptOutcome {
        let (schedule, ctx) = match self.build(attempt) {
            Ok(built) => built,
            Err(e) => {
                debug!(attempt, error = %e, "attempt abandoned");
                return AttemptOutcome::Abandoned(e);
            }
        };

        if let Some(kind) = ctx.first_violation(&self.config) {
            debug!(attempt, ?kind, "attempt rejected");
            return AttemptOutcome::Rejected(vec![kind]);
        }
        if let Err(errors) = validate_schedule(&schedule, &self.config) {
            let mut kinds: Vec<ValidationErrorKind> = errors.iter().map(|e| e.kind).collect();
            kinds.sort_unstable();
            kinds.dedup();
            debug!(attempt, ?kinds, "attempt rejected by validator");
            return AttemptOutcome::Rejected(kinds);
        }

        let metrics = ScheduleMetrics::calculate(&schedule);
        debug!(
            attempt,
            proper_doubles = metrics.total_proper_double_outings,
            min_visibility = metrics.min_visibility,
            "attempt accepted"
        );
        AttemptOutcome::Accepted(Box::new(Candidate {
            attempt,
            schedule,
            metrics,
        }))
    }

    /// Builds and optimizes the schedule for one attempt, without
    /// validating it.
    ///
    /// # Errors
    /// [`GenerationError::BoundaryRetryExhausted`] when a round cannot
    /// satisfy the boundary within the retry budget.
    pub fn build(&self, attempt: usize) -> Result<(Schedule, GenerationContext)> {
        let config = &self.config;
        let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(attempt as u64));
        let roster = Competitor::roster(config.competitors);
        let mut ctx = GenerationContext::new(config.competitors);
        let mut schedule = Schedule::new(roster.clone());
        let mut previous: Option<RoundAssignment> = None;

        for round in 0..config.rounds {
            let mut assignment = RoundAssignment::assign(
                round,
                &roster,
                &self.layout,
                previous.as_ref(),
                config.boundary_retries,
                &mut rng,
            )?;
            if config.refine_iterations > 0 {
                assignment.refine(
                    &self.layout,
                    previous.as_ref(),
                    &ctx,
                    config.refine_iterations,
                    &mut rng,
                );
            }

            for k in 0..self.layout.groups().len() {
                for boat in BoatSet::ALL {
                    let number = self.layout.race_number(round, k, boat.index());
                    let group = assignment.group(boat, k, &self.layout);
                    schedule.add_race(form_race(number, group, &mut ctx));
                }
            }
            previous = Some(assignment);
        }

        DoubleOutingOptimizer::new().optimize(&mut schedule);
        Ok((schedule, ctx))
    }
}

/// Generates the best schedule found under `config`.
///
/// # Errors
/// [`GenerationError::DegenerateInput`] for inconsistent constants,
/// [`GenerationError::NoValidScheduleFound`] when no attempt survives.
pub fn generate_schedule(config: &GeneratorConfig) -> Result<Schedule> {
    Ok(SeedSearch::new(config.clone())?.run()?.schedule)
}
