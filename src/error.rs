//! Error types for schedule generation.

use thiserror::Error;

use crate::config::ConfigError;
use crate::validation::ValidationErrorKind;

/// Main error type for generation.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Domain constants are inconsistent with the chain pattern.
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// A round could not satisfy the previous round's boundary.
    ///
    /// Recovered inside the seed search by abandoning the attempt.
    #[error("Round {round}: boundary constraint unsatisfied after {retries} reshuffles")]
    BoundaryRetryExhausted {
        /// 1-indexed round.
        round: usize,
        /// Reshuffles tried.
        retries: usize,
    },

    /// The attempt budget ran out without a single valid schedule.
    #[error(
        "No valid schedule found in {attempts} attempts \
         ({abandoned} abandoned, most frequent rejection: {most_frequent_rejection:?})"
    )]
    NoValidScheduleFound {
        /// Attempts run.
        attempts: usize,
        /// Attempts abandoned before completion.
        abandoned: usize,
        /// Violation category that rejected the most candidates.
        most_frequent_rejection: Option<ValidationErrorKind>,
    },

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for generation.
pub type Result<T> = std::result::Result<T, GenerationError>;
