//! Generator configuration.
//!
//! Domain constants (head-count, chain length, rounds) are named fields
//! rather than literals so the validator, chain layout, and search all
//! read them from one place. Search parameters (seed, budgets) live
//! alongside them.
//!
//! # Examples
//!
//! ```
//! use regatta_schedule::GeneratorConfig;
//!
//! let config = GeneratorConfig::from_toml_str(r#"
//!     attempts = 50
//!     seed = 7
//! "#).unwrap();
//!
//! assert_eq!(config.attempts, 50);
//! assert_eq!(config.competitors, 24);
//! assert_eq!(config.total_races(), 48);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::GenerationError;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GeneratorConfig {
    /// Number of competitors.
    pub competitors: usize,
    /// Chain positions per boat set per round.
    pub positions_per_boat: usize,
    /// Number of rounds.
    pub rounds: usize,
    /// Minimum unique opponents every competitor must face.
    pub min_unique_opponents: usize,
    /// Seed attempts to run.
    pub attempts: usize,
    /// Reshuffles allowed per round before the attempt is abandoned.
    pub boundary_retries: usize,
    /// Position-swap moves tried per round to spread out repeat meetings.
    /// Zero keeps the plain shuffle.
    pub refine_iterations: usize,
    /// Base seed; attempt `i` uses `seed + i`.
    pub seed: u64,
    /// Run attempts on the rayon thread pool.
    pub parallel: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            competitors: 24,
            positions_per_boat: 12,
            rounds: 4,
            min_unique_opponents: 12,
            attempts: 200,
            boundary_retries: 1000,
            refine_iterations: 500,
            seed: 0x5EED,
            parallel: false,
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string. Missing keys take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Sets the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the attempt budget.
    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }

    /// Sets the boundary reshuffle budget.
    pub fn with_boundary_retries(mut self, retries: usize) -> Self {
        self.boundary_retries = retries;
        self
    }

    /// Sets the per-round refinement budget.
    pub fn with_refine_iterations(mut self, iterations: usize) -> Self {
        self.refine_iterations = iterations;
        self
    }

    /// Enables or disables parallel attempts.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Races per round: `positions_per_boat / 2` groups on each of two boat sets.
    #[inline]
    pub fn races_per_round(&self) -> usize {
        self.positions_per_boat
    }

    /// Total races in the schedule.
    #[inline]
    pub fn total_races(&self) -> usize {
        self.rounds * self.races_per_round()
    }

    /// Races each competitor sails (two per round).
    #[inline]
    pub fn races_per_competitor(&self) -> usize {
        2 * self.rounds
    }

    /// Most single outings a schedule may contain in total: a quarter of
    /// all competitor-races (48 for the default constants).
    #[inline]
    pub fn max_single_outings(&self) -> usize {
        self.competitors * self.races_per_competitor() / 4
    }

    /// Checks that the constants are consistent with the chain pattern.
    ///
    /// # Errors
    /// [`GenerationError::DegenerateInput`] naming the first inconsistency.
    pub fn validate(&self) -> Result<(), GenerationError> {
        let fail = |msg: String| Err(GenerationError::DegenerateInput(msg));

        if self.positions_per_boat < 8 || self.positions_per_boat % 2 != 0 {
            return fail(format!(
                "positions_per_boat must be even and at least 8, got {}",
                self.positions_per_boat
            ));
        }
        if self.competitors != 2 * self.positions_per_boat {
            return fail(format!(
                "competitors ({}) must fill both chains exactly (2 x {} positions)",
                self.competitors, self.positions_per_boat
            ));
        }
        if self.rounds == 0 {
            return fail("rounds must be at least 1".into());
        }
        if self.attempts == 0 {
            return fail("attempts must be at least 1".into());
        }
        if self.boundary_retries == 0 {
            return fail("boundary_retries must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let c = GeneratorConfig::default();
        assert_eq!(c.competitors, 24);
        assert_eq!(c.races_per_round(), 12);
        assert_eq!(c.total_races(), 48);
        assert_eq!(c.races_per_competitor(), 8);
        assert_eq!(c.refine_iterations, 500);
        assert_eq!(c.max_single_outings(), 48);
        assert!(c.validate().is_ok());
        assert!(c.with_refine_iterations(0).validate().is_ok());
    }

    #[test]
    fn test_toml_partial_uses_defaults() {
        let c = GeneratorConfig::from_toml_str("seed = 99\nparallel = true").unwrap();
        assert_eq!(c.seed, 99);
        assert!(c.parallel);
        assert_eq!(c.attempts, 200);
    }

    #[test]
    fn test_toml_roundtrip() {
        let c = GeneratorConfig::default().with_seed(3).with_attempts(10);
        let text = c.to_toml_string().unwrap();
        assert_eq!(GeneratorConfig::from_toml_str(&text).unwrap(), c);
    }

    #[test]
    fn test_toml_invalid() {
        assert!(matches!(
            GeneratorConfig::from_toml_str("attempts = \"many\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            GeneratorConfig::load("/nonexistent/regatta.toml"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_degenerate_head_count() {
        let c = GeneratorConfig {
            competitors: 25,
            ..Default::default()
        };
        assert!(matches!(
            c.validate(),
            Err(GenerationError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_degenerate_chain() {
        for positions in [6, 11] {
            let c = GeneratorConfig {
                positions_per_boat: positions,
                competitors: 2 * positions,
                ..Default::default()
            };
            assert!(matches!(
                c.validate(),
                Err(GenerationError::DegenerateInput(_))
            ));
        }
    }

    #[test]
    fn test_degenerate_budgets() {
        assert!(GeneratorConfig::default().with_attempts(0).validate().is_err());
        assert!(GeneratorConfig::default()
            .with_boundary_retries(0)
            .validate()
            .is_err());
        let c = GeneratorConfig {
            rounds: 0,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }
}
