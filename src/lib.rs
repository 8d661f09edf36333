//! Race schedule generator for two-boat-set team sailing.
//!
//! Builds a schedule for 24 competitors over 48 races in 4 rounds. Races
//! alternate between two boat sets, and each race puts two teams of two
//! into four fixed boats.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Competitor`, `BoatSet`, `Team`, `Race`, `Schedule`
//! - **`generator`**: Chain layout, round assignment, team formation,
//!   double-outing optimizer, seed search
//! - **`validation`**: Hard-constraint checks on a finished schedule
//! - **`metrics`**: Soft-objective indicators (visibility, outings, doubles)
//! - **`export`**: Tab-separated output with fixed boat columns
//! - **`config`**: TOML-loadable generator configuration
//!
//! # Example
//!
//! ```no_run
//! use regatta_schedule::{generate_schedule, validate_schedule, GeneratorConfig, ScheduleMetrics};
//!
//! let config = GeneratorConfig::default().with_seed(42);
//! let schedule = generate_schedule(&config).unwrap();
//! assert!(validate_schedule(&schedule, &config).is_ok());
//! println!("{}", ScheduleMetrics::calculate(&schedule));
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod metrics;
pub mod models;
pub mod validation;

pub use config::{ConfigError, GeneratorConfig};
pub use error::{GenerationError, Result};
pub use export::{
    export_schedule_tsv, export_schedule_tsv_with_names, pair_names_from_tsv, schedule_to_tsv,
    schedule_to_tsv_with_names,
};
pub use generator::{generate_schedule, SeedSearch};
pub use metrics::ScheduleMetrics;
pub use models::Schedule;
pub use validation::{validate_schedule, ValidationError, ValidationErrorKind};
