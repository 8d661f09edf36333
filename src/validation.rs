//! Hard-constraint validation for finished schedules.
//!
//! Re-derives every hard constraint from the schedule alone, without
//! trusting any generation-time bookkeeping. Detects:
//! - Wrong race count, numbering, or boat-set alternation
//! - Races without four distinct competitors
//! - Competitors in adjacent races (N and N+1 overlap in time)
//! - Wrong number of races per competitor, overall or per round
//! - Repeated teammates
//! - Triple outings (N, N+2, N+4 on one boat set)
//! - Too few unique opponents
//! - Too many single outings across the whole schedule

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::config::GeneratorConfig;
use crate::metrics::count_outings;
use crate::models::{BoatSet, Competitor, Schedule};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValidationErrorKind {
    /// Roster size differs from the configured head-count.
    RosterSize,
    /// Schedule does not hold the configured number of races.
    ScheduleLength,
    /// Race numbers are not sequential from 1.
    RaceNumbering,
    /// A race sails the wrong boat set for its number.
    BoatSetMismatch,
    /// A race does not hold four distinct roster competitors.
    IncompleteRace,
    /// A competitor sails two overlapping races.
    AdjacentRaces,
    /// A competitor sails the wrong number of races.
    RaceCount,
    /// A competitor sails with the same teammate twice.
    DuplicateTeammate,
    /// A competitor sails three consecutive races on one boat set.
    TripleOuting,
    /// A competitor faces too few unique opponents.
    OpponentDiversity,
    /// The schedule holds more single outings than allowed.
    SingleOutings,
    /// A competitor does not sail exactly twice in some round.
    RoundStructure,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates a schedule against every hard constraint.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_schedule(schedule: &Schedule, config: &GeneratorConfig) -> ValidationResult {
    let mut errors = Vec::new();

    check_structure(schedule, config, &mut errors);
    for &competitor in &schedule.competitors {
        check_competitor(schedule, config, competitor, &mut errors);
    }
    check_rounds(schedule, config, &mut errors);
    check_single_outings(schedule, config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Predicate form of [`validate_schedule`].
pub fn is_valid(schedule: &Schedule, config: &GeneratorConfig) -> bool {
    validate_schedule(schedule, config).is_ok()
}

fn check_structure(schedule: &Schedule, config: &GeneratorConfig, errors: &mut Vec<ValidationError>) {
    if schedule.competitors.len() != config.competitors {
        errors.push(ValidationError::new(
            ValidationErrorKind::RosterSize,
            format!(
                "Expected {} competitors, got {}",
                config.competitors,
                schedule.competitors.len()
            ),
        ));
    }

    if schedule.race_count() != config.total_races() {
        errors.push(ValidationError::new(
            ValidationErrorKind::ScheduleLength,
            format!(
                "Expected {} races, got {}",
                config.total_races(),
                schedule.race_count()
            ),
        ));
    }

    let roster: BTreeSet<Competitor> = schedule.competitors.iter().copied().collect();
    for (idx, race) in schedule.races.iter().enumerate() {
        if race.number != idx + 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::RaceNumbering,
                format!("Race at position {} is numbered {}", idx + 1, race.number),
            ));
        }
        if race.boat_set != BoatSet::for_race(race.number) {
            errors.push(ValidationError::new(
                ValidationErrorKind::BoatSetMismatch,
                format!(
                    "Race {}: expected boat set {:?}, got {:?}",
                    race.number,
                    BoatSet::for_race(race.number),
                    race.boat_set
                ),
            ));
        }
        if !race.has_distinct_competitors()
            || race.competitors().iter().any(|c| !roster.contains(c))
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::IncompleteRace,
                format!("Race {} does not hold four distinct roster competitors", race.number),
            ));
        }
    }
}

fn check_competitor(
    schedule: &Schedule,
    config: &GeneratorConfig,
    competitor: Competitor,
    errors: &mut Vec<ValidationError>,
) {
    let numbers = schedule.race_numbers_for(competitor);

    for pair in numbers.windows(2) {
        if pair[1] == pair[0] + 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::AdjacentRaces,
                format!(
                    "Competitor {competitor} in adjacent races {} and {}",
                    pair[0], pair[1]
                ),
            ));
        }
    }

    if numbers.len() != config.races_per_competitor() {
        errors.push(ValidationError::new(
            ValidationErrorKind::RaceCount,
            format!(
                "Competitor {competitor} has {} races (expected {})",
                numbers.len(),
                config.races_per_competitor()
            ),
        ));
    }

    let mut teammate_counts: BTreeMap<Competitor, usize> = BTreeMap::new();
    for teammate in schedule.teammates_for(competitor) {
        *teammate_counts.entry(teammate).or_insert(0) += 1;
    }
    for (teammate, count) in teammate_counts.into_iter().filter(|&(_, n)| n > 1) {
        errors.push(ValidationError::new(
            ValidationErrorKind::DuplicateTeammate,
            format!("Competitor {competitor} teamed with {teammate} {count} times"),
        ));
    }

    for boat in BoatSet::ALL {
        let on_boat: Vec<usize> = numbers
            .iter()
            .copied()
            .filter(|&n| BoatSet::for_race(n) == boat)
            .collect();
        let mut run = 1;
        for pair in on_boat.windows(2) {
            run = if pair[1] == pair[0] + 2 { run + 1 } else { 1 };
            if run == 3 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::TripleOuting,
                    format!(
                        "Competitor {competitor} sails {}, {}, {} on boat set {boat:?}",
                        pair[1] - 4,
                        pair[0],
                        pair[1]
                    ),
                ));
            }
        }
    }

    let opponents = schedule.opponents_for(competitor);
    let unique: BTreeSet<Competitor> = opponents.iter().copied().collect();
    if !opponents.is_empty() && unique.len() < config.min_unique_opponents {
        errors.push(ValidationError::new(
            ValidationErrorKind::OpponentDiversity,
            format!(
                "Competitor {competitor} faced {} unique opponents (min {})",
                unique.len(),
                config.min_unique_opponents
            ),
        ));
    }
}

fn check_rounds(schedule: &Schedule, config: &GeneratorConfig, errors: &mut Vec<ValidationError>) {
    for (round, races) in schedule.rounds(config.races_per_round()).enumerate() {
        if races.len() < config.races_per_round() {
            break;
        }
        for &competitor in &schedule.competitors {
            let count = races.iter().filter(|r| r.contains(competitor)).count();
            if count != 2 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::RoundStructure,
                    format!(
                        "Round {}: competitor {competitor} has {count} races (expected 2)",
                        round + 1
                    ),
                ));
            }
        }
    }
}

fn check_single_outings(
    schedule: &Schedule,
    config: &GeneratorConfig,
    errors: &mut Vec<ValidationError>,
) {
    let singles: usize = schedule
        .competitors
        .iter()
        .map(|&c| count_outings(&schedule.race_numbers_for(c)).0)
        .sum();
    if singles > config.max_single_outings() {
        errors.push(ValidationError::new(
            ValidationErrorKind::SingleOutings,
            format!(
                "{singles} single outings (max {})",
                config.max_single_outings()
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Race, Team};

    fn race(number: usize, ids: [usize; 4]) -> Race {
        Race::new(
            number,
            Team::new(Competitor(ids[0]), Competitor(ids[1])),
            Team::new(Competitor(ids[2]), Competitor(ids[3])),
        )
    }

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result.unwrap_err().into_iter().map(|e| e.kind).collect()
    }

    /// Small config the hand-built schedules below can satisfy.
    fn mini_config() -> GeneratorConfig {
        GeneratorConfig {
            competitors: 16,
            positions_per_boat: 8,
            rounds: 1,
            min_unique_opponents: 0,
            ..Default::default()
        }
    }

    /// One 8-race round on the 8-position chain:
    /// `[0 1 2 3] [2 3 4 5] [4 5 6 7] [6 7 0 1]` per boat set, competitors
    /// 0..8 on set A and 8..16 on set B, teams split across the pairs that
    /// meet twice.
    fn mini_round() -> Schedule {
        let races = vec![
            race(1, [0, 2, 1, 3]),
            race(2, [8, 10, 9, 11]),
            race(3, [2, 4, 3, 5]),
            race(4, [10, 12, 11, 13]),
            race(5, [4, 6, 5, 7]),
            race(6, [12, 14, 13, 15]),
            race(7, [6, 0, 7, 1]),
            race(8, [14, 8, 15, 9]),
        ];
        Schedule::with_races(Competitor::roster(16), races)
    }

    #[test]
    fn test_valid_mini_round() {
        assert_eq!(validate_schedule(&mini_round(), &mini_config()), Ok(()));
        assert!(is_valid(&mini_round(), &mini_config()));
    }

    #[test]
    fn test_duplicate_teammate_rejected() {
        // Four races, 0 and 1 teamed twice; good double-outing shape.
        let schedule = Schedule::with_races(
            Competitor::roster(24),
            vec![
                race(1, [0, 1, 2, 3]),
                race(2, [4, 5, 6, 7]),
                race(3, [0, 1, 8, 9]),
                race(4, [10, 11, 12, 13]),
            ],
        );
        let kinds = kinds(validate_schedule(&schedule, &GeneratorConfig::default()));
        assert!(kinds.contains(&ValidationErrorKind::DuplicateTeammate));
    }

    #[test]
    fn test_adjacent_races() {
        let mut schedule = mini_round();
        // Put competitor 0 into race 2 in place of 8.
        schedule.races[1] = race(2, [0, 10, 9, 11]);
        let kinds = kinds(validate_schedule(&schedule, &mini_config()));
        assert!(kinds.contains(&ValidationErrorKind::AdjacentRaces));
        assert!(kinds.contains(&ValidationErrorKind::RaceCount));
        assert!(kinds.contains(&ValidationErrorKind::RoundStructure));
    }

    #[test]
    fn test_triple_outing() {
        let config = GeneratorConfig {
            min_unique_opponents: 0,
            ..mini_config()
        };
        let schedule = Schedule::with_races(
            Competitor::roster(16),
            vec![
                race(1, [0, 1, 2, 3]),
                race(2, [8, 9, 10, 11]),
                race(3, [0, 4, 5, 6]),
                race(4, [12, 13, 14, 15]),
                race(5, [0, 7, 1, 2]),
            ],
        );
        let kinds = kinds(validate_schedule(&schedule, &config));
        assert!(kinds.contains(&ValidationErrorKind::TripleOuting));
    }

    #[test]
    fn test_opponent_diversity() {
        let config = GeneratorConfig {
            min_unique_opponents: 5,
            ..mini_config()
        };
        let kinds = kinds(validate_schedule(&mini_round(), &config));
        assert!(kinds.iter().all(|&k| k == ValidationErrorKind::OpponentDiversity));
        assert!(!kinds.is_empty());
    }

    #[test]
    fn test_structure_errors() {
        let mut schedule = mini_round();
        schedule.races[2].number = 9;
        schedule.races[3].boat_set = BoatSet::A;
        schedule.races[4] = race(5, [4, 4, 5, 7]);
        schedule.competitors.pop();
        let kinds = kinds(validate_schedule(&schedule, &mini_config()));
        assert!(kinds.contains(&ValidationErrorKind::RaceNumbering));
        assert!(kinds.contains(&ValidationErrorKind::BoatSetMismatch));
        assert!(kinds.contains(&ValidationErrorKind::IncompleteRace));
        assert!(kinds.contains(&ValidationErrorKind::RosterSize));
    }

    #[test]
    fn test_too_many_single_outings() {
        // Everyone sails N and N+4: no adjacency, repeats or triples, but
        // every race is a single outing (32 against a cap of 8).
        let schedule = Schedule::with_races(
            Competitor::roster(16),
            vec![
                race(1, [0, 1, 2, 3]),
                race(2, [8, 9, 10, 11]),
                race(3, [4, 5, 6, 7]),
                race(4, [12, 13, 14, 15]),
                race(5, [0, 2, 1, 3]),
                race(6, [8, 10, 9, 11]),
                race(7, [4, 6, 5, 7]),
                race(8, [12, 14, 13, 15]),
            ],
        );
        let errors = validate_schedule(&schedule, &mini_config()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::SingleOutings);
        assert!(errors[0].message.starts_with("32 single outings"));
    }

    #[test]
    fn test_single_outing_cap_is_inclusive() {
        // The mini round has exactly eight singles, the cap for its config.
        let config = mini_config();
        assert_eq!(config.max_single_outings(), 8);
        let singles: usize = (0..16)
            .map(|c| count_outings(&mini_round().race_numbers_for(Competitor(c))).0)
            .sum();
        assert_eq!(singles, 8);
        assert!(is_valid(&mini_round(), &config));
    }

    #[test]
    fn test_schedule_length() {
        let schedule = Schedule::new(Competitor::roster(24));
        let kinds = kinds(validate_schedule(&schedule, &GeneratorConfig::default()));
        assert!(kinds.contains(&ValidationErrorKind::ScheduleLength));
        assert!(kinds.contains(&ValidationErrorKind::RaceCount));
    }
}
