//! Tab-separated export for spreadsheet import.
//!
//! Two header rows, then one row per race. Each race fills the four
//! columns of its own boat set and leaves the other four empty:
//!
//! ```text
//! Race | Pink 7 | Pink 8 | Black Stripe 10 | Black Stripe 11 | Green Circle 7 | ... | Black Diamond 11
//! ```
//!
//! Competitors print as `Competitor_N` unless a name table is given.
//! [`pair_names_from_tsv`] builds one from a roster file of sailor pairs.

use std::fmt::Write as _;
use std::path::Path;

use crate::models::{BoatSet, Competitor, Race, Schedule};

/// Renders the schedule as TSV. Rows are `\n`-separated with no trailing
/// newline.
pub fn schedule_to_tsv(schedule: &Schedule) -> String {
    schedule_to_tsv_with_names(schedule, &[])
}

/// Renders the schedule as TSV, printing competitor `i` as `names[i]`.
/// Competitors past the end of `names` keep their default name.
pub fn schedule_to_tsv_with_names(schedule: &Schedule, names: &[String]) -> String {
    let mut out = header();
    for race in &schedule.races {
        out.push('\n');
        out.push_str(&race_row(race, names));
    }
    out
}

/// Writes [`schedule_to_tsv`] to `path`.
pub fn export_schedule_tsv(schedule: &Schedule, path: impl AsRef<Path>) -> std::io::Result<()> {
    std::fs::write(path, schedule_to_tsv(schedule))
}

/// Writes [`schedule_to_tsv_with_names`] to `path`.
pub fn export_schedule_tsv_with_names(
    schedule: &Schedule,
    names: &[String],
    path: impl AsRef<Path>,
) -> std::io::Result<()> {
    std::fs::write(path, schedule_to_tsv_with_names(schedule, names))
}

/// Parses a pairs roster: a header row, then one `sailor\tsailor` row
/// per competitor in id order. Each pair is named by the two first names,
/// `"First1/First2"`. Rows with fewer than two columns are skipped.
pub fn pair_names_from_tsv(contents: &str) -> Vec<String> {
    contents
        .lines()
        .skip(1)
        .filter_map(|line| {
            let mut cols = line.trim().split('\t');
            let (first, second) = (cols.next()?, cols.next()?);
            Some(format!("{}/{}", first_name(first), first_name(second)))
        })
        .collect()
}

fn first_name(full: &str) -> &str {
    full.split_whitespace().next().unwrap_or(full)
}

fn display_name(competitor: Competitor, names: &[String]) -> String {
    names
        .get(competitor.index())
        .cloned()
        .unwrap_or_else(|| competitor.name())
}

fn header() -> String {
    let mut clubs = String::new();
    let mut boats = String::from("Race");
    for boat in BoatSet::ALL {
        let _ = write!(clubs, "\t{}\t\t\t", boat.label());
        for name in boat.boat_names() {
            let _ = write!(boats, "\t{name}\t");
        }
    }
    format!("{clubs}\n{boats}")
}

fn race_row(race: &Race, table: &[String]) -> String {
    let names = race
        .competitors()
        .map(|c| display_name(c, table))
        .join("\t");
    match race.boat_set {
        BoatSet::A => format!("{}\t{names}\t\t\t\t", race.number),
        BoatSet::B => format!("{}\t\t\t\t\t{names}", race.number),
    }
}
