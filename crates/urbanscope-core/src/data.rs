//! Compiled-in population datasets — single source of truth for the chart,
//! the derived statistics and the AI prompts.
//!
//! Figures are census counts for 1991-2021 plus provincial projections for
//! 2031 and 2041, in millions.

use crate::PopulationRecord;

/// The top-level multi-city area whose dataset is the fallback default.
pub const AGGREGATE_REGION: &str = "GTA";

/// The fixed location set, aggregate region first.
pub const LOCATIONS: &[&str] = &[
    AGGREGATE_REGION,
    "Toronto",
    "Mississauga",
    "Brampton",
    "Hamilton",
    "Markham",
    "Vaughan",
];

const fn actual(year: u32, population: f64) -> PopulationRecord {
    PopulationRecord { year, population, projected: false }
}

const fn projected(year: u32, population: f64) -> PopulationRecord {
    PopulationRecord { year, population, projected: true }
}

static GTA: [PopulationRecord; 9] = [
    actual(1991, 3.8),
    actual(1996, 4.6),
    actual(2001, 5.1),
    actual(2006, 5.5),
    actual(2011, 6.0),
    actual(2016, 6.4),
    actual(2021, 6.7),
    projected(2031, 7.5),
    projected(2041, 9.5),
];

static TORONTO: [PopulationRecord; 9] = [
    actual(1991, 2.2),
    actual(1996, 2.4),
    actual(2001, 2.5),
    actual(2006, 2.6),
    actual(2011, 2.7),
    actual(2016, 2.8),
    actual(2021, 2.9),
    projected(2031, 3.2),
    projected(2041, 3.5),
];

static MISSISSAUGA: [PopulationRecord; 9] = [
    actual(1991, 0.45),
    actual(1996, 0.55),
    actual(2001, 0.61),
    actual(2006, 0.67),
    actual(2011, 0.71),
    actual(2016, 0.72),
    actual(2021, 0.73),
    projected(2031, 0.78),
    projected(2041, 0.85),
];

static BRAMPTON: [PopulationRecord; 9] = [
    actual(1991, 0.23),
    actual(1996, 0.26),
    actual(2001, 0.32),
    actual(2006, 0.43),
    actual(2011, 0.52),
    actual(2016, 0.59),
    actual(2021, 0.65),
    projected(2031, 0.75),
    projected(2041, 0.88),
];

static HAMILTON: [PopulationRecord; 9] = [
    actual(1991, 0.45),
    actual(1996, 0.47),
    actual(2001, 0.49),
    actual(2006, 0.50),
    actual(2011, 0.52),
    actual(2016, 0.53),
    actual(2021, 0.57),
    projected(2031, 0.62),
    projected(2041, 0.68),
];

static MARKHAM: [PopulationRecord; 9] = [
    actual(1991, 0.15),
    actual(1996, 0.18),
    actual(2001, 0.21),
    actual(2006, 0.26),
    actual(2011, 0.30),
    actual(2016, 0.32),
    actual(2021, 0.34),
    projected(2031, 0.38),
    projected(2041, 0.42),
];

static VAUGHAN: [PopulationRecord; 9] = [
    actual(1991, 0.11),
    actual(1996, 0.14),
    actual(2001, 0.18),
    actual(2006, 0.24),
    actual(2011, 0.29),
    actual(2016, 0.31),
    actual(2021, 0.33),
    projected(2031, 0.37),
    projected(2041, 0.41),
];

/// Look up the record sequence for a location. Unrecognized keys fall back to
/// the aggregate region, so a lookup always yields a usable sequence.
pub fn records_for(location: &str) -> &'static [PopulationRecord] {
    match location {
        "Toronto" => &TORONTO,
        "Mississauga" => &MISSISSAUGA,
        "Brampton" => &BRAMPTON,
        "Hamilton" => &HAMILTON,
        "Markham" => &MARKHAM,
        "Vaughan" => &VAUGHAN,
        _ => &GTA,
    }
}

pub fn is_known(location: &str) -> bool {
    LOCATIONS.contains(&location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_location_has_a_nonempty_sequence() {
        for location in LOCATIONS {
            let records = records_for(location);
            assert!(!records.is_empty(), "{location} has no records");
            assert!(
                records.iter().any(|r| !r.projected),
                "{location} has no actual record"
            );
        }
    }

    #[test]
    fn years_are_strictly_increasing() {
        for location in LOCATIONS {
            let records = records_for(location);
            for pair in records.windows(2) {
                assert!(pair[0].year < pair[1].year, "{location} years out of order");
            }
        }
    }

    #[test]
    fn unknown_key_falls_back_to_aggregate_region() {
        assert_eq!(records_for("Oshawa"), records_for(AGGREGATE_REGION));
        assert_eq!(records_for(""), records_for("GTA"));
    }

    #[test]
    fn known_cities_do_not_alias_the_aggregate() {
        assert_ne!(records_for("Toronto"), records_for(AGGREGATE_REGION));
        assert!(is_known("Vaughan"));
        assert!(!is_known("vaughan"));
    }
}
