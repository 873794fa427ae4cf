//! Descriptive statistics over a filtered [`TripTable`].
//!
//! Four independent analyzers (time, station, duration, user). None of them
//! fail: an empty table yields absent modes and a zero total, and optional
//! columns missing from the dataset are reported as [`Availability::Unavailable`].

use bikeshare_core::models::{month_name, weekday_name, TripTable};
use chrono::Weekday;

use crate::frequency::{mode, value_counts};

// ── Availability ──────────────────────────────────────────────────────────────

/// Result for a statistic that depends on an optional dataset column.
#[derive(Debug, Clone, PartialEq)]
pub enum Availability<T> {
    /// The column exists in this dataset.
    Available(T),
    /// The dataset has no such column.
    Unavailable,
}

impl<T> Availability<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available(_))
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Availability::Available(value) => Some(value),
            Availability::Unavailable => None,
        }
    }
}

// ── Time ──────────────────────────────────────────────────────────────────────

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    /// Month number 1–12.
    pub most_common_month: Option<u32>,
    pub most_common_day: Option<Weekday>,
    /// Start hour 0–23.
    pub most_common_hour: Option<u32>,
}

impl TimeStats {
    pub fn most_common_month_name(&self) -> Option<&'static str> {
        self.most_common_month.and_then(month_name)
    }

    pub fn most_common_day_name(&self) -> Option<&'static str> {
        self.most_common_day.map(weekday_name)
    }
}

pub fn time_stats(table: &TripTable) -> TimeStats {
    let records = table.records();
    TimeStats {
        most_common_month: mode(records.iter().map(|r| r.month())),
        most_common_day: mode(records.iter().map(|r| r.weekday())),
        most_common_hour: mode(records.iter().map(|r| r.hour())),
    }
}

// ── Stations ──────────────────────────────────────────────────────────────────

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub most_common_start: Option<String>,
    pub most_common_end: Option<String>,
    /// `"<start> -> <end>"`.
    pub most_common_trip: Option<String>,
}

pub fn station_stats(table: &TripTable) -> StationStats {
    let records = table.records();
    StationStats {
        most_common_start: mode(records.iter().map(|r| r.start_station())).map(str::to_string),
        most_common_end: mode(records.iter().map(|r| r.end_station())).map(str::to_string),
        most_common_trip: mode(records.iter().map(|r| r.trip())).map(str::to_string),
    }
}

// ── Duration ──────────────────────────────────────────────────────────────────

/// Total and average trip duration, in seconds.
///
/// Trips without a recorded duration count towards neither figure.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    /// Trips that carry a duration.
    pub trip_count: usize,
    pub total_secs: f64,
    /// `None` when no trip carries a duration.
    pub mean_secs: Option<f64>,
}

pub fn duration_stats(table: &TripTable) -> DurationStats {
    let (trip_count, total_secs) = table
        .records()
        .iter()
        .filter_map(|r| r.duration_secs())
        .fold((0usize, 0.0f64), |(n, sum), secs| (n + 1, sum + secs));
    let mean_secs = (trip_count > 0).then(|| total_secs / trip_count as f64);
    DurationStats {
        trip_count,
        total_secs,
        mean_secs,
    }
}

// ── Users ─────────────────────────────────────────────────────────────────────

/// Birth-year summary. Fields are `None` when no row carries a birth year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: Option<i32>,
    pub latest: Option<i32>,
    pub most_common: Option<i32>,
}

/// Rider demographics.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    /// Every distinct user type with its count, most frequent first.
    pub user_types: Vec<(String, usize)>,
    pub genders: Availability<Vec<(String, usize)>>,
    pub birth_years: Availability<BirthYearStats>,
}

pub fn user_stats(table: &TripTable) -> UserStats {
    let records = table.records();

    let user_types = owned_counts(records.iter().filter_map(|r| r.user_type()));

    let genders = if table.has_gender() {
        Availability::Available(owned_counts(records.iter().filter_map(|r| r.gender())))
    } else {
        Availability::Unavailable
    };

    let birth_years = if table.has_birth_year() {
        let years = || records.iter().filter_map(|r| r.birth_year());
        Availability::Available(BirthYearStats {
            earliest: years().min(),
            latest: years().max(),
            most_common: mode(years()),
        })
    } else {
        Availability::Unavailable
    };

    UserStats {
        user_types,
        genders,
        birth_years,
    }
}

fn owned_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    value_counts(values)
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::models::{Capabilities, TripRecord};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, m, d)
            .unwrap()
            .and_hms_opt(h, 30, 0)
            .unwrap()
    }

    fn table(records: Vec<TripRecord>, has_gender: bool, has_birth_year: bool) -> TripTable {
        TripTable::new(
            records,
            Capabilities {
                has_gender,
                has_birth_year,
            },
        )
    }

    fn empty_table() -> TripTable {
        table(Vec::new(), true, true)
    }

    // ── time_stats ────────────────────────────────────────────────────────────

    #[test]
    fn test_time_stats_most_common_hour() {
        let t = table(
            vec![
                TripRecord::new(at(1, 2, 8), "A", "B", 60.0),
                TripRecord::new(at(1, 3, 8), "A", "B", 60.0),
                TripRecord::new(at(1, 4, 17), "A", "B", 60.0),
            ],
            false,
            false,
        );
        let stats = time_stats(&t);
        assert_eq!(stats.most_common_hour, Some(8));
        assert_eq!(stats.most_common_month, Some(1));
        assert_eq!(stats.most_common_month_name(), Some("January"));
    }

    #[test]
    fn test_time_stats_tie_picks_first_row() {
        // 2017-01-03 Tuesday, 2017-01-02 Monday: one each, Tuesday seen first.
        let t = table(
            vec![
                TripRecord::new(at(1, 3, 9), "A", "B", 60.0),
                TripRecord::new(at(1, 2, 9), "A", "B", 60.0),
            ],
            false,
            false,
        );
        let stats = time_stats(&t);
        assert_eq!(stats.most_common_day, Some(Weekday::Tue));
        assert_eq!(stats.most_common_day_name(), Some("Tuesday"));
    }

    #[test]
    fn test_time_stats_empty_table() {
        let stats = time_stats(&empty_table());
        assert_eq!(stats.most_common_month, None);
        assert_eq!(stats.most_common_day, None);
        assert_eq!(stats.most_common_hour, None);
        assert_eq!(stats.most_common_month_name(), None);
    }

    // ── station_stats ─────────────────────────────────────────────────────────

    #[test]
    fn test_station_stats_most_frequent_trip() {
        let t = table(
            vec![
                TripRecord::new(at(2, 1, 8), "A", "B", 60.0),
                TripRecord::new(at(2, 1, 9), "A", "B", 60.0),
                TripRecord::new(at(2, 1, 10), "C", "D", 60.0),
            ],
            false,
            false,
        );
        let stats = station_stats(&t);
        assert_eq!(stats.most_common_start.as_deref(), Some("A"));
        assert_eq!(stats.most_common_end.as_deref(), Some("B"));
        assert_eq!(stats.most_common_trip.as_deref(), Some("A -> B"));
    }

    #[test]
    fn test_station_stats_trip_differs_from_station_modes() {
        // Start mode is X, end mode is Y, but no single X -> Y trip dominates.
        let t = table(
            vec![
                TripRecord::new(at(2, 1, 8), "X", "P", 60.0),
                TripRecord::new(at(2, 1, 8), "X", "Q", 60.0),
                TripRecord::new(at(2, 1, 8), "R", "Y", 60.0),
                TripRecord::new(at(2, 1, 8), "S", "Y", 60.0),
                TripRecord::new(at(2, 1, 8), "S", "Y", 60.0),
            ],
            false,
            false,
        );
        let stats = station_stats(&t);
        assert_eq!(stats.most_common_start.as_deref(), Some("X"));
        assert_eq!(stats.most_common_end.as_deref(), Some("Y"));
        assert_eq!(stats.most_common_trip.as_deref(), Some("S -> Y"));
    }

    #[test]
    fn test_station_stats_empty_table() {
        let stats = station_stats(&empty_table());
        assert!(stats.most_common_start.is_none());
        assert!(stats.most_common_end.is_none());
        assert!(stats.most_common_trip.is_none());
    }

    // ── duration_stats ────────────────────────────────────────────────────────

    #[test]
    fn test_duration_stats_sum_and_mean() {
        let t = table(
            vec![
                TripRecord::new(at(3, 1, 8), "A", "B", 100.0),
                TripRecord::new(at(3, 1, 8), "A", "B", 250.0),
                TripRecord::new(at(3, 1, 8), "A", "B", 50.5),
            ],
            false,
            false,
        );
        let stats = duration_stats(&t);
        assert_eq!(stats.trip_count, 3);
        assert!((stats.total_secs - 400.5).abs() < 1e-9);
        assert!((stats.mean_secs.unwrap() - 133.5).abs() < 1e-9);
    }

    #[test]
    fn test_duration_stats_skips_missing_durations() {
        let t = table(
            vec![
                TripRecord::new(at(3, 1, 8), "A", "B", 100.0),
                TripRecord::new(at(3, 1, 9), "A", "B", None::<f64>),
                TripRecord::new(at(3, 1, 10), "A", "B", 300.0),
            ],
            false,
            false,
        );
        let stats = duration_stats(&t);
        assert_eq!(stats.trip_count, 2);
        assert_eq!(stats.total_secs, 400.0);
        assert_eq!(stats.mean_secs, Some(200.0));
    }

    #[test]
    fn test_duration_stats_all_missing() {
        let t = table(
            vec![TripRecord::new(at(3, 1, 8), "A", "B", None::<f64>)],
            false,
            false,
        );
        let stats = duration_stats(&t);
        assert_eq!(stats.trip_count, 0);
        assert_eq!(stats.total_secs, 0.0);
        assert_eq!(stats.mean_secs, None);
    }

    #[test]
    fn test_duration_stats_empty_table() {
        let stats = duration_stats(&empty_table());
        assert_eq!(stats.trip_count, 0);
        assert_eq!(stats.total_secs, 0.0);
        assert_eq!(stats.mean_secs, None);
    }

    // ── user_stats ────────────────────────────────────────────────────────────

    #[test]
    fn test_user_stats_full_schema() {
        let t = table(
            vec![
                TripRecord::new(at(4, 1, 8), "A", "B", 60.0)
                    .with_user_type(Some("Subscriber".into()))
                    .with_gender(Some("Male".into()))
                    .with_birth_year(Some(1985)),
                TripRecord::new(at(4, 1, 8), "A", "B", 60.0)
                    .with_user_type(Some("Customer".into()))
                    .with_gender(Some("Female".into()))
                    .with_birth_year(Some(1992)),
                TripRecord::new(at(4, 1, 8), "A", "B", 60.0)
                    .with_user_type(Some("Subscriber".into()))
                    .with_gender(None)
                    .with_birth_year(Some(1992)),
                TripRecord::new(at(4, 1, 8), "A", "B", 60.0)
                    .with_user_type(Some("Subscriber".into()))
                    .with_gender(Some("Male".into()))
                    .with_birth_year(None),
            ],
            true,
            true,
        );
        let stats = user_stats(&t);

        assert_eq!(
            stats.user_types,
            vec![("Subscriber".to_string(), 3), ("Customer".to_string(), 1)]
        );
        assert_eq!(
            stats.genders,
            Availability::Available(vec![("Male".to_string(), 2), ("Female".to_string(), 1)])
        );
        assert_eq!(
            stats.birth_years,
            Availability::Available(BirthYearStats {
                earliest: Some(1985),
                latest: Some(1992),
                most_common: Some(1992),
            })
        );
    }

    #[test]
    fn test_user_stats_without_optional_columns() {
        let t = table(
            vec![TripRecord::new(at(4, 1, 8), "A", "B", 60.0)
                .with_user_type(Some("Customer".into()))],
            false,
            false,
        );
        let stats = user_stats(&t);
        assert_eq!(stats.user_types, vec![("Customer".to_string(), 1)]);
        assert_eq!(stats.genders, Availability::Unavailable);
        assert_eq!(stats.birth_years, Availability::Unavailable);
        assert!(!stats.genders.is_available());
        assert!(stats.birth_years.as_option().is_none());
    }

    #[test]
    fn test_user_stats_empty_table_with_columns() {
        let stats = user_stats(&empty_table());
        assert!(stats.user_types.is_empty());
        assert_eq!(stats.genders, Availability::Available(Vec::new()));
        assert_eq!(
            stats.birth_years,
            Availability::Available(BirthYearStats::default())
        );
    }

    #[test]
    fn test_user_stats_skips_blank_user_types() {
        let t = table(
            vec![
                TripRecord::new(at(4, 1, 8), "A", "B", 60.0).with_user_type(None),
                TripRecord::new(at(4, 1, 8), "A", "B", 60.0)
                    .with_user_type(Some("Subscriber".into())),
            ],
            false,
            false,
        );
        let stats = user_stats(&t);
        assert_eq!(stats.user_types, vec![("Subscriber".to_string(), 1)]);
    }
}
