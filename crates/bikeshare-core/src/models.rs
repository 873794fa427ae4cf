use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Month, NaiveDateTime, Timelike, Weekday};

use crate::error::{BikeshareError, Result};

/// The months covered by the published datasets, in calendar order.
pub const FILTER_MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

/// Every weekday, Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of a weekday (`chrono` only displays the short form).
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Full English name of a month number (1–12), or `None` when out of range.
pub fn month_name(number: u32) -> Option<&'static str> {
    u8::try_from(number)
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .map(|m| m.name())
}

// ── City ──────────────────────────────────────────────────────────────────────

/// A city with a published trip dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// The lowercase name users type at the prompt.
    pub fn as_str(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Default CSV file name for this city.
    pub fn default_file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Filters ───────────────────────────────────────────────────────────────────

/// Month restriction applied when loading a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Only(Month),
}

impl MonthFilter {
    /// Whether a derived month number passes this filter.
    pub fn matches(self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Only(m) => m.number_from_month() == month,
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all"),
            MonthFilter::Only(m) => f.write_str(m.name()),
        }
    }
}

/// Day-of-week restriction applied when loading a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Only(Weekday),
}

impl DayFilter {
    /// Whether a derived weekday passes this filter.
    pub fn matches(self, day: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Only(d) => d == day,
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all"),
            DayFilter::Only(d) => f.write_str(weekday_name(*d)),
        }
    }
}

/// The validated (city, month, day) triple driving one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "city={}, month={}, day={}", self.city, self.month, self.day)
    }
}

// ── TripRecord ────────────────────────────────────────────────────────────────

/// One bicycle rental read from a city dataset.
///
/// The month, weekday, hour and trip descriptor are derived from the start
/// time and stations when the record is built and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    start_time: NaiveDateTime,
    end_time: Option<NaiveDateTime>,
    duration_secs: Option<f64>,
    start_station: String,
    end_station: String,
    user_type: Option<String>,
    gender: Option<String>,
    birth_year: Option<i32>,
    month: u32,
    weekday: Weekday,
    hour: u32,
    trip: String,
}

impl TripRecord {
    pub fn new(
        start_time: NaiveDateTime,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        duration_secs: impl Into<Option<f64>>,
    ) -> Self {
        let start_station = start_station.into();
        let end_station = end_station.into();
        let trip = format!("{} -> {}", start_station, end_station);
        Self {
            start_time,
            end_time: None,
            duration_secs: duration_secs.into(),
            start_station,
            end_station,
            user_type: None,
            gender: None,
            birth_year: None,
            month: start_time.month(),
            weekday: start_time.weekday(),
            hour: start_time.hour(),
            trip,
        }
    }

    pub fn with_end_time(mut self, end_time: Option<NaiveDateTime>) -> Self {
        self.end_time = end_time;
        self
    }

    pub fn with_user_type(mut self, user_type: Option<String>) -> Self {
        self.user_type = user_type;
        self
    }

    pub fn with_gender(mut self, gender: Option<String>) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_birth_year(mut self, birth_year: Option<i32>) -> Self {
        self.birth_year = birth_year;
        self
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn end_time(&self) -> Option<NaiveDateTime> {
        self.end_time
    }

    /// Trip length in seconds, `None` when the cell was blank.
    pub fn duration_secs(&self) -> Option<f64> {
        self.duration_secs
    }

    pub fn start_station(&self) -> &str {
        &self.start_station
    }

    pub fn end_station(&self) -> &str {
        &self.end_station
    }

    pub fn user_type(&self) -> Option<&str> {
        self.user_type.as_deref()
    }

    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    pub fn birth_year(&self) -> Option<i32> {
        self.birth_year
    }

    /// Calendar month of the start time, 1–12.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Start hour, 0–23.
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// `"<start station> -> <end station>"`.
    pub fn trip(&self) -> &str {
        &self.trip
    }
}

// ── TripTable ─────────────────────────────────────────────────────────────────

/// Which optional columns a dataset carries. Decided once from the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

/// An ordered collection of trips sharing one schema.
#[derive(Debug, Clone, PartialEq)]
pub struct TripTable {
    records: Vec<TripRecord>,
    capabilities: Capabilities,
}

impl TripTable {
    pub fn new(records: Vec<TripRecord>, capabilities: Capabilities) -> Self {
        Self {
            records,
            capabilities,
        }
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn has_gender(&self) -> bool {
        self.capabilities.has_gender
    }

    pub fn has_birth_year(&self) -> bool {
        self.capabilities.has_birth_year
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── DatasetCatalog ────────────────────────────────────────────────────────────

/// Immutable mapping from city to the CSV file holding its trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetCatalog {
    data_dir: PathBuf,
    sources: BTreeMap<City, PathBuf>,
}

impl DatasetCatalog {
    /// A catalog with no cities configured.
    pub fn empty(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            sources: BTreeMap::new(),
        }
    }

    /// The published layout: one `<city>.csv` per city inside `data_dir`.
    pub fn standard(data_dir: impl Into<PathBuf>) -> Self {
        City::ALL
            .into_iter()
            .fold(Self::empty(data_dir), |catalog, city| {
                catalog.with_source(city, city.default_file_name())
            })
    }

    /// Return a copy with `city` mapped to `file` (relative to the data dir
    /// unless absolute).
    pub fn with_source(mut self, city: City, file: impl AsRef<Path>) -> Self {
        let path = self.data_dir.join(file);
        self.sources.insert(city, path);
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Resolve the source file for `city`.
    ///
    /// Fails with [`BikeshareError::DatasetNotFound`] when the city is not
    /// configured.
    pub fn source_for(&self, city: City) -> Result<&Path> {
        self.sources
            .get(&city)
            .map(PathBuf::as_path)
            .ok_or_else(|| BikeshareError::DatasetNotFound(city.to_string()))
    }
}
