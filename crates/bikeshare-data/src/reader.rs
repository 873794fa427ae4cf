//! CSV loading for city trip datasets.
//!
//! Reads one city's file into a [`TripTable`], deriving month, weekday, hour
//! and trip descriptor for every row. Parsing is strict: the first row whose
//! start time, duration or birth year cannot be read aborts the load. Blank
//! duration and birth-year cells are kept as missing values.

use std::io::Read;
use std::path::Path;
use std::time::Instant;

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{Capabilities, City, DatasetCatalog, Selection, TripRecord, TripTable};
use bikeshare_core::time_utils::parse_trip_timestamp;
use serde::Deserialize;
use tracing::{debug, info};

use crate::filter::filter_trips;

const GENDER_COLUMN: &str = "Gender";
const BIRTH_YEAR_COLUMN: &str = "Birth Year";

/// One CSV row as written in the source file, before any validation.
///
/// Unknown columns (such as the unnamed index column) are ignored; blank
/// cells in optional columns deserialize to `None`.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration", default)]
    trip_duration: Option<String>,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the table for `selection.city` and apply its month and day filters.
pub fn load_data(catalog: &DatasetCatalog, selection: &Selection) -> Result<TripTable> {
    let table = load_city(catalog, selection.city)?;
    let filtered = filter_trips(&table, selection.month, selection.day);
    info!(
        "Selection {} kept {} of {} trips",
        selection,
        filtered.len(),
        table.len()
    );
    Ok(filtered)
}

/// Load every trip for `city` using the source configured in `catalog`.
pub fn load_city(catalog: &DatasetCatalog, city: City) -> Result<TripTable> {
    let path = catalog.source_for(city)?;
    load_trips(path)
}

/// Load every trip from the CSV file at `path`. A missing file is reported as
/// [`BikeshareError::DatasetNotFound`].
pub fn load_trips(path: &Path) -> Result<TripTable> {
    let file = std::fs::File::open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            BikeshareError::DatasetNotFound(path.display().to_string())
        } else {
            BikeshareError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let started = Instant::now();
    let table = read_trips(std::io::BufReader::new(file), path)?;
    debug!(
        "Loaded {} trips from {} in {:.3}s (gender: {}, birth year: {})",
        table.len(),
        path.display(),
        started.elapsed().as_secs_f64(),
        table.has_gender(),
        table.has_birth_year(),
    );
    Ok(table)
}

/// Parse CSV trips from any reader. `source` is only used in error messages.
pub fn read_trips<R: Read>(input: R, source: &Path) -> Result<TripTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let capabilities = Capabilities {
        has_gender: headers.iter().any(|h| h == GENDER_COLUMN),
        has_birth_year: headers.iter().any(|h| h == BIRTH_YEAR_COLUMN),
    };

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let raw: RawTrip = row
            .deserialize(Some(&headers))
            .map_err(|e| malformed(source, line, e.to_string()))?;
        records.push(build_record(raw, capabilities, source, line)?);
    }

    Ok(TripTable::new(records, capabilities))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn malformed(source: &Path, line: u64, reason: impl Into<String>) -> BikeshareError {
    BikeshareError::MalformedRecord {
        path: source.to_path_buf(),
        line,
        reason: reason.into(),
    }
}

/// Validate a raw row and turn it into a [`TripRecord`].
fn build_record(
    raw: RawTrip,
    capabilities: Capabilities,
    source: &Path,
    line: u64,
) -> Result<TripRecord> {
    let start_time = parse_trip_timestamp(&raw.start_time).ok_or_else(|| {
        malformed(
            source,
            line,
            format!("unparseable start time {:?}", raw.start_time),
        )
    })?;

    // End time is informational only; duration comes from its own column.
    let end_time = raw.end_time.as_deref().and_then(parse_trip_timestamp);

    let duration_secs = match raw.trip_duration {
        Some(text) => Some(parse_duration(&text).ok_or_else(|| {
            malformed(source, line, format!("invalid trip duration {:?}", text))
        })?),
        None => None,
    };

    let birth_year = match raw.birth_year.filter(|_| capabilities.has_birth_year) {
        Some(text) => Some(parse_birth_year(&text).ok_or_else(|| {
            malformed(source, line, format!("invalid birth year {:?}", text))
        })?),
        None => None,
    };

    let gender = raw.gender.filter(|_| capabilities.has_gender);

    Ok(
        TripRecord::new(start_time, raw.start_station, raw.end_station, duration_secs)
            .with_end_time(end_time)
            .with_user_type(raw.user_type)
            .with_gender(gender)
            .with_birth_year(birth_year),
    )
}

/// Durations are seconds; some datasets store them as floats.
fn parse_duration(text: &str) -> Option<f64> {
    text.parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
}

/// Birth years may be written as `1992` or `1992.0`.
fn parse_birth_year(text: &str) -> Option<i32> {
    let value = text.parse::<f64>().ok()?;
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if !(0.0..=9999.0).contains(&value) {
        return None;
    }
    Some(value as i32)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
