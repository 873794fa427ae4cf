//! Pure validators for prompt answers.
//!
//! Each function normalises its input (trim + lowercase) and either returns
//! the typed value or [`BikeshareError::InvalidSelection`]. Re-prompting is
//! the caller's concern.

use crate::error::{BikeshareError, Result};
use crate::models::{weekday_name, City, DayFilter, MonthFilter, FILTER_MONTHS, WEEKDAYS};

fn normalise(input: &str) -> String {
    input.trim().to_lowercase()
}

fn invalid(field: &'static str, input: &str) -> BikeshareError {
    BikeshareError::InvalidSelection {
        field,
        value: input.trim().to_string(),
    }
}

/// `chicago`, `new york city` or `washington`.
pub fn parse_city(input: &str) -> Result<City> {
    let wanted = normalise(input);
    City::ALL
        .into_iter()
        .find(|city| city.as_str() == wanted)
        .ok_or_else(|| invalid("city", input))
}

/// `january`..`june` or `all`.
pub fn parse_month_filter(input: &str) -> Result<MonthFilter> {
    let wanted = normalise(input);
    if wanted == "all" {
        return Ok(MonthFilter::All);
    }
    FILTER_MONTHS
        .into_iter()
        .find(|m| m.name().to_lowercase() == wanted)
        .map(MonthFilter::Only)
        .ok_or_else(|| invalid("month", input))
}

/// `monday`..`sunday` or `all`.
pub fn parse_day_filter(input: &str) -> Result<DayFilter> {
    let wanted = normalise(input);
    if wanted == "all" {
        return Ok(DayFilter::All);
    }
    WEEKDAYS
        .into_iter()
        .find(|d| weekday_name(*d).to_lowercase() == wanted)
        .map(DayFilter::Only)
        .ok_or_else(|| invalid("day", input))
}

/// `yes`/`y` → `true`, `no`/`n` → `false`.
pub fn parse_yes_no(input: &str) -> Result<bool> {
    match normalise(input).as_str() {
        "yes" | "y" => Ok(true),
        "no" | "n" => Ok(false),
        _ => Err(invalid("answer", input)),
    }
}
