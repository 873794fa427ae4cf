//! Month / day-of-week narrowing of a [`TripTable`].

use bikeshare_core::models::{DayFilter, MonthFilter, TripTable};

/// Keep the trips whose derived month and weekday pass both filters.
///
/// Row order and capability flags are preserved, and derived fields are left
/// untouched. Filtering is idempotent, and month and day filters commute.
pub fn filter_trips(table: &TripTable, month: MonthFilter, day: DayFilter) -> TripTable {
    let records = table
        .records()
        .iter()
        .filter(|r| month.matches(r.month()) && day.matches(r.weekday()))
        .cloned()
        .collect();
    TripTable::new(records, table.capabilities())
}
