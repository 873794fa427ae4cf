//! Runs all four analyzers over one filtered table.

use std::time::{Duration, Instant};

use bikeshare_core::models::TripTable;
use tracing::debug;

use crate::analyzer::{
    duration_stats, station_stats, time_stats, user_stats, DurationStats, StationStats, TimeStats,
    UserStats,
};

// ── Public types ──────────────────────────────────────────────────────────────

/// An analyzer's output together with how long it took to compute.
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    pub stats: T,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    fn measure(name: &str, f: impl FnOnce() -> T) -> Self {
        let started = Instant::now();
        let stats = f();
        let elapsed = started.elapsed();
        debug!("{} analyzer finished in {:.6}s", name, elapsed.as_secs_f64());
        Self { stats, elapsed }
    }
}

/// The complete output of [`analyze_trips`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// Number of trips the analyzers saw.
    pub trip_count: usize,
    pub time: Timed<TimeStats>,
    pub stations: Timed<StationStats>,
    pub duration: Timed<DurationStats>,
    pub users: Timed<UserStats>,
}

impl AnalysisReport {
    /// Whether the filters left no trips to analyse.
    pub fn is_empty(&self) -> bool {
        self.trip_count == 0
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the time, station, duration and user analyzers over `table`.
///
/// The analyzers share no state; each reads the table independently.
pub fn analyze_trips(table: &TripTable) -> AnalysisReport {
    AnalysisReport {
        trip_count: table.len(),
        time: Timed::measure("time", || time_stats(table)),
        stations: Timed::measure("station", || station_stats(table)),
        duration: Timed::measure("duration", || duration_stats(table)),
        users: Timed::measure("user", || user_stats(table)),
    }
}
