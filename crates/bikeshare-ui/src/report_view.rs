//! Plain-text rendering of analyzer reports.
//!
//! Each section opens with a "Calculating ..." banner, lists its statistics,
//! reports how long the analyzer took and closes with a dashed separator.

use std::fmt::Write as _;
use std::time::Duration;

use bikeshare_core::formatting::{format_duration, format_number};
use bikeshare_data::analysis::{AnalysisReport, Timed};
use bikeshare_data::analyzer::{
    Availability, BirthYearStats, DurationStats, StationStats, TimeStats, UserStats,
};

use crate::table_view::{display_width, pad_right};

/// Width of the dashed line closing every section.
pub const SEPARATOR_WIDTH: usize = 40;

const NO_DATA: &str = "no data";

pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// Render all four sections in pipeline order.
pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    if report.is_empty() {
        out.push_str("\nNo trips match this selection.\n");
    }
    out.push_str(&render_time(&report.time));
    out.push_str(&render_stations(&report.stations));
    out.push_str(&render_duration(&report.duration));
    out.push_str(&render_users(&report.users));
    out
}

pub fn render_time(timed: &Timed<TimeStats>) -> String {
    let stats = &timed.stats;
    let hour = stats.most_common_hour.map(|h| h.to_string());
    section(
        "Calculating The Most Frequent Times of Travel...",
        &[
            line("Most common month", stats.most_common_month_name()),
            line("Most common day of week", stats.most_common_day_name()),
            line("Most common start hour", hour.as_deref()),
        ],
        timed.elapsed,
    )
}

pub fn render_stations(timed: &Timed<StationStats>) -> String {
    let stats = &timed.stats;
    section(
        "Calculating The Most Popular Stations and Trip...",
        &[
            line("Most common start station", stats.most_common_start.as_deref()),
            line("Most common end station", stats.most_common_end.as_deref()),
            line("Most frequent trip", stats.most_common_trip.as_deref()),
        ],
        timed.elapsed,
    )
}

pub fn render_duration(timed: &Timed<DurationStats>) -> String {
    let stats: &DurationStats = &timed.stats;
    let total = format!(
        "{} ({})",
        format_number(stats.total_secs, 1),
        format_duration(stats.total_secs)
    );
    let mean = stats
        .mean_secs
        .map(|m| format!("{} ({})", format_number(m, 2), format_duration(m)));
    section(
        "Calculating Trip Duration...",
        &[
            line("Total travel time (seconds)", Some(total.as_str())),
            line("Average travel time (seconds)", mean.as_deref()),
        ],
        timed.elapsed,
    )
}

pub fn render_users(timed: &Timed<UserStats>) -> String {
    let stats = &timed.stats;
    let mut lines = Vec::new();

    lines.push("User Types:".to_string());
    lines.extend(count_lines(&stats.user_types));

    lines.push(String::new());
    match &stats.genders {
        Availability::Available(counts) => {
            lines.push("Gender Counts:".to_string());
            lines.extend(count_lines(counts));
        }
        Availability::Unavailable => {
            lines.push("No gender data available for this city.".to_string());
        }
    }

    lines.push(String::new());
    match &stats.birth_years {
        Availability::Available(years) => lines.extend(birth_year_lines(years)),
        Availability::Unavailable => {
            lines.push("No birth year data available for this city.".to_string());
        }
    }

    section("Calculating User Stats...", &lines, timed.elapsed)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn section(title: &str, lines: &[String], elapsed: Duration) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}\n", title);
    for l in lines {
        let _ = writeln!(out, "{}", l);
    }
    let _ = writeln!(out, "\nThis took {:.6} seconds.", elapsed.as_secs_f64());
    let _ = writeln!(out, "{}", separator());
    out
}

fn line(label: &str, value: Option<&str>) -> String {
    format!("{}: {}", label, value.unwrap_or(NO_DATA))
}

fn count_lines(counts: &[(String, usize)]) -> Vec<String> {
    if counts.is_empty() {
        return vec![format!("  {}", NO_DATA)];
    }
    let width = counts
        .iter()
        .map(|(v, _)| display_width(v))
        .max()
        .unwrap_or(0);
    counts
        .iter()
        .map(|(value, count)| format!("  {}  {}", pad_right(value, width), count))
        .collect()
}

fn birth_year_lines(years: &BirthYearStats) -> Vec<String> {
    let fmt = |y: Option<i32>| y.map(|y| y.to_string());
    vec![
        line("Earliest birth year", fmt(years.earliest).as_deref()),
        line("Most recent birth year", fmt(years.latest).as_deref()),
        line("Most common birth year", fmt(years.most_common).as_deref()),
    ]
}
