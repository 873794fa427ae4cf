use chrono::{DateTime, NaiveDateTime};

/// Naive layouts seen in the published trip datasets.
/// `%.f` also matches when there is no fractional part.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a trip timestamp as wall-clock time in the city's local zone.
///
/// Accepts the space- or `T`-separated layouts with optional fractional
/// seconds. Strings carrying an RFC 3339 offset keep their local wall-clock
/// reading (the offset is dropped, not applied). Returns `None` for empty or
/// unrecognised input.
pub fn parse_trip_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.naive_local())
        })
}
