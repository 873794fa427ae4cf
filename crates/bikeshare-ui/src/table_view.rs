//! Raw-row pages rendered as an aligned text table.
//!
//! Columns are padded by terminal display width so station names with wide
//! or combining characters still line up. Gender and birth-year columns are
//! only shown when the dataset carries them.

use bikeshare_core::models::{weekday_name, Capabilities, TripRecord};
use bikeshare_data::browser::Page;
use chrono::NaiveDateTime;
use unicode_width::UnicodeWidthStr;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Terminal columns occupied by `s`.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Pad `s` with trailing spaces to `width` display columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(fill))
}

/// Pad `s` with leading spaces to `width` display columns.
pub fn pad_left(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", " ".repeat(fill), s)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

struct Column {
    title: &'static str,
    align: Align,
    cell: fn(&TripRecord) -> String,
}

fn timestamp(ts: Option<NaiveDateTime>) -> String {
    ts.map(|t| t.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

fn columns(capabilities: Capabilities) -> Vec<Column> {
    let mut cols = vec![
        Column {
            title: "Start Time",
            align: Align::Left,
            cell: |r| timestamp(Some(r.start_time())),
        },
        Column {
            title: "End Time",
            align: Align::Left,
            cell: |r| timestamp(r.end_time()),
        },
        Column {
            title: "Trip Duration",
            align: Align::Right,
            cell: |r| r.duration_secs().map(|d| d.to_string()).unwrap_or_default(),
        },
        Column {
            title: "Start Station",
            align: Align::Left,
            cell: |r| r.start_station().to_string(),
        },
        Column {
            title: "End Station",
            align: Align::Left,
            cell: |r| r.end_station().to_string(),
        },
        Column {
            title: "User Type",
            align: Align::Left,
            cell: |r| r.user_type().unwrap_or_default().to_string(),
        },
    ];
    if capabilities.has_gender {
        cols.push(Column {
            title: "Gender",
            align: Align::Left,
            cell: |r| r.gender().unwrap_or_default().to_string(),
        });
    }
    if capabilities.has_birth_year {
        cols.push(Column {
            title: "Birth Year",
            align: Align::Right,
            cell: |r| r.birth_year().map(|y| y.to_string()).unwrap_or_default(),
        });
    }
    cols.push(Column {
        title: "month",
        align: Align::Right,
        cell: |r| r.month().to_string(),
    });
    cols.push(Column {
        title: "day_of_week",
        align: Align::Left,
        cell: |r| weekday_name(r.weekday()).to_string(),
    });
    cols
}

/// Render one page with a header row. The leading column is the row's
/// position in the filtered table.
pub fn render_page(page: &Page<'_>, capabilities: Capabilities) -> String {
    let cols = columns(capabilities);

    let mut header: Vec<String> = vec![String::new()];
    header.extend(cols.iter().map(|c| c.title.to_string()));

    let body: Vec<Vec<String>> = page
        .rows
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            let mut cells = vec![(page.start + i).to_string()];
            cells.extend(cols.iter().map(|c| (c.cell)(rec)));
            cells
        })
        .collect();

    let mut aligns = vec![Align::Right];
    aligns.extend(cols.iter().map(|c| c.align));

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            std::iter::once(&header)
                .chain(body.iter())
                .map(|row| display_width(&row[i]))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in std::iter::once(&header).chain(body.iter()) {
        let cells: Vec<String> = row
            .iter()
            .zip(widths.iter().zip(aligns.iter()))
            .map(|(cell, (&width, &align))| match align {
                Align::Left => pad_right(cell, width),
                Align::Right => pad_left(cell, width),
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
