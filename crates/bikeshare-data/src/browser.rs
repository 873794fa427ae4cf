//! Paginated access to raw trip rows.

use bikeshare_core::models::{TripRecord, TripTable};

/// Rows shown per page.
pub const PAGE_SIZE: usize = 5;

/// One page of rows plus the index of its first row in the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a> {
    pub start: usize,
    pub rows: &'a [TripRecord],
}

/// Walks a table forward one page at a time. Never wraps around.
#[derive(Debug, Clone)]
pub struct RowBrowser<'a> {
    table: &'a TripTable,
    page_size: usize,
    cursor: usize,
}

impl<'a> RowBrowser<'a> {
    pub fn new(table: &'a TripTable) -> Self {
        Self::with_page_size(table, PAGE_SIZE)
    }

    /// A browser with a custom page size (at least one row).
    pub fn with_page_size(table: &'a TripTable, page_size: usize) -> Self {
        Self {
            table,
            page_size: page_size.max(1),
            cursor: 0,
        }
    }

    /// Return the next page and advance the cursor, or `None` once exhausted.
    pub fn next_page(&mut self) -> Option<Page<'a>> {
        if self.is_exhausted() {
            return None;
        }
        let table: &'a TripTable = self.table;
        let records = table.records();
        let start = self.cursor;
        let end = (start + self.page_size).min(records.len());
        self.cursor = end;
        Some(Page {
            start,
            rows: &records[start..end],
        })
    }

    /// `true` once the cursor has reached the end of the table.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.table.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.table.len().saturating_sub(self.cursor)
    }
}
