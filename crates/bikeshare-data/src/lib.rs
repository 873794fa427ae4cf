//! Data layer for the bikeshare explorer.
//!
//! Loads city trip CSVs into typed tables, narrows them by month and day,
//! computes the descriptive statistics and pages through raw rows.

pub mod analysis;
pub mod analyzer;
pub mod browser;
pub mod filter;
pub mod frequency;
pub mod reader;

pub use bikeshare_core as core;
