//! Text presentation layer for the bikeshare explorer.
//!
//! Turns analyzer reports and raw-row pages into printable strings. Nothing
//! here performs I/O; the runtime decides where the text goes.

pub mod report_view;
pub mod table_view;

pub use bikeshare_core as core;
