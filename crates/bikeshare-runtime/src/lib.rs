//! Runtime layer for the bikeshare explorer.
//!
//! Owns the interactive prompt loop and sequences loading, analysis,
//! rendering and row browsing for each run.

pub mod prompt;
pub mod session;

pub use bikeshare_core as core;
pub use bikeshare_data as data;
