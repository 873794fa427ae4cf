//! Core types for the bikeshare explorer.
//!
//! Error taxonomy, trip and selection models, prompt-answer validation,
//! command-line settings and text formatting helpers shared by every layer.

pub mod error;
pub mod formatting;
pub mod models;
pub mod selection;
pub mod settings;
pub mod time_utils;

pub use error::{BikeshareError, Result};
