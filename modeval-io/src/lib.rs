//! Ingestion of model predictions for modeval.
//!
//! Supported formats:
//! - **CSV** — header row plus one prediction per line, via the `csv` feature
//!   (enabled by default). See [`csv`] for the three column layouts.

#[cfg(feature = "csv")]
pub mod csv;
