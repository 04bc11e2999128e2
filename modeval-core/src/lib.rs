//! Shared primitives, traits, and data model for the modeval workspace.
//!
//! `modeval-core` provides the foundation the other modeval crates build on:
//!
//! - **Error types** — [`ModevalError`] and [`Result`] for structured error handling
//! - **Traits** — [`Summarizable`] for one-line report summaries
//! - **Probabilities** — [`ProbVector`] and the clamping contract used by the losses
//! - **Datasets** — [`Dataset`], a row-aligned pair of label and prediction columns

pub mod dataset;
pub mod error;
pub mod prob;
pub mod traits;

pub use dataset::Dataset;
pub use error::{ErrorStage, ModevalError, Result};
pub use prob::{clamp_probability, ProbVector, PROB_EPSILON};
pub use traits::*;
