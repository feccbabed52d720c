//! Error types for the rc_tune simulator and optimizer.
//!
//! This module provides a unified error type [`RcError`] that covers
//! per-candidate rejections (recovered inside the search loop), terminal
//! search failures, input validation, and CSV export.

use thiserror::Error;

use crate::circuit::{Phase, Signal};

/// Result type alias using [`RcError`].
pub type Result<T> = std::result::Result<T, RcError>;

/// Unified error type for all rc_tune operations.
#[derive(Error, Debug)]
pub enum RcError {
    // ============ Per-candidate Errors ============
    /// A sampled series never came within tolerance of its threshold
    #[error("{signal} never crosses {threshold} during the {phase} phase")]
    CrossingNotFound {
        signal: Signal,
        phase: Phase,
        threshold: f64,
    },

    /// The powered window is longer than one of the above-threshold intervals, or negative
    #[error(
        "Invalid powered window {time_powered:.4}s (voltage interval {voltage_interval:.4}s, current interval {current_interval:.4}s)"
    )]
    InvalidInterval {
        time_powered: f64,
        voltage_interval: f64,
        current_interval: f64,
    },

    // ============ Search Errors ============
    /// No candidate in the grid was selected
    #[error("No valid candidate found while sweeping {parameter} over {evaluated} grid points")]
    EmptyResult { parameter: String, evaluated: usize },

    /// No accepted candidate reached the required powered duration
    #[error("No candidate powers the load for {required}s (relative tolerance {tolerance})")]
    TargetNotReached { required: f64, tolerance: f64 },

    /// Grid range or point count is unusable
    #[error("Invalid search grid: {message}")]
    InvalidGrid { message: String },

    // ============ Input Errors ============
    /// Circuit or threshold value rejected at an input boundary
    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // ============ I/O Errors ============
    /// Error writing a CSV export
    #[error("Failed to write '{path}': {source}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing to an output stream
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl RcError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create an invalid grid error
    pub fn invalid_grid(message: impl Into<String>) -> Self {
        Self::InvalidGrid {
            message: message.into(),
        }
    }

    /// Whether this error only disqualifies a single grid candidate.
    pub fn is_candidate_rejection(&self) -> bool {
        matches!(
            self,
            Self::CrossingNotFound { .. } | Self::InvalidInterval { .. }
        )
    }
}
