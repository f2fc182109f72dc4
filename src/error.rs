//! Typed errors raised inside the pipeline.
//!
//! Fatal startup failures (missing or unreadable source) are plain
//! [`anyhow::Error`]s with context; the types here cover the conditions the
//! pipeline recovers from or reports back to the parameter surface.

use thiserror::Error;

/// Elevation column could not be converted to floating point.
///
/// Reported once per run no matter how many values are bad.
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "could not convert string to float: '{value}' (row {row}, {bad_values} unconvertible value(s) in elevation_ft)"
)]
pub struct CoercionError {
    /// 1-based data row of the first offending value.
    pub row: usize,
    pub value: String,
    pub bad_values: usize,
}

/// A widget parameter outside the range the surface allows.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("unknown region '{0}'")]
    UnknownRegion(String),

    #[error("minimum elevation {0} ft is outside 0..=5000")]
    MinElevationOutOfRange(u32),

    #[error("row count {0} is outside 1..=20")]
    RowCountOutOfRange(usize),

    #[error("unknown airport type '{0}'")]
    UnknownType(String),
}

/// A line typed into the interactive session that could not be applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{command}' needs {expected}")]
    BadArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error(transparent)]
    Param(#[from] ParamError),
}
