//! Error types for trajectory operations.

use thiserror::Error;

/// Errors that can occur during trajectory evaluation and problem setup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrajectoryError {
    /// The time resolved to a segment that does not have all four
    /// control points available.
    #[error("t={t} i0={index} is out of range for spline with ncp={knots}")]
    OutOfRange { t: f64, index: i64, knots: usize },

    /// Only a single time window can be added to a problem per call.
    #[error(
        "multiple time windows are not implemented (got {windows}, expected 1)"
    )]
    NotImplemented { windows: usize },

    /// The time window ends before it starts, or a bound is NaN.
    ///
    /// Such a window has no segment range, so it is rejected before any
    /// control point is registered instead of yielding a malformed
    /// (empty or inverted) range.
    #[error("time window [{t1}, {t2}] is not a valid interval")]
    InvalidWindow { t1: f64, t2: f64 },

    /// A control point was addressed past the end of the knot sequence.
    ///
    /// Returned by the checked accessors in place of an indexing panic.
    #[error("control point {index} does not exist in spline with ncp={knots}")]
    ControlPointIndex { index: usize, knots: usize },
}

/// Result type for trajectory operations.
pub type TrajectoryResult<T> = Result<T, TrajectoryError>;
