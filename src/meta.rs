//! Spline timing: time origin, uniform step and knot count.

use crate::{basis::SPLINE_DEGREE, Scalar};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Timing of a uniform spline.
///
/// Knot `i` sits at `t0 + i * dt`. The same type describes both a full
/// trajectory and the sub-spline window handed to an optimizer by
/// [`add_to_problem()`](crate::UniformR3SplineTrajectory::add_to_problem).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SplineMeta {
    /// Time of knot `0`.
    pub t0: f64,
    /// Time between two consecutive knots. Must be positive.
    pub dt: f64,
    /// Number of knots.
    pub n: usize,
}

impl SplineMeta {
    pub fn new(dt: f64, t0: f64) -> Self {
        Self { t0, dt, n: 0 }
    }

    #[inline]
    pub fn num_knots(&self) -> usize {
        self.n
    }

    /// Maps `t` to the segment index `i0 = ⌊(t - t0) / dt⌋` and the
    /// local fraction `u = (t - t0) / dt - i0` in `[0, 1)`.
    ///
    /// The index is not range checked.
    #[inline]
    pub fn calculate_index_and_interpolation_amount<T: Scalar>(
        &self,
        t: T,
    ) -> (i64, T) {
        let x = (t - T::from_f64(self.t0)) / T::from_f64(self.dt);
        let segment = x.floor();
        (segment.to_f64() as i64, x - segment)
    }

    /// First time the spline can be evaluated at.
    #[inline]
    pub fn min_time(&self) -> f64 {
        self.t0
    }

    /// End of the valid time range (exclusive).
    ///
    /// With fewer than four knots the valid range is empty and this
    /// equals [`min_time()`](Self::min_time).
    #[inline]
    pub fn max_time(&self) -> f64 {
        if self.n > SPLINE_DEGREE {
            self.t0 + (self.n - SPLINE_DEGREE) as f64 * self.dt
        } else {
            self.t0
        }
    }

    /// `true` if `t` lies in `[min_time, max_time)`.
    #[inline]
    pub fn is_valid(&self, t: f64) -> bool {
        self.min_time() <= t && t < self.max_time()
    }
}
