//! Generic trajectory interface and evaluation results.

use crate::{Scalar, SplineMeta, TrajectoryResult};
use core::ops::{BitAnd, BitOr, BitOrAssign};
use nalgebra::{Quaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Selects which quantities [`Trajectory::evaluate()`] computes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvalFlags(u8);

impl EvalFlags {
    pub const NONE: Self = Self(0);
    pub const POSITION: Self = Self(1 << 0);
    pub const VELOCITY: Self = Self(1 << 1);
    pub const ACCELERATION: Self = Self(1 << 2);
    pub const ORIENTATION: Self = Self(1 << 3);
    pub const ANGULAR_VELOCITY: Self = Self(1 << 4);
    pub const ALL: Self = Self(0b1_1111);

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// `true` if every flag in `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// `true` if any flag in `other` is set in `self`.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for EvalFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for EvalFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for EvalFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// The state of a trajectory at one point in time.
///
/// Fields whose flag was not requested keep their default: zero vectors
/// and the identity orientation.
#[derive(Clone, Debug, PartialEq)]
pub struct TrajectoryEvaluation<T: Scalar> {
    pub position: Vector3<T>,
    pub velocity: Vector3<T>,
    pub acceleration: Vector3<T>,
    pub orientation: Quaternion<T>,
    pub angular_velocity: Vector3<T>,
}

impl<T: Scalar> Default for TrajectoryEvaluation<T> {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            acceleration: Vector3::zeros(),
            orientation: identity_quaternion(),
            angular_velocity: Vector3::zeros(),
        }
    }
}

#[inline]
pub(crate) fn identity_quaternion<T: Scalar>() -> Quaternion<T> {
    Quaternion::new(T::one(), T::zero(), T::zero(), T::zero())
}

/// A continuous-time trajectory that can be queried at any time inside
/// its valid range.
pub trait Trajectory<T: Scalar> {
    /// Timing of the underlying spline.
    fn meta(&self) -> &SplineMeta;

    /// Computes the quantities selected by `flags` at time `t`.
    fn evaluate(
        &self,
        t: T,
        flags: EvalFlags,
    ) -> TrajectoryResult<TrajectoryEvaluation<T>>;

    fn position(&self, t: T) -> TrajectoryResult<Vector3<T>> {
        Ok(self.evaluate(t, EvalFlags::POSITION)?.position)
    }

    fn velocity(&self, t: T) -> TrajectoryResult<Vector3<T>> {
        Ok(self.evaluate(t, EvalFlags::VELOCITY)?.velocity)
    }

    fn acceleration(&self, t: T) -> TrajectoryResult<Vector3<T>> {
        Ok(self.evaluate(t, EvalFlags::ACCELERATION)?.acceleration)
    }

    fn orientation(&self, t: T) -> TrajectoryResult<Quaternion<T>> {
        Ok(self.evaluate(t, EvalFlags::ORIENTATION)?.orientation)
    }

    fn angular_velocity(&self, t: T) -> TrajectoryResult<Vector3<T>> {
        Ok(self.evaluate(t, EvalFlags::ANGULAR_VELOCITY)?.angular_velocity)
    }

    fn min_time(&self) -> f64 {
        self.meta().min_time()
    }

    fn max_time(&self) -> f64 {
        self.meta().max_time()
    }

    /// `true` if the trajectory can be evaluated at `t`.
    fn is_valid(&self, t: f64) -> bool {
        self.meta().is_valid(t)
    }
}
