//! Numeric abstraction the evaluator is generic over.
//!
//! Everything the spline code computes goes through [`Scalar`], so the
//! same blend-and-sum path can run on plain floats or on the dual/jet
//! numbers an optimizer uses to build Jacobians.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Neg, Sub};
use num_traits::{One, Zero};

/// A number the spline can be evaluated with.
///
/// Implemented for `f32` and `f64`. Derivative-carrying types implement
/// it by propagating their derivative part through each operation.
/// [`floor()`](Scalar::floor) is only ever used to find a segment index,
/// so it may drop the derivative part.
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + PartialOrd
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Lifts a constant (time origin, step, matrix entry) into `Self`.
    fn from_f64(value: f64) -> Self;

    /// The plain value, with any derivative part discarded.
    fn to_f64(self) -> f64;

    fn floor(self) -> Self;

    /// Integer power. All powers of the local fraction and of the
    /// inverse step go through here.
    fn powi(self, n: i32) -> Self;
}

float_scalar!(f32);
float_scalar!(f64);
