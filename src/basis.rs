use crate::Scalar;

/// Number of control points that influence one segment.
pub const SPLINE_ORDER: usize = 4;

/// Polynomial degree of each segment.
pub const SPLINE_DEGREE: usize = SPLINE_ORDER - 1;

/// Uniform cubic *B-spline* blending matrix.
///
/// Row `k` holds the coefficients of `uᵏ`; right-multiplying the power
/// row `[1, u, u², u³]` by this matrix yields the weights of control
/// points `i0..i0+3`.
pub const BSPLINE_MATRIX: [[f64; SPLINE_ORDER]; SPLINE_ORDER] = [
    [1.0 / 6.0, 4.0 / 6.0, 1.0 / 6.0, 0.0 / 6.0],
    [-3.0 / 6.0, 0.0 / 6.0, 3.0 / 6.0, 0.0 / 6.0],
    [3.0 / 6.0, -6.0 / 6.0, 3.0 / 6.0, 0.0 / 6.0],
    [-1.0 / 6.0, 3.0 / 6.0, -3.0 / 6.0, 1.0 / 6.0],
];

/// Computes `row · M` for the [`BSPLINE_MATRIX`].
#[inline]
pub fn blend_weights<T: Scalar>(row: &[T; SPLINE_ORDER]) -> [T; SPLINE_ORDER] {
    let mut weights = [T::zero(); SPLINE_ORDER];
    for (j, weight) in weights.iter_mut().enumerate() {
        *weight = row
            .iter()
            .zip(BSPLINE_MATRIX.iter())
            .fold(T::zero(), |total, (&r, m)| total + r * T::from_f64(m[j]));
    }
    weights
}
