//! Uniform cubic B-spline trajectory in R³.
//!
//! [`UniformR3SplineView`] is the evaluator: it borrows a
//! [`DataHolder`] and a [`SplineMeta`] and blends four control points per
//! query. [`UniformR3SplineTrajectory`] owns the knots and sets up the
//! optimizer side.

use crate::{
    basis::{blend_weights, SPLINE_DEGREE, SPLINE_ORDER},
    trajectory::identity_quaternion,
    DataHolder, DataHolderMut, EvalFlags, ParameterBlock, Problem, Scalar,
    SplineMeta, Trajectory, TrajectoryError, TrajectoryEvaluation,
    TrajectoryResult, VectorHolder,
};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of scalars in one control point block.
pub const CONTROL_POINT_SIZE: usize = 3;

/// Evaluates a uniform cubic B-spline over control points stored in `H`.
///
/// Generic over the scalar so that the exact same blending runs for
/// plain floats and for the derivative-carrying numbers an optimizer
/// evaluates residuals with.
#[derive(Debug)]
pub struct UniformR3SplineView<'a, T, H> {
    holder: &'a H,
    meta: &'a SplineMeta,
    _scalar: core::marker::PhantomData<T>,
}

impl<T, H> Clone for UniformR3SplineView<'_, T, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, H> Copy for UniformR3SplineView<'_, T, H> {}

impl<'a, T: Scalar, H: DataHolder<T>> UniformR3SplineView<'a, T, H> {
    /// Creates a view over `meta.n` control points, control point `i`
    /// being block `i` of `holder`.
    pub fn new(holder: &'a H, meta: &'a SplineMeta) -> Self {
        Self {
            holder,
            meta,
            _scalar: core::marker::PhantomData,
        }
    }

    /// Control point `i` as a vector.
    ///
    /// # Panics
    /// If `i` is not a block of the holder.
    #[inline]
    pub fn control_point(&self, i: usize) -> Vector3<T> {
        let p = self.holder.parameter(i);
        Vector3::new(p[0], p[1], p[2])
    }
}

impl<T: Scalar, H: DataHolder<T>> Trajectory<T>
    for UniformR3SplineView<'_, T, H>
{
    #[inline]
    fn meta(&self) -> &SplineMeta {
        self.meta
    }

    fn evaluate(
        &self,
        t: T,
        flags: EvalFlags,
    ) -> TrajectoryResult<TrajectoryEvaluation<T>> {
        let mut result = TrajectoryEvaluation::default();

        let (i0, u) = self.meta.calculate_index_and_interpolation_amount(t);

        // A view may claim more knots than its holder has blocks.
        let n = self.meta.n.min(self.holder.len());
        if n < SPLINE_ORDER || i0 < 0 || i0 > (n - SPLINE_ORDER) as i64 {
            return Err(TrajectoryError::OutOfRange {
                t: t.to_f64(),
                index: i0,
                knots: n,
            });
        }
        let i0 = i0 as usize;

        let want_p = flags.contains(EvalFlags::POSITION);
        let want_v = flags.contains(EvalFlags::VELOCITY);
        let want_a = flags.contains(EvalFlags::ACCELERATION);

        let zero = T::zero();
        let one = T::one();
        let dt_inv = one / T::from_f64(self.meta.dt);

        let u2 = if want_p || want_v { u.powi(2) } else { zero };

        // Blend weights per requested derivative.
        let bp = want_p.then(|| blend_weights(&[one, u, u2, u.powi(3)]));
        let bv = want_v.then(|| {
            let two = T::from_f64(2.0);
            let three = T::from_f64(3.0);
            blend_weights(&[
                zero,
                dt_inv,
                dt_inv * two * u,
                dt_inv * three * u2,
            ])
        });
        let ba = want_a.then(|| {
            let scale = dt_inv.powi(2);
            let two = T::from_f64(2.0);
            let six = T::from_f64(6.0);
            blend_weights(&[zero, zero, scale * two, scale * six * u])
        });

        let mut p = [zero; 3];
        let mut v = [zero; 3];
        let mut a = [zero; 3];

        for k in 0..SPLINE_ORDER {
            let cp = &self.holder.parameter(i0 + k)[..CONTROL_POINT_SIZE];

            if let Some(w) = &bp {
                accumulate(&mut p, w[k], cp);
            }
            if let Some(w) = &bv {
                accumulate(&mut v, w[k], cp);
            }
            if let Some(w) = &ba {
                accumulate(&mut a, w[k], cp);
            }
        }

        if want_p {
            result.position = Vector3::from(p);
        }
        if want_v {
            result.velocity = Vector3::from(v);
        }
        if want_a {
            result.acceleration = Vector3::from(a);
        }

        // No rotational state.
        if flags.contains(EvalFlags::ORIENTATION) {
            result.orientation = identity_quaternion();
        }
        if flags.contains(EvalFlags::ANGULAR_VELOCITY) {
            result.angular_velocity = Vector3::zeros();
        }

        Ok(result)
    }
}

#[inline]
fn accumulate<T: Scalar>(acc: &mut [T; 3], weight: T, cp: &[T]) {
    for (a, &c) in acc.iter_mut().zip(cp) {
        *a = *a + weight * c;
    }
}

/// The control points a time window depends on, as registered with a
/// [`Problem`].
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveRange {
    /// One block per control point, in knot order.
    pub blocks: Vec<ParameterBlock>,
    /// Timing of the sub-spline formed by `blocks`.
    pub meta: SplineMeta,
}

/// A position-only trajectory given by a uniform cubic B-spline.
///
/// Orientation is always the identity and angular velocity always zero.
///
/// # Examples
/// ```
/// use nalgebra::Vector3;
/// use uniform_r3_spline::prelude::*;
///
/// let mut trajectory = UniformR3SplineTrajectory::new(1.0, 0.0);
/// for i in 0..6 {
///     trajectory.append_knot(&Vector3::new(i as f64, 0.0, 0.0));
/// }
///
/// let p = trajectory.position(2.5).unwrap();
/// assert!((p.x - 3.5).abs() < 1e-12);
/// assert!(trajectory.position(-1.0).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UniformR3SplineTrajectory {
    holder: VectorHolder<f64>,
    meta: SplineMeta,
}

impl UniformR3SplineTrajectory {
    pub const CLASS_ID: &'static str = "UniformR3Spline";

    /// Creates an empty trajectory with knot spacing `dt` starting at
    /// `t0`.
    pub fn new(dt: f64, t0: f64) -> Self {
        Self {
            holder: VectorHolder::new(),
            meta: SplineMeta::new(dt, t0),
        }
    }

    /// Creates a trajectory from an initial set of control points.
    pub fn with_knots<'a>(
        dt: f64,
        t0: f64,
        knots: impl IntoIterator<Item = &'a Vector3<f64>>,
    ) -> Self {
        let mut trajectory = Self::new(dt, t0);
        for cp in knots {
            trajectory.append_knot(cp);
        }
        trajectory
    }

    #[inline]
    pub fn t0(&self) -> f64 {
        self.meta.t0
    }

    #[inline]
    pub fn dt(&self) -> f64 {
        self.meta.dt
    }

    #[inline]
    pub fn num_knots(&self) -> usize {
        self.meta.n
    }

    /// The store backing the control points.
    pub fn holder(&self) -> &VectorHolder<f64> {
        &self.holder
    }

    /// An `f64` evaluator over this trajectory.
    pub fn as_view(
        &self,
    ) -> UniformR3SplineView<'_, f64, VectorHolder<f64>> {
        UniformR3SplineView::new(&self.holder, &self.meta)
    }

    pub fn control_point(&self, i: usize) -> TrajectoryResult<Vector3<f64>> {
        self.check_index(i)?;
        Ok(self.as_view().control_point(i))
    }

    /// Mutable access to the three coordinates of control point `i`.
    pub fn control_point_mut(
        &mut self,
        i: usize,
    ) -> TrajectoryResult<&mut [f64]> {
        self.check_index(i)?;
        Ok(self.holder.parameter_mut(i))
    }

    pub fn set_control_point(
        &mut self,
        i: usize,
        cp: &Vector3<f64>,
    ) -> TrajectoryResult<()> {
        self.control_point_mut(i)?.copy_from_slice(cp.as_slice());
        Ok(())
    }

    /// Appends a knot one `dt` after the current last one.
    pub fn append_knot(&mut self, cp: &Vector3<f64>) {
        let i = self.holder.add_parameter(CONTROL_POINT_SIZE);
        self.holder.parameter_mut(i).copy_from_slice(cp.as_slice());
        self.meta.n += 1;
        log::trace!(
            "appended knot {} at t={}",
            i,
            self.meta.t0 + i as f64 * self.meta.dt
        );
    }

    /// Registers the control points influencing `times` with `problem`.
    ///
    /// `times` must hold exactly one `(t1, t2)` window. Segment `i`
    /// depends on control points `i..=i+3`, so a window spanning segments
    /// `i1..=i2` needs control points `i1..=i2+3`. The returned
    /// [`ActiveRange`] lists their blocks in knot order together with the
    /// timing of the sub-spline they form, which is what residual code
    /// needs to build a [`UniformR3SplineView`] over the blocks it is
    /// handed.
    ///
    /// Nothing is registered if an error is returned.
    pub fn add_to_problem<P: Problem + ?Sized>(
        &self,
        problem: &mut P,
        times: &[(f64, f64)],
    ) -> TrajectoryResult<ActiveRange> {
        let &[(t1, t2)] = times else {
            return Err(TrajectoryError::NotImplemented {
                windows: times.len(),
            });
        };
        if t1.is_nan() || t2.is_nan() || t1 > t2 {
            return Err(TrajectoryError::InvalidWindow { t1, t2 });
        }

        let (i1, _) = self.meta.calculate_index_and_interpolation_amount(t1);
        let (i2, _) = self.meta.calculate_index_and_interpolation_amount(t2);
        log::debug!("window [{t1}, {t2}] spans segments {i1}..={i2}");

        let n = self.meta.n;
        if i1 < 0 {
            return Err(TrajectoryError::OutOfRange {
                t: t1,
                index: i1,
                knots: n,
            });
        }
        // Segment i2 needs control point i2 + 3. Compared without adding so
        // a saturated index cannot overflow.
        if n < SPLINE_ORDER || i2 > (n - SPLINE_ORDER) as i64 {
            return Err(TrajectoryError::OutOfRange {
                t: t2,
                index: i2,
                knots: n,
            });
        }

        let first = i1 as usize;
        let last = i2 as usize + SPLINE_DEGREE;
        let blocks: Vec<_> = (first..=last)
            .map(|index| ParameterBlock {
                index,
                size: CONTROL_POINT_SIZE,
            })
            .collect();

        for block in &blocks {
            problem.add_parameter_block(*block);
        }

        let meta = SplineMeta {
            t0: self.meta.t0 + first as f64 * self.meta.dt,
            dt: self.meta.dt,
            n: blocks.len(),
        };
        log::debug!(
            "registered control points {first}..={last} (t0={}, n={})",
            meta.t0,
            meta.n
        );

        Ok(ActiveRange { blocks, meta })
    }

    fn check_index(&self, i: usize) -> TrajectoryResult<()> {
        if i < self.meta.n {
            Ok(())
        } else {
            Err(TrajectoryError::ControlPointIndex {
                index: i,
                knots: self.meta.n,
            })
        }
    }
}

impl Trajectory<f64> for UniformR3SplineTrajectory {
    #[inline]
    fn meta(&self) -> &SplineMeta {
        &self.meta
    }

    fn evaluate(
        &self,
        t: f64,
        flags: EvalFlags,
    ) -> TrajectoryResult<TrajectoryEvaluation<f64>> {
        self.as_view().evaluate(t, flags)
    }
}
