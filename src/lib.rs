//! Uniform cubic B-spline trajectories in R³.
//!
//! A [`UniformR3SplineTrajectory`] holds control points spaced `dt` apart
//! in time and can be evaluated for position, velocity and acceleration
//! anywhere in `[t0, t0 + (n - 3)·dt)`. For estimation it can hand the
//! control points a time window depends on to a nonlinear least-squares
//! optimizer as independent parameter blocks, see
//! [`UniformR3SplineTrajectory::add_to_problem()`].
//!
//! Evaluation is generic over [`Scalar`], so residual code can run the
//! same [`UniformR3SplineView`] on the dual numbers its optimizer uses for
//! automatic differentiation.
//!
//! # Examples
//! ```
//! use nalgebra::Vector3;
//! use uniform_r3_spline::prelude::*;
//!
//! let mut trajectory = UniformR3SplineTrajectory::new(0.1, 0.0);
//! for i in 0..10 {
//!     let s = i as f64;
//!     trajectory.append_knot(&Vector3::new(s, s * s, 0.0));
//! }
//!
//! let eval = trajectory
//!     .evaluate(0.35, EvalFlags::POSITION | EvalFlags::VELOCITY)
//!     .unwrap();
//! assert!(eval.velocity.x > 0.0);
//!
//! let mut problem = BlockRegistry::new();
//! let range = trajectory
//!     .add_to_problem(&mut problem, &[(0.25, 0.45)])
//!     .unwrap();
//! assert_eq!(range.meta.n, 6);
//! assert_eq!(problem.len(), 6);
//! ```
//!
//! # Cargo features
#![doc = document_features::document_features!()]

#[macro_use]
mod scalar_macros;

pub mod basis;
mod error;
mod holder;
mod meta;
mod problem;
mod scalar;
mod trajectory;
mod uniform_r3;

pub use basis::{BSPLINE_MATRIX, SPLINE_DEGREE, SPLINE_ORDER};
pub use error::{TrajectoryError, TrajectoryResult};
pub use holder::{DataHolder, DataHolderMut, SliceHolder, VectorHolder};
pub use meta::SplineMeta;
pub use problem::{BlockRegistry, ParameterBlock, Problem};
pub use scalar::Scalar;
pub use trajectory::{EvalFlags, Trajectory, TrajectoryEvaluation};
pub use uniform_r3::{
    ActiveRange, UniformR3SplineTrajectory, UniformR3SplineView,
    CONTROL_POINT_SIZE,
};

pub mod prelude {
    pub use crate::{
        BlockRegistry, DataHolder, EvalFlags, Problem, Scalar, SliceHolder,
        SplineMeta, Trajectory, TrajectoryError, TrajectoryResult,
        UniformR3SplineTrajectory, UniformR3SplineView,
    };
}
