//! Behavioural properties of the uniform R³ spline trajectory.

use approx::assert_relative_eq;
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uniform_r3_spline::prelude::*;
use uniform_r3_spline::{DataHolderMut, ParameterBlock, VectorHolder};

fn random_trajectory(
    n: usize,
    dt: f64,
    t0: f64,
    seed: u64,
) -> UniformR3SplineTrajectory {
    let mut rng = StdRng::seed_from_u64(seed);
    let knots: Vec<_> = (0..n)
        .map(|_| {
            Vector3::new(
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
            )
        })
        .collect();
    UniformR3SplineTrajectory::with_knots(dt, t0, &knots)
}

#[test]
fn test_valid_time_boundary() {
    for n in 4..10 {
        let trajectory = random_trajectory(n, 0.5, -1.0, n as u64);
        let t_min = trajectory.min_time();
        let t_max = trajectory.max_time();
        assert_relative_eq!(t_max, -1.0 + (n - 3) as f64 * 0.5);

        for t in [t_min, t_min + 0.1, (t_min + t_max) / 2.0, t_max - 1e-9] {
            assert!(trajectory.position(t).is_ok(), "n={n} t={t}");
            assert!(trajectory.is_valid(t));
        }
        for t in [t_min - 1e-9, t_min - 3.0, t_max, t_max + 2.0] {
            assert!(
                matches!(
                    trajectory.evaluate(t, EvalFlags::ALL),
                    Err(TrajectoryError::OutOfRange { .. })
                ),
                "n={n} t={t}"
            );
        }
    }
}

#[test]
fn test_too_few_knots_never_evaluate() {
    for n in 0..4 {
        let trajectory = random_trajectory(n, 1.0, 0.0, 7);
        for t in [-0.5, 0.0, 0.5, 1.0] {
            assert!(trajectory.position(t).is_err());
        }
    }
}

#[test]
fn test_position_is_continuous_across_knots() {
    let trajectory = random_trajectory(12, 0.25, 2.0, 42);
    let eps = 1e-9;

    for i in 1..(trajectory.num_knots() - 3) {
        let t = trajectory.t0() + i as f64 * trajectory.dt();
        let before = trajectory.position(t - eps).unwrap();
        let after = trajectory.position(t).unwrap();
        assert_relative_eq!(before, after, epsilon = 1e-6);

        let v_before = trajectory.velocity(t - eps).unwrap();
        let v_after = trajectory.velocity(t).unwrap();
        assert_relative_eq!(v_before, v_after, epsilon = 1e-5);
    }
}

#[test]
fn test_derivatives_match_finite_differences() {
    let trajectory = random_trajectory(10, 0.2, 0.0, 3);
    let h = 1e-6;
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..50 {
        let t = rng.random_range(
            trajectory.min_time() + h..trajectory.max_time() - h,
        );
        let eval = trajectory.evaluate(t, EvalFlags::ALL).unwrap();

        let dp = (trajectory.position(t + h).unwrap()
            - trajectory.position(t - h).unwrap())
            / (2.0 * h);
        let dv = (trajectory.velocity(t + h).unwrap()
            - trajectory.velocity(t - h).unwrap())
            / (2.0 * h);

        assert_relative_eq!(
            dp,
            eval.velocity,
            epsilon = 1e-4,
            max_relative = 1e-5
        );
        assert_relative_eq!(
            dv,
            eval.acceleration,
            epsilon = 1e-3,
            max_relative = 1e-5
        );
    }
}

#[test]
fn test_control_points_have_local_support() {
    let original = random_trajectory(12, 1.0, 0.0, 5);
    let k = 6;

    let mut changed = original.clone();
    changed
        .set_control_point(k, &Vector3::new(100.0, -100.0, 50.0))
        .unwrap();

    let mut t = original.min_time();
    while t < original.max_time() {
        let i0 = t.floor() as usize;
        let a = original.evaluate(t, EvalFlags::ALL).unwrap();
        let b = changed.evaluate(t, EvalFlags::ALL).unwrap();

        if k < i0 || k > i0 + 3 {
            assert_eq!(a, b, "t={t}");
        } else if k != i0 + 3 || t.fract() != 0.0 {
            // The last control point of a segment has zero weight at u = 0.
            assert_ne!(a.position, b.position, "t={t}");
        }
        t += 0.125;
    }
}

#[test]
fn test_example_line() {
    let knots: Vec<_> =
        (0..6).map(|i| Vector3::new(i as f64, 0.0, 0.0)).collect();
    let trajectory = UniformR3SplineTrajectory::with_knots(1.0, 0.0, &knots);

    let p = trajectory.position(2.5).unwrap();
    assert!(p.x > 1.0 && p.x < 4.0);
    assert_relative_eq!(p.x, 3.5, epsilon = 1e-12);

    assert_eq!(
        trajectory.evaluate(-1.0, EvalFlags::POSITION),
        Err(TrajectoryError::OutOfRange {
            t: -1.0,
            index: -1,
            knots: 6
        })
    );
}

#[test]
fn test_orientation_is_identity() {
    let trajectory = random_trajectory(6, 1.0, 0.0, 9);
    let q = trajectory.orientation(1.5).unwrap();
    assert_eq!(q, nalgebra::Quaternion::identity());
    assert_eq!(trajectory.angular_velocity(1.5).unwrap(), Vector3::zeros());
}

#[test]
fn test_range_enumeration() {
    let trajectory = random_trajectory(20, 0.5, 1.0, 13);

    for (t1, t2) in [(1.0, 1.0), (1.2, 2.9), (3.3, 5.7), (2.0, 9.49)] {
        let mut problem = BlockRegistry::new();
        let range =
            trajectory.add_to_problem(&mut problem, &[(t1, t2)]).unwrap();

        let i1 = ((t1 - 1.0) / 0.5).floor() as usize;
        let i2 = ((t2 - 1.0) / 0.5).floor() as usize;
        let expected: Vec<_> = (i1..=i2 + 3)
            .map(|index| ParameterBlock { index, size: 3 })
            .collect();

        assert_eq!(range.blocks, expected);
        assert_eq!(problem.blocks(), expected.as_slice());
        assert_eq!(range.meta.n, i2 - i1 + 4);
        assert_eq!(range.meta.dt, 0.5);
        assert_relative_eq!(range.meta.t0, 1.0 + i1 as f64 * 0.5);
    }
}

#[test]
fn test_overlapping_windows_register_once() {
    let trajectory = random_trajectory(20, 1.0, 0.0, 17);
    let mut problem = BlockRegistry::new();

    trajectory.add_to_problem(&mut problem, &[(2.0, 4.5)]).unwrap();
    trajectory.add_to_problem(&mut problem, &[(3.5, 6.0)]).unwrap();

    let indices: Vec<_> = problem.blocks().iter().map(|b| b.index).collect();
    assert_eq!(indices, (2..=9).collect::<Vec<_>>());
}

#[test]
fn test_window_errors_register_nothing() {
    let trajectory = random_trajectory(8, 1.0, 0.0, 19);
    let mut problem = BlockRegistry::new();

    assert_eq!(
        trajectory.add_to_problem(&mut problem, &[(3.0, 1.0)]),
        Err(TrajectoryError::InvalidWindow { t1: 3.0, t2: 1.0 })
    );
    assert!(matches!(
        trajectory.add_to_problem(&mut problem, &[(-0.5, 1.0)]),
        Err(TrajectoryError::OutOfRange { index: -1, .. })
    ));
    // Segment 5 would need control point 8.
    assert!(matches!(
        trajectory.add_to_problem(&mut problem, &[(1.0, 5.0)]),
        Err(TrajectoryError::OutOfRange { index: 5, knots: 8, .. })
    ));
    assert!(matches!(
        trajectory.add_to_problem(&mut problem, &[(1.0, 2.0), (3.0, 4.0)]),
        Err(TrajectoryError::NotImplemented { windows: 2 })
    ));
    assert!(problem.is_empty());
}

#[test]
fn test_extreme_times_are_out_of_range() {
    let trajectory = random_trajectory(8, 1.0, 0.0, 29);
    let mut problem = BlockRegistry::new();

    for t in [1e19, -1e19, f64::MAX, f64::MIN] {
        assert!(
            matches!(
                trajectory.evaluate(t, EvalFlags::ALL),
                Err(TrajectoryError::OutOfRange { .. })
            ),
            "t={t}"
        );
    }

    assert_eq!(
        trajectory.add_to_problem(&mut problem, &[(1.0, 1e19)]),
        Err(TrajectoryError::OutOfRange {
            t: 1e19,
            index: i64::MAX,
            knots: 8
        })
    );
    assert!(matches!(
        trajectory.add_to_problem(&mut problem, &[(-1e19, 2.0)]),
        Err(TrajectoryError::OutOfRange { index: i64::MIN, .. })
    ));
    assert!(matches!(
        trajectory.add_to_problem(&mut problem, &[(f64::MAX, f64::MAX)]),
        Err(TrajectoryError::OutOfRange { .. })
    ));
    assert!(problem.is_empty());
}

#[test]
fn test_view_timing_longer_than_store() {
    let trajectory = random_trajectory(10, 1.0, 0.0, 31);
    let mut problem = BlockRegistry::new();
    let range = trajectory
        .add_to_problem(&mut problem, &[(2.5, 2.5)])
        .unwrap();
    assert_eq!(range.meta.n, 4);

    // Timing claims two more knots than the blocks handed over.
    let blocks: Vec<&[f64]> = range
        .blocks
        .iter()
        .map(|b| trajectory.holder().parameter(b.index))
        .collect();
    let holder = SliceHolder::new(&blocks);
    let meta = SplineMeta {
        n: range.meta.n + 2,
        ..range.meta
    };
    let view = UniformR3SplineView::<f64, _>::new(&holder, &meta);

    assert!(view.position(2.5).is_ok());
    for t in [3.0, 4.5] {
        assert!(
            matches!(
                view.position(t),
                Err(TrajectoryError::OutOfRange { knots: 4, .. })
            ),
            "t={t}"
        );
    }
}

#[test]
fn test_window_sub_spline_reproduces_trajectory() {
    let trajectory = random_trajectory(15, 0.5, 3.0, 23);
    let mut problem = BlockRegistry::new();
    let (t1, t2) = (4.1, 6.3);

    let range = trajectory.add_to_problem(&mut problem, &[(t1, t2)]).unwrap();

    // What a residual receives: the registered blocks, in order.
    let blocks: Vec<&[f64]> = range
        .blocks
        .iter()
        .map(|b| trajectory.holder().parameter(b.index))
        .collect();
    let holder = SliceHolder::new(&blocks);
    let view = UniformR3SplineView::<f64, _>::new(&holder, &range.meta);

    let mut t = t1;
    while t <= t2 {
        let full = trajectory.evaluate(t, EvalFlags::ALL).unwrap();
        let local = view.evaluate(t, EvalFlags::ALL).unwrap();
        assert_relative_eq!(full.position, local.position, epsilon = 1e-9);
        assert_relative_eq!(full.velocity, local.velocity, epsilon = 1e-9);
        assert_relative_eq!(
            full.acceleration,
            local.acceleration,
            epsilon = 1e-9
        );
        t += 0.05;
    }
}

#[test]
fn test_view_over_owned_holder() {
    let mut holder = VectorHolder::<f32>::new();
    for i in 0..5 {
        let idx = holder.add_parameter(3);
        holder.parameter_mut(idx).copy_from_slice(&[0.0, i as f32, 0.0]);
    }
    let meta = SplineMeta { t0: 0.0, dt: 2.0, n: 5 };
    let view = UniformR3SplineView::<f32, _>::new(&holder, &meta);

    let flags = EvalFlags::POSITION | EvalFlags::VELOCITY;
    let eval = view.evaluate(3.0f32, flags).unwrap();
    assert_relative_eq!(eval.position.y, 2.5, epsilon = 1e-5);
    assert_relative_eq!(eval.velocity.y, 0.5, epsilon = 1e-5);
}
