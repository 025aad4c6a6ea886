//! Basic usage example for uniform-r3-spline

use nalgebra::Vector3;
use uniform_r3_spline::prelude::*;

fn main() {
    println!("=== Uniform R³ Spline Trajectory Example ===\n");

    // Example 1: Build a trajectory knot by knot
    let mut trajectory = UniformR3SplineTrajectory::new(0.5, 10.0);
    for i in 0..8 {
        let s = i as f64;
        trajectory.append_knot(&Vector3::new(s, (0.5 * s).sin(), 0.1 * s * s));
    }
    println!(
        "{} knots, valid for t in [{:.2}, {:.2})",
        trajectory.num_knots(),
        trajectory.min_time(),
        trajectory.max_time()
    );

    // Example 2: Evaluate position, velocity and acceleration
    println!("\nEvaluation:");
    for t in [10.0, 10.6, 11.25, 12.0, 12.4] {
        let eval = trajectory.evaluate(t, EvalFlags::ALL).unwrap();
        println!(
            "  t={:.2}  p=({:.3}, {:.3}, {:.3})  |v|={:.3}  |a|={:.3}",
            t,
            eval.position.x,
            eval.position.y,
            eval.position.z,
            eval.velocity.norm(),
            eval.acceleration.norm()
        );
    }

    // Example 3: Control points a time window depends on
    println!("\nActive range:");
    let mut problem = BlockRegistry::new();
    let range = trajectory
        .add_to_problem(&mut problem, &[(10.7, 11.6)])
        .unwrap();
    let indices: Vec<_> = range.blocks.iter().map(|b| b.index).collect();
    println!(
        "  control points {:?}, sub-spline t0={:.2} dt={:.2} n={}",
        indices, range.meta.t0, range.meta.dt, range.meta.n
    );
    println!("  {} free parameters", problem.num_parameters());

    // Example 4: Error handling
    println!("\nError handling:");
    match trajectory.position(trajectory.max_time()) {
        Ok(p) => println!("  Result: {:?}", p),
        Err(e) => println!("  Error: {}", e),
    }
    let windows = [(10.0, 10.5), (11.0, 11.5)];
    match trajectory.add_to_problem(&mut problem, &windows) {
        Ok(range) => println!("  Result: {:?}", range),
        Err(e) => println!("  Error: {}", e),
    }
}
