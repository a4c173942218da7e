//! Accuracy and conservation properties of the time steppers.

use std::f64::consts::TAU;
use wellsim::{
    create_simulation,
    laplacian::LaplacianMethod,
    Stepper,
};

mod common;
use common::{
    fd_energy,
    free_config,
    ignore,
    init_logger,
    rotated,
    state_error,
    FREE_E2,
};

// error against the exact phase rotation after one period of the free
// sin(2πx) mode
//
// the grid is kept coarse so that the fastest mode (E_max = 2 N² = 128) stays
// well inside the RK4 stability region, E_max dt < 2.8, for steps >= 100
fn period_error(stepper: Stepper, steps: usize) -> f64 {
    const N: usize = 8;
    let e = fd_energy(N, 1);
    let period = TAU / e;
    let dt = period / steps as f64;
    let config = free_config(N, LaplacianMethod::FiniteDifference, stepper, dt, steps);
    let (sim, q0) = create_simulation(config).unwrap();
    let exact = rotated(q0.get_re(), e, steps as f64 * dt);
    let q = sim.run(q0, &mut ignore).unwrap();
    state_error(&q, &exact)
}

#[test]
fn rk4_tracks_eigenstate_phase() {
    init_logger();
    let err = period_error(Stepper::Rk4, 200);
    println!("rk4 error after one period: {err:.3e}");
    assert!(err < 1e-6, "rk4 error {err:e} too large");
}

#[test]
fn rk4_fourth_order_convergence() {
    init_logger();
    let errors: Vec<f64>
        = [100, 200, 400].into_iter()
        .map(|steps| period_error(Stepper::Rk4, steps))
        .collect();
    for pair in errors.windows(2) {
        let ratio = pair[0] / pair[1];
        println!("rk4 convergence ratio: {ratio:.2}");
        assert!(ratio > 12.0 && ratio < 20.0, "ratio {ratio} not fourth-order");
    }
}

#[test]
fn euler_is_much_less_accurate_than_rk4() {
    init_logger();
    let err_euler = period_error(Stepper::Euler, 200);
    let err_rk4 = period_error(Stepper::Rk4, 200);
    println!("euler: {err_euler:.3e}; rk4: {err_rk4:.3e}");
    assert!(err_euler > 1e-2);
    assert!(err_euler > 1e4 * err_rk4);
}

#[test]
fn euler_grows_the_norm() {
    init_logger();
    // θ = E dt ≈ 0.0195 for the finite-difference mode; after 200 steps the
    // norm grows by (1 + θ²)^100 ≈ 1.079
    let config
        = free_config(16, LaplacianMethod::FiniteDifference, Stepper::Euler, 1e-3, 200);
    let (sim, q0) = create_simulation(config).unwrap();
    let p0 = sim.probability(&q0);
    let q = sim.run(q0, &mut ignore).unwrap();
    let drift = sim.probability(&q) / p0 - 1.0;
    assert!(drift > 0.05, "euler drift {drift:e}");
    assert!(drift < 0.12, "euler drift {drift:e}");
}

#[test]
fn rk4_and_implicit_conserve_the_norm() {
    init_logger();
    for (stepper, tol) in [(Stepper::Rk4, 1e-6), (Stepper::CrankNicolsonImplicit, 1e-10)] {
        let config
            = free_config(16, LaplacianMethod::FiniteDifference, stepper, 1e-3, 200);
        let (sim, q0) = create_simulation(config).unwrap();
        let p0 = sim.probability(&q0);
        let q = sim.run(q0, &mut ignore).unwrap();
        let drift = (sim.probability(&q) / p0 - 1.0).abs();
        assert!(drift < tol, "{stepper}: drift {drift:e}");
    }
}

#[test]
fn implicit_is_stable_at_large_dt() {
    init_logger();
    // far beyond the explicit stability limit for N = 64
    let config
        = free_config(64, LaplacianMethod::Spectral, Stepper::CrankNicolsonImplicit, 0.05, 100);
    let (sim, q0) = create_simulation(config).unwrap();
    let p0 = sim.probability(&q0);
    let e0 = sim.energy(&q0).unwrap();
    let q = sim.run(q0, &mut ignore).unwrap();
    assert!((sim.probability(&q) - p0).abs() < 1e-10);
    assert!((sim.energy(&q).unwrap() - e0).abs() < 1e-8 * e0);
}

#[test]
fn labeled_crank_nicolson_matches_euler() {
    init_logger();
    let run = |stepper: Stepper| {
        let config
            = free_config(32, LaplacianMethod::FiniteDifference, stepper, 1e-4, 50);
        let (sim, q0) = create_simulation(config).unwrap();
        sim.run(q0, &mut ignore).unwrap()
    };
    assert_eq!(run(Stepper::CrankNicolson), run(Stepper::Euler));
}

#[test]
fn free_eigenstate_energy_is_constant() {
    init_logger();
    let config = free_config(64, LaplacianMethod::Spectral, Stepper::Rk4, 1e-4, 500);
    let (sim, q0) = create_simulation(config).unwrap();
    let e0 = sim.energy(&q0).unwrap();
    assert!((e0 - FREE_E2).abs() < 1e-9, "initial energy {e0}");
    let q = sim.run(q0, &mut ignore).unwrap();
    let e1 = sim.energy(&q).unwrap();
    assert!((e1 - e0).abs() < 1e-8, "final energy {e1}");
}
