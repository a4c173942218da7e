//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::{ f64::consts::TAU, ops::ControlFlow };
use ndarray as nd;
use wellsim::{
    laplacian::LaplacianMethod,
    potential::Potential,
    SimulationConfig,
    Stepper,
    WaveFunction,
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Energy of the free plane wave sin(2πx) on a unit box.
pub const FREE_E2: f64 = TAU * TAU / 2.0;

/// Energy of the periodic mode sin(2πmx) under the finite-difference
/// Laplacian on an `n`-point unit grid, (1 - cos(2πm/n)) n².
pub fn fd_energy(n: usize, m: usize) -> f64 {
    (1.0 - (TAU * m as f64 / n as f64).cos()) * (n * n) as f64
}

/// A free particle on a unit box, starting in the second box eigenstate,
/// √2 sin(2πx), which is also an exact eigenvector of both periodic
/// Laplacians.
pub fn free_config(
    points: usize,
    method: LaplacianMethod,
    stepper: Stepper,
    dt: f64,
    steps: usize,
) -> SimulationConfig
{
    SimulationConfig {
        length: 1.0,
        points,
        states: vec![2],
        method,
        stepper,
        dt,
        steps,
        potential: Potential::Free,
    }
}

/// Exact state at time `t` for an initial real eigenstate `psi0` of energy `e`.
pub fn rotated(psi0: &nd::Array1<f64>, e: f64, t: f64) -> WaveFunction {
    let re = psi0.mapv(|p| p * (e * t).cos());
    let im = psi0.mapv(|p| -p * (e * t).sin());
    WaveFunction::new(re, im).unwrap()
}

pub fn max_abs_diff(a: &nd::Array1<f64>, b: &nd::Array1<f64>) -> f64 {
    a.iter().zip(b).map(|(ak, bk)| (ak - bk).abs()).fold(0.0, f64::max)
}

pub fn state_error(a: &WaveFunction, b: &WaveFunction) -> f64 {
    max_abs_diff(a.get_re(), b.get_re()).max(max_abs_diff(a.get_im(), b.get_im()))
}

/// A renderer that discards every frame.
pub fn ignore(_: usize, _: &nd::Array1<f64>) -> ControlFlow<()> {
    ControlFlow::Continue(())
}
