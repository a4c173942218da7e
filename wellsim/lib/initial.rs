//! Initial conditions built from eigenstates of the infinite square well.
//!
//! The *n*-th eigenstate of a box of length *L* is
//! ```text
//! ψ_n(x) = √(2/L) sin(n π x / L),    E_n = n² π² / (2 L²)
//! ```
//! Superpositions are formed with unit coefficients and are *not*
//! renormalized: a sum of *m* distinct eigenstates has total probability *m*.

use std::f64::consts::PI;
use ndarray as nd;
use crate::{
    Arr1,
    error::{ TError, TResult },
    timedep::WaveFunction,
};

/// Sample the `n`-th box eigenstate over `x`.
pub fn eigenstate<S>(x: &Arr1<S>, L: f64, n: usize) -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    let a = (2.0 / L).sqrt();
    let k = n as f64 * PI / L;
    x.mapv(|xk| a * (k * xk).sin())
}

/// Build the real part of an initial wavefunction as the unweighted sum of box
/// eigenstates for each quantum number in `ns`.
///
/// Fails with [`TError::InvalidConfiguration`] if `ns` is empty or contains 0.
pub fn initial_wave_function<S>(x: &Arr1<S>, L: f64, ns: &[usize])
    -> TResult<nd::Array1<f64>>
where S: nd::Data<Elem = f64>
{
    TError::check_quantum_numbers(ns)?;
    TError::check_length(L)?;
    let psi: nd::Array1<f64>
        = ns.iter()
        .fold(nd::Array1::zeros(x.len()), |acc, n| acc + eigenstate(x, L, *n));
    Ok(psi)
}

/// Like [`initial_wave_function`], but return a full [`WaveFunction`] with
/// zero imaginary part.
pub fn initial_state<S>(x: &Arr1<S>, L: f64, ns: &[usize])
    -> TResult<WaveFunction>
where S: nd::Data<Elem = f64>
{
    initial_wave_function(x, L, ns).map(WaveFunction::from_real)
}

/// Energy of the `n`-th eigenstate of a box of length `L`.
pub fn box_energy(n: usize, L: f64) -> f64 {
    (n as f64 * PI / L).powi(2) / 2.0
}
