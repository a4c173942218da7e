//! Uniform spatial grid and the accompanying spectral basis.
//!
//! Grids sample the interval [0, *L*) at *N* points, *x*\[*i*\] = *i* *L*/*N*.
//! The right endpoint is excluded so that the sample set is consistent with
//! periodic wraparound, which both Laplacian operators assume.

use std::f64::consts::TAU;
use log::debug;
use ndarray as nd;
use crate::{
    error::{ TError, TResult },
    utils::fft_freq,
};

/// Coordinate array for a box of length `L` sampled at `n` points.
#[derive(Clone, Debug)]
pub struct Grid {
    // coordinate array
    x: nd::Array1<f64>,
    // box length
    L: f64,
    // grid spacing
    dx: f64,
}

impl Grid {
    /// Create a new `Grid` over [0, `L`) with `n` points.
    ///
    /// Fails with [`TError::InvalidConfiguration`] if `L` is not a positive,
    /// finite number or if `n < 2`.
    pub fn new(L: f64, n: usize) -> TResult<Self> {
        TError::check_length(L)?;
        TError::check_points(n)?;
        if !n.is_power_of_two() {
            debug!("grid size {n} is not a power of two; FFTs will be slower");
        }
        let dx = L / n as f64;
        let x: nd::Array1<f64> = (0..n).map(|i| i as f64 * dx).collect();
        Ok(Self { x, L, dx })
    }

    /// Get a reference to the coordinate array.
    pub fn get_x(&self) -> &nd::Array1<f64> { &self.x }

    /// Get the box length.
    pub fn get_L(&self) -> f64 { self.L }

    /// Get the grid spacing.
    pub fn get_dx(&self) -> f64 { self.dx }

    /// Get the number of grid points.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.x.len() }

    /// Compute the angular wavenumbers associated with the grid.
    pub fn spectrum(&self) -> Spectrum { Spectrum::new(self.len(), self.dx) }
}

/// Angular wavenumbers *k* for a grid, in the native ordering of the FFT, and
/// their squares.
#[derive(Clone, Debug)]
pub struct Spectrum {
    k: nd::Array1<f64>,
    k2: nd::Array1<f64>,
}

impl Spectrum {
    /// Compute *k* = 2π `fft_freq(n, dx)` and *k*².
    pub fn new(n: usize, dx: f64) -> Self {
        let k: nd::Array1<f64> = fft_freq(n, dx) * TAU;
        let k2: nd::Array1<f64> = k.mapv(|kj| kj.powi(2));
        Self { k, k2 }
    }

    /// Get a reference to the wavenumber array.
    pub fn get_k(&self) -> &nd::Array1<f64> { &self.k }

    /// Get a reference to the squared wavenumber array.
    pub fn get_k2(&self) -> &nd::Array1<f64> { &self.k2 }
}
