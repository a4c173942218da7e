//! Discrete second-derivative operators.
//!
//! Two interchangeable estimators are provided, both of which implicitly assume
//! periodic boundary conditions on the grid:
//! - [`FiniteDifference`]: three-point central difference with wraparound,
//!   *O*(*dx*²) truncation error, *O*(*N*) per call.
//! - [`Spectral`]: multiplication by -*k*² in Fourier space, exact for smooth
//!   periodic fields, *O*(*N* log *N*) per call.
//!
//! Time steppers are written against the [`Laplacian`] trait only. The operator
//! acts on real arrays; since it is linear, it is applied separately to the real
//! and imaginary parts of a wavefunction.
//!
//! ```
//! use std::f64::consts::TAU;
//! use wellsim::{ grid::Grid, laplacian::{ Laplacian, Spectral } };
//!
//! let grid = Grid::new(1.0, 64).unwrap();
//! let f = grid.get_x().mapv(|x| (TAU * x).sin());
//! let d2f = Spectral::new(&grid).apply(&f);
//! assert!(
//!     d2f.iter().zip(&f)
//!         .all(|(d2fk, fk)| (d2fk + TAU * TAU * fk).abs() < 1e-9)
//! );
//! ```

use std::{ fmt, str::FromStr, sync::Arc };
use ndarray as nd;
use num_complex::Complex64 as C64;
use rustfft::{ Fft, FftPlanner };
use serde::{ Deserialize, Serialize };
use crate::{
    Arr1,
    error::{ TError, TResult },
    grid::Grid,
};

/// A linear operator estimating ∂²/∂*x*² on a fixed grid.
pub trait Laplacian {
    /// Apply the operator to a real-valued field.
    ///
    /// *Panics if `f` does not have length equal to [`Self::len`]*.
    fn apply<S>(&self, f: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>;

    /// Grid spacing the operator was built for.
    fn get_dx(&self) -> f64;

    /// Number of grid points the operator acts on.
    fn len(&self) -> usize;

    /// Return `true` if the operator acts on an empty grid.
    fn is_empty(&self) -> bool { self.len() == 0 }

    /// Compute the matrix representation of the operator, column by column,
    /// from its action on unit vectors.
    fn matrix(&self) -> nd::Array2<f64> {
        let n = self.len();
        let mut m: nd::Array2<f64> = nd::Array2::zeros((n, n));
        let mut e: nd::Array1<f64> = nd::Array1::zeros(n);
        for (j, mut col) in m.columns_mut().into_iter().enumerate() {
            e[j] = 1.0;
            col.assign(&self.apply(&e));
            e[j] = 0.0;
        }
        m
    }
}

/// Central second difference with periodic wraparound.
#[derive(Copy, Clone, Debug)]
pub struct FiniteDifference {
    n: usize,
    dx: f64,
}

impl FiniteDifference {
    /// Build the operator for a grid.
    pub fn new(grid: &Grid) -> Self {
        Self { n: grid.len(), dx: grid.get_dx() }
    }
}

impl Laplacian for FiniteDifference {
    fn apply<S>(&self, f: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        let n = self.n;
        assert_eq!(f.len(), n, "field length does not match operator");
        let ondx2 = self.dx.powi(2).recip();
        (0..n)
            .map(|i| {
                (f[(i + 1) % n] - 2.0 * f[i] + f[(i + n - 1) % n]) * ondx2
            })
            .collect()
    }

    fn get_dx(&self) -> f64 { self.dx }

    fn len(&self) -> usize { self.n }
}

/// Pseudo-spectral second derivative computed via the FFT.
///
/// Forward and inverse transforms are planned once on construction.
#[derive(Clone)]
pub struct Spectral {
    dx: f64,
    k2: nd::Array1<f64>,
    fwd: Arc<dyn Fft<f64>>,
    inv: Arc<dyn Fft<f64>>,
}

impl Spectral {
    /// Build the operator for a grid.
    pub fn new(grid: &Grid) -> Self {
        let n = grid.len();
        let k2 = grid.spectrum().get_k2().clone();
        let mut planner = FftPlanner::new();
        let fwd = planner.plan_fft_forward(n);
        let inv = planner.plan_fft_inverse(n);
        Self { dx: grid.get_dx(), k2, fwd, inv }
    }

    /// Get a reference to the squared wavenumbers used by the operator.
    pub fn get_k2(&self) -> &nd::Array1<f64> { &self.k2 }
}

impl fmt::Debug for Spectral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spectral")
            .field("n", &self.k2.len())
            .field("dx", &self.dx)
            .finish()
    }
}

impl Laplacian for Spectral {
    fn apply<S>(&self, f: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        let n = self.k2.len();
        assert_eq!(f.len(), n, "field length does not match operator");
        let mut buf: Vec<C64> = f.iter().map(|fk| C64::from(*fk)).collect();
        self.fwd.process(&mut buf);
        buf.iter_mut().zip(&self.k2)
            .for_each(|(bk, k2k)| { *bk *= -k2k; });
        self.inv.process(&mut buf);
        // rustfft transforms are unnormalized
        let norm = (n as f64).recip();
        buf.into_iter().map(|bk| bk.re * norm).collect()
    }

    fn get_dx(&self) -> f64 { self.dx }

    fn len(&self) -> usize { self.k2.len() }
}

/// Laplacian estimation method selector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LaplacianMethod {
    /// Use the [spectral operator][Spectral].
    #[default]
    Spectral,
    /// Use the [finite-difference operator][FiniteDifference].
    FiniteDifference,
}

impl LaplacianMethod {
    /// Return the identifier for the method.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Spectral => "spectral",
            Self::FiniteDifference => "finite-difference",
        }
    }

    /// Return `true` if `self` is `Spectral`.
    pub fn is_spectral(&self) -> bool {
        matches!(self, Self::Spectral)
    }
}

impl fmt::Display for LaplacianMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for LaplacianMethod {
    type Err = TError;

    fn from_str(s: &str) -> TResult<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "spectral" | "fft" => Ok(Self::Spectral),
            "finite-difference" | "fd" => Ok(Self::FiniteDifference),
            _ => Err(TError::invalid(format!("unknown laplacian method '{s}'"))),
        }
    }
}

impl TryFrom<String> for LaplacianMethod {
    type Error = TError;

    fn try_from(s: String) -> TResult<Self> { s.parse() }
}

impl From<LaplacianMethod> for String {
    fn from(method: LaplacianMethod) -> Self { method.name().to_string() }
}

/// Either Laplacian operator, as selected by a [`LaplacianMethod`].
#[derive(Clone, Debug)]
pub enum LaplacianOp {
    FiniteDifference(FiniteDifference),
    Spectral(Spectral),
}

impl LaplacianOp {
    /// Build the selected operator for a grid.
    pub fn new(method: LaplacianMethod, grid: &Grid) -> Self {
        match method {
            LaplacianMethod::Spectral
                => Self::Spectral(Spectral::new(grid)),
            LaplacianMethod::FiniteDifference
                => Self::FiniteDifference(FiniteDifference::new(grid)),
        }
    }
}

impl Laplacian for LaplacianOp {
    fn apply<S>(&self, f: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        match self {
            Self::FiniteDifference(op) => op.apply(f),
            Self::Spectral(op) => op.apply(f),
        }
    }

    fn get_dx(&self) -> f64 {
        match self {
            Self::FiniteDifference(op) => op.get_dx(),
            Self::Spectral(op) => op.get_dx(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::FiniteDifference(op) => op.len(),
            Self::Spectral(op) => op.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;
    use super::*;
    use approx::assert_abs_diff_eq;

    fn max_abs_diff(a: &nd::Array1<f64>, b: &nd::Array1<f64>) -> f64 {
        a.iter().zip(b).map(|(ak, bk)| (ak - bk).abs()).fold(0.0, f64::max)
    }

    #[test]
    fn finite_difference_wraps() {
        let grid = Grid::new(4.0, 4).unwrap();
        let op = FiniteDifference::new(&grid);
        let f = nd::array![1.0, 0.0, 0.0, 0.0];
        assert_eq!(op.apply(&f), nd::array![-2.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn finite_difference_eigenvalue() {
        // sampled plane waves are exact eigenvectors of the periodic stencil
        let grid = Grid::new(1.0, 32).unwrap();
        let dx = grid.get_dx();
        let f = grid.get_x().mapv(|x| (TAU * x).sin());
        let lam = (2.0 * (TAU * dx).cos() - 2.0) / dx.powi(2);
        let d2f = FiniteDifference::new(&grid).apply(&f);
        assert!(max_abs_diff(&d2f, &(&f * lam)) < 1e-9);
    }

    #[test]
    fn spectral_kills_constants() {
        let grid = Grid::new(2.0, 16).unwrap();
        let f: nd::Array1<f64> = nd::Array1::from_elem(16, 3.0);
        let d2f = Spectral::new(&grid).apply(&f);
        d2f.iter().for_each(|v| assert_abs_diff_eq!(*v, 0.0, epsilon = 1e-10));
    }

    #[test]
    fn matrix_is_symmetric() {
        let grid = Grid::new(1.0, 8).unwrap();
        for method in [LaplacianMethod::Spectral, LaplacianMethod::FiniteDifference] {
            let m = LaplacianOp::new(method, &grid).matrix();
            let asym = (&m - &m.t()).mapv(f64::abs).fold(0.0_f64, |a, b| a.max(*b));
            assert!(asym < 1e-9);
        }
    }

    #[test]
    fn parse_methods() {
        assert_eq!(
            "finite_difference".parse::<LaplacianMethod>().unwrap(),
            LaplacianMethod::FiniteDifference,
        );
        assert!("Spectral".parse::<LaplacianMethod>().unwrap().is_spectral());
        assert!(
            "chebyshev".parse::<LaplacianMethod>().unwrap_err()
                .is_invalid_configuration()
        );
    }
}
