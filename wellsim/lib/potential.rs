//! Library of static potentials defined over a [`Grid`].
//!
//! All potentials are centered (where applicable) on the midpoint of the box,
//! *L*/2. Singular potentials are kept finite so that downstream arithmetic
//! never encounters `inf * 0`:
//! - the walls of [`Potential::Infinite`] take the value [`WALL_HEIGHT`];
//! - [`Potential::Coulomb`] is softened by [`COULOMB_SOFTENING`].
//!
//! Finite parameters can still overflow (e.g. a very stiff Morse potential);
//! [`Potential::try_sample`] rejects such arrays.

use std::{ fmt, str::FromStr };
use ndarray as nd;
use serde::{ Deserialize, Serialize };
use crate::{
    error::{ TError, TResult },
    grid::Grid,
};

/// Value taken by the walls of the infinite square well.
pub const WALL_HEIGHT: f64 = 1e5;

/// Added to |*x* - *L*/2| in the denominator of the Coulomb potential.
pub const COULOMB_SOFTENING: f64 = 1e-5;

/// Potential selector and parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Potential {
    /// Zero everywhere.
    Free,
    /// Zero in the interior; [`WALL_HEIGHT`] at the first and last samples.
    #[default]
    Infinite,
    /// `v0` where |*x* - *L*/2| ≥ `width`, zero inside.
    FiniteSquare {
        /// Height of the step.
        v0: f64,
        /// Half-width of the well.
        width: f64,
    },
    /// `v0` where |*x* - *L*/2| < `width`, zero outside.
    Barrier {
        /// Height of the barrier.
        v0: f64,
        /// Half-width of the barrier.
        width: f64,
    },
    /// Discretized Dirac delta: `v0 / dx` on the sample nearest *L*/2.
    Delta {
        /// Integrated strength.
        v0: f64,
    },
    /// `q1 q2 / (|x - L/2| + ε)` with ε = [`COULOMB_SOFTENING`].
    Coulomb {
        q1: f64,
        q2: f64,
    },
    /// `d ((1 - exp(-a (x - r0)))² - 1)`.
    Morse {
        /// Well depth.
        d: f64,
        /// Inverse width.
        a: f64,
        /// Equilibrium position.
        r0: f64,
    },
}

impl Potential {
    /// Return the identifier for the kind of potential.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Infinite => "infinite",
            Self::FiniteSquare { .. } => "finite_square",
            Self::Barrier { .. } => "barrier",
            Self::Delta { .. } => "delta",
            Self::Coulomb { .. } => "coulomb",
            Self::Morse { .. } => "morse",
        }
    }

    /// Check that all parameters are finite and that widths are positive.
    pub fn validate(&self) -> TResult<()> {
        let params: Vec<f64>
            = match *self {
                Self::Free | Self::Infinite => Vec::new(),
                Self::FiniteSquare { v0, width }
                | Self::Barrier { v0, width } => {
                    if width.is_nan() || width <= 0.0 {
                        return Err(TError::invalid(format!(
                            "{}: width must be greater than 0; got {width}",
                            self.name(),
                        )));
                    }
                    vec![v0, width]
                },
                Self::Delta { v0 } => vec![v0],
                Self::Coulomb { q1, q2 } => vec![q1, q2],
                Self::Morse { d, a, r0 } => vec![d, a, r0],
            };
        match params.iter().find(|p| !p.is_finite()) {
            Some(p) => Err(TError::invalid(format!(
                "{}: parameters must be finite; got {p}", self.name()))),
            None => Ok(()),
        }
    }

    /// Sample the potential over a grid.
    pub fn sample(&self, grid: &Grid) -> nd::Array1<f64> {
        let x = grid.get_x();
        let c = grid.get_L() / 2.0;
        let dx = grid.get_dx();
        match *self {
            Self::Free => nd::Array1::zeros(x.len()),
            Self::Infinite => infinite(x.len()),
            Self::FiniteSquare { v0, width }
                => x.mapv(|xk| if (xk - c).abs() >= width { v0 } else { 0.0 }),
            Self::Barrier { v0, width }
                => x.mapv(|xk| if (xk - c).abs() < width { v0 } else { 0.0 }),
            Self::Delta { v0 } => delta(x.len(), c, dx, v0),
            Self::Coulomb { q1, q2 }
                => x.mapv(|xk| q1 * q2 / ((xk - c).abs() + COULOMB_SOFTENING)),
            Self::Morse { d, a, r0 }
                => x.mapv(|xk| d * ((1.0 - (-a * (xk - r0)).exp()).powi(2) - 1.0)),
        }
    }

    /// Like [`Self::sample`], but fail with [`TError::InvalidConfiguration`]
    /// if any sample is not finite.
    pub fn try_sample(&self, grid: &Grid) -> TResult<nd::Array1<f64>> {
        let V = self.sample(grid);
        match V.iter().position(|v| !v.is_finite()) {
            Some(i) => Err(TError::invalid(format!(
                "{}: potential is not finite at x = {}; got {}",
                self.name(), grid.get_x()[i], V[i],
            ))),
            None => Ok(V),
        }
    }
}

fn infinite(n: usize) -> nd::Array1<f64> {
    let mut V: nd::Array1<f64> = nd::Array1::zeros(n);
    V[0] = WALL_HEIGHT;
    V[n - 1] = WALL_HEIGHT;
    V
}

// a single cell of height v0/dx, so that sum(V) dx = v0 at any resolution
fn delta(n: usize, c: f64, dx: f64, v0: f64) -> nd::Array1<f64> {
    let mut V: nd::Array1<f64> = nd::Array1::zeros(n);
    let i = ((c / dx).round() as usize).min(n - 1);
    V[i] = v0 / dx;
    V
}

impl fmt::Display for Potential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Parse a potential identifier.
///
/// Only the kind is identified. Parameters are placeholders sized for a unit
/// box: strengths are 1, square-well and barrier half-widths are 1/4, and
/// `r0` is 0 for [`Potential::Morse`]. Unrecognized identifiers fail with
/// [`TError::InvalidConfiguration`].
impl FromStr for Potential {
    type Err = TError;

    fn from_str(s: &str) -> TResult<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "free" => Ok(Self::Free),
            "infinite" => Ok(Self::Infinite),
            "finite_square" => Ok(Self::FiniteSquare { v0: 1.0, width: 0.25 }),
            "barrier" => Ok(Self::Barrier { v0: 1.0, width: 0.25 }),
            "delta" => Ok(Self::Delta { v0: 1.0 }),
            "coulomb" => Ok(Self::Coulomb { q1: 1.0, q2: 1.0 }),
            "morse" => Ok(Self::Morse { d: 1.0, a: 1.0, r0: 0.0 }),
            _ => Err(TError::invalid(format!("unknown potential type '{s}'"))),
        }
    }
}
