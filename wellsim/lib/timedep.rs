//! Provides functions to advance solutions to the 1+1-dimensional
//! (time-dependent) Schrödinger equation (TDSE) for motion in a static
//! potential, with ħ = *m* = 1.
//!
//! The complex wavefunction is carried as a pair of real arrays (see
//! [`WaveFunction`]), for which the TDSE splits into the coupled system
//! ```text
//! ∂ψ_r/∂t = -½ ∇²ψ_i + V ψ_i
//! ∂ψ_i/∂t =  ½ ∇²ψ_r - V ψ_r
//! ```
//! Explicit steppers evaluate the right-hand side through any [`Laplacian`].
//! None of the steppers renormalize the state.

use std::{ fmt, str::FromStr };
use log::warn;
use nalgebra as na;
use ndarray as nd;
use num_complex::Complex64 as C64;
use serde::{ Deserialize, Serialize };
use crate::{
    Arr1,
    error::{ LengthError, TError, TResult },
    laplacian::Laplacian,
    utils::{ all_finite, array_step, riemann },
};

/// A complex wavefunction sampled on a grid, stored as its real and imaginary
/// parts.
///
/// Both parts are guaranteed to have the same length.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveFunction {
    re: nd::Array1<f64>,
    im: nd::Array1<f64>,
}

impl WaveFunction {
    /// Create a new `WaveFunction` from real and imaginary parts.
    pub fn new(re: nd::Array1<f64>, im: nd::Array1<f64>) -> TResult<Self> {
        LengthError::check(&re, &im)?;
        Ok(Self { re, im })
    }

    /// Create a purely real `WaveFunction`.
    pub fn from_real(re: nd::Array1<f64>) -> Self {
        let im = nd::Array1::zeros(re.len());
        Self { re, im }
    }

    /// Create a `WaveFunction` from complex values.
    pub fn from_complex<S>(q: &Arr1<S>) -> Self
    where S: nd::Data<Elem = C64>
    {
        Self { re: q.mapv(|qk| qk.re), im: q.mapv(|qk| qk.im) }
    }

    /// Get a reference to the real part.
    pub fn get_re(&self) -> &nd::Array1<f64> { &self.re }

    /// Get a reference to the imaginary part.
    pub fn get_im(&self) -> &nd::Array1<f64> { &self.im }

    /// Get the number of grid points.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.re.len() }

    /// Compute the probability density |ψ|².
    pub fn density(&self) -> nd::Array1<f64> {
        nd::Zip::from(&self.re).and(&self.im)
            .map_collect(|r, i| r.powi(2) + i.powi(2))
    }

    /// Compute the total probability ∑ |ψ|² *dx*.
    pub fn norm(&self, dx: f64) -> f64 { riemann(&self.density(), dx) }

    /// Convert to complex values.
    pub fn to_complex(&self) -> nd::Array1<C64> {
        nd::Zip::from(&self.re).and(&self.im)
            .map_collect(|r, i| C64::new(*r, *i))
    }

    /// Return `true` if every value is finite.
    pub fn is_finite(&self) -> bool { all_finite(&self.re, &self.im) }

    /// Split into real and imaginary parts.
    pub fn into_parts(self) -> (nd::Array1<f64>, nd::Array1<f64>) {
        (self.re, self.im)
    }
}

// calculate the time derivative of the TDSE, i.e. evaluate the action of the
// Hamiltonian on the state with an added factor of `-i`, for both components
fn rhs<L, S, T, U>(lap: &L, V: &Arr1<S>, re: &Arr1<T>, im: &Arr1<U>)
    -> (nd::Array1<f64>, nd::Array1<f64>)
where
    L: Laplacian,
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
    U: nd::Data<Elem = f64>,
{
    let mut dre = lap.apply(im);
    nd::Zip::from(&mut dre).and(V).and(im)
        .for_each(|d, Vk, ik| { *d = -0.5 * *d + Vk * ik; });
    let mut dim = lap.apply(re);
    nd::Zip::from(&mut dim).and(V).and(re)
        .for_each(|d, Vk, rk| { *d = 0.5 * *d - Vk * rk; });
    (dre, dim)
}

/// Take a single explicit Euler step.
///
/// First-order accurate in `dt` and unconditionally unstable for the TDSE:
/// the norm of every mode grows by a factor (1 + (*E* *dt*)²)^½ per step.
///
/// *Panics if `V` or `q` do not match the length of `lap`*.
pub fn euler<L, S>(lap: &L, V: &Arr1<S>, q: &WaveFunction, dt: f64)
    -> WaveFunction
where
    L: Laplacian,
    S: nd::Data<Elem = f64>,
{
    let (dre, dim) = rhs(lap, V, &q.re, &q.im);
    WaveFunction {
        re: array_step(&q.re, dt, &dre),
        im: array_step(&q.im, dt, &dim),
    }
}

/// Take a single step of the "Crank-Nicolson" scheme in its explicit form.
///
/// The right-hand side is evaluated at the current state only, which makes
/// this step identical to [`euler`]. See [`ImplicitCrankNicolson`] for the
/// genuine semi-implicit scheme.
///
/// *Panics if `V` or `q` do not match the length of `lap`*.
pub fn crank_nicolson<L, S>(lap: &L, V: &Arr1<S>, q: &WaveFunction, dt: f64)
    -> WaveFunction
where
    L: Laplacian,
    S: nd::Data<Elem = f64>,
{
    euler(lap, V, q, dt)
}

/// Take a single fourth-order Runge-Kutta step.
///
/// Requires four evaluations of the right-hand side, i.e. eight applications
/// of the Laplacian.
///
/// *Panics if `V` or `q` do not match the length of `lap`*.
pub fn rk4<L, S>(lap: &L, V: &Arr1<S>, q: &WaveFunction, dt: f64)
    -> WaveFunction
where
    L: Laplacian,
    S: nd::Data<Elem = f64>,
{
    let (k1r, k1i) = rhs(lap, V, &q.re, &q.im);
    let (k2r, k2i)
        = rhs(
            lap, V,
            &array_step(&q.re, dt / 2.0, &k1r),
            &array_step(&q.im, dt / 2.0, &k1i),
        );
    let (k3r, k3i)
        = rhs(
            lap, V,
            &array_step(&q.re, dt / 2.0, &k2r),
            &array_step(&q.im, dt / 2.0, &k2i),
        );
    let (k4r, k4i)
        = rhs(
            lap, V,
            &array_step(&q.re, dt, &k3r),
            &array_step(&q.im, dt, &k3i),
        );
    let re: nd::Array1<f64>
        = nd::Zip::from(&q.re).and(&k1r).and(&k2r).and(&k3r).and(&k4r)
        .map_collect(|qk, k1, k2, k3, k4| {
            qk + dt / 6.0 * (k1 + 2.0 * (k2 + k3) + k4)
        });
    let im: nd::Array1<f64>
        = nd::Zip::from(&q.im).and(&k1i).and(&k2i).and(&k3i).and(&k4i)
        .map_collect(|qk, k1, k2, k3, k4| {
            qk + dt / 6.0 * (k1 + 2.0 * (k2 + k3) + k4)
        });
    WaveFunction { re, im }
}

/// Grid size above which building an [`ImplicitCrankNicolson`] logs a warning.
pub const IMPLICIT_WARN_POINTS: usize = 1024;

/// Largest grid size accepted by [`ImplicitCrankNicolson`]; its dense
/// propagator takes *O*(*N*²) memory and *O*(*N*³) time to build.
pub const IMPLICIT_MAX_POINTS: usize = 4096;

/// Genuine (semi-implicit) Crank-Nicolson propagator.
///
/// Solves
/// ```text
/// (1 + i dt H / 2) ψ(t + dt) = (1 - i dt H / 2) ψ(t)
/// H = -½ ∇² + V
/// ```
/// by computing the Cayley propagator `U = (1 + i dt H/2)⁻¹ (1 - i dt H/2)`
/// once, using the matrix representation of the chosen [`Laplacian`]. Each step
/// is then a single matrix-vector product. `U` is unitary for real `V`, so the
/// total probability is conserved up to round-off for any `dt`.
#[derive(Clone, Debug)]
pub struct ImplicitCrankNicolson {
    u: na::DMatrix<C64>,
}

impl ImplicitCrankNicolson {
    /// Factor the system for a given operator, potential, and time step.
    ///
    /// Fails with [`TError::InvalidConfiguration`] if the grid is larger than
    /// [`IMPLICIT_MAX_POINTS`].
    pub fn new<L, S>(lap: &L, V: &Arr1<S>, dt: f64) -> TResult<Self>
    where
        L: Laplacian,
        S: nd::Data<Elem = f64>,
    {
        let n = lap.len();
        if V.len() != n { return Err(LengthError(n, V.len()).into()); }
        if n > IMPLICIT_MAX_POINTS {
            return Err(TError::invalid(format!(
                "implicit Crank-Nicolson supports at most {IMPLICIT_MAX_POINTS} \
                grid points; got {n}"
            )));
        }
        if n > IMPLICIT_WARN_POINTS {
            warn!("building a dense {n}x{n} Crank-Nicolson propagator; this may be slow");
        }
        let lapm = lap.matrix();
        let h = |i: usize, j: usize| -> f64 {
            -0.5 * lapm[[i, j]] + if i == j { V[i] } else { 0.0 }
        };
        let delta = |i: usize, j: usize| -> f64 { if i == j { 1.0 } else { 0.0 } };
        let a: na::DMatrix<C64>
            = na::DMatrix::from_fn(n, n, |i, j| {
                C64::new(delta(i, j), dt / 2.0 * h(i, j))
            });
        let b: na::DMatrix<C64>
            = na::DMatrix::from_fn(n, n, |i, j| {
                C64::new(delta(i, j), -dt / 2.0 * h(i, j))
            });
        let u = a.lu().solve(&b).ok_or(TError::SingularSystem)?;
        Ok(Self { u })
    }

    /// Take a single step.
    ///
    /// *Panics if `q` does not match the size of the system*.
    pub fn step(&self, q: &WaveFunction) -> WaveFunction {
        let psi: na::DVector<C64>
            = na::DVector::from_iterator(q.len(), q.to_complex().iter().copied());
        let next: nd::Array1<C64> = (&self.u * psi).iter().copied().collect();
        WaveFunction::from_complex(&next)
    }
}

/// Time stepping scheme selector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Stepper {
    /// Use [`euler`].
    Euler,
    /// Use [`crank_nicolson`], the explicit form.
    CrankNicolson,
    /// Use [`ImplicitCrankNicolson`].
    CrankNicolsonImplicit,
    /// Use [`rk4`].
    #[default]
    Rk4,
}

impl Stepper {
    /// All available schemes.
    pub const ALL: [Self; 4] = [
        Self::Euler,
        Self::CrankNicolson,
        Self::CrankNicolsonImplicit,
        Self::Rk4,
    ];

    /// Return the identifier for the scheme.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Euler => "euler",
            Self::CrankNicolson => "crank-nicolson",
            Self::CrankNicolsonImplicit => "crank-nicolson-implicit",
            Self::Rk4 => "rk4",
        }
    }

    /// Return `true` if `self` is `CrankNicolsonImplicit`.
    pub fn is_implicit(&self) -> bool {
        matches!(self, Self::CrankNicolsonImplicit)
    }
}

impl fmt::Display for Stepper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Stepper {
    type Err = TError;

    fn from_str(s: &str) -> TResult<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "euler" => Ok(Self::Euler),
            "crank-nicolson" | "cn" => Ok(Self::CrankNicolson),
            "crank-nicolson-implicit" | "cn-implicit"
                => Ok(Self::CrankNicolsonImplicit),
            "rk4" | "runge-kutta" => Ok(Self::Rk4),
            _ => Err(TError::invalid(format!("unknown stepper '{s}'"))),
        }
    }
}

impl TryFrom<String> for Stepper {
    type Error = TError;

    fn try_from(s: String) -> TResult<Self> { s.parse() }
}

impl From<Stepper> for String {
    fn from(stepper: Stepper) -> Self { stepper.name().to_string() }
}

/// A [`Stepper`] prepared for a particular operator, potential, and time step.
#[derive(Clone, Debug)]
pub enum Integrator {
    /// [`euler`] with fixed `dt`.
    Euler(f64),
    /// [`crank_nicolson`] with fixed `dt`.
    CrankNicolson(f64),
    /// [`rk4`] with fixed `dt`.
    Rk4(f64),
    /// The factored implicit Crank-Nicolson system.
    Implicit(ImplicitCrankNicolson),
}

impl Integrator {
    /// Prepare a scheme. Only [`Stepper::CrankNicolsonImplicit`] performs any
    /// work here.
    pub fn new<L, S>(stepper: Stepper, lap: &L, V: &Arr1<S>, dt: f64)
        -> TResult<Self>
    where
        L: Laplacian,
        S: nd::Data<Elem = f64>,
    {
        TError::check_dt(dt)?;
        match stepper {
            Stepper::Euler => Ok(Self::Euler(dt)),
            Stepper::CrankNicolson => Ok(Self::CrankNicolson(dt)),
            Stepper::Rk4 => Ok(Self::Rk4(dt)),
            Stepper::CrankNicolsonImplicit
                => ImplicitCrankNicolson::new(lap, V, dt).map(Self::Implicit),
        }
    }

    /// Take a single step.
    ///
    /// `lap` and `V` must be the same as those passed to [`Self::new`].
    pub fn step<L, S>(&self, lap: &L, V: &Arr1<S>, q: &WaveFunction)
        -> WaveFunction
    where
        L: Laplacian,
        S: nd::Data<Elem = f64>,
    {
        match self {
            Self::Euler(dt) => euler(lap, V, q, *dt),
            Self::CrankNicolson(dt) => crank_nicolson(lap, V, q, *dt),
            Self::Rk4(dt) => rk4(lap, V, q, *dt),
            Self::Implicit(cn) => cn.step(q),
        }
    }
}
