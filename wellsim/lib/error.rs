//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned from simulation setup and time-dependent solver functions.
#[derive(Debug, Error)]
pub enum TError {
    /// Returned when a configuration value or identifier is not recognized or
    /// out of range. Always raised before any time step is taken.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Returned when a non-finite value appears in the wavefunction after a
    /// time step.
    #[error("numerical instability: non-finite wavefunction values after step {step}")]
    NumericalInstability { step: usize },

    /// Returned when the implicit Crank-Nicolson system matrix cannot be
    /// factored.
    #[error("implicit Crank-Nicolson system matrix is singular")]
    SingularSystem,

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),

    /// [`std::io::Error`], from reading configuration files.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl TError {
    pub(crate) fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub(crate) fn check_length(length: f64) -> Result<(), Self> {
        (length.is_finite() && length > 0.0).then_some(())
            .ok_or_else(|| {
                Self::invalid(format!(
                    "grid length must be finite and greater than 0; got {length}"
                ))
            })
    }

    pub(crate) fn check_points(n: usize) -> Result<(), Self> {
        (n >= 2).then_some(())
            .ok_or_else(|| {
                Self::invalid(format!(
                    "grid must have at least 2 points; got {n}"
                ))
            })
    }

    pub(crate) fn check_dt(dt: f64) -> Result<(), Self> {
        (dt.is_finite() && dt > 0.0).then_some(())
            .ok_or_else(|| {
                Self::invalid(format!(
                    "time step must be finite and greater than 0; got {dt}"
                ))
            })
    }

    pub(crate) fn check_quantum_numbers(ns: &[usize]) -> Result<(), Self> {
        if ns.is_empty() {
            Err(Self::invalid("at least one quantum number is required"))
        } else if ns.contains(&0) {
            Err(Self::invalid("quantum numbers must be greater than 0"))
        } else {
            Ok(())
        }
    }

    /// Return `true` if `self` is `InvalidConfiguration`.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(..))
    }

    /// Return `true` if `self` is `NumericalInstability`.
    pub fn is_numerical_instability(&self) -> bool {
        matches!(self, Self::NumericalInstability { .. })
    }
}

pub type TResult<T> = Result<T, TError>;
