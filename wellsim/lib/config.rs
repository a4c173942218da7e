//! Run configuration.
//!
//! A [`SimulationConfig`] is an ordinary in-memory struct, but can also be
//! loaded from TOML. Missing keys take their [default][SimulationConfig::default]
//! values.
//!
//! ```
//! use wellsim::{ config::SimulationConfig, potential::Potential };
//!
//! let config = SimulationConfig::from_toml_str(r#"
//!     points = 128
//!     states = [1, 2]
//!     method = "finite-difference"
//!     stepper = "rk4"
//!     dt = 1e-5
//!     steps = 500
//!     potential = { kind = "barrier", v0 = 200.0, width = 0.05 }
//! "#).unwrap();
//! assert_eq!(config.potential, Potential::Barrier { v0: 200.0, width: 0.05 });
//! assert_eq!(config.length, 1.0);
//! ```

use std::{ fs, path::Path };
use serde::{ Deserialize, Serialize };
use crate::{
    error::{ TError, TResult },
    laplacian::LaplacianMethod,
    potential::Potential,
    timedep::Stepper,
};

/// All parameters for a single run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Box length *L*.
    pub length: f64,
    /// Number of grid points *N*.
    pub points: usize,
    /// Quantum numbers of the box eigenstates superposed in the initial state.
    pub states: Vec<usize>,
    /// Laplacian estimator.
    pub method: LaplacianMethod,
    /// Time stepping scheme.
    pub stepper: Stepper,
    /// Time step.
    pub dt: f64,
    /// Number of time steps to take.
    pub steps: usize,
    /// Static potential.
    // last, so that it is written as a trailing TOML table
    pub potential: Potential,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            length: 1.0,
            points: 256,
            states: vec![1],
            method: LaplacianMethod::Spectral,
            stepper: Stepper::Rk4,
            dt: 2e-6,
            steps: 5000,
            potential: Potential::Infinite,
        }
    }
}

impl SimulationConfig {
    /// Check all values, failing with [`TError::InvalidConfiguration`] on the
    /// first bad one.
    pub fn validate(&self) -> TResult<()> {
        TError::check_length(self.length)?;
        TError::check_points(self.points)?;
        TError::check_dt(self.dt)?;
        TError::check_quantum_numbers(&self.states)?;
        self.potential.validate()?;
        Ok(())
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> TResult<Self> {
        let config: Self
            = toml::from_str(s)
            .map_err(|e| TError::invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a configuration from a TOML file.
    pub fn load<P>(path: P) -> TResult<Self>
    where P: AsRef<Path>
    {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Serialize to a TOML string.
    pub fn to_toml_string(&self) -> TResult<String> {
        toml::to_string(self).map_err(|e| TError::invalid(e.to_string()))
    }

    /// Total simulated time, `steps * dt`.
    pub fn duration(&self) -> f64 { self.steps as f64 * self.dt }
}
