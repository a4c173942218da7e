#![allow(non_snake_case)]

//! Provides functions and higher-level constructs for numerical integration of
//! the one-dimensional, time-dependent Schrödinger equation for a single
//! particle in a static potential, producing a time series of probability
//! densities for visualization.
//!
//! Provides implementations for the following numerical routines:
//! - Laplacian estimators:
//!     - Pseudo-spectral (FFT, periodic)
//!     - Second-order central finite difference (periodic wrap)
//! - Time steppers:
//!     - Explicit Euler
//!     - "Crank-Nicolson" (an explicit update identical to Euler; see
//!       [`docs`])
//!     - Implicit Crank-Nicolson (Cayley form, unitary)
//!     - Fourth-order Runge-Kutta
//!
//! along with a small library of potentials, box-eigenstate initial
//! conditions, energy and probability diagnostics, and a
//! [driver][simulation::Simulation] that feeds density frames to a
//! [renderer][simulation::Renderer].
//!
//! See [`docs`] for theoretical background.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod grid;
pub mod initial;
pub mod laplacian;
pub mod potential;
pub mod simulation;
pub mod timedep;
pub mod utils;

pub mod docs;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;

pub use config::SimulationConfig;
pub use error::{ TError, TResult };
pub use simulation::{ create_simulation, FrameRecorder, Renderer, Simulation };
pub use timedep::{ Stepper, WaveFunction };
