//! High-level driver tying a [`SimulationConfig`] to a time series of
//! probability densities.
//!
//! The driver owns everything that is fixed for the duration of a run (grid,
//! potential, Laplacian operator, prepared stepper); the evolving
//! [`WaveFunction`] is owned by the caller and passed in and out of
//! [`Simulation::advance`].
//!
//! ```
//! use wellsim::{ config::SimulationConfig, simulation::create_simulation };
//!
//! let config = SimulationConfig { points: 64, steps: 10, ..Default::default() };
//! let (sim, q0) = create_simulation(config).unwrap();
//! let q1 = sim.advance(&q0).unwrap();
//! assert_eq!(q1.len(), 64);
//! assert!(sim.energy(&q1).unwrap().is_finite());
//! ```

use std::ops::ControlFlow;
use log::{ debug, error, info, warn };
use ndarray as nd;
use crate::{
    config::SimulationConfig,
    diagnostics::{ drift, expected_energy, total_probability },
    error::{ LengthError, TError, TResult },
    grid::Grid,
    initial::initial_state,
    laplacian::LaplacianOp,
    timedep::{ Integrator, WaveFunction },
};

/// Relative change in total probability above which [`Simulation::run`] logs
/// a warning.
pub const DRIFT_WARN: f64 = 1e-2;

/// Receives each frame of a run. This is the interface for plotting and
/// animation code, which lives outside this crate.
pub trait Renderer {
    /// Called once per time step with the step index (starting at 1) and the
    /// probability density after that step.
    ///
    /// Returning `ControlFlow::Break(())` ends the run early.
    fn frame(&mut self, step: usize, density: &nd::Array1<f64>)
        -> ControlFlow<()>;
}

impl<F> Renderer for F
where F: FnMut(usize, &nd::Array1<f64>) -> ControlFlow<()>
{
    fn frame(&mut self, step: usize, density: &nd::Array1<f64>)
        -> ControlFlow<()>
    {
        self(step, density)
    }
}

/// A [`Renderer`] that records every `stride`-th density.
#[derive(Clone, Debug)]
pub struct FrameRecorder {
    stride: usize,
    steps: Vec<usize>,
    frames: Vec<nd::Array1<f64>>,
}

impl FrameRecorder {
    /// Create a new recorder keeping every `stride`-th frame (`stride = 0` is
    /// treated as 1).
    pub fn new(stride: usize) -> Self {
        Self { stride: stride.max(1), steps: Vec::new(), frames: Vec::new() }
    }

    /// Record a frame unconditionally.
    pub fn push(&mut self, step: usize, density: nd::Array1<f64>) {
        self.steps.push(step);
        self.frames.push(density);
    }

    /// Get the step indices of recorded frames.
    pub fn get_steps(&self) -> &[usize] { &self.steps }

    /// Number of recorded frames.
    pub fn len(&self) -> usize { self.frames.len() }

    /// Return `true` if no frames have been recorded.
    pub fn is_empty(&self) -> bool { self.frames.is_empty() }

    /// Stack all recorded frames into a 2D array, with the first axis indexing
    /// time.
    pub fn to_array(&self) -> nd::Array2<f64> {
        let n = self.frames.first().map(|f| f.len()).unwrap_or(0);
        let mut out: nd::Array2<f64> = nd::Array2::zeros((self.frames.len(), n));
        out.axis_iter_mut(nd::Axis(0)).zip(&self.frames)
            .for_each(|(mut row, f)| { row.assign(f); });
        out
    }
}

impl Renderer for FrameRecorder {
    fn frame(&mut self, step: usize, density: &nd::Array1<f64>)
        -> ControlFlow<()>
    {
        if step % self.stride == 0 { self.push(step, density.clone()); }
        ControlFlow::Continue(())
    }
}

/// Everything held fixed over a run.
#[derive(Clone, Debug)]
pub struct Simulation {
    config: SimulationConfig,
    grid: Grid,
    V: nd::Array1<f64>,
    lap: LaplacianOp,
    integrator: Integrator,
}

impl Simulation {
    /// Validate a configuration and prepare all fixed quantities.
    pub fn new(config: SimulationConfig) -> TResult<Self> {
        config.validate()?;
        let grid = Grid::new(config.length, config.points)?;
        let V = config.potential.try_sample(&grid)?;
        let lap = LaplacianOp::new(config.method, &grid);
        debug!(
            "grid: L = {}, N = {}, dx = {:e}; potential: {}; laplacian: {}",
            grid.get_L(), grid.len(), grid.get_dx(),
            config.potential, config.method,
        );
        let integrator = Integrator::new(config.stepper, &lap, &V, config.dt)?;
        debug!("stepper: {}; dt = {:e}", config.stepper, config.dt);
        Ok(Self { config, grid, V, lap, integrator })
    }

    /// Build the initial state from the configured quantum numbers.
    pub fn initial_state(&self) -> TResult<WaveFunction> {
        initial_state(self.grid.get_x(), self.grid.get_L(), &self.config.states)
    }

    /// Get a reference to the configuration.
    pub fn get_config(&self) -> &SimulationConfig { &self.config }

    /// Get a reference to the grid.
    pub fn get_grid(&self) -> &Grid { &self.grid }

    /// Get a reference to the sampled potential.
    pub fn get_V(&self) -> &nd::Array1<f64> { &self.V }

    /// Advance a state by one time step.
    ///
    /// Fails with [`TError::Length`] if `q` does not match the grid, or
    /// [`TError::NumericalInstability`] if the new state contains non-finite
    /// values.
    pub fn advance(&self, q: &WaveFunction) -> TResult<WaveFunction> {
        self.advance_step(q, 1)
    }

    fn advance_step(&self, q: &WaveFunction, step: usize)
        -> TResult<WaveFunction>
    {
        self.check_len(q)?;
        let next = self.integrator.step(&self.lap, &self.V, q);
        if !next.is_finite() {
            error!(
                "{} produced non-finite values at step {step} (dt = {:e})",
                self.config.stepper, self.config.dt,
            );
            return Err(TError::NumericalInstability { step });
        }
        Ok(next)
    }

    fn check_len(&self, q: &WaveFunction) -> Result<(), LengthError> {
        let n = self.grid.len();
        (q.len() == n).then_some(()).ok_or(LengthError(n, q.len()))
    }

    /// Compute the expected energy of a state without modifying it.
    ///
    /// Fails with [`TError::Length`] if `q` does not match the grid.
    pub fn energy(&self, q: &WaveFunction) -> TResult<f64> {
        self.check_len(q)?;
        Ok(expected_energy(&self.lap, &self.V, q))
    }

    /// Compute the total probability of a state.
    pub fn probability(&self, q: &WaveFunction) -> f64 {
        total_probability(q, self.grid.get_dx())
    }

    /// Advance a state for the configured number of steps, passing the density
    /// after each step to `renderer`, and return the final state.
    ///
    /// The run ends early without error if the renderer breaks.
    pub fn run<R>(&self, q0: WaveFunction, renderer: &mut R)
        -> TResult<WaveFunction>
    where R: Renderer + ?Sized
    {
        let p0 = self.probability(&q0);
        let e0 = self.energy(&q0)?;
        info!(
            "running {} steps of {} ({}) for t = {:e}",
            self.config.steps, self.config.stepper, self.config.method,
            self.config.duration(),
        );
        let mut q = q0;
        let mut warned = false;
        for step in 1..=self.config.steps {
            q = self.advance_step(&q, step)?;
            let density = q.density();
            let d = drift(p0, density.sum() * self.grid.get_dx());
            if !warned && d.abs() > DRIFT_WARN {
                warn!("total probability drifted by {:+.3e} at step {step}", d);
                warned = true;
            }
            if renderer.frame(step, &density).is_break() {
                info!("renderer stopped the run at step {step}");
                return Ok(q);
            }
        }
        info!(
            "done: probability drift {:+.3e}, energy drift {:+.3e}",
            drift(p0, self.probability(&q)), drift(e0, self.energy(&q)?),
        );
        Ok(q)
    }
}

/// Validate a configuration and return the prepared [`Simulation`] along with
/// the initial state.
///
/// The initial density, grid, and potential are available through
/// [`WaveFunction::density`], [`Simulation::get_grid`], and
/// [`Simulation::get_V`].
pub fn create_simulation(config: SimulationConfig)
    -> TResult<(Simulation, WaveFunction)>
{
    let sim = Simulation::new(config)?;
    let q0 = sim.initial_state()?;
    Ok((sim, q0))
}
