use std::{ ops::ControlFlow, path::PathBuf };
use anyhow::Context;
use clap::Parser;
use log::{ info, warn };
use ndarray as nd;
use wellsim::{
    create_simulation,
    diagnostics::drift,
    timedep::IMPLICIT_MAX_POINTS,
    SimulationConfig,
    Stepper,
    TError,
};

// run the same configuration under every stepper and report how well each one
// conserves total probability and energy

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration; defaults are used if omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured number of steps.
    #[arg(short = 'n', long)]
    steps: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut base: SimulationConfig
        = match &args.config {
            Some(path) => SimulationConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SimulationConfig::default(),
        };
    if let Some(steps) = args.steps { base.steps = steps; }

    println!("{:>24}  {:>12}  {:>12}", "stepper", "d(prob)", "d(energy)");
    for stepper in Stepper::ALL {
        if stepper.is_implicit() && base.points > IMPLICIT_MAX_POINTS {
            warn!(
                "skipping {stepper}: {} points is too many for a dense propagator",
                base.points,
            );
            continue;
        }
        let config = SimulationConfig { stepper, ..base.clone() };
        let (sim, q0) = create_simulation(config)?;
        let p0 = sim.probability(&q0);
        let e0 = sim.energy(&q0)?;
        let mut ignore = |_: usize, _: &nd::Array1<f64>| -> ControlFlow<()> {
            ControlFlow::Continue(())
        };
        match sim.run(q0, &mut ignore) {
            Ok(q) => {
                let dp = drift(p0, sim.probability(&q));
                let de = drift(e0, sim.energy(&q)?);
                println!("{:>24}  {:>+12.3e}  {:>+12.3e}", stepper, dp, de);
            },
            Err(TError::NumericalInstability { step }) => {
                warn!("{stepper} diverged");
                println!("{:>24}  {:>12}  {:>12}", stepper, "unstable", step);
            },
            Err(err) => { return Err(err.into()); },
        }
    }
    info!("compared {} steppers over t = {:e}", Stepper::ALL.len(), base.duration());
    Ok(())
}
