use std::{ fs::{ self, File }, path::PathBuf };
use anyhow::Context;
use clap::Parser;
use log::info;
use ndarray as nd;
use ndarray_npy::NpzWriter;
use wellsim::{
    create_simulation,
    laplacian::LaplacianMethod,
    FrameRecorder,
    SimulationConfig,
    Stepper,
};

// evolve a single configuration and write the recorded densities to an .npz
// archive

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration; defaults are used if omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured time stepper.
    #[arg(short, long)]
    stepper: Option<Stepper>,

    /// Override the configured Laplacian method.
    #[arg(short, long)]
    method: Option<LaplacianMethod>,

    /// Record every `stride`-th frame.
    #[arg(long, default_value_t = 10)]
    stride: usize,

    /// Output archive.
    #[arg(short, long, default_value = "output/evolve.npz")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config: SimulationConfig
        = match &args.config {
            Some(path) => SimulationConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SimulationConfig::default(),
        };
    if let Some(stepper) = args.stepper { config.stepper = stepper; }
    if let Some(method) = args.method { config.method = method; }
    let dt = config.dt;

    let (sim, q0) = create_simulation(config)?;
    let e0 = sim.energy(&q0)?;
    let p0 = sim.probability(&q0);
    let mut recorder = FrameRecorder::new(args.stride);
    recorder.push(0, q0.density());
    let q = sim.run(q0, &mut recorder)?;
    let e1 = sim.energy(&q)?;
    let p1 = sim.probability(&q);
    info!("energy: {e0:.6e} -> {e1:.6e}");
    info!("probability: {p0:.6e} -> {p1:.6e}");

    let t: nd::Array1<f64>
        = recorder.get_steps().iter().map(|s| *s as f64 * dt).collect();
    if let Some(dir) = args.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let mut npz = NpzWriter::new(File::create(&args.output)?);
    npz.add_array("x", sim.get_grid().get_x())?;
    npz.add_array("v", sim.get_V())?;
    npz.add_array("t", &t)?;
    npz.add_array("density", &recorder.to_array())?;
    npz.add_array("energy", &nd::array![e0, e1])?;
    npz.add_array("probability", &nd::array![p0, p1])?;
    let (re, im) = q.into_parts();
    npz.add_array("re", &re)?;
    npz.add_array("im", &im)?;
    npz.finish()?;
    info!("wrote {} frames to {}", recorder.len(), args.output.display());
    Ok(())
}
