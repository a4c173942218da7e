use std::ops::ControlFlow;
use ndarray as nd;
use wellsim::{
    create_simulation,
    potential::Potential,
    SimulationConfig,
    Stepper,
};

// a superposition of the two lowest box states starts out mostly in the left
// half of the box; watch it leak through a thin central barrier

fn main() {
    let config = SimulationConfig {
        points: 256,
        states: vec![1, 2],
        stepper: Stepper::Rk4,
        dt: 2e-6,
        steps: 200_000,
        potential: Potential::Barrier { v0: 500.0, width: 0.01 },
        ..SimulationConfig::default()
    };
    let (sim, q0) = create_simulation(config).unwrap();
    let n = sim.get_grid().len();
    let dt = sim.get_config().dt;

    let left = |rho: &nd::Array1<f64>| -> f64 {
        rho.slice(nd::s![..n / 2]).sum() / rho.sum()
    };
    println!("{:>10}  {:>10}", "t", "P(left)");
    println!("{:>10.4}  {:>10.6}", 0.0, left(&q0.density()));
    let mut report = |step: usize, rho: &nd::Array1<f64>| -> ControlFlow<()> {
        if step % 10_000 == 0 {
            println!("{:>10.4}  {:>10.6}", step as f64 * dt, left(rho));
        }
        ControlFlow::Continue(())
    };
    let q = sim.run(q0, &mut report).unwrap();
    println!("final energy: {:.6}", sim.energy(&q).unwrap());
}
