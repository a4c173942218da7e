//! End-to-end behavior of the simulation driver.

use std::ops::ControlFlow;
use ndarray as nd;
use wellsim::{
    create_simulation,
    laplacian::LaplacianMethod,
    potential::Potential,
    FrameRecorder,
    SimulationConfig,
    Stepper,
    TError,
};

mod common;
use common::{ ignore, init_logger };

#[test]
fn every_combination_preserves_shape() {
    init_logger();
    for method in [LaplacianMethod::Spectral, LaplacianMethod::FiniteDifference] {
        for stepper in Stepper::ALL {
            let config = SimulationConfig {
                points: 32,
                states: vec![1, 2],
                method,
                stepper,
                dt: 1e-5,
                steps: 5,
                potential: Potential::Infinite,
                ..SimulationConfig::default()
            };
            let (sim, q0) = create_simulation(config).unwrap();
            let mut rec = FrameRecorder::new(1);
            let q = sim.run(q0, &mut rec).unwrap();
            assert_eq!(q.len(), 32, "{method}/{stepper}");
            assert_eq!(q.get_re().len(), q.get_im().len());
            assert_eq!(rec.to_array().dim(), (5, 32), "{method}/{stepper}");
            assert!(q.is_finite());
        }
    }
}

#[test]
fn euler_blows_up_against_the_wall() {
    init_logger();
    let config = SimulationConfig {
        points: 64,
        stepper: Stepper::Euler,
        dt: 1e-2,
        steps: 1000,
        potential: Potential::Infinite,
        ..SimulationConfig::default()
    };
    let (sim, q0) = create_simulation(config).unwrap();
    let mut frames = 0;
    let mut count = |_: usize, _: &nd::Array1<f64>| -> ControlFlow<()> {
        frames += 1;
        ControlFlow::Continue(())
    };
    match sim.run(q0, &mut count) {
        Err(TError::NumericalInstability { step }) => {
            assert!(step > 1 && step <= 1000);
            assert_eq!(frames, step - 1);
        },
        other => panic!("expected numerical instability, got {other:?}"),
    }
}

#[test]
fn advance_and_run_agree() {
    init_logger();
    let config = SimulationConfig {
        points: 64,
        dt: 1e-5,
        steps: 10,
        potential: Potential::Barrier { v0: 100.0, width: 0.1 },
        ..SimulationConfig::default()
    };
    let (sim, q0) = create_simulation(config).unwrap();
    let by_hand = (0..10).try_fold(q0.clone(), |q, _| sim.advance(&q)).unwrap();
    let by_run = sim.run(q0, &mut ignore).unwrap();
    assert_eq!(by_hand, by_run);
}

#[test]
fn energy_does_not_modify_state() {
    let (sim, q0) = create_simulation(SimulationConfig {
        points: 64,
        potential: Potential::Coulomb { q1: -1.0, q2: 1.0 },
        ..SimulationConfig::default()
    }).unwrap();
    let copy = q0.clone();
    let e1 = sim.energy(&q0).unwrap();
    let e2 = sim.energy(&q0).unwrap();
    assert_eq!(e1, e2);
    assert_eq!(q0, copy);
}

#[test]
fn unknown_identifiers_fail_before_stepping() {
    let err = "harmonic".parse::<Potential>().unwrap_err();
    assert!(err.is_invalid_configuration());
    let err = "chebyshev".parse::<LaplacianMethod>().unwrap_err();
    assert!(err.is_invalid_configuration());
    let err = "leapfrog".parse::<Stepper>().unwrap_err();
    assert!(err.is_invalid_configuration());
    let err = SimulationConfig::from_toml_str(
        "[potential]\nkind = \"harmonic\"\n").unwrap_err();
    assert!(err.is_invalid_configuration());
}

#[test]
fn initial_density_and_potential_are_exposed() {
    let (sim, q0) = create_simulation(SimulationConfig {
        points: 128,
        potential: Potential::Delta { v0: 3.0 },
        ..SimulationConfig::default()
    }).unwrap();
    let dx = sim.get_grid().get_dx();
    assert_eq!(q0.density().len(), 128);
    assert_eq!(sim.get_V().len(), 128);
    assert!((sim.get_V().sum() * dx - 3.0).abs() < 1e-12);
    assert!((sim.probability(&q0) - 1.0).abs() < 1e-9);
}
