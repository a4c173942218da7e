use std::{ fs, path::PathBuf };
use wellsim::{ create_simulation, SimulationConfig };

// every shipped configuration must load and set up a simulation

#[test]
fn shipped_configs_are_valid() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("configs");
    let mut count = 0;
    for entry in fs::read_dir(&dir).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
            let config = SimulationConfig::load(&path)
                .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
            let (sim, q0) = create_simulation(config)
                .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
            let q1 = sim.advance(&q0).unwrap();
            assert!(q1.is_finite(), "{}", path.display());
            count += 1;
        }
    }
    assert!(count > 0);
}
