//! Domino Shuffle entry point
//!
//! Headless driver: loads parameters, runs the shuffle at a fixed frame
//! rate until the last iteration is tiled, then prints a JSON summary.
//!
//! Usage: `domino-shuffle [params.json] [colors|arrows]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::path::Path;

    use domino_shuffle::consts::{DEFAULT_SIM_SPEED, FRAME_DT, MAX_GENERATED_SEED};
    use domino_shuffle::{DisplayMode, PhaseClock, SimulationParams, Simulator};

    env_logger::init();
    log::info!("Domino Shuffle (native) starting...");

    let mut params_path = None;
    let mut display_mode = None;
    for arg in std::env::args().skip(1) {
        match DisplayMode::from_str(&arg) {
            Some(mode) => display_mode = Some(mode),
            None => params_path = Some(arg),
        }
    }

    let mut params = match params_path {
        Some(path) => SimulationParams::load(Path::new(&path))?,
        None => SimulationParams::with_seed(rand::random::<u64>() % MAX_GENERATED_SEED),
    };
    if let Some(mode) = display_mode {
        params.display_mode = mode;
    }
    log::info!(
        "Seed {}, {} iterations, bias {}, {} display",
        params.random_seed,
        params.max_iterations,
        params.random_bias_coef,
        params.display_mode.as_str()
    );

    let mut sim = Simulator::new(params)?;
    let mut clock = PhaseClock::new(DEFAULT_SIM_SPEED)?;
    clock.play();

    while sim.is_running() {
        if let Some(phase) = clock.tick(FRAME_DT) {
            sim.update(phase)?;
        }
        for event in sim.drain_events() {
            log::debug!("[phase {:.3}] {}", sim.phase(), event.name());
        }
    }
    clock.pause();

    let params = sim.params();
    let summary = serde_json::json!({
        "randomSeed": params.random_seed,
        "randomBiasCoef": params.random_bias_coef,
        "displayMode": params.display_mode.as_str(),
        "iterations": sim.iteration_index(),
        "phase": sim.phase(),
        "tiles": sim.tiles().len(),
        "directions": sim.direction_counts(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The engine is a library on wasm; embedders drive `Simulator` directly
}
