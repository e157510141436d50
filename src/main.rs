/*
 * Cockroach Swarm Simulation
 *
 * Thirty cockroaches wander a box following local rules: they mimic close
 * neighbours, keep out of each other's way, flee the light and turn back
 * at the walls. Hold the left mouse button to shine the light; press R to
 * respawn the swarm and Q to quit. Set RUST_LOG=debug to see steering
 * fallbacks.
 */

use anyhow::Result;
use tracing::info;

use cockroaches::app;
use cockroaches::SimulationParams;

fn main() -> Result<()> {
    init_tracing();

    // The model constructor cannot return an error, so check the block here
    let params = SimulationParams::default();
    params.validate()?;
    info!(
        cockroaches = params.swarm_size,
        width = params.arena_width,
        height = params.arena_height,
        tick_ms = params.tick_interval_ms,
        "starting cockroach swarm"
    );

    nannou::app(app::model).update(app::update).run();
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
