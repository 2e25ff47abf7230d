//! Dispatch engine binary for the Wildgrove simulation.
//!
//! This is the main entry point that wires together the dispatch loop,
//! the stock prototype registry and ruleset, and the demonstration
//! grove. It loads configuration, initializes all subsystems, and runs
//! the dispatch loop until a termination condition is met.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `wildgrove-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Build the stock prototype registry and ruleset
//! 4. Seed the demonstration grove (setup operations queue up)
//! 5. Run the dispatch loop on a real-time interval
//! 6. Log the result

mod error;
mod scenario;

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use wildgrove_core::Simulation;
use wildgrove_core::config::WildgroveConfig;
use wildgrove_rules::Ruleset;
use wildgrove_world::{PrototypeRegistry, WorldState};

use crate::error::EngineError;

/// Configuration file expected at the working directory root.
const CONFIG_PATH: &str = "wildgrove-config.yaml";

/// Application entry point for the dispatch engine.
///
/// Initializes all subsystems and runs the dispatch loop. Returns an
/// error code on failure.
///
/// # Errors
///
/// Returns an error if any initialization step or the loop itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the config
    //    level, which itself was already overridden by WILDGROVE_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with_target(true)
        .init();

    info!("wildgrove-engine starting");
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        max_ops_per_idle = config.dispatch.max_ops_per_idle,
        cycle_interval_ms = config.dispatch.cycle_interval_ms,
        "Configuration loaded"
    );

    // 3. Build the stock registry and ruleset.
    let registry = PrototypeRegistry::stock();
    info!(prototypes = registry.len(), "Prototype registry built");

    let ruleset = Ruleset::stock();
    info!(handlers = ruleset.len(), "Ruleset registered");

    let world = WorldState::new(registry);
    let mut sim = Simulation::new(world, ruleset, &config.dispatch, config.world.seed);

    // 4. Seed the demonstration grove.
    let grove = scenario::seed_grove(&mut sim)?;
    info!(
        entities = sim.world().len(),
        acorns = grove.acorns.len(),
        "Grove seeded"
    );

    // 5. Run the dispatch loop.
    run_loop(&mut sim, &config).await?;

    // 6. Log the result.
    info!(
        sim_seconds = sim.now(),
        entities = sim.world().len(),
        queued = sim.queue_len(),
        "wildgrove-engine stopped"
    );
    Ok(())
}

/// Load configuration from `wildgrove-config.yaml`, falling back to
/// defaults when the file does not exist.
fn load_config() -> Result<WildgroveConfig, EngineError> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        Ok(WildgroveConfig::from_file(path)?)
    } else {
        Ok(WildgroveConfig::default())
    }
}

/// Drive the dispatch loop on a real-time interval until the configured
/// simulation horizon is reached or ctrl-c arrives.
///
/// Each cycle advances the simulation clock by the configured step, then
/// drains every operation that became due -- the loop keeps calling
/// `idle` while more are due, so a burst never waits for the next cycle.
async fn run_loop(sim: &mut Simulation, config: &WildgroveConfig) -> Result<(), EngineError> {
    let mut interval =
        tokio::time::interval(Duration::from_millis(config.dispatch.cycle_interval_ms));
    let max_sim_seconds = config.dispatch.max_sim_seconds;
    let mut cycle: u64 = 0;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown requested");
                return Ok(());
            }
            _ = interval.tick() => {
                let _ = sim.advance(config.dispatch.seconds_per_cycle)?;
                cycle = cycle.saturating_add(1);

                let mut dispatched: u32 = 0;
                let mut summary = sim.idle();
                dispatched = dispatched.saturating_add(summary.dispatched);
                while summary.more_due {
                    summary = sim.idle();
                    dispatched = dispatched.saturating_add(summary.dispatched);
                }

                if dispatched > 0 {
                    info!(
                        cycle,
                        sim_seconds = sim.now(),
                        dispatched,
                        queued = sim.queue_len(),
                        next_due_in = sim.seconds_until_next_op(),
                        "Cycle complete"
                    );
                } else {
                    debug!(cycle, sim_seconds = sim.now(), "Cycle idle");
                }

                if max_sim_seconds > 0.0 && sim.now() >= max_sim_seconds {
                    info!(sim_seconds = sim.now(), "Simulation horizon reached");
                    return Ok(());
                }
            }
        }
    }
}
