//! Headless runner that advances a randomized hex board on a fixed interval.

mod telemetry;

use anyhow::Result;
use hexlife_core::RunnerConfig;
use hexlife_world::Simulation;
use tokio::signal;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = RunnerConfig::load()?;
    config.validate()?;

    // Initialize telemetry
    telemetry::init_telemetry(config.otel_endpoint.as_deref())?;

    info!(
        "Starting hexlife runner on a {}x{} board (seed {})",
        config.board.width, config.board.height, config.board.seed
    );

    let mut simulation =
        Simulation::new(config.board.clone())?.with_census_interval(config.census_interval);

    tokio::select! {
        _ = run_tick_loop(&mut simulation, &config) => {
            info!("Tick limit reached");
        }
        _ = shutdown_signal() => {}
    }

    let census = simulation.board().census();
    info!(
        event = "runner_stopped",
        ticks = simulation.tick(),
        total_population = census.total_population,
        occupied_cells = census.occupied_cells,
        "Runner stopped"
    );

    // Shutdown telemetry
    telemetry::shutdown_telemetry();

    Ok(())
}

async fn run_tick_loop(simulation: &mut Simulation, config: &RunnerConfig) {
    let mut ticker = interval(Duration::from_millis(config.tick_interval_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        if let Some(max_ticks) = config.max_ticks {
            if simulation.tick() >= max_ticks {
                return;
            }
        }

        ticker.tick().await;
        simulation.step();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
