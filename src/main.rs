// src/main.rs - Telemetry simulator binary
use clap::Parser;
use std::sync::Arc;

use telemetry_sim::config::Config;
use telemetry_sim::journey::JourneyDriver;
use telemetry_sim::sink::StdoutSink;

#[derive(Debug, Parser)]
#[command(name = "telemetry-sim", about = "Correlated vehicle telemetry simulator")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "telemetry.toml")]
    config: String,

    /// Override the simulated device identity.
    #[arg(long)]
    device_id: Option<String>,

    /// Stop after this many synthesis rounds (default: run until
    /// interrupted).
    #[arg(long)]
    iterations: Option<u64>,

    /// Seed the random source for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Delay between rounds in milliseconds.
    #[arg(long)]
    pace_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config).map_err(|e| {
        tracing::error!("failed to load configuration from '{}': {}", cli.config, e);
        Box::new(e) as Box<dyn std::error::Error + Send + Sync + 'static>
    })?;
    if let Some(device_id) = cli.device_id {
        config.simulation.device_id = device_id;
    }
    if let Some(iterations) = cli.iterations {
        config.simulation.max_iterations = Some(iterations);
    }
    if let Some(seed) = cli.seed {
        config.simulation.seed = Some(seed);
    }
    if let Some(pace_ms) = cli.pace_ms {
        config.simulation.pace_ms = pace_ms;
    }
    config.validate()?;

    tracing::info!(
        device_id = %config.simulation.device_id,
        bootstrap = %config.transport.bootstrap_servers,
        "starting telemetry simulator"
    );
    tracing::info!(
        origin = ?(config.route.origin.latitude, config.route.origin.longitude),
        destination = ?(config.route.destination.latitude, config.route.destination.longitude),
        steps = config.route.step_count,
        "route configured"
    );

    let mut driver = JourneyDriver::new(&config, Arc::new(StdoutSink::new()));
    let shutdown = driver.shutdown_handle();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, stopping after the current round");
            shutdown.signal();
        }
    });

    match driver.run().await {
        Ok(report) if report.cancelled => {
            tracing::info!(rounds = report.rounds, "simulation ended by the user");
            Ok(())
        }
        Ok(report) => {
            tracing::info!(
                rounds = report.rounds,
                events = report.events_delivered,
                failures = report.delivery_failures,
                "simulation complete"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("simulation ended unexpectedly: {}", e);
            Err(Box::new(e) as Box<dyn std::error::Error + Send + Sync + 'static>)
        }
    }
}
