/*!
 * sched-sim - Main Entry Point
 *
 * Usage: sched-sim [workload.json]
 *
 * Settings come from SCHED_* environment variables (see `SimConfig`). With
 * SCHED_REALTIME=1 the run is paced by the tokio tick driver instead of
 * stepping as fast as possible.
 */

use anyhow::Context;
use parking_lot::Mutex;
use sched_sim::{
    init_tracing, monitoring::span_run, ChannelNotifier, SimConfig, Simulation, SimulationSummary,
    TickDriver, Workload,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, Instrument};

/// Give up after this many ticks
const MAX_STEPS: u64 = 1_000_000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = SimConfig::from_env().context("reading SCHED_* configuration")?;
    let workload = match std::env::args().nth(1) {
        Some(path) => Workload::from_file(&path)
            .with_context(|| format!("loading workload from {}", path))?,
        None => {
            info!("No workload file given, running the built-in demo");
            Workload::demo()
        }
    };

    let span = span_run(config.policy.as_str(), workload.processes.len());
    let summary = run(config, workload).instrument(span).await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

async fn run(config: SimConfig, workload: Workload) -> anyhow::Result<SimulationSummary> {
    info!(
        policy = %config.policy,
        tick_ms = config.tick_ms,
        quantum_ms = config.quantum_ms,
        "Starting simulation"
    );

    let notifier = Arc::new(ChannelNotifier::new(config.notify_capacity));
    let receivers: Vec<_> = workload
        .processes
        .iter()
        .map(|entry| notifier.register(entry.target()))
        .collect();

    let mut simulation = Simulation::from_config(&config, notifier.clone())?;
    simulation.load(&workload)?;

    let realtime = std::env::var("SCHED_REALTIME")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let summary = if realtime {
        run_realtime(simulation, Duration::from_millis(config.tick_ms)).await
    } else {
        simulation.run_until_idle(MAX_STEPS)
    };

    let delivered: usize = receivers.iter().map(|rx| rx.drain().count()).sum();
    if delivered != summary.completions.len() {
        warn!(
            "{} completions but {} notices delivered",
            summary.completions.len(),
            delivered
        );
    }

    Ok(summary)
}

/// Step on a wall-clock interval until the simulation drains
async fn run_realtime(simulation: Simulation, period: Duration) -> SimulationSummary {
    let simulation = Arc::new(Mutex::new(simulation));
    let driver = TickDriver::spawn(simulation.clone(), period);

    let mut poll = tokio::time::interval(period);
    loop {
        poll.tick().await;
        if simulation.lock().is_idle() {
            break;
        }
    }
    driver.shutdown().await;

    let summary = simulation.lock().summary();
    summary
}
