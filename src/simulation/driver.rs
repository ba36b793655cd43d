/*!
 * Tick Driver - Real-Time Pacing
 *
 * Runs a [`Simulation`] on a tokio interval so that each simulated tick
 * takes a fixed wall-clock period. New processes can be admitted while the
 * driver runs.
 *
 * # Shutdown
 *
 * - Preferred: `shutdown().await` sends a shutdown command and waits for
 *   the loop to exit. It consumes the handle.
 * - Fallback: dropping the handle without shutting down aborts the task and
 *   logs a warning.
 */

use super::Simulation;
use crate::process::ProcessRecord;
use log::{info, trace, warn};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Control messages for the driver task
#[derive(Debug, Clone)]
pub enum DriverCommand {
    /// Admit a process at the simulation's current time
    Admit(ProcessRecord),
    /// Stop stepping; commands are still processed
    Pause,
    Resume,
    Shutdown,
}

/// Handle to the background tick loop
pub struct TickDriver {
    command_tx: mpsc::UnboundedSender<DriverCommand>,
    handle: Option<tokio::task::JoinHandle<()>>,
    shutdown_initiated: Arc<AtomicBool>,
}

impl TickDriver {
    /// Spawn the loop, stepping `simulation` once every `period`
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(simulation: Arc<Mutex<Simulation>>, period: Duration) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let shutdown_initiated = Arc::new(AtomicBool::new(false));

        let handle = tokio::spawn(async move {
            run_tick_loop(simulation, period, command_rx).await;
        });

        info!("Tick driver spawned with {:?} period", period);

        Self {
            command_tx,
            handle: Some(handle),
            shutdown_initiated,
        }
    }

    /// Queue a process for admission; false if the loop is gone
    pub fn admit(&self, process: ProcessRecord) -> bool {
        self.command_tx.send(DriverCommand::Admit(process)).is_ok()
    }

    pub fn pause(&self) {
        let _ = self.command_tx.send(DriverCommand::Pause);
    }

    pub fn resume(&self) {
        let _ = self.command_tx.send(DriverCommand::Resume);
    }

    /// Stop the loop and wait for it to finish
    pub async fn shutdown(mut self) {
        self.shutdown_initiated.store(true, Ordering::SeqCst);
        let _ = self.command_tx.send(DriverCommand::Shutdown);

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Tick driver shutdown error: {}", e);
            } else {
                info!("Tick driver shutdown complete");
            }
        }
    }
}

async fn run_tick_loop(
    simulation: Arc<Mutex<Simulation>>,
    period: Duration,
    mut command_rx: mpsc::UnboundedReceiver<DriverCommand>,
) {
    let mut active = true;
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if active {
                    let report = simulation.lock().step();
                    trace!(
                        "Tick at {}ms: running={:?}",
                        report.now_ms,
                        report.running
                    );
                }
            }

            Some(cmd) = command_rx.recv() => {
                match cmd {
                    DriverCommand::Admit(process) => {
                        let pid = process.pid();
                        if let Err(e) = simulation.lock().admit(process) {
                            warn!("Admission of process {} refused: {}", pid, e);
                        }
                    }

                    DriverCommand::Pause => {
                        info!("Tick driver paused");
                        active = false;
                    }

                    DriverCommand::Resume => {
                        info!("Tick driver resumed");
                        active = true;
                    }

                    DriverCommand::Shutdown => {
                        info!("Tick driver shutting down");
                        break;
                    }
                }
            }
        }
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        if self.shutdown_initiated.load(Ordering::SeqCst) {
            return;
        }

        if let Some(handle) = self.handle.take() {
            warn!(
                "TickDriver dropped without calling shutdown() - aborting task. \
                 Use `driver.shutdown().await` for graceful cleanup."
            );
            handle.abort();
        }
    }
}
