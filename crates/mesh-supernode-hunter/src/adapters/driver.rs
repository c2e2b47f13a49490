//! Cycle scheduler and completion loop.
//!
//! The driver owns the service behind a mutex. One task alternates between
//! the periodic cycle tick and draining correlator completions; each step
//! holds the lock for a single engine call and never across an await point.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::domain::QueryCompletion;
use crate::ports::CompletionHandler;
use crate::service::SupernodeHunterService;

/// Shortest cycle period the driver will schedule.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Runs the hunter: one `ping_cycle` per period plus completion delivery.
pub struct HunterDriver {
    service: Arc<Mutex<SupernodeHunterService>>,
    completions: mpsc::UnboundedReceiver<QueryCompletion>,
    period: Duration,
}

impl HunterDriver {
    /// Wrap a service and the completion channel of its correlator.
    ///
    /// The cycle period comes from the service's `HunterConfig`; a zero
    /// period is raised to one millisecond.
    pub fn new(
        service: SupernodeHunterService,
        completions: mpsc::UnboundedReceiver<QueryCompletion>,
    ) -> Self {
        let mut period = service.hunter().config().cycle_period();
        if period < MIN_PERIOD {
            warn!("Zero cycle period configured, using {}ms", MIN_PERIOD.as_millis());
            period = MIN_PERIOD;
        }
        Self {
            service: Arc::new(Mutex::new(service)),
            completions,
            period,
        }
    }

    /// Shared handle to the service, for registry calls while running.
    pub fn service(&self) -> Arc<Mutex<SupernodeHunterService>> {
        Arc::clone(&self.service)
    }

    /// Start the driver task on the current runtime.
    pub fn spawn(self) -> DriverHandle {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let service = self.service();
        let task = tokio::spawn(self.run(shutdown_rx));
        DriverHandle {
            service,
            shutdown: Some(shutdown_tx),
            task,
        }
    }

    /// Run until `shutdown` fires or its sender is dropped.
    ///
    /// The first cycle runs one period after start.
    pub async fn run(mut self, mut shutdown: oneshot::Receiver<()>) {
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;
        info!(period_ms = self.period.as_millis() as u64, "Supernode hunter started");

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    self.service.lock().ping_cycle();
                }
                Some(completion) = self.completions.recv() => {
                    // Errors are already logged and counted by the engine
                    let _ = self.service.lock().on_completion(completion);
                }
            }
        }

        self.completions.close();
        let dropped = std::iter::from_fn(|| self.completions.try_recv().ok()).count();
        info!(dropped, "Supernode hunter stopped");
    }
}

impl std::fmt::Debug for HunterDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HunterDriver")
            .field("period", &self.period)
            .finish_non_exhaustive()
    }
}

/// Handle to a running driver.
#[derive(Debug)]
pub struct DriverHandle {
    service: Arc<Mutex<SupernodeHunterService>>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl DriverHandle {
    /// Shared handle to the service.
    pub fn service(&self) -> &Arc<Mutex<SupernodeHunterService>> {
        &self.service
    }

    /// Run `f` with exclusive access to the service.
    pub fn with_service<R>(&self, f: impl FnOnce(&mut SupernodeHunterService) -> R) -> R {
        f(&mut self.service.lock())
    }

    /// Stop the driver and wait for its task to finish.
    ///
    /// Completions still in flight are discarded without touching the engine.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.task).await {
            warn!(error = %e, "Driver task ended abnormally");
        }
    }
}
