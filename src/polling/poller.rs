use super::observer::StatusObserver;
use crate::{Error, Result, assistant::StatusSource};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    Running,
}

#[derive(Debug)]
struct PollerInner {
    state: PollerState,
    interval: Option<Duration>,
    cancel: Option<CancellationToken>,
    task: Option<JoinHandle<()>>,
}

impl PollerInner {
    fn release(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.interval = None;
        self.state = PollerState::Idle;
    }
}

/// Recurring status poll with an `Idle`/`Running` lifecycle.
///
/// Ticks never overlap: the next tick waits for the previous request to
/// resolve, and ticks missed meanwhile are skipped rather than queued.
/// Only `start` and `stop` touch the timer task, so a tick in flight can
/// never re-arm a poller that was stopped.
pub struct StatusPoller {
    source: Arc<dyn StatusSource>,
    observer: Arc<dyn StatusObserver>,
    inner: Mutex<PollerInner>,
}

impl StatusPoller {
    pub fn new(source: Arc<dyn StatusSource>, observer: Arc<dyn StatusObserver>) -> Self {
        Self {
            source,
            observer,
            inner: Mutex::new(PollerInner {
                state: PollerState::Idle,
                interval: None,
                cancel: None,
                task: None,
            }),
        }
    }

    /// Arms the poll at `interval`, replacing any schedule already running.
    /// The first tick fires immediately.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&self, interval: Duration) -> Result<()> {
        if interval.is_zero() {
            return Err(Error::validation("Polling interval must be greater than zero"));
        }
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| Error::config(format!("Status polling needs a Tokio runtime: {e}")))?;

        let mut inner = self.lock();
        if inner.state == PollerState::Running {
            debug!("Replacing running poll schedule");
            inner.release();
        }

        let cancel = CancellationToken::new();
        let task = runtime.spawn(poll_loop(
            Arc::clone(&self.source),
            Arc::clone(&self.observer),
            interval,
            cancel.clone(),
        ));

        inner.state = PollerState::Running;
        inner.interval = Some(interval);
        inner.cancel = Some(cancel);
        inner.task = Some(task);

        info!("Status polling started every {:?}", interval);
        Ok(())
    }

    /// Disarms the poll. Calling it while idle does nothing.
    pub fn stop(&self) {
        let mut inner = self.lock();
        if inner.state == PollerState::Idle {
            debug!("Status polling already stopped");
            return;
        }

        inner.release();
        info!("Status polling stopped");
    }

    pub fn state(&self) -> PollerState {
        self.lock().state
    }

    pub fn is_running(&self) -> bool {
        self.state() == PollerState::Running
    }

    pub fn interval(&self) -> Option<Duration> {
        self.lock().interval
    }

    fn lock(&self) -> MutexGuard<'_, PollerInner> {
        // Inner state stays consistent even if an observer panicked mid-tick
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        let inner = self.inner.get_mut().unwrap_or_else(PoisonError::into_inner);
        if inner.state == PollerState::Running {
            debug!("StatusPoller dropped while running; cancelling");
            inner.release();
        }
    }
}

async fn poll_loop(
    source: Arc<dyn StatusSource>,
    observer: Arc<dyn StatusObserver>,
    interval: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            outcome = source.fetch_status() => outcome,
        };

        if cancel.is_cancelled() {
            break;
        }

        match outcome {
            Ok(status) => observer.on_status(status),
            Err(e) => {
                warn!("Status poll failed: {}", e);
                observer.on_error(e);
            }
        }
    }

    debug!("Status poll loop exited");
}
