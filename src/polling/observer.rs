use crate::{Error, assistant::AssistantStatus};
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

/// Receives the outcome of every poll tick: exactly one call per tick,
/// made after that tick's request has resolved.
pub trait StatusObserver: Send + Sync {
    fn on_status(&self, status: AssistantStatus);
    fn on_error(&self, error: Error);
}

#[derive(Debug, Clone)]
pub enum PollEvent {
    Status(AssistantStatus),
    Error(Error),
}

impl PollEvent {
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status(_))
    }
}

impl StatusObserver for UnboundedSender<PollEvent> {
    fn on_status(&self, status: AssistantStatus) {
        if self.send(PollEvent::Status(status)).is_err() {
            warn!("Poll event receiver dropped, status update lost");
        }
    }

    fn on_error(&self, error: Error) {
        if let Err(e) = self.send(PollEvent::Error(error)) {
            warn!("Poll event receiver dropped, error lost: {:?}", e.0);
        }
    }
}

/// Adapts a pair of closures into a `StatusObserver`.
pub struct FnObserver<S, E> {
    on_status: S,
    on_error: E,
}

impl<S, E> FnObserver<S, E>
where
    S: Fn(AssistantStatus) + Send + Sync,
    E: Fn(Error) + Send + Sync,
{
    pub fn new(on_status: S, on_error: E) -> Self {
        Self {
            on_status,
            on_error,
        }
    }
}

impl<S, E> StatusObserver for FnObserver<S, E>
where
    S: Fn(AssistantStatus) + Send + Sync,
    E: Fn(Error) + Send + Sync,
{
    fn on_status(&self, status: AssistantStatus) {
        (self.on_status)(status)
    }

    fn on_error(&self, error: Error) {
        (self.on_error)(error)
    }
}
