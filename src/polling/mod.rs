mod observer;
mod poller;

pub use observer::{FnObserver, PollEvent, StatusObserver};
pub use poller::{PollerState, StatusPoller};
