pub mod assistant;
pub mod config;
pub mod error;
pub mod polling;
pub mod transport;

pub use error::{Error, ErrorKind, Result};
