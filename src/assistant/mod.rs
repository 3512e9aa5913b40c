mod client;
pub mod timestamp;
mod types;

pub use client::{AssistantClient, StatusSource};
pub use types::*;
