pub mod envelope;
pub mod executor;
pub mod query;

pub use envelope::{ApiResponse, EnvelopeStatus};
pub use executor::RequestExecutor;
pub use query::QueryString;
