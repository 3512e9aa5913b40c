mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use std::path::Path;
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads configuration from `CONFIG_PATH` (or `config.yaml`).
///
/// A missing default file falls back to built-in defaults; a path named
/// explicitly through `CONFIG_PATH` must exist. `ASSISTANT_API_URL`
/// overrides `api.base_url` either way.
pub async fn load() -> Result<Config> {
    let explicit = env::var("CONFIG_PATH").ok();
    let config_path = explicit
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let mut config = if explicit.is_none() && !Path::new(&config_path).exists() {
        debug!("No {} found, using default configuration", config_path);
        Config::default()
    } else {
        load_from(&config_path).await?
    };

    if let Ok(base_url) = env::var("ASSISTANT_API_URL") {
        debug!("Overriding base URL from ASSISTANT_API_URL: {}", base_url);
        config.api.base_url = base_url;
    }

    Ok(config)
}

pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    parse(&config_str)
}

pub fn parse(config_str: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(config_str)?;

    if config.api.base_url.trim().is_empty() {
        return Err(Error::config("api.base_url must not be empty"));
    }
    if config.api.timeout_secs == 0 {
        return Err(Error::config("api.timeout_secs must be greater than zero"));
    }
    if config.polling.interval_ms == 0 {
        return Err(Error::config("polling.interval_ms must be greater than zero"));
    }

    Ok(config)
}
