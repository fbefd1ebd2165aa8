mod config;
pub mod credentials;
pub mod database;
pub mod prefs;

pub use config::{Config, GatewayConfig, LoggingConfig, StudyConfig};
pub use database::Database;
pub use prefs::{KeyValueStore, MemoryStore, ENERGY_KEY, PREFERENCES_KEY};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/neurostudy[-dev]/` based on NEUROSTUDY_ENV.
///
/// Set NEUROSTUDY_ENV=dev to use the development data directory, or
/// NEUROSTUDY_DATA_DIR to use an explicit path.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("NEUROSTUDY_DATA_DIR") {
        Some(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("NEUROSTUDY_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("neurostudy-dev")
            } else {
                base_dir.join("neurostudy")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
