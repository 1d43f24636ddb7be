mod config;

pub use config::{Config, PlannerConfig, ProjectionConfig};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns the configuration directory.
///
/// `BARPREP_CONFIG_DIR` wins when set. Otherwise `~/.config/barprep[-dev]/`,
/// selected by `BARPREP_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("BARPREP_CONFIG_DIR") {
        Some(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
        _ => {
            let base_dir = dirs::home_dir()
                .ok_or_else(|| ConfigError::NoConfigDir("home directory not found".into()))?
                .join(".config");

            let env = std::env::var("BARPREP_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("barprep-dev")
            } else {
                base_dir.join("barprep")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
