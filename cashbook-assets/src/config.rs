//! Loads `assets.json` and applies environment overrides.

use std::path::{Path, PathBuf};

use cashbook_types::{AssetsConfig, ConfigError};

pub const DEFAULT_CONFIG_FILE: &str = "assets.json";

/// Overrides the build destination.
pub const ASSETS_DIR_ENV: &str = "CASHBOOK_ASSETS_DIR";
/// Overrides the proxied application server port.
pub const PORT_ENV: &str = "CASHBOOK_PORT";

/// Reads the config at `path`, or `assets.json` in the working directory
/// when no path is given. A missing default file means built-in defaults;
/// a missing explicit file is an error.
pub fn load_config(path: Option<&Path>) -> Result<AssetsConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                read_config(default)?
            } else {
                tracing::debug!("No {DEFAULT_CONFIG_FILE}, using defaults");
                AssetsConfig::default()
            }
        },
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    config.check()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<AssetsConfig, ConfigError> {
    let shown = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::from_io_error(&shown, &e))?;
    let config = AssetsConfig::from_json(&raw)?;
    tracing::info!("Loaded config from {shown}");
    Ok(config)
}

/// Applies `CASHBOOK_ASSETS_DIR` and `CASHBOOK_PORT` as returned by `lookup`.
pub fn apply_env_overrides(
    config: &mut AssetsConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(dir) = lookup(ASSETS_DIR_ENV).filter(|d| !d.is_empty()) {
        config.paths.dest = PathBuf::from(dir);
    }
    if let Some(port) = lookup(PORT_ENV) {
        config.serve.port = port.parse().map_err(|_| ConfigError::ValidationError {
            field: PORT_ENV.to_string(),
            message: format!("Invalid port number: {port}"),
        })?;
    }
    Ok(())
}
