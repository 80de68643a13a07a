//! Root asset pipeline configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::commands::ToolCommands;
use super::paths::AssetPaths;
use super::serve::ServeConfig;
use crate::error::ConfigError;

/// Full asset pipeline configuration, read from `assets.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct AssetsConfig {
    /// Source and destination trees
    #[serde(default)]
    #[validate(nested)]
    pub paths: AssetPaths,
    /// External tools invoked by tasks
    #[serde(default)]
    #[validate(nested)]
    pub commands: ToolCommands,
    /// Development server settings
    #[serde(default)]
    #[validate(nested)]
    pub serve: ServeConfig,
    /// Build minified assets without source maps
    #[serde(default)]
    pub production: bool,
}

impl AssetsConfig {
    /// Parse from JSON text and validate.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ConfigError::from_json_error(&e))?;
        config.check()?;
        Ok(config)
    }

    /// Run field validation, reporting the first failing field.
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate().map_err(|errors| {
            let field = errors
                .errors()
                .keys()
                .next()
                .map_or_else(|| "config".to_string(), |k| k.to_string());
            ConfigError::ValidationError { field, message: errors.to_string() }
        })
    }
}
