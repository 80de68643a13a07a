//! Typed error definitions for the cashbook assets.
//!
//! All errors are:
//!
//! - **Serializable** via serde, so the WASM host can log them as JSON
//! - **Displayable** for logging via Display trait
//! - **Matchable** for error handling logic via enum variants

mod balance;
mod build;
mod config;

pub use balance::BalanceError;
pub use build::BuildError;
pub use config::ConfigError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type that wraps all domain-specific errors.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "domain", content = "error")]
pub enum TypedError {
    /// Wraps a configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Wraps an asset build error
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Wraps a balance refresh error
    #[error("Balance error: {0}")]
    Balance(#[from] BalanceError),
}

/// Standard Result type using TypedError.
pub type Result<T> = std::result::Result<T, TypedError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = TypedError::Build(BuildError::TaskFailed {
            task: "sass".to_string(),
            message: "exit status 1".to_string(),
        });

        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("Build"));
        assert!(json.contains("sass"));

        let deserialized: TypedError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, deserialized);
    }

    #[test]
    fn test_error_display() {
        let err = BalanceError::Status { status: 503 };
        assert!(format!("{}", TypedError::from(err)).contains("503"));
    }
}
