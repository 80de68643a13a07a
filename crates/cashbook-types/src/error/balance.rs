//! Balance refresh errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ways the balance refresh request can fail.
///
/// Widgets never surface these to users beyond the fixed "Please try again
/// later" text; the variants exist for logging.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum BalanceError {
    /// Request could not be sent or was aborted
    #[error("Balance request failed: {message}")]
    Network {
        /// Transport-level description
        message: String,
    },

    /// Server answered with a non-success status
    #[error("Balance request returned HTTP {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// Response body was not a JSON object
    #[error("Balance response could not be decoded: {message}")]
    Decode {
        /// Decoder error message
        message: String,
    },
}
