//! Asset pipeline errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the asset build tasks.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum BuildError {
    /// An external tool exited unsuccessfully
    #[error("Task {task} failed: {message}")]
    TaskFailed {
        /// Name of the failing task
        task: String,
        /// Exit status or stderr summary
        message: String,
    },

    /// An external tool could not be started at all
    #[error("Could not run {program}: {message}")]
    ToolUnavailable {
        /// Program that was looked up on PATH
        program: String,
        /// Description of the spawn failure
        message: String,
    },

    /// Filesystem operation failed while copying or cleaning assets
    #[error("IO error at {path}: {message}")]
    Io {
        /// Path being read or written
        path: String,
        /// Description of the IO failure
        message: String,
    },

    /// Source tree could not be watched for changes
    #[error("Cannot watch {path}: {message}")]
    Watch {
        /// Watched file or directory
        path: String,
        /// Description of the watcher failure
        message: String,
    },

    /// Task graph refers to a task twice on the same path
    #[error("Task dependency cycle through {task}")]
    DependencyCycle {
        /// Task at which the cycle was detected
        task: String,
    },
}

impl BuildError {
    /// Create an IO error for a path.
    pub fn io(path: &std::path::Path, e: &std::io::Error) -> Self {
        Self::Io { path: path.display().to_string(), message: e.to_string() }
    }

    /// Whether re-running the task could succeed without changing config.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::TaskFailed { .. } | Self::Io { .. })
    }
}
