//! Runs external compilers and linters.

use std::ffi::OsString;

use cashbook_types::BuildError;
use tokio::process::Command;

use super::Task;

/// Runs `command` (program plus fixed arguments) followed by `args`.
///
/// Standard output is logged at debug level. A non-zero exit fails the
/// task with the last line of standard error.
pub async fn run_tool(task: Task, command: &[String], args: &[OsString]) -> Result<(), BuildError> {
    let Some((program, fixed)) = command.split_first() else {
        return Err(BuildError::TaskFailed {
            task: task.to_string(),
            message: "No command configured".to_string(),
        });
    };
    tracing::debug!(task = task.name(), "Running {program} {}", fixed.join(" "));

    let output = Command::new(program)
        .args(fixed)
        .args(args)
        .output()
        .await
        .map_err(|e| BuildError::ToolUnavailable { program: program.clone(), message: e.to_string() })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
        tracing::debug!(task = task.name(), "{line}");
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let summary = stderr.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or_default();
        return Err(BuildError::TaskFailed {
            task: task.to_string(),
            message: format!("{program} exited with {}: {summary}", output.status),
        });
    }
    Ok(())
}
