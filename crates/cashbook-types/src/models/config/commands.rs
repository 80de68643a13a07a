//! External tools invoked by the asset tasks.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Command lines for the external compilers and linters.
///
/// Each command is a program followed by its fixed arguments; tasks append
/// their own input/output arguments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(default)]
pub struct ToolCommands {
    /// Sass compiler, invoked as `<sass> [flags] <input> <output>`
    #[validate(length(min = 1_u64))]
    pub sass: Vec<String>,
    /// WASM bundler for the widget crate, invoked with the crate path and
    /// an `--out-dir`
    #[validate(length(min = 1_u64))]
    pub wasm_bundler: Vec<String>,
    /// Lint commands, each run in turn
    pub lint: Vec<Vec<String>>,
}

impl Default for ToolCommands {
    fn default() -> Self {
        Self {
            sass: vec!["sass".to_string()],
            wasm_bundler: vec![
                "wasm-pack".to_string(),
                "build".to_string(),
                "--target".to_string(),
                "web".to_string(),
                "--out-name".to_string(),
                "app".to_string(),
            ],
            lint: vec![vec![
                "cargo".to_string(),
                "clippy".to_string(),
                "-p".to_string(),
                "cashbook-web".to_string(),
                "--".to_string(),
                "-D".to_string(),
                "warnings".to_string(),
            ]],
        }
    }
}
