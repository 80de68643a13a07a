//! Stylesheet compilation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use cashbook_types::{AssetPaths, AssetsConfig, BuildError};

use super::files::{copy_if_newer, walk};
use super::tool::run_tool;
use super::Task;

/// An entry stylesheet and the CSS file it compiles to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub input: PathBuf,
    pub output: PathBuf,
}

fn is_entry(path: &Path) -> bool {
    let is_scss = path.extension().is_some_and(|e| e == "scss");
    let is_partial = path.file_name().and_then(|n| n.to_str()).is_some_and(|n| n.starts_with('_'));
    is_scss && !is_partial
}

/// Non-partial `.scss` files under the style roots, mapped into the
/// stylesheet destination with the same relative layout.
pub async fn entries(paths: &AssetPaths) -> Result<Vec<Entry>, BuildError> {
    let dest = paths.stylesheets_dest();
    let mut entries = Vec::new();
    for root in &paths.styles {
        for input in walk(root).await? {
            if !is_entry(&input) {
                continue;
            }
            let Ok(relative) = input.strip_prefix(root) else {
                continue;
            };
            let output = dest.join(relative).with_extension("css");
            entries.push(Entry { input, output });
        }
    }
    Ok(entries)
}

/// Compiler arguments for one entry.
pub fn arguments(config: &AssetsConfig, entry: &Entry) -> Vec<OsString> {
    let mut args: Vec<OsString> = config
        .paths
        .sass_load_paths
        .iter()
        .map(|p| {
            let mut arg = OsString::from("--load-path=");
            arg.push(p);
            arg
        })
        .collect();
    if config.production {
        args.push("--style=compressed".into());
        args.push("--no-source-map".into());
    } else {
        args.push("--embed-sources".into());
    }
    args.push(entry.input.clone().into());
    args.push(entry.output.clone().into());
    args
}

pub async fn compile(config: &AssetsConfig) -> Result<usize, BuildError> {
    let entries = entries(&config.paths).await?;
    if entries.is_empty() {
        tracing::warn!("No stylesheets found under {:?}", config.paths.styles);
    }
    for entry in &entries {
        if let Some(parent) = entry.output.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| BuildError::io(parent, &e))?;
        }
        run_tool(Task::Sass, &config.commands.sass, &arguments(config, entry)).await?;
        tracing::debug!("Compiled {}", entry.output.display());
    }
    Ok(entries.len())
}

/// Copies vendor CSS into the sources as importable partials:
/// `hopscotch.css` becomes `stylesheets/vendor/_hopscotch.scss`.
pub async fn vendor_css(paths: &AssetPaths) -> Result<usize, BuildError> {
    let vendor_dir = paths.src.join("stylesheets").join("vendor");
    let mut copied = 0;
    for file in &paths.vendor_css {
        let Some(stem) = file.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if copy_if_newer(file, &vendor_dir.join(format!("_{stem}.scss"))).await? {
            copied += 1;
        }
    }
    Ok(copied)
}
