//! Vendor script bundle and the widget WASM module.

use std::ffi::OsString;
use std::path::Path;

use cashbook_types::{AssetsConfig, BuildError};
use tokio::fs;

use super::tool::run_tool;
use super::Task;

pub const VENDOR_BUNDLE: &str = "vendor.js";

/// Concatenates the vendor scripts, in configured order, into `dest`.
/// Writes nothing when no vendor scripts are configured.
pub async fn concat_vendor(sources: &[impl AsRef<Path>], dest: &Path) -> Result<bool, BuildError> {
    if sources.is_empty() {
        return Ok(false);
    }
    let mut bundle = String::new();
    for source in sources {
        let source = source.as_ref();
        let text = fs::read_to_string(source).await.map_err(|e| BuildError::io(source, &e))?;
        bundle.push_str(&format!("/* {} */\n", source.display()));
        bundle.push_str(text.trim_end());
        bundle.push_str(";\n");
    }
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).await.map_err(|e| BuildError::io(parent, &e))?;
    }
    fs::write(dest, bundle).await.map_err(|e| BuildError::io(dest, &e))?;
    Ok(true)
}

/// Bundler arguments after the configured command.
///
/// `out_dir` must be absolute: wasm-pack resolves it against the crate.
pub fn bundler_arguments(production: bool, web_crate: &Path, out_dir: &Path) -> Vec<OsString> {
    vec![
        if production { "--release" } else { "--dev" }.into(),
        "--out-dir".into(),
        out_dir.into(),
        web_crate.into(),
    ]
}

pub async fn build(config: &AssetsConfig) -> Result<(), BuildError> {
    let out_dir = config.paths.scripts_dest();
    fs::create_dir_all(&out_dir).await.map_err(|e| BuildError::io(&out_dir, &e))?;
    let out_dir = fs::canonicalize(&out_dir).await.map_err(|e| BuildError::io(&out_dir, &e))?;

    if concat_vendor(&config.paths.vendor_scripts, &out_dir.join(VENDOR_BUNDLE)).await? {
        tracing::debug!("Wrote {VENDOR_BUNDLE} from {} scripts", config.paths.vendor_scripts.len());
    }

    let args = bundler_arguments(config.production, &config.paths.web_crate, &out_dir);
    run_tool(Task::Scripts, &config.commands.wasm_bundler, &args).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_concat_keeps_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = dir.path().join("jquery.js");
        let b = dir.path().join("hopscotch.js");
        std::fs::write(&a, "var jq = 1\n").expect("write");
        std::fs::write(&b, "var hs = 2").expect("write");
        let dest = dir.path().join("out/vendor.js");

        assert!(concat_vendor(&[&a, &b], &dest).await.expect("concat"));
        let bundle = std::fs::read_to_string(&dest).expect("read");
        let jq = bundle.find("var jq = 1;").expect("first script");
        let hs = bundle.find("var hs = 2;").expect("second script");
        assert!(jq < hs);
    }

    #[tokio::test]
    async fn test_no_vendor_scripts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("vendor.js");
        let none: [&Path; 0] = [];
        assert!(!concat_vendor(&none, &dest).await.expect("concat"));
        assert!(!dest.exists());
    }

    #[test]
    fn test_bundler_arguments() {
        let args = bundler_arguments(true, Path::new("cashbook-web"), Path::new("/srv/js"));
        assert_eq!(args, ["--release", "--out-dir", "/srv/js", "cashbook-web"].map(OsString::from));
        assert_eq!(
            bundler_arguments(false, Path::new("w"), Path::new("/o")).first(),
            Some(&OsString::from("--dev"))
        );
    }
}
