//! Source and destination trees of the asset pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Where sources live and where built assets are written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(default)]
pub struct AssetPaths {
    /// Root of the asset sources
    pub src: PathBuf,
    /// Root of the built assets (served under `/static`)
    pub dest: PathBuf,
    /// Directories searched for `.scss` entry points (partials excluded)
    #[validate(length(min = 1_u64))]
    pub styles: Vec<PathBuf>,
    /// Extra Sass load paths
    pub sass_load_paths: Vec<PathBuf>,
    /// Vendor stylesheets copied verbatim
    pub vendor_css: Vec<PathBuf>,
    /// Vendor scripts concatenated into `vendor.js`
    pub vendor_scripts: Vec<PathBuf>,
    /// Crate directory of the browser widgets
    pub web_crate: PathBuf,
    /// Image source directories
    pub images: Vec<PathBuf>,
    /// Server templates, watched by `serve`
    pub templates: Vec<PathBuf>,
}

impl AssetPaths {
    pub fn stylesheets_dest(&self) -> PathBuf {
        self.dest.join("stylesheets")
    }

    pub fn scripts_dest(&self) -> PathBuf {
        self.dest.join("javascripts")
    }

    pub fn images_dest(&self) -> PathBuf {
        self.dest.join("images")
    }
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            src: PathBuf::from("mtp_cashbook/assets-src"),
            dest: PathBuf::from("mtp_cashbook/assets"),
            styles: vec![PathBuf::from("mtp_cashbook/assets-src/stylesheets")],
            sass_load_paths: vec![
                PathBuf::from("node_modules"),
                PathBuf::from("node_modules/govuk-frontend"),
            ],
            vendor_css: Vec::new(),
            vendor_scripts: Vec::new(),
            web_crate: PathBuf::from("cashbook-web"),
            images: vec![PathBuf::from("mtp_cashbook/assets-src/images")],
            templates: vec![PathBuf::from("mtp_cashbook/templates")],
        }
    }
}
