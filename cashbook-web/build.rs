//! Build script for the cashbook-web crate.

use std::process::Command;

/// Embeds the asset version shown in the browser console.
fn main() {
    // git describe when building from a checkout, else the package version
    let version = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_owned());

    println!("cargo:rustc-env=CASHBOOK_ASSETS_VERSION={version}");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
