//! # Cashbook Web
//!
//! Browser entry point. Wraps the live document in [`dom::WebDom`], mounts
//! the cashbook widgets on it and forwards browser events to them.

pub mod catalog;
pub mod dom;
pub mod fetch;
pub mod host;

use cashbook_core::{cashbook_registry, Page};
use wasm_bindgen::prelude::*;

use crate::catalog::DjangoCatalog;
use crate::dom::WebDom;
use crate::host::Host;

/// Version of the asset bundle, from `git describe` at build time.
pub const VERSION: &str = env!("CASHBOOK_ASSETS_VERSION");

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging (ignore error if already initialized)
    drop(console_log::init_with_level(log::Level::Info));

    log::info!("Cashbook assets {VERSION} starting...");

    let Some(dom) = WebDom::new() else {
        log::warn!("No document body, widgets not mounted");
        return Ok(());
    };

    let mut page = Page::new(dom);
    if let Some(catalog) = DjangoCatalog::from_window() {
        page = page.with_catalog(catalog);
    } else {
        log::debug!("No message catalogue, using English");
    }
    page.mount(cashbook_registry());
    log::debug!("{} handlers bound", page.bindings().len());

    let host = Host::new(page);
    host.listen()?;
    host.run_effects();
    Ok(())
}
