//! # Cashbook Core
//!
//! Page widgets of the cashbook front-end and the runtime they mount on.
//!
//! Widgets enhance server-rendered HTML. They are written against the
//! [`dom::Dom`] trait, so the same code runs in the browser (through
//! `cashbook-web`) and over [`dom::MemoryDom`] in tests.
//!
//! ## Architecture
//!
//! ```text
//! cashbook-core/src/
//! ├── dom/          # Dom trait, in-memory document, selector matching
//! ├── event/        # UI events, application events, event bus
//! ├── component/    # Component trait, registry, handler bindings
//! ├── page.rs       # Page: mounts components, dispatches and drains events
//! ├── widgets/      # Dialog, select-all, running total, disbursements, ...
//! ├── app.rs        # Composition root
//! ├── format.rs     # Money and sort code formatting
//! ├── i18n.rs       # Message catalogue
//! ├── effect.rs     # Host side effects (print, fetch, analytics)
//! └── simulate.rs   # Browser driver for acceptance tests
//! ```
//!
//! Widgets never call each other. They publish [`event::AppEvent`]s on the
//! page's bus and ask the host for browser-only work through
//! [`effect::Effect`]s.

#![allow(
    clippy::module_name_repetitions,
    reason = "Widget state types are named after their widget"
)]
// Test-only lints: allow panic!, float comparisons, etc. in test code
#![cfg_attr(test, allow(clippy::panic, clippy::float_cmp, clippy::needless_collect))]

pub mod app;
pub mod component;
pub mod dom;
pub mod effect;
pub mod event;
pub mod format;
pub mod i18n;
pub mod page;
pub mod simulate;
pub mod widgets;

// Re-export commonly used types
pub use app::cashbook_registry;
pub use component::{Component, Context, Registry};
pub use dom::{Dom, MemoryDom, NodeId};
pub use effect::Effect;
pub use event::{AppEvent, EventKind, EventType, Key, UiEvent};
pub use page::{Outcome, Page};
pub use simulate::Browser;
