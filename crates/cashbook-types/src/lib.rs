//! # Cashbook Types
//!
//! Shared models, configuration and error definitions for the cashbook
//! front-end assets.
//!
//! - **`error`** - Typed error hierarchy for configuration, asset builds and
//!   balance refreshes
//! - **`models`** - Asset pipeline configuration, balance snapshots and
//!   address data carried in server markup
//!
//! ## Architecture Role
//!
//! ```text
//!                cashbook-types (this crate)
//!                        │
//!           ┌────────────┴────────────┐
//!           ▼                         ▼
//!     cashbook-core            cashbook-assets
//!           │
//!           ▼
//!     cashbook-web
//! ```

pub mod error;
pub mod models;

pub use error::{BalanceError, BuildError, ConfigError, Result, TypedError};

pub use models::{Address, AssetPaths, AssetsConfig, BalanceSnapshot, ServeConfig, ToolCommands};
