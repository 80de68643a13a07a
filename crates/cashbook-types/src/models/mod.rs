//! Domain models shared by the widgets, the browser host and the asset CLI.

mod address;
mod balance;
mod config;

pub use address::Address;
pub use balance::BalanceSnapshot;
pub use config::{AssetPaths, AssetsConfig, ServeConfig, ToolCommands};
