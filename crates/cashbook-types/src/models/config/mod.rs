//! Asset pipeline configuration models.

mod assets;
mod commands;
mod paths;
mod serve;

pub use assets::AssetsConfig;
pub use commands::ToolCommands;
pub use paths::AssetPaths;
pub use serve::ServeConfig;
