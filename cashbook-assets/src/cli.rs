use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::tasks::Task;

#[derive(Parser)]
#[command(
    name = "cashbook-assets",
    about = "Cashbook front-end assets - build pipeline and development server",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(long, global = true, env = "CASHBOOK_PRODUCTION", help = "Minify and skip source maps")]
    pub production: bool,

    #[arg(short, long, global = true, help = "Path to assets.json")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    #[command(about = "Build stylesheets, scripts and images (default if no command specified)")]
    Build,

    #[command(about = "Remove all built assets")]
    Clean,

    #[command(about = "Compile stylesheets")]
    Sass,

    #[command(about = "Bundle vendor scripts and the widget WASM module")]
    Scripts,

    #[command(about = "Copy images into the build tree")]
    Images,

    #[command(about = "Run the configured linters")]
    Lint,

    #[command(about = "Build, then serve assets and proxy the application server")]
    Serve {
        #[arg(short = 'H', long, help = "Application server host [default: localhost]")]
        host: Option<String>,

        #[arg(short, long, help = "Application server port [default: 8001]")]
        port: Option<u16>,

        #[arg(long, help = "Port the development server listens on [default: 3000]")]
        listen_port: Option<u16>,
    },
}

impl Commands {
    /// Task the command runs; `None` for `serve`.
    pub const fn task(&self) -> Option<Task> {
        match self {
            Self::Build => Some(Task::Build),
            Self::Clean => Some(Task::Clean),
            Self::Sass => Some(Task::Sass),
            Self::Scripts => Some(Task::Scripts),
            Self::Images => Some(Task::Images),
            Self::Lint => Some(Task::Lint),
            Self::Serve { .. } => None,
        }
    }
}
