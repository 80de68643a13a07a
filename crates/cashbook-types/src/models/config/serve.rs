//! Development server settings.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// `serve` proxies the application server and serves built assets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct ServeConfig {
    /// Host of the application server being proxied
    #[serde(default = "default_host")]
    #[validate(length(min = 1_u64))]
    pub host: String,
    /// Port of the application server being proxied
    #[serde(default = "default_port")]
    #[validate(range(min = 1_u16))]
    pub port: u16,
    /// Port the development server listens on
    #[serde(default = "default_listen_port")]
    #[validate(range(min = 1_u16))]
    pub listen_port: u16,
    /// Quiet period after a source change before rebuilding
    #[serde(default = "default_debounce_ms")]
    #[validate(range(min = 10_u64, max = 10_000_u64))]
    pub debounce_ms: u64,
}

fn default_host() -> String {
    "localhost".to_string()
}

const fn default_port() -> u16 {
    8001
}

const fn default_listen_port() -> u16 {
    3000
}

const fn default_debounce_ms() -> u64 {
    200
}

impl ServeConfig {
    /// Base URL of the proxied application server.
    pub fn upstream_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            listen_port: default_listen_port(),
            debounce_ms: default_debounce_ms(),
        }
    }
}
