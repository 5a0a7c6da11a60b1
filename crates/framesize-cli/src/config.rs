//! CLI configuration via environment variables
//!
//! Sizer parameters come from framesize.toml (see `framesize-config`); this
//! only covers presentation switches.

use std::env;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Default to JSON output (FRAMESIZE_JSON=1)
    pub default_json: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            default_json: env::var("FRAMESIZE_JSON")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "json"))
                .unwrap_or(false),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
