//! framesize Configuration
//!
//! Loads the sizer parameters used to compute frame buffer sizes:
//! - Project configuration (framesize.toml)
//! - Environment overrides (FRAMESIZE_*)
//!
//! # Configuration Hierarchy
//!
//! Later sources override earlier ones:
//! 1. Built-in defaults (`SizerParams::default()`)
//! 2. framesize.toml found in the start directory or one of its parents
//! 3. Environment variables (FRAMESIZE_*)
//! 4. CLI flags
//!
//! # Example
//!
//! ```no_run
//! use framesize_config::ConfigLoader;
//! use std::path::Path;
//!
//! let loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! let sizers = config.sizers().unwrap();
//! ```

pub mod frame;
pub mod loader;

use framesize_core::LayoutError;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Invalid sizer parameters: {0}")]
    Layout(#[from] LayoutError),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

pub use frame::FrameConfig;
pub use loader::{Config, ConfigLoader, CONFIG_FILE_NAME};
