//! Configuration Loader
//!
//! Finds framesize.toml and applies environment overrides.

use crate::frame::{FrameConfig, StackConfig};
use crate::{ConfigError, ConfigResult};
use framesize_core::{SizerParams, StandardSizers};
use std::env;
use std::path::{Path, PathBuf};

/// File name searched for when loading from a directory
pub const CONFIG_FILE_NAME: &str = "framesize.toml";

/// Configuration loader
///
/// Precedence, lowest first:
/// 1. Built-in defaults
/// 2. framesize.toml
/// 3. Environment variables (FRAMESIZE_*)
/// 4. CLI flags (handled by caller)
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Skip FRAMESIZE_* overrides
    ignore_env: bool,
}

/// Loaded configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub frame: FrameConfig,

    /// framesize.toml the configuration came from, if any
    pub config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { ignore_env: false }
    }

    /// Loader that ignores environment overrides
    pub fn without_env() -> Self {
        Self { ignore_env: true }
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find framesize.toml. Missing files are
    /// not an error: defaults apply.
    pub fn load_from_directory(&self, start_dir: &Path) -> ConfigResult<Config> {
        let (config_path, frame) = self.find_config(start_dir)?;
        let frame = self.apply_env_overrides(frame)?;
        Ok(Config { frame, config_path })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(&self, config_path: &Path) -> ConfigResult<Config> {
        let frame = FrameConfig::load_from_file(config_path)?;
        let frame = self.apply_env_overrides(frame)?;
        Ok(Config {
            frame,
            config_path: Some(config_path.to_path_buf()),
        })
    }

    fn find_config(&self, start_dir: &Path) -> ConfigResult<(Option<PathBuf>, FrameConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);

            if config_path.exists() {
                let frame = FrameConfig::load_from_file(&config_path)?;
                return Ok((Some(config_path), frame));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok((None, FrameConfig::default())),
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported: FRAMESIZE_STACK_CAPACITY, FRAMESIZE_STACK_SLOT_SIZE
    fn apply_env_overrides(&self, mut config: FrameConfig) -> ConfigResult<FrameConfig> {
        if self.ignore_env {
            return Ok(config);
        }

        if let Some(capacity) = read_usize_var("FRAMESIZE_STACK_CAPACITY")? {
            config
                .stack
                .get_or_insert_with(StackConfig::default)
                .capacity = Some(capacity);
        }

        if let Some(slot_size) = read_usize_var("FRAMESIZE_STACK_SLOT_SIZE")? {
            config
                .stack
                .get_or_insert_with(StackConfig::default)
                .slot_size = Some(slot_size);
        }

        config.validate()?;
        Ok(config)
    }
}

fn read_usize_var(name: &str) -> ConfigResult<Option<usize>> {
    match env::var(name) {
        Ok(raw) => {
            let value: usize = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: name.to_string(),
                reason: format!("expected a non-negative integer, got '{}'", raw),
            })?;
            tracing::debug!(variable = name, value, "applied environment override");
            Ok(Some(value))
        }
        Err(_) => Ok(None),
    }
}

impl Config {
    pub fn sizer_params(&self) -> SizerParams {
        self.frame.sizer_params()
    }

    pub fn sizers(&self) -> ConfigResult<StandardSizers> {
        self.frame.sizers()
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Whether a framesize.toml was found
    pub fn has_file(&self) -> bool {
        self.config_path.is_some()
    }
}
