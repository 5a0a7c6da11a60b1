//! Frame Configuration (framesize.toml)
//!
//! Every field is optional and overlays the built-in sizer defaults.
//!
//! ```toml
//! [stack]
//! capacity = 1024
//! slot_size = 32
//! alignment = 32
//!
//! [analysis]
//! bitmap_count = 2
//!
//! [metadata]
//! entry_size = 4
//! alignment = 4
//!
//! [op_table]
//! entry_size = 8
//! alignment = 8
//! ```

use crate::{ConfigError, ConfigResult};
use framesize_core::{SizerParams, StandardSizers};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration from framesize.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct FrameConfig {
    /// Evaluation stack region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<StackConfig>,

    /// Code analysis bitmaps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisConfig>,

    /// Per-instruction metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EntryConfig>,

    /// Dispatch table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub op_table: Option<EntryConfig>,
}

/// Stack region settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct StackConfig {
    /// Maximum stack depth in slots (default: 1024)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,

    /// Bytes per slot (default: 32)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_size: Option<usize>,

    /// Region alignment (default: 32)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<usize>,
}

/// Analysis region settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Number of bitmaps (default: 2)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitmap_count: Option<usize>,
}

/// Settings for a region made of one entry per program byte
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct EntryConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_size: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<usize>,
}

impl FrameConfig {
    /// Load configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded frame configuration");
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::TomlParseError {
            file: "<inline>".into(),
            error: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(stack) = &self.stack {
            validate_alignment("stack.alignment", stack.alignment)?;
            validate_entry_size("stack.slot_size", stack.slot_size)?;
        }
        if let Some(metadata) = &self.metadata {
            validate_alignment("metadata.alignment", metadata.alignment)?;
            validate_entry_size("metadata.entry_size", metadata.entry_size)?;
        }
        if let Some(op_table) = &self.op_table {
            validate_alignment("op_table.alignment", op_table.alignment)?;
            validate_entry_size("op_table.entry_size", op_table.entry_size)?;
        }
        self.sizer_params().validate()?;
        Ok(())
    }

    /// Sizer parameters with this configuration laid over the defaults
    pub fn sizer_params(&self) -> SizerParams {
        let mut params = SizerParams::default();

        if let Some(stack) = &self.stack {
            params.stack_capacity = stack.capacity.unwrap_or(params.stack_capacity);
            params.stack_slot_size = stack.slot_size.unwrap_or(params.stack_slot_size);
            params.stack_alignment = stack.alignment.unwrap_or(params.stack_alignment);
        }
        if let Some(analysis) = &self.analysis {
            params.bitmap_count = analysis.bitmap_count.unwrap_or(params.bitmap_count);
        }
        if let Some(metadata) = &self.metadata {
            params.metadata_entry_size = metadata.entry_size.unwrap_or(params.metadata_entry_size);
            params.metadata_alignment = metadata.alignment.unwrap_or(params.metadata_alignment);
        }
        if let Some(op_table) = &self.op_table {
            params.op_entry_size = op_table.entry_size.unwrap_or(params.op_entry_size);
            params.op_alignment = op_table.alignment.unwrap_or(params.op_alignment);
        }

        params
    }

    /// Build sizers from this configuration
    pub fn sizers(&self) -> ConfigResult<StandardSizers> {
        Ok(StandardSizers::new(self.sizer_params())?)
    }
}

fn validate_alignment(field: &str, value: Option<usize>) -> ConfigResult<()> {
    match value {
        Some(alignment) if !alignment.is_power_of_two() => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("must be a power of two, got {}", alignment),
        }),
        _ => Ok(()),
    }
}

fn validate_entry_size(field: &str, value: Option<usize>) -> ConfigResult<()> {
    match value {
        Some(0) => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        _ => Ok(()),
    }
}
