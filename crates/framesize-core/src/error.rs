//! Errors for tier parsing and sizer parameter validation
//!
//! Classification and layout planning are total and never fail; only the
//! surfaces that accept user input report these.

use crate::sizing::Region;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Unknown allocation tier '{0}' (expected tiny, small, medium, large or huge)")]
    UnknownTier(String),

    #[error("Alignment {alignment} for {region} region is not a power of two")]
    InvalidAlignment { region: Region, alignment: usize },

    #[error("Entry size for {region} region must be non-zero")]
    ZeroEntrySize { region: Region },

    #[error("Size of {region} region overflows at the largest tier")]
    SizeOverflow { region: Region },
}

/// Result type for fallible layout operations
pub type LayoutResult<T> = Result<T, LayoutError>;
