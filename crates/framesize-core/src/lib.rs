//! framesize core - frame buffer tiering and layout
//!
//! Sizes the single contiguous buffer backing a VM execution frame:
//! - Tier classification of programs by byte size
//! - Region layout (stack, analysis, metadata, op table) with alignment padding
//! - A flat safety margin over the packed size
//! - The alignment primitive shared with region-carving code
//!
//! # Example
//!
//! ```
//! use framesize_core::{select_tier, AllocationTier};
//!
//! let tier = select_tier(10_000);
//! assert_eq!(tier, AllocationTier::Medium);
//! assert!(tier.fits(10_000));
//! assert!(tier.buffer_size() > AllocationTier::Small.buffer_size());
//! ```

/// framesize version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod align;
pub mod error;
pub mod layout;
pub mod sizing;
pub mod tier;

pub use align::{align_forward, is_aligned};
pub use error::{LayoutError, LayoutResult};
pub use layout::{FrameLayout, RegionSpan, OVERHEAD_DIVISOR};
pub use sizing::{FrameSizers, Region, SizeAlignment, SizerParams, StandardSizers};
pub use tier::{select_tier, AllocationTier, TierSpec, TIER_TABLE};
