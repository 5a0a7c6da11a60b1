//! Allocation tiers
//!
//! Programs are bucketed by byte size into five tiers so frame buffers can be
//! sized once per tier instead of once per worst case.
//!
//! ## Tier Table
//!
//! ```text
//! tier     capacity (bytes)
//! tiny         4096   ( 0     ..= 4096 )
//! small        8192   ( 4097  ..= 8192 )
//! medium      16384   ( 8193  ..= 16384)
//! large       32768   ( 16385 ..= 32768)
//! huge        65536   ( 32769 ..       )  catch-all
//! ```

use crate::error::LayoutError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Size class of a frame, ordered from smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationTier {
    Tiny,
    Small,
    Medium,
    Large,
    /// Also admits every program larger than its own capacity
    Huge,
}

/// One row of the tier table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierSpec {
    pub tier: AllocationTier,
    /// Largest program size (inclusive) this tier was sized for
    pub capacity: usize,
}

/// Ordered tier table; capacities strictly increase row by row
pub const TIER_TABLE: [TierSpec; 5] = [
    TierSpec {
        tier: AllocationTier::Tiny,
        capacity: 4 * 1024,
    },
    TierSpec {
        tier: AllocationTier::Small,
        capacity: 8 * 1024,
    },
    TierSpec {
        tier: AllocationTier::Medium,
        capacity: 16 * 1024,
    },
    TierSpec {
        tier: AllocationTier::Large,
        capacity: 32 * 1024,
    },
    TierSpec {
        tier: AllocationTier::Huge,
        capacity: 64 * 1024,
    },
];

/// Pick the smallest tier whose capacity holds `program_size`.
///
/// Boundaries are inclusive: a program exactly as large as a tier's capacity
/// belongs to that tier. Anything above the largest capacity lands in
/// [`AllocationTier::Huge`].
pub fn select_tier(program_size: usize) -> AllocationTier {
    TIER_TABLE
        .iter()
        .find(|spec| program_size <= spec.capacity)
        .map_or(AllocationTier::Huge, |spec| spec.tier)
}

impl AllocationTier {
    /// All tiers in ascending order
    pub const ALL: [AllocationTier; 5] = [
        AllocationTier::Tiny,
        AllocationTier::Small,
        AllocationTier::Medium,
        AllocationTier::Large,
        AllocationTier::Huge,
    ];

    /// Position in the ascending tier order (tiny = 0)
    pub const fn rank(self) -> usize {
        match self {
            AllocationTier::Tiny => 0,
            AllocationTier::Small => 1,
            AllocationTier::Medium => 2,
            AllocationTier::Large => 3,
            AllocationTier::Huge => 4,
        }
    }

    /// Nominal program capacity of this tier in bytes
    pub const fn max_bytecode_size(self) -> usize {
        TIER_TABLE[self.rank()].capacity
    }

    /// Whether a program of `program_size` bytes fits a buffer sized for this tier
    pub const fn fits(self, program_size: usize) -> bool {
        program_size <= self.max_bytecode_size()
    }

    /// The next larger tier, or `None` for `Huge`
    pub const fn next(self) -> Option<AllocationTier> {
        match self {
            AllocationTier::Tiny => Some(AllocationTier::Small),
            AllocationTier::Small => Some(AllocationTier::Medium),
            AllocationTier::Medium => Some(AllocationTier::Large),
            AllocationTier::Large => Some(AllocationTier::Huge),
            AllocationTier::Huge => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            AllocationTier::Tiny => "tiny",
            AllocationTier::Small => "small",
            AllocationTier::Medium => "medium",
            AllocationTier::Large => "large",
            AllocationTier::Huge => "huge",
        }
    }
}

impl fmt::Display for AllocationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for AllocationTier {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        AllocationTier::ALL
            .into_iter()
            .find(|tier| tier.name() == lowered)
            .ok_or_else(|| LayoutError::UnknownTier(s.to_string()))
    }
}
