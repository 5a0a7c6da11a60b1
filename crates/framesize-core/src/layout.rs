//! Frame buffer layout planning
//!
//! Regions are packed back to back in [`Region::PACKING_ORDER`]. Before each
//! region the running offset is rounded up to the region's alignment; after
//! the last region a flat margin of one tenth (rounded down) of the packed
//! size is added.
//!
//! ## Example (tiny tier, default sizers, 64-bit target)
//!
//! ```text
//! offset     region     size    align
//! 0          stack      32768   32
//! 32768      analysis    1024    2
//! 33792      metadata   16384    4
//! 50176      op_table   32776    8
//! packed 82952 + overhead 8295 = buffer 91247
//! ```

use crate::align::align_forward;
use crate::sizing::{FrameSizers, Region, StandardSizers};
use crate::tier::AllocationTier;
use serde::{Deserialize, Serialize};

/// Divisor for the flat safety margin added to the packed size
pub const OVERHEAD_DIVISOR: usize = 10;

/// Placement of one region inside a frame buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSpan {
    pub region: Region,
    /// Byte offset from the start of the buffer; a multiple of `alignment`
    pub offset: usize,
    pub size: usize,
    pub alignment: usize,
}

impl RegionSpan {
    /// First byte past the region
    pub fn end(&self) -> usize {
        self.offset + self.size
    }
}

/// Complete placement of a frame's regions for one nominal program size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameLayout {
    /// Program size the sizers were queried with
    pub program_size: usize,
    /// Regions in packing order
    pub regions: [RegionSpan; 4],
    /// End of the last region, before the safety margin
    pub packed_size: usize,
    pub overhead: usize,
    /// Bytes to allocate for the frame buffer
    pub buffer_size: usize,
}

impl FrameLayout {
    /// Pack the four regions for a program of `program_size` bytes
    pub fn plan<S: FrameSizers + ?Sized>(program_size: usize, sizers: &S) -> Self {
        let mut cursor = 0usize;
        let regions = Region::PACKING_ORDER.map(|region| {
            let need = sizers.region(region, program_size);
            let offset = align_forward(cursor, need.alignment);
            cursor = offset + need.byte_size;
            tracing::trace!(
                region = region.name(),
                offset,
                size = need.byte_size,
                alignment = need.alignment,
                "packed frame region"
            );
            RegionSpan {
                region,
                offset,
                size: need.byte_size,
                alignment: need.alignment,
            }
        });

        let packed_size = cursor;
        let overhead = packed_size / OVERHEAD_DIVISOR;
        let buffer_size = packed_size + overhead;
        tracing::debug!(
            program_size,
            packed_size,
            overhead,
            buffer_size,
            "planned frame layout"
        );

        Self {
            program_size,
            regions,
            packed_size,
            overhead,
            buffer_size,
        }
    }

    /// Plan at a tier's nominal capacity
    pub fn for_tier<S: FrameSizers + ?Sized>(tier: AllocationTier, sizers: &S) -> Self {
        Self::plan(tier.max_bytecode_size(), sizers)
    }

    /// Span of a single region
    pub fn span(&self, region: Region) -> &RegionSpan {
        &self.regions[region.index()]
    }

    /// Bytes lost to alignment padding between regions
    pub fn padding(&self) -> usize {
        self.packed_size - self.regions.iter().map(|span| span.size).sum::<usize>()
    }
}

impl AllocationTier {
    /// Frame buffer size for this tier using [`StandardSizers`]
    pub fn buffer_size(self) -> usize {
        self.buffer_size_with(&StandardSizers::default())
    }

    /// Frame buffer size for this tier using caller-supplied sizers
    pub fn buffer_size_with<S: FrameSizers + ?Sized>(self, sizers: &S) -> usize {
        FrameLayout::for_tier(self, sizers).buffer_size
    }

    /// Full region layout for this tier using [`StandardSizers`]
    pub fn layout(self) -> FrameLayout {
        FrameLayout::for_tier(self, &StandardSizers::default())
    }
}
