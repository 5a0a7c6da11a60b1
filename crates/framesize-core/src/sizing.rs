//! Region sizing collaborators
//!
//! A frame buffer holds four regions. Each region's owner reports how many
//! bytes and which alignment it needs for a program of a given nominal size.
//! Sizers only report requirements: they must not allocate, block or keep
//! state, since sizing queries run before the memory they describe exists.

use crate::error::{LayoutError, LayoutResult};
use crate::layout::OVERHEAD_DIVISOR;
use crate::tier::AllocationTier;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::mem;

/// Byte size and alignment requirement reported by a sizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SizeAlignment {
    /// May be zero
    pub byte_size: usize,
    /// Always a power of two
    pub alignment: usize,
}

impl SizeAlignment {
    pub const fn new(byte_size: usize, alignment: usize) -> Self {
        Self {
            byte_size,
            alignment,
        }
    }

    /// Requirement of `count` contiguous values of `T`
    pub const fn array_of<T>(count: usize) -> Self {
        Self::new(count * mem::size_of::<T>(), mem::align_of::<T>())
    }
}

/// Frame buffer region, in packing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Evaluation stack slots
    Stack,
    /// Jump-destination and push-data bitmaps
    Analysis,
    /// Per-instruction metadata
    Metadata,
    /// Decoded dispatch table
    OpTable,
}

impl Region {
    /// Order in which regions are laid out inside a frame buffer
    pub const PACKING_ORDER: [Region; 4] = [
        Region::Stack,
        Region::Analysis,
        Region::Metadata,
        Region::OpTable,
    ];

    /// Position in [`Region::PACKING_ORDER`]
    pub const fn index(self) -> usize {
        match self {
            Region::Stack => 0,
            Region::Analysis => 1,
            Region::Metadata => 2,
            Region::OpTable => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Region::Stack => "stack",
            Region::Analysis => "analysis",
            Region::Metadata => "metadata",
            Region::OpTable => "op_table",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// The four sizing queries a frame layout depends on.
///
/// Implementations must be pure: the same `program_size` always yields the
/// same answer, and reported sizes must not shrink as `program_size` grows.
pub trait FrameSizers {
    fn stack(&self, program_size: usize) -> SizeAlignment;
    fn analysis(&self, program_size: usize) -> SizeAlignment;
    fn metadata(&self, program_size: usize) -> SizeAlignment;
    fn op_table(&self, program_size: usize) -> SizeAlignment;

    /// Dispatch a query by region
    fn region(&self, region: Region, program_size: usize) -> SizeAlignment {
        match region {
            Region::Stack => self.stack(program_size),
            Region::Analysis => self.analysis(program_size),
            Region::Metadata => self.metadata(program_size),
            Region::OpTable => self.op_table(program_size),
        }
    }
}

/// Default evaluation stack depth in slots
pub const DEFAULT_STACK_CAPACITY: usize = 1024;
/// Width of a 256-bit stack word
pub const STACK_SLOT_SIZE: usize = 32;
/// Program bytes covered by one `u16` bitmap word
pub const BITS_PER_ANALYSIS_WORD: usize = 16;

/// Tunables for [`StandardSizers`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizerParams {
    /// Maximum stack depth in slots
    pub stack_capacity: usize,
    pub stack_slot_size: usize,
    pub stack_alignment: usize,
    /// Number of one-bit-per-byte bitmaps kept by code analysis
    pub bitmap_count: usize,
    pub metadata_entry_size: usize,
    pub metadata_alignment: usize,
    pub op_entry_size: usize,
    pub op_alignment: usize,
}

impl Default for SizerParams {
    fn default() -> Self {
        Self {
            stack_capacity: DEFAULT_STACK_CAPACITY,
            stack_slot_size: STACK_SLOT_SIZE,
            stack_alignment: STACK_SLOT_SIZE,
            bitmap_count: 2,
            metadata_entry_size: mem::size_of::<u32>(),
            metadata_alignment: mem::align_of::<u32>(),
            op_entry_size: mem::size_of::<usize>(),
            op_alignment: mem::align_of::<usize>(),
        }
    }
}

impl SizerParams {
    /// Reject parameters that would break the alignment contract or make
    /// a region stop growing with program size
    pub fn validate(&self) -> LayoutResult<()> {
        let alignments = [
            (Region::Stack, self.stack_alignment),
            (Region::Metadata, self.metadata_alignment),
            (Region::OpTable, self.op_alignment),
        ];
        for (region, alignment) in alignments {
            if !alignment.is_power_of_two() {
                return Err(LayoutError::InvalidAlignment { region, alignment });
            }
        }

        let entry_sizes = [
            (Region::Stack, self.stack_slot_size),
            (Region::Metadata, self.metadata_entry_size),
            (Region::OpTable, self.op_entry_size),
        ];
        for (region, size) in entry_sizes {
            if size == 0 {
                return Err(LayoutError::ZeroEntrySize { region });
            }
        }

        // Region sizes only grow with program size, so a buffer that fits
        // `usize` at the largest tier fits at every tier.
        self.checked_buffer_size(AllocationTier::Huge.max_bytecode_size())?;
        Ok(())
    }

    /// Buffer size for `program_size` with every step checked for overflow
    fn checked_buffer_size(&self, program_size: usize) -> LayoutResult<usize> {
        let overflow = |region| LayoutError::SizeOverflow { region };

        let stack = self
            .stack_capacity
            .checked_mul(self.stack_slot_size)
            .ok_or(overflow(Region::Stack))?;
        let analysis = program_size
            .div_ceil(BITS_PER_ANALYSIS_WORD)
            .checked_mul(self.bitmap_count)
            .and_then(|words| words.checked_mul(mem::size_of::<u16>()))
            .ok_or(overflow(Region::Analysis))?;
        let metadata = program_size
            .checked_mul(self.metadata_entry_size)
            .ok_or(overflow(Region::Metadata))?;
        let op_table = (program_size + 1)
            .checked_mul(self.op_entry_size)
            .ok_or(overflow(Region::OpTable))?;

        let requirements = [
            (Region::Stack, stack, self.stack_alignment),
            (Region::Analysis, analysis, mem::align_of::<u16>()),
            (Region::Metadata, metadata, self.metadata_alignment),
            (Region::OpTable, op_table, self.op_alignment),
        ];
        let mut cursor = 0usize;
        for (region, size, alignment) in requirements {
            cursor = cursor
                .checked_add(alignment - 1)
                .map(|padded| padded & !(alignment - 1))
                .and_then(|offset| offset.checked_add(size))
                .ok_or(overflow(region))?;
        }

        cursor
            .checked_add(cursor / OVERHEAD_DIVISOR)
            .ok_or(overflow(Region::OpTable))
    }
}

/// Sizers for the reference 256-bit word stack machine
///
/// - stack: `stack_capacity` slots of `stack_slot_size` bytes, independent of
///   program size
/// - analysis: `bitmap_count` bitmaps of one bit per program byte, stored as
///   `u16` words
/// - metadata: one entry per program byte
/// - op table: one handler entry per program byte plus a trailing sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StandardSizers {
    params: SizerParams,
}

impl StandardSizers {
    pub fn new(params: SizerParams) -> LayoutResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &SizerParams {
        &self.params
    }
}

impl FrameSizers for StandardSizers {
    fn stack(&self, _program_size: usize) -> SizeAlignment {
        SizeAlignment::new(
            self.params.stack_capacity * self.params.stack_slot_size,
            self.params.stack_alignment,
        )
    }

    fn analysis(&self, program_size: usize) -> SizeAlignment {
        let words = program_size.div_ceil(BITS_PER_ANALYSIS_WORD);
        SizeAlignment::array_of::<u16>(words * self.params.bitmap_count)
    }

    fn metadata(&self, program_size: usize) -> SizeAlignment {
        SizeAlignment::new(
            program_size * self.params.metadata_entry_size,
            self.params.metadata_alignment,
        )
    }

    fn op_table(&self, program_size: usize) -> SizeAlignment {
        SizeAlignment::new(
            (program_size + 1) * self.params.op_entry_size,
            self.params.op_alignment,
        )
    }
}
