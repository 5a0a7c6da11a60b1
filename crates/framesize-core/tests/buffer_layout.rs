//! Frame buffer layout tests
//!
//! Exercises the region fold, the safety margin, tier ordering of buffer
//! sizes and the end-to-end classify-then-size path.

use framesize_core::{
    is_aligned, select_tier, AllocationTier, FrameLayout, FrameSizers, Region, SizeAlignment,
    SizerParams, StandardSizers,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

// ============================================================================
// Helpers
// ============================================================================

/// Sizers whose sizes scale linearly with the program and whose alignments
/// force padding between every region
struct Skewed;

impl FrameSizers for Skewed {
    fn stack(&self, program_size: usize) -> SizeAlignment {
        SizeAlignment::new(program_size / 3 + 1, 64)
    }
    fn analysis(&self, program_size: usize) -> SizeAlignment {
        SizeAlignment::new(program_size / 7 + 3, 2)
    }
    fn metadata(&self, program_size: usize) -> SizeAlignment {
        SizeAlignment::new(program_size + 5, 16)
    }
    fn op_table(&self, program_size: usize) -> SizeAlignment {
        SizeAlignment::new(program_size * 2 + 1, 128)
    }
}

fn assert_well_formed(layout: &FrameLayout) {
    let mut previous_end = 0;
    for (span, region) in layout.regions.iter().zip(Region::PACKING_ORDER) {
        assert_eq!(span.region, region);
        assert!(is_aligned(span.offset, span.alignment));
        assert!(span.offset >= previous_end);
        assert!(span.offset - previous_end < span.alignment);
        previous_end = span.end();
    }
    assert_eq!(layout.packed_size, previous_end);
    assert_eq!(layout.overhead, layout.packed_size / 10);
    assert_eq!(layout.buffer_size, layout.packed_size + layout.overhead);
}

// ============================================================================
// Tier ordering
// ============================================================================

#[test]
fn test_buffer_size_strictly_increases_across_tiers() {
    let sizes: Vec<usize> = AllocationTier::ALL
        .iter()
        .map(|tier| tier.buffer_size())
        .collect();
    assert!(AllocationTier::Tiny.buffer_size() < AllocationTier::Small.buffer_size());
    assert!(AllocationTier::Small.buffer_size() < AllocationTier::Medium.buffer_size());
    assert!(AllocationTier::Medium.buffer_size() < AllocationTier::Large.buffer_size());
    assert!(AllocationTier::Large.buffer_size() < AllocationTier::Huge.buffer_size());
    for pair in sizes.windows(2) {
        assert!(pair[0] < pair[1], "{:?}", sizes);
    }
}

#[test]
fn test_tiny_buffer_is_not_degenerate() {
    let stack = StandardSizers::default().stack(0);
    assert!(AllocationTier::Tiny.buffer_size() >= stack.byte_size + 1024);
}

#[test]
fn test_buffer_size_is_deterministic() {
    for tier in AllocationTier::ALL {
        assert_eq!(tier.buffer_size(), tier.buffer_size());
        assert_eq!(tier.buffer_size(), tier.layout().buffer_size);
    }
}

#[cfg(target_pointer_width = "64")]
#[rstest]
#[case(AllocationTier::Tiny, 82_952, 91_247)]
#[case(AllocationTier::Small, 133_128, 146_440)]
#[case(AllocationTier::Medium, 233_480, 256_828)]
#[case(AllocationTier::Large, 434_184, 477_602)]
#[case(AllocationTier::Huge, 835_592, 919_151)]
fn test_default_buffer_sizes(
    #[case] tier: AllocationTier,
    #[case] packed: usize,
    #[case] buffer: usize,
) {
    let layout = tier.layout();
    assert_eq!(layout.packed_size, packed);
    assert_eq!(layout.buffer_size, buffer);
}

#[cfg(target_pointer_width = "64")]
#[test]
fn test_tiny_region_offsets() {
    let layout = AllocationTier::Tiny.layout();
    let spans: Vec<(Region, usize, usize, usize)> = layout
        .regions
        .iter()
        .map(|s| (s.region, s.offset, s.size, s.alignment))
        .collect();
    assert_eq!(
        spans,
        vec![
            (Region::Stack, 0, 32768, 32),
            (Region::Analysis, 32768, 1024, 2),
            (Region::Metadata, 33792, 16384, 4),
            (Region::OpTable, 50176, 32776, 8),
        ]
    );
    assert_eq!(layout.padding(), 0);
}

// ============================================================================
// Custom sizers
// ============================================================================

#[test]
fn test_skewed_sizers_pad_every_region() {
    let layout = FrameLayout::plan(100, &Skewed);
    assert_well_formed(&layout);
    // stack 0..34, analysis 34..51, metadata 64..169, op table 256..457
    assert_eq!(layout.span(Region::Analysis).offset, 34);
    assert_eq!(layout.span(Region::Metadata).offset, 64);
    assert_eq!(layout.span(Region::OpTable).offset, 256);
    assert_eq!(layout.packed_size, 457);
    assert_eq!(layout.buffer_size, 457 + 45);
}

#[test]
fn test_zero_sized_regions_still_align() {
    struct Empty;
    impl FrameSizers for Empty {
        fn stack(&self, _: usize) -> SizeAlignment {
            SizeAlignment::new(3, 1)
        }
        fn analysis(&self, _: usize) -> SizeAlignment {
            SizeAlignment::new(0, 8)
        }
        fn metadata(&self, _: usize) -> SizeAlignment {
            SizeAlignment::new(0, 1)
        }
        fn op_table(&self, _: usize) -> SizeAlignment {
            SizeAlignment::new(0, 1)
        }
    }
    let layout = FrameLayout::plan(0, &Empty);
    assert_eq!(layout.span(Region::Analysis).offset, 8);
    assert_eq!(layout.packed_size, 8);
    assert_eq!(layout.buffer_size, 8);
}

#[test]
fn test_larger_stack_grows_every_tier() {
    let deep = StandardSizers::new(SizerParams {
        stack_capacity: 2048,
        ..SizerParams::default()
    })
    .unwrap();
    for tier in AllocationTier::ALL {
        assert!(tier.buffer_size_with(&deep) > tier.buffer_size());
    }
}

#[test]
fn test_layout_serializes_regions_by_name() {
    let json = serde_json::to_value(AllocationTier::Tiny.layout()).unwrap();
    assert_eq!(json["regions"][0]["region"], "stack");
    assert_eq!(json["regions"][3]["region"], "op_table");
    assert_eq!(json["program_size"], 4096);
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn test_ten_kilobyte_program() {
    let tier = select_tier(10_000);
    assert_eq!(tier, AllocationTier::Medium);
    assert!(tier.buffer_size() > AllocationTier::Small.buffer_size());
    assert!(tier.buffer_size() < AllocationTier::Large.buffer_size());
    assert!(tier.fits(10_000));
}

proptest! {
    #[test]
    fn prop_selected_tier_buffer_covers_program(size in 0usize..=65536) {
        let sizers = StandardSizers::default();
        let tier = select_tier(size);
        let exact = FrameLayout::plan(size, &sizers);
        prop_assert!(exact.buffer_size <= tier.buffer_size());
    }

    #[test]
    fn prop_plans_are_well_formed(size in 0usize..100_000) {
        assert_well_formed(&FrameLayout::plan(size, &Skewed));
        assert_well_formed(&FrameLayout::plan(size, &StandardSizers::default()));
    }
}
