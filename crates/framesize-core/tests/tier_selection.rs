//! Tier classification tests
//!
//! Covers boundary placement, the catch-all tier, monotonicity and the
//! capacity accessor.

use framesize_core::{select_tier, AllocationTier, TIER_TABLE};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

// ============================================================================
// Boundaries
// ============================================================================

#[rstest]
#[case(4096, AllocationTier::Tiny)]
#[case(4097, AllocationTier::Small)]
#[case(8192, AllocationTier::Small)]
#[case(8193, AllocationTier::Medium)]
#[case(16384, AllocationTier::Medium)]
#[case(16385, AllocationTier::Large)]
#[case(32768, AllocationTier::Large)]
#[case(32769, AllocationTier::Huge)]
#[case(65536, AllocationTier::Huge)]
#[case(100000, AllocationTier::Huge)]
fn test_select_tier_boundaries(#[case] program_size: usize, #[case] expected: AllocationTier) {
    assert_eq!(select_tier(program_size), expected);
}

#[test]
fn test_everything_up_to_4096_is_tiny() {
    for size in 0..=4096 {
        assert_eq!(select_tier(size), AllocationTier::Tiny, "size {}", size);
    }
}

#[test]
fn test_huge_is_catch_all() {
    assert_eq!(select_tier(65537), AllocationTier::Huge);
    assert_eq!(select_tier(usize::MAX), AllocationTier::Huge);
}

#[test]
fn test_capacity_selects_own_tier() {
    for spec in TIER_TABLE {
        assert_eq!(select_tier(spec.capacity), spec.tier);
    }
}

// ============================================================================
// Capacity accessor
// ============================================================================

#[rstest]
#[case(AllocationTier::Tiny, 4096)]
#[case(AllocationTier::Small, 8192)]
#[case(AllocationTier::Medium, 16384)]
#[case(AllocationTier::Large, 32768)]
#[case(AllocationTier::Huge, 65536)]
fn test_max_bytecode_size(#[case] tier: AllocationTier, #[case] capacity: usize) {
    assert_eq!(tier.max_bytecode_size(), capacity);
}

#[test]
fn test_tier_table_snapshot() {
    let table = TIER_TABLE
        .iter()
        .map(|spec| format!("{:<6} {:>6}", spec.tier, spec.capacity))
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(table, @r"
    tiny     4096
    small    8192
    medium  16384
    large   32768
    huge    65536
    ");
}

#[test]
fn test_tier_serializes_lowercase() {
    let json = serde_json::to_string(&AllocationTier::Medium).unwrap();
    assert_eq!(json, "\"medium\"");
    let tier: AllocationTier = serde_json::from_str("\"large\"").unwrap();
    assert_eq!(tier, AllocationTier::Large);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_select_tier_is_monotonic(a in 0usize..200_000, b in 0usize..200_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(select_tier(lo).rank() <= select_tier(hi).rank());
    }

    #[test]
    fn prop_selected_tier_is_smallest_fit(size in 0usize..=65536) {
        let tier = select_tier(size);
        prop_assert!(tier.fits(size));
        if let Some(smaller) = AllocationTier::ALL.get(tier.rank().wrapping_sub(1)) {
            prop_assert!(!smaller.fits(size));
        }
    }
}
