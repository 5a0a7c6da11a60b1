//! Power-of-two alignment rounding
//!
//! Shared by the layout calculator and by the code that later carves an
//! allocated frame buffer into its regions. Both sides must round the same
//! way or the carved regions drift away from the planned offsets.

/// Round `address` up to the next multiple of `alignment`.
///
/// `alignment` must be a power of two. This is checked in debug builds only;
/// release builds trust the caller and return an unspecified value for a bad
/// alignment.
///
/// ```
/// use framesize_core::align_forward;
///
/// assert_eq!(align_forward(9, 8), 16);
/// assert_eq!(align_forward(16, 8), 16);
/// ```
#[inline]
pub const fn align_forward(address: usize, alignment: usize) -> usize {
    debug_assert!(
        alignment.is_power_of_two(),
        "alignment must be a power of two"
    );
    let mask = alignment - 1;
    (address + mask) & !mask
}

/// Check whether `address` already sits on an `alignment` boundary
#[inline]
pub const fn is_aligned(address: usize, alignment: usize) -> bool {
    debug_assert!(
        alignment.is_power_of_two(),
        "alignment must be a power of two"
    );
    address & (alignment - 1) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_one_is_identity() {
        for address in [0, 1, 7, 4095, 65537] {
            assert_eq!(align_forward(address, 1), address);
        }
    }

    #[test]
    fn test_is_aligned() {
        assert!(is_aligned(0, 32));
        assert!(is_aligned(64, 32));
        assert!(!is_aligned(33, 32));
        assert!(is_aligned(align_forward(33, 32), 32));
    }

    #[test]
    fn test_usable_in_const_context() {
        const PADDED: usize = align_forward(100, 64);
        assert_eq!(PADDED, 128);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "power of two")]
    fn test_non_power_of_two_panics_in_debug() {
        let _ = align_forward(10, 12);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "power of two")]
    fn test_zero_alignment_panics_in_debug() {
        let _ = align_forward(10, 0);
    }
}
