//! Morton (Z-order) codes for two 32-bit axes.
//!
//! The x axis (longitude) occupies the even bit positions of the code and the
//! y axis (latitude) the odd positions. Sorting by code visits the plane in a
//! recursive quadrant order, so nearby points tend to have nearby codes.
//!
//! The shift-and-mask cascades follow the "interleave by binary magic numbers"
//! technique from Sean Eron Anderson's *Bit Twiddling Hacks*. Mask order matters.

use crate::error::Result;
use crate::fixed::{fixed_to_degrees, quantize};
use crate::types::validate_point;
use geo::Point;

/// All even bit positions of a code (the x axis).
pub const EVEN_MASK: u64 = 0x5555_5555_5555_5555;

/// All odd bit positions of a code (the y axis).
pub const ODD_MASK: u64 = 0xAAAA_AAAA_AAAA_AAAA;

/// Interleaves `x` and `y` one bit at a time.
///
/// This is the obvious O(32) algorithm and serves as the reference for
/// [`interleave`].
pub fn interleave_bits(x: u32, y: u32) -> u64 {
    let (x, y) = (x as u64, y as u64);
    let mut z = 0u64;
    for i in 0..u32::BITS {
        z |= ((x & (1 << i)) << i) | ((y & (1 << i)) << (i + 1));
    }
    z
}

/// Interleaves `x` and `y` with constant-step bit spreading.
///
/// ```
/// use linquad::morton::{interleave, interleave_bits};
///
/// let z = interleave(0xFF00FF00, 0x00FF00FF);
/// assert_eq!(z, 0x5555AAAA5555AAAA);
/// assert_eq!(z, interleave_bits(0xFF00FF00, 0x00FF00FF));
/// ```
#[inline]
pub fn interleave(x: u32, y: u32) -> u64 {
    (expand_by_1(y) << 1) | expand_by_1(x)
}

/// Inserts a 0 bit above each of the 32 bits of `num`.
#[inline]
pub fn expand_by_1(num: u32) -> u64 {
    let mut x = num as u64;
    x = (x ^ (x << 16)) & 0x0000_ffff_0000_ffff;
    x = (x ^ (x << 8)) & 0x00ff_00ff_00ff_00ff;
    x = (x ^ (x << 4)) & 0x0f0f_0f0f_0f0f_0f0f;
    x = (x ^ (x << 2)) & 0x3333_3333_3333_3333;
    x = (x ^ (x << 1)) & 0x5555_5555_5555_5555;
    x
}

/// Gathers the even bits of `num` into a 32-bit value. Inverse of [`expand_by_1`].
#[inline]
pub fn compact_by_1(num: u64) -> u32 {
    let mut x = num & 0x5555_5555_5555_5555;
    x = (x ^ (x >> 1)) & 0x3333_3333_3333_3333;
    x = (x ^ (x >> 2)) & 0x0f0f_0f0f_0f0f_0f0f;
    x = (x ^ (x >> 4)) & 0x00ff_00ff_00ff_00ff;
    x = (x ^ (x >> 8)) & 0x0000_ffff_0000_ffff;
    x = (x ^ (x >> 16)) & 0x0000_0000_ffff_ffff;
    x as u32
}

/// 32-bit analogue of [`expand_by_1`] for 16-bit inputs.
#[inline]
pub fn expand_u16_by_1(num: u16) -> u32 {
    let mut x = num as u32;
    x = (x ^ (x << 8)) & 0x00ff_00ff;
    x = (x ^ (x << 4)) & 0x0f0f_0f0f;
    x = (x ^ (x << 2)) & 0x3333_3333;
    x = (x ^ (x << 1)) & 0x5555_5555;
    x
}

/// 32-bit analogue of [`compact_by_1`].
#[inline]
pub fn compact_u32_by_1(num: u32) -> u16 {
    let mut x = num & 0x5555_5555;
    x = (x ^ (x >> 1)) & 0x3333_3333;
    x = (x ^ (x >> 2)) & 0x0f0f_0f0f;
    x = (x ^ (x >> 4)) & 0x00ff_00ff;
    x = (x ^ (x >> 8)) & 0x0000_ffff;
    x as u16
}

/// Interleaves two 16-bit values into a 32-bit code.
#[inline]
pub fn interleave_u16(x: u16, y: u16) -> u32 {
    (expand_u16_by_1(y) << 1) | expand_u16_by_1(x)
}

/// Extracts the x value (even bits) from a code.
#[inline]
pub fn deinterleave_x(code: u64) -> u32 {
    compact_by_1(code)
}

/// Extracts the y value (odd bits) from a code.
#[inline]
pub fn deinterleave_y(code: u64) -> u32 {
    compact_by_1(code >> 1)
}

/// Encodes a geographic point (x = longitude, y = latitude) as a Morton code.
///
/// ```
/// use linquad::morton::{decode, encode};
/// use geo::Point;
///
/// let code = encode(&Point::new(-119.4, 34.2))?;
/// let back = decode(code);
/// assert!((back.x() - -119.4).abs() < 1e-6);
/// assert!((back.y() - 34.2).abs() < 1e-6);
/// # Ok::<(), linquad::IndexError>(())
/// ```
pub fn encode(point: &Point) -> Result<u64> {
    validate_point(point)?;
    Ok(interleave(quantize(point.x()), quantize(point.y())))
}

/// Decodes a Morton code to the quantized point it represents.
pub fn decode(code: u64) -> Point {
    Point::new(
        fixed_to_degrees(deinterleave_x(code)),
        fixed_to_degrees(deinterleave_y(code)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rustc_hash::FxHashMap;

    const VECTORS: &[(u32, u32, u64)] = &[
        (0, 0xFFFF_FFFF, 0xAAAA_AAAA_AAAA_AAAA),
        (0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFF_FFFF_FFFF),
        (0x00FF_00FF, 0x00FF_00FF, 0x0000_FFFF_0000_FFFF),
        (0xFF00_FF00, 0x00FF_00FF, 0x5555_AAAA_5555_AAAA),
    ];

    #[test]
    fn test_interleave_known_vectors() {
        for &(x, y, z) in VECTORS {
            assert_eq!(interleave_bits(x, y), z, "reference {:#x} x {:#x}", x, y);
            assert_eq!(interleave(x, y), z, "fast {:#x} x {:#x}", x, y);
        }
    }

    #[test]
    fn test_low_order_cells() {
        assert_eq!(interleave(0, 0), 0);
        assert_eq!(interleave(1, 0), 1);
        assert_eq!(interleave(0, 1), 2);
        assert_eq!(interleave(1, 1), 3);
        assert_eq!(interleave(2, 0), 4);
    }

    #[test]
    fn test_deinterleave_known_vectors() {
        for &(x, y, z) in VECTORS {
            assert_eq!(deinterleave_x(z), x);
            assert_eq!(deinterleave_y(z), y);
        }
    }

    #[test]
    fn test_masks_split_axes() {
        let z = interleave(0xDEAD_BEEF, 0x1234_5678);
        assert_eq!(z & EVEN_MASK, expand_by_1(0xDEAD_BEEF));
        assert_eq!(z & ODD_MASK, expand_by_1(0x1234_5678) << 1);
    }

    #[test]
    fn test_u16_analogue() {
        assert_eq!(interleave_u16(0xFF00, 0x00FF), 0x5555_AAAA);
        assert_eq!(interleave_u16(0, 0xFFFF), 0xAAAA_AAAA);
        for &v in &[0u16, 1, 0x00FF, 0xFF00, 0xBEEF, 0xFFFF] {
            assert_eq!(compact_u32_by_1(expand_u16_by_1(v)), v);
            assert_eq!(expand_u16_by_1(v) as u64, expand_by_1(v as u32));
        }
    }

    #[test]
    fn test_integer_degree_grid_is_injective() {
        let mut codes = FxHashMap::default();
        for lon in -180..=180 {
            for lat in -90..=90 {
                let code = encode(&Point::new(lon as f64, lat as f64)).unwrap();
                assert!(
                    codes.insert(code, (lat, lon)).is_none(),
                    "collision at lat {}, lon {}",
                    lat,
                    lon
                );
            }
        }
        assert_eq!(codes.len(), 361 * 181);

        for (code, (lat, lon)) in codes {
            let point = decode(code);
            assert_eq!(point.x(), lon as f64);
            assert_eq!(point.y(), lat as f64);
        }
    }

    #[test]
    fn test_encode_rejects_bad_latitude() {
        assert!(encode(&Point::new(0.0, 90.5)).is_err());
        assert!(encode(&Point::new(181.0, 0.0)).is_err());
        assert!(encode(&Point::new(0.0, f64::NAN)).is_err());
    }

    proptest! {
        #[test]
        fn prop_round_trip(x in any::<u32>(), y in any::<u32>()) {
            let z = interleave(x, y);
            prop_assert_eq!(deinterleave_x(z), x);
            prop_assert_eq!(deinterleave_y(z), y);
        }

        #[test]
        fn prop_fast_matches_reference(x in any::<u32>(), y in any::<u32>()) {
            prop_assert_eq!(interleave(x, y), interleave_bits(x, y));
        }
    }
}
