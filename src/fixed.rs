//! Unsigned fixed-point encoding of geographic degrees.
//!
//! Degrees are shifted by +180 into `[0, 360]` and stored as Q9.22: 9 integer
//! bits and 22 fractional bits in a `u32`. The quantization step is 2⁻²² degrees.

use crate::error::{IndexError, Result};

/// Integer bits of the degree format.
pub const INTEGER_BITS: u32 = 9;

/// Fractional bits of the degree format.
pub const FRACTIONAL_BITS: u32 = 22;

/// Offset applied so that every longitude is non-negative.
pub const DEGREE_OFFSET: f64 = 180.0;

/// One quantization unit, in degrees.
pub const QUANTUM_DEGREES: f64 = 1.0 / (1u64 << FRACTIONAL_BITS) as f64;

/// Converts degrees in `[-180, 180]` to Q9.22 fixed point.
///
/// Out-of-range and non-finite values are rejected rather than wrapped.
///
/// ```
/// use linquad::fixed::{degrees_to_fixed, fixed_to_degrees};
///
/// let fixed = degrees_to_fixed(-119.4)?;
/// assert!((fixed_to_degrees(fixed) - -119.4).abs() <= linquad::fixed::QUANTUM_DEGREES);
/// assert!(degrees_to_fixed(180.5).is_err());
/// # Ok::<(), linquad::IndexError>(())
/// ```
pub fn degrees_to_fixed(degrees: f64) -> Result<u32> {
    if !degrees.is_finite() {
        return Err(IndexError::InvalidCoordinate(format!(
            "Degrees must be finite, got: {}",
            degrees
        )));
    }

    if !(-DEGREE_OFFSET..=DEGREE_OFFSET).contains(&degrees) {
        return Err(IndexError::InvalidCoordinate(format!(
            "Degrees out of range [-180.0, 180.0]: {}",
            degrees
        )));
    }

    Ok(quantize(degrees))
}

/// Q9.22 value of degrees already known to lie in `[-180, 180]`.
#[inline]
pub(crate) fn quantize(degrees: f64) -> u32 {
    ((degrees + DEGREE_OFFSET) / QUANTUM_DEGREES).round() as u32
}

/// Converts a Q9.22 value back to degrees in `[-180, 180]`.
pub fn fixed_to_degrees(fixed: u32) -> f64 {
    fixed as f64 * QUANTUM_DEGREES - DEGREE_OFFSET
}

/// Scales a non-negative value into an unsigned Q(m.n) integer, rounding to nearest.
///
/// `int_bits + frac_bits` may not exceed 32, and the rounded value must fit in
/// `int_bits` (a value of exactly `2^int_bits` is allowed so that the upper
/// bound of a closed interval stays representable).
pub fn float_to_fixed(int_bits: u32, frac_bits: u32, value: f64) -> Result<u32> {
    if int_bits
        .checked_add(frac_bits)
        .is_none_or(|bits| bits > u32::BITS)
    {
        return Err(IndexError::InvalidFixedFormat(format!(
            "Q{}.{} does not fit in 32 bits",
            int_bits, frac_bits
        )));
    }

    if !value.is_finite() || value < 0.0 {
        return Err(IndexError::InvalidFixedFormat(format!(
            "Value must be finite and non-negative, got: {}",
            value
        )));
    }

    if value.round() > (1u64 << int_bits) as f64 {
        return Err(IndexError::InvalidFixedFormat(format!(
            "Value {} is too big for {} integer bits",
            value, int_bits
        )));
    }

    let scaled = (value * (1u64 << frac_bits) as f64).round();
    if scaled > u32::MAX as f64 {
        return Err(IndexError::InvalidFixedFormat(format!(
            "Value {} overflows Q{}.{}",
            value, int_bits, frac_bits
        )));
    }

    Ok(scaled as u32)
}

/// Inverse of [`float_to_fixed`]; exact to within `2^-frac_bits`.
///
/// Fails with [`IndexError::InvalidFixedFormat`] if `frac_bits` exceeds 32.
pub fn fixed_to_float(frac_bits: u32, fixed: u32) -> Result<f64> {
    if frac_bits > u32::BITS {
        return Err(IndexError::InvalidFixedFormat(format!(
            "{} fractional bits do not fit in 32 bits",
            frac_bits
        )));
    }
    Ok(fixed as f64 / (1u64 << frac_bits) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_of_domain() {
        assert_eq!(degrees_to_fixed(-180.0).unwrap(), 0);
        assert_eq!(degrees_to_fixed(0.0).unwrap(), 180 << FRACTIONAL_BITS);
        assert_eq!(degrees_to_fixed(180.0).unwrap(), 360 << FRACTIONAL_BITS);
    }

    #[test]
    fn test_round_trip_within_quantum() {
        for &d in &[-180.0, -119.4, -75.2, -0.000001, 0.0, 34.2, 45.4, 89.999, 180.0] {
            let back = fixed_to_degrees(degrees_to_fixed(d).unwrap());
            assert!(
                (back - d).abs() <= QUANTUM_DEGREES,
                "{} came back as {}",
                d,
                back
            );
        }
    }

    #[test]
    fn test_monotonic() {
        let mut last = degrees_to_fixed(-180.0).unwrap();
        for i in -179..=180 {
            let next = degrees_to_fixed(i as f64).unwrap();
            assert!(next > last);
            last = next;
        }
    }

    #[test]
    fn test_rejects_out_of_domain() {
        assert!(matches!(
            degrees_to_fixed(180.0001),
            Err(IndexError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            degrees_to_fixed(-181.0),
            Err(IndexError::InvalidCoordinate(_))
        ));
        assert!(degrees_to_fixed(f64::NAN).is_err());
        assert!(degrees_to_fixed(f64::INFINITY).is_err());
    }

    #[test]
    fn test_generic_q_format() {
        assert_eq!(float_to_fixed(8, 8, 1.5).unwrap(), 0x180);
        assert_eq!(fixed_to_float(8, 0x180).unwrap(), 1.5);
        assert!(float_to_fixed(20, 20, 1.0).is_err());
        assert!(float_to_fixed(4, 4, 17.0).is_err());
        assert!(float_to_fixed(4, 4, -1.0).is_err());
    }

    #[test]
    fn test_oversized_format_is_an_error() {
        assert!(matches!(
            float_to_fixed(u32::MAX, 1, 1.0),
            Err(IndexError::InvalidFixedFormat(_))
        ));
        assert!(matches!(
            float_to_fixed(1, u32::MAX, 1.0),
            Err(IndexError::InvalidFixedFormat(_))
        ));
        assert!(matches!(
            fixed_to_float(64, 1),
            Err(IndexError::InvalidFixedFormat(_))
        ));
        assert!(fixed_to_float(u32::MAX, 1).is_err());
        assert_eq!(fixed_to_float(32, 1 << 31).unwrap(), 0.5);
    }

    #[test]
    fn test_quantize_matches_generic_format() {
        for &d in &[-180.0, -119.4, -0.3, 0.0, 45.4, 179.9999999, 180.0] {
            let generic = float_to_fixed(INTEGER_BITS, FRACTIONAL_BITS, d + DEGREE_OFFSET).unwrap();
            assert_eq!(quantize(d), generic, "degrees {}", d);
            assert_eq!(degrees_to_fixed(d).unwrap(), generic);
        }
    }
}
