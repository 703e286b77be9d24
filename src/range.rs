//! Z-order key ranges and the BIGMIN/LITMAX split.
//!
//! A [`ZRange`] spans the codes of two box corners. Every code of a cell
//! inside the box lies within the range, but so do codes of cells outside it.
//! Splitting at BIGMIN/LITMAX cuts the box in two along the axis that owns the
//! most significant differing bit, producing two tighter ranges.

use crate::error::{IndexError, Result};
use crate::morton::{deinterleave_x, deinterleave_y, interleave};

/// Axis along which a range was split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitAxis {
    X,
    Y,
}

/// Inclusive range of Morton codes, `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZRange {
    min: u64,
    max: u64,
}

/// Per-axis fixed-point bounds of a range's corner cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBounds {
    pub x_min: u32,
    pub x_max: u32,
    pub y_min: u32,
    pub y_max: u32,
}

impl CellBounds {
    /// Whether the cell addressed by `code` lies inside the bounds, edges included.
    #[inline]
    pub fn contains(&self, code: u64) -> bool {
        let x = deinterleave_x(code);
        let y = deinterleave_y(code);
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

impl ZRange {
    pub fn new(min: u64, max: u64) -> Result<Self> {
        if min > max {
            return Err(IndexError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// The range spanning the box with corner cells `(x_min, y_min)` and `(x_max, y_max)`.
    pub fn from_corners(x_min: u32, y_min: u32, x_max: u32, y_max: u32) -> Result<Self> {
        Self::new(interleave(x_min, y_min), interleave(x_max, y_max))
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    pub fn is_single(&self) -> bool {
        self.min == self.max
    }

    pub fn bounds(&self) -> CellBounds {
        CellBounds {
            x_min: deinterleave_x(self.min),
            x_max: deinterleave_x(self.max),
            y_min: deinterleave_y(self.min),
            y_max: deinterleave_y(self.max),
        }
    }

    /// The axis owning the most significant bit at which `min` and `max` differ.
    ///
    /// An odd bit position belongs to y, an even one to x. `None` for a single code.
    pub fn split_axis(&self) -> Option<SplitAxis> {
        let diff = self.min ^ self.max;
        if diff == 0 {
            return None;
        }
        // leading_zeros is even exactly when bit (63 - lz) is odd
        if diff.leading_zeros() % 2 == 0 {
            Some(SplitAxis::Y)
        } else {
            Some(SplitAxis::X)
        }
    }

    /// Splits the range's box at LITMAX/BIGMIN along [`Self::split_axis`].
    ///
    /// Returns `Ok(None)` for a single-code range. Fails with
    /// [`IndexError::InvalidRange`] if the corners do not describe a box
    /// (some axis has `min > max`).
    pub fn split(&self) -> Result<Option<(ZRange, ZRange)>> {
        let Some(axis) = self.split_axis() else {
            return Ok(None);
        };
        let b = self.bounds();

        let halves = match axis {
            SplitAxis::Y => {
                let (lit_max, big_min) = lit_max_big_min(b.y_min, b.y_max)?;
                (
                    ZRange::from_corners(b.x_min, b.y_min, b.x_max, lit_max)?,
                    ZRange::from_corners(b.x_min, big_min, b.x_max, b.y_max)?,
                )
            }
            SplitAxis::X => {
                let (lit_max, big_min) = lit_max_big_min(b.x_min, b.x_max)?;
                (
                    ZRange::from_corners(b.x_min, b.y_min, lit_max, b.y_max)?,
                    ZRange::from_corners(big_min, b.y_min, b.x_max, b.y_max)?,
                )
            }
        };

        log::trace!(
            "split [{:#x}, {:#x}] on {:?} into [{:#x}, {:#x}] and [{:#x}, {:#x}]",
            self.min,
            self.max,
            axis,
            halves.0.min,
            halves.0.max,
            halves.1.min,
            halves.1.max
        );

        Ok(Some(halves))
    }
}

/// Computes `(LITMAX, BIGMIN)` for one axis of a box.
///
/// LITMAX is the common high-order prefix of `min` and `max` followed by a 0
/// and then all 1s; BIGMIN is the same prefix followed by a 1 and then all 0s.
///
/// ```
/// use linquad::range::lit_max_big_min;
///
/// // 0011 and 0110 share the prefix 0; they split at bit 2.
/// assert_eq!(lit_max_big_min(0b0011, 0b0110)?, (0b0011, 0b0100));
/// assert_eq!(lit_max_big_min(7, 7)?, (7, 7));
/// assert!(lit_max_big_min(8, 7).is_err());
/// # Ok::<(), linquad::IndexError>(())
/// ```
pub fn lit_max_big_min(min: u32, max: u32) -> Result<(u32, u32)> {
    if min == max {
        return Ok((min, max));
    }
    if min > max {
        return Err(IndexError::InvalidRange {
            min: min as u64,
            max: max as u64,
        });
    }

    let split_bit = 1u32 << (31 - (min ^ max).leading_zeros());
    let low_mask = split_bit | (split_bit - 1);
    let prefix = min & !low_mask;

    Ok((prefix | (split_bit - 1), prefix | split_bit))
}
