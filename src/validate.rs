/*
 * Boundary validators: the small set of preconditions checked before any
 * real encode work begins. The decode-side checks (buffer length, magic,
 * version) live in `Header::parse`; this module holds the encode-side
 * checks, since they apply to the caller-supplied mask rather than a
 * parsed wire format.
 */

use crate::error::EncodeError;

/// Validates that `mask` is exactly `height * width` bytes and that
/// neither dimension is zero.
///
/// A mask is conceptually 2D by construction in this crate's API: there is
/// no separate "shape" argument carrying an arbitrary rank, just a
/// `(height, width)` pair, so this reduces to the length/non-emptiness
/// check below.
pub fn validate_mask_shape(mask_len: usize, height: u32, width: u32) -> Result<(), EncodeError> {
    if height == 0 || width == 0 {
        return Err(EncodeError::EmptyShape { height, width });
    }

    let expected = height as usize * width as usize;
    if mask_len != expected {
        return Err(EncodeError::ShapeMismatch {
            height,
            width,
            expected,
            actual: mask_len,
        });
    }

    Ok(())
}
