/*
 * Parses the header, rebuilds the symbol dictionary, materializes the
 * first row, then successively materializes each subsequent row from the
 * prior row plus its diff script. Every malformed-input condition is a
 * typed [`DecodeError`] rather than an out-of-bounds read.
 */

use crate::bitunpacker::BitUnpacker;
use crate::error::DecodeError;
use crate::header::{Header, HeaderInfo, HEADER_LEN};
use crate::unchecked::UncheckedArray;

/// Decodes a byte buffer produced by [`crate::encode`] back into a
/// row-major mask and its `(height, width)` shape.
pub fn decode(buf: &[u8]) -> Result<(Vec<u8>, (u32, u32)), DecodeError> {
    let header = Header::parse(buf)?;

    let height = header.mask_height;
    let width = header.mask_width;
    if height == 0 || width == 0 {
        return Err(DecodeError::InvalidGeometry { height, width });
    }

    let total_pixels = (height as u64)
        .checked_mul(width as u64)
        .filter(|&n| n <= usize::MAX as u64)
        .ok_or(DecodeError::MaskTooLarge { height, width })? as usize;

    let payload = zero_padded_payload(&buf[HEADER_LEN..]);
    let mut bits = BitUnpacker::new(&payload);

    let dictionary = read_dictionary(&mut bits, header.unique_symbols_count as usize)?;

    let mut mask = vec![0u8; total_pixels];
    let width_usize = width as usize;
    let height_usize = height as usize;

    decode_plain_row(&mut bits, &header, &dictionary, &mut mask[..width_usize])?;
    decode_remaining_rows(&mut bits, &header, &dictionary, &mut mask, width_usize, height_usize)?;

    Ok((mask, (height, width)))
}

/// Reads just the header and returns its externally visible fields,
/// without decoding the payload.
pub fn header_of(buf: &[u8]) -> Result<HeaderInfo, DecodeError> {
    Header::parse(buf).map(HeaderInfo::from)
}

/// Copies `payload` into an owned buffer whose length is a multiple of 8,
/// zero-filling the tail if needed. A conforming encoder already aligns
/// the payload, but the decoder pads defensively so that a buffer with a
/// short or unaligned tail is rejected by an explicit bit-stream underrun
/// rather than read out of bounds.
fn zero_padded_payload(payload: &[u8]) -> Vec<u8> {
    let padded_len = (payload.len() + 7) / 8 * 8;
    let mut out = vec![0u8; padded_len];
    out[..payload.len()].copy_from_slice(payload);
    out
}

fn read_dictionary(bits: &mut BitUnpacker, count: usize) -> Result<UncheckedArray<u8, 256>, DecodeError> {
    let mut dict = UncheckedArray::<u8, 256>::default();
    for i in 0..count {
        dict[i] = bits.take(8, "dictionary entry")? as u8;
    }
    Ok(dict)
}

fn decode_plain_row(
    bits: &mut BitUnpacker,
    header: &Header,
    dictionary: &UncheckedArray<u8, 256>,
    row: &mut [u8],
) -> Result<(), DecodeError> {
    let dict_len = header.unique_symbols_count as usize;
    let width = header.mask_width;

    let pair_count = bits.take(header.line_count_bit_width as u32, "row 0 pair count")?;
    let mut column = 0usize;

    for _ in 0..pair_count {
        let index = bits.take(header.symbol_bit_width as u32, "row 0 symbol index")? as u32;
        let run_length = bits.take(header.count_bit_width as u32, "row 0 run length")? as usize;

        if index as usize >= dict_len {
            return Err(DecodeError::SymbolIndexOutOfRange { index, dict_len });
        }
        if column + run_length > row.len() {
            return Err(DecodeError::RowOverrun {
                row: 0,
                covered: column + run_length,
                width,
            });
        }

        let symbol = dictionary[index as usize];
        row[column..column + run_length].fill(symbol);
        column += run_length;
    }

    if column != row.len() {
        return Err(DecodeError::RowOverrun {
            row: 0,
            covered: column,
            width,
        });
    }

    Ok(())
}

fn decode_diff_row(
    bits: &mut BitUnpacker,
    header: &Header,
    dictionary: &UncheckedArray<u8, 256>,
    row_index: usize,
    row: &mut [u8],
) -> Result<(), DecodeError> {
    let dict_len = header.unique_symbols_count as usize;
    let width = header.mask_width;

    let triple_count = bits.take(header.line_count_bit_width as u32, "diff row triple count")?;
    let mut column = 0usize;

    for _ in 0..triple_count {
        let skip = bits.take(header.count_bit_width as u32, "diff row skip")? as usize;
        let index = bits.take(header.symbol_bit_width as u32, "diff row symbol index")? as u32;
        let run_length = bits.take(header.count_bit_width as u32, "diff row run length")? as usize;

        let new_column = column.checked_add(skip).ok_or(DecodeError::RowOverrun {
            row: row_index,
            covered: usize::MAX,
            width,
        })?;
        if new_column > row.len() {
            return Err(DecodeError::RowOverrun {
                row: row_index,
                covered: new_column,
                width,
            });
        }
        column = new_column;

        if index as usize >= dict_len {
            return Err(DecodeError::SymbolIndexOutOfRange { index, dict_len });
        }
        if column + run_length > row.len() {
            return Err(DecodeError::RowOverrun {
                row: row_index,
                covered: column + run_length,
                width,
            });
        }

        let symbol = dictionary[index as usize];
        row[column..column + run_length].fill(symbol);
        column += run_length;
    }

    // Any columns from `column` to the end remain equal to the previous
    // row, which `row` already holds from the prior-row copy.
    Ok(())
}

fn decode_remaining_rows(
    bits: &mut BitUnpacker,
    header: &Header,
    dictionary: &UncheckedArray<u8, 256>,
    mask: &mut [u8],
    width: usize,
    height: usize,
) -> Result<(), DecodeError> {
    for row_index in 1..height {
        let (prev_and_current, _) = mask.split_at_mut((row_index + 1) * width);
        let (prev_rows, current_row) = prev_and_current.split_at_mut(row_index * width);
        let prev_row = &prev_rows[(row_index - 1) * width..row_index * width];
        current_row.copy_from_slice(prev_row);
        decode_diff_row(bits, header, dictionary, row_index, current_row)?;
    }
    Ok(())
}
