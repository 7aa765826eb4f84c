/*
 * Orchestrates row compression, dictionary construction, header emission,
 * and payload bit packing into one contiguous byte buffer.
 */

use crate::bitpacker::BitPacker;
use crate::error::EncodeError;
use crate::header::Header;
use crate::row_rle::{build_diff_row, build_plain_row, RowScript};
use crate::validate::validate_mask_shape;
use crate::width::choose_widths;

/// Encodes a row-major `height * width` mask into a self-contained byte
/// buffer.
///
/// Returns [`EncodeError`] if `mask.len() != height * width` or either
/// dimension is zero. This function is pure: the same mask and shape
/// always produce the byte-identical output.
pub fn encode(mask: &[u8], height: u32, width: u32) -> Result<Vec<u8>, EncodeError> {
    validate_mask_shape(mask.len(), height, width)?;

    let width_usize = width as usize;
    let rows: Vec<&[u8]> = mask.chunks_exact(width_usize).collect();

    let mut scripts = Vec::with_capacity(rows.len());
    scripts.push(RowScript::Plain(build_plain_row(rows[0])));
    for i in 1..rows.len() {
        scripts.push(RowScript::Diff(build_diff_row(rows[i], rows[i - 1])));
    }

    let dictionary = build_dictionary(&scripts);
    let mut symbol_to_index = [None; 256];
    for (index, &symbol) in dictionary.iter().enumerate() {
        symbol_to_index[symbol as usize] = Some(index as u8);
    }

    let widths = choose_widths(&scripts, dictionary.len());

    let header = Header {
        symbol_bit_width: widths.symbol_bit_width,
        count_bit_width: widths.count_bit_width,
        line_count_bit_width: widths.line_count_bit_width,
        unique_symbols_count: dictionary.len() as u32,
        mask_height: height,
        mask_width: width,
    };

    let mut packer = BitPacker::with_capacity(mask.len() / 4);

    for &symbol in &dictionary {
        packer.append(symbol as u64, 8);
    }

    for script in &scripts {
        pack_row(&mut packer, script, &symbol_to_index, &widths);
    }

    let payload = packer.finish();

    let mut out = Vec::with_capacity(crate::header::HEADER_LEN + payload.len());
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Collects every symbol referenced by any row script (the same-as-previous
/// sentinel in diff rows is excluded) and returns them in ascending order.
fn build_dictionary(scripts: &[RowScript]) -> Vec<u8> {
    let mut seen = [false; 256];
    for script in scripts {
        for symbol in script.symbols() {
            seen[symbol as usize] = true;
        }
    }
    (0u16..256)
        .filter(|&s| seen[s as usize])
        .map(|s| s as u8)
        .collect()
}

fn pack_row(
    packer: &mut BitPacker,
    script: &RowScript,
    symbol_to_index: &[Option<u8>; 256],
    widths: &crate::width::ChosenWidths,
) {
    match script {
        RowScript::Plain(runs) => {
            packer.append(runs.len() as u64, widths.line_count_bit_width as u32);
            for &(symbol, run_length) in runs {
                let index = symbol_to_index[symbol as usize].expect("symbol is in dictionary");
                packer.append(index as u64, widths.symbol_bit_width as u32);
                packer.append(run_length as u64, widths.count_bit_width as u32);
            }
        }
        RowScript::Diff(triples) => {
            packer.append(triples.len() as u64, widths.line_count_bit_width as u32);
            for &(skip, symbol, run_length) in triples {
                let index = symbol_to_index[symbol as usize].expect("symbol is in dictionary");
                packer.append(skip as u64, widths.count_bit_width as u32);
                packer.append(index as u64, widths.symbol_bit_width as u32);
                packer.append(run_length as u64, widths.count_bit_width as u32);
            }
        }
    }
}
