/*
 * Choose the minimum bit width for each of the three recurring field
 * classes. Counts and the symbol dictionary size use different tie-break
 * rules (`>` for counts, `>=` for the dictionary size), so they are kept
 * as two distinct helpers rather than one.
 */

use crate::row_rle::RowScript;

/// Smallest `w >= 1` with `2^w > max_value`.
///
/// Used for `count_bit_width` and `line_count_bit_width`: a field that
/// must represent a *count* of emitted items needs enough bits to hold the
/// largest observed count *plus* headroom, since the count itself (not
/// `count - 1`) is what gets packed.
fn smallest_width_strictly_above(max_value: u32) -> u8 {
    let mut w = 1u8;
    while (1u64 << w) <= max_value as u64 {
        w += 1;
    }
    w
}

/// Smallest `w >= 1` with `2^w >= k`.
///
/// Used for `symbol_bit_width`: a dictionary of `k` entries needs indices
/// `0..k`, so `k` itself (not `k - 1`) must fit as a bound on the number
/// of representable indices. `k == 1` still yields width 1, since there is
/// no zero-bit field in this format.
fn smallest_width_at_least(k: u32) -> u8 {
    let mut w = 1u8;
    while (1u64 << w) < k as u64 {
        w += 1;
    }
    w
}

/// The three widths chosen for one encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChosenWidths {
    pub symbol_bit_width: u8,
    pub count_bit_width: u8,
    pub line_count_bit_width: u8,
}

/// Computes the widths that make every row script and the dictionary
/// representable, given the already-built row scripts and dictionary size.
pub fn choose_widths(rows: &[RowScript], dictionary_len: usize) -> ChosenWidths {
    let max_pair_per_row = rows.iter().map(RowScript::entry_count).max().unwrap_or(0) as u32;
    let max_count = rows.iter().map(RowScript::max_count).max().unwrap_or(0);

    ChosenWidths {
        symbol_bit_width: smallest_width_at_least(dictionary_len as u32),
        count_bit_width: smallest_width_strictly_above(max_count),
        line_count_bit_width: smallest_width_strictly_above(max_pair_per_row),
    }
}
