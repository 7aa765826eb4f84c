use thiserror::Error;

/// Errors raised by [`crate::encode`].
///
/// These are caller errors in the sense of the format's error design: the
/// input mask itself is malformed, not the (nonexistent, at this point)
/// encoded buffer. None of them are retryable without changing the input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Height or width was zero.
    #[error("mask shape ({height}, {width}) has a zero dimension")]
    EmptyShape {
        /// Declared mask height.
        height: u32,
        /// Declared mask width.
        width: u32,
    },

    /// `height * width` did not match the number of bytes supplied.
    #[error(
        "mask shape ({height}, {width}) implies {expected} bytes, but {actual} were provided"
    )]
    ShapeMismatch {
        /// Declared mask height.
        height: u32,
        /// Declared mask width.
        width: u32,
        /// `height * width`.
        expected: usize,
        /// `mask.len()`.
        actual: usize,
    },
}

/// Errors raised by [`crate::decode`] and [`crate::header_of`].
///
/// All of these are "malformed input" in the sense of the format's error
/// design: the buffer handed to the decoder is not a value ever produced by
/// a conforming encoder. None of them are retryable without a different
/// buffer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer is shorter than the fixed 20-byte header.
    #[error("buffer of {len} bytes is too short to contain the 20-byte header")]
    TruncatedHeader {
        /// The number of bytes actually available.
        len: usize,
    },

    /// The 4-byte magic word did not match `0x666d6670` ("pfmf" LE).
    #[error("invalid magic {found:#010x}, expected {expected:#010x}")]
    InvalidMagic {
        /// The magic word that was actually read.
        found: u32,
        /// The magic word a conforming encoder always writes.
        expected: u32,
    },

    /// The version byte named an unsupported format revision.
    #[error("unsupported format version {found}, expected {expected}")]
    InvalidVersion {
        /// The version byte that was actually read.
        found: u8,
        /// The version byte this decoder supports.
        expected: u8,
    },

    /// One of the three header bit-widths was outside its legal range.
    #[error("{field} bit width {found} is out of range {valid_min}..={valid_max}")]
    InvalidBitWidth {
        /// Which header field failed validation.
        field: &'static str,
        /// The width that was read.
        found: u8,
        /// The smallest width this field may hold.
        valid_min: u8,
        /// The largest width this field may hold.
        valid_max: u8,
    },

    /// `unique_symbols_count` was zero or exceeded 256.
    #[error("unique symbol count {found} is out of range 1..=256")]
    InvalidSymbolCount {
        /// The count that was read from the header.
        found: u32,
    },

    /// The bit-packed payload ran out of bits before all fields of the
    /// declared geometry were read.
    #[error("bit stream exhausted while decoding {context}")]
    UnexpectedEof {
        /// What the decoder was attempting to read when it ran out of bits.
        context: &'static str,
    },

    /// A symbol index read from the payload did not address any dictionary
    /// entry.
    #[error("symbol index {index} out of range for dictionary of size {dict_len}")]
    SymbolIndexOutOfRange {
        /// The index that was read.
        index: u32,
        /// The number of entries in the dictionary.
        dict_len: usize,
    },

    /// A row script's run lengths summed to more or less than the declared
    /// width, which would overrun or under-fill the output row.
    #[error("row {row} script covers {covered} columns, expected exactly {width}")]
    RowOverrun {
        /// Index of the offending row.
        row: usize,
        /// Columns actually covered by the row's script.
        covered: usize,
        /// The mask width every row must cover exactly.
        width: u32,
    },

    /// The header declared a zero height or width, which no conforming
    /// encoder ever writes.
    #[error("mask geometry ({height}, {width}) has a zero dimension")]
    InvalidGeometry {
        /// Declared mask height.
        height: u32,
        /// Declared mask width.
        width: u32,
    },

    /// `height * width` overflows the platform's addressable size, so the
    /// output mask could not be allocated.
    #[error("mask geometry ({height}, {width}) is too large to allocate")]
    MaskTooLarge {
        /// Declared mask height.
        height: u32,
        /// Declared mask width.
        width: u32,
    },
}
