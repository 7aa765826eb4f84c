use crate::error::DecodeError;

/// `"pfmf"` read as a 32-bit little-endian word.
pub const MAGIC: u32 = 0x666d_6670;
/// The only format revision this crate knows how to read or write.
pub const VERSION: u8 = 1;
/// Size in bytes of the fixed-layout header at offset 0.
pub const HEADER_LEN: usize = 20;

const SYMBOL_BIT_WIDTH_RANGE: (u8, u8) = (1, 8);
const COUNT_BIT_WIDTH_RANGE: (u8, u8) = (1, 32);
const LINE_COUNT_BIT_WIDTH_RANGE: (u8, u8) = (1, 32);

/// The fixed 20-byte header: magic, version, the three chosen bit widths,
/// the dictionary size, and the mask geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub symbol_bit_width: u8,
    pub count_bit_width: u8,
    pub line_count_bit_width: u8,
    pub unique_symbols_count: u32,
    pub mask_height: u32,
    pub mask_width: u32,
}

impl Header {
    /// Serializes the header to its on-disk 20-byte little-endian layout.
    pub fn to_bytes(self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(&MAGIC.to_le_bytes());
        out[4] = VERSION;
        out[5] = self.symbol_bit_width;
        out[6] = self.count_bit_width;
        out[7] = self.line_count_bit_width;
        out[8..12].copy_from_slice(&self.unique_symbols_count.to_le_bytes());
        out[12..16].copy_from_slice(&self.mask_height.to_le_bytes());
        out[16..20].copy_from_slice(&self.mask_width.to_le_bytes());
        out
    }

    /// Parses and validates the header from the start of `buf`.
    ///
    /// This is the sole place the three boundary-validator checks from the
    /// format's component design live: buffer length, magic, and version.
    /// It additionally sanity-checks the header fields themselves (bit
    /// widths in range, dictionary size consistent with the chosen symbol
    /// width) so that later stages can trust them unconditionally.
    pub fn parse(buf: &[u8]) -> Result<Header, DecodeError> {
        if buf.len() < HEADER_LEN {
            return Err(DecodeError::TruncatedHeader { len: buf.len() });
        }

        let magic = u32::from_le_bytes(buf[0..4].try_into().unwrap());
        if magic != MAGIC {
            return Err(DecodeError::InvalidMagic {
                found: magic,
                expected: MAGIC,
            });
        }

        let version = buf[4];
        if version != VERSION {
            return Err(DecodeError::InvalidVersion {
                found: version,
                expected: VERSION,
            });
        }

        let symbol_bit_width = buf[5];
        check_bit_width("symbol_bit_width", symbol_bit_width, SYMBOL_BIT_WIDTH_RANGE)?;

        let count_bit_width = buf[6];
        check_bit_width("count_bit_width", count_bit_width, COUNT_BIT_WIDTH_RANGE)?;

        let line_count_bit_width = buf[7];
        check_bit_width(
            "line_count_bit_width",
            line_count_bit_width,
            LINE_COUNT_BIT_WIDTH_RANGE,
        )?;

        let unique_symbols_count = u32::from_le_bytes(buf[8..12].try_into().unwrap());
        let max_symbols_for_width = if symbol_bit_width >= 32 {
            u32::MAX
        } else {
            1u32 << symbol_bit_width
        };
        if unique_symbols_count == 0
            || unique_symbols_count > 256
            || unique_symbols_count > max_symbols_for_width
        {
            return Err(DecodeError::InvalidSymbolCount {
                found: unique_symbols_count,
            });
        }

        let mask_height = u32::from_le_bytes(buf[12..16].try_into().unwrap());
        let mask_width = u32::from_le_bytes(buf[16..20].try_into().unwrap());

        Ok(Header {
            symbol_bit_width,
            count_bit_width,
            line_count_bit_width,
            unique_symbols_count,
            mask_height,
            mask_width,
        })
    }
}

fn check_bit_width(field: &'static str, found: u8, (min, max): (u8, u8)) -> Result<(), DecodeError> {
    if found < min || found > max {
        Err(DecodeError::InvalidBitWidth {
            field,
            found,
            valid_min: min,
            valid_max: max,
        })
    } else {
        Ok(())
    }
}

/// The externally visible view of a header, returned by [`crate::header_of`].
///
/// Deliberately omits `magic`/`version`: those are wire-format plumbing a
/// caller never needs to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderInfo {
    pub symbol_bit_width: u8,
    pub count_bit_width: u8,
    pub line_count_bit_width: u8,
    pub unique_symbols_count: u32,
    pub height: u32,
    pub width: u32,
}

impl From<Header> for HeaderInfo {
    fn from(h: Header) -> Self {
        HeaderInfo {
            symbol_bit_width: h.symbol_bit_width,
            count_bit_width: h.count_bit_width,
            line_count_bit_width: h.line_count_bit_width,
            unique_symbols_count: h.unique_symbols_count,
            height: h.mask_height,
            width: h.mask_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Header {
        Header {
            symbol_bit_width: 2,
            count_bit_width: 5,
            line_count_bit_width: 3,
            unique_symbols_count: 3,
            mask_height: 10,
            mask_width: 20,
        }
    }

    #[test]
    fn roundtrips_through_bytes() {
        let h = sample();
        let bytes = h.to_bytes();
        assert_eq!(bytes.len(), HEADER_LEN);
        let parsed = Header::parse(&bytes).unwrap();
        assert_eq!(parsed, h);
    }

    #[test]
    fn rejects_truncated_buffer() {
        let bytes = sample().to_bytes();
        let err = Header::parse(&bytes[..19]).unwrap_err();
        assert!(matches!(err, DecodeError::TruncatedHeader { len: 19 }));
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = sample().to_bytes();
        bytes[0] ^= 0xFF;
        let err = Header::parse(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidMagic { .. }));
    }

    #[test]
    fn rejects_bad_version() {
        let mut bytes = sample().to_bytes();
        bytes[4] = 0xFF;
        let err = Header::parse(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidVersion { .. }));
    }

    #[test]
    fn rejects_symbol_count_inconsistent_with_width() {
        let mut h = sample();
        h.symbol_bit_width = 1; // allows at most 2 symbols
        h.unique_symbols_count = 3;
        let bytes = h.to_bytes();
        let err = Header::parse(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidSymbolCount { found: 3 }));
    }

    #[test]
    fn header_info_drops_wire_plumbing() {
        let h = sample();
        let info: HeaderInfo = h.into();
        assert_eq!(info.height, 10);
        assert_eq!(info.width, 20);
        assert_eq!(info.unique_symbols_count, 3);
    }
}
