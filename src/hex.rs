//! Conversions between raw bytes and hexadecimal text.
//!
//! Encoding always produces lowercase digits, while decoding accepts either case.

/// Errors produced by the hex codec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    /// The input had an odd number of characters, so it can't be split into bytes.
    #[error("hex string {0} has an odd number of characters")]
    OddLength(String),
    /// The input contained a character that is not a hexadecimal digit.
    #[error("hex string {hex} contains invalid hex digit '{digit}'")]
    InvalidDigit { hex: String, digit: char },
    /// The requested bit width is outside `1..=max`.
    #[error("bit width {width} is out of range 1..={max}")]
    InvalidBitWidth { width: u32, max: u32 },
}

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Encodes `bytes` as two lowercase hex digits per byte, high nibble first.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(DIGITS[(b >> 4) as usize] as char);
        out.push(DIGITS[(b & 0x0f) as usize] as char);
    }
    out
}

/// Decodes a hex string into bytes.
///
/// Both uppercase and lowercase digits are accepted. An empty string decodes to an
/// empty vector.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, HexError> {
    if hex.len() % 2 != 0 {
        return Err(HexError::OddLength(hex.to_string()));
    }
    let digit = |c: char| {
        c.to_digit(16).ok_or_else(|| HexError::InvalidDigit {
            hex: hex.to_string(),
            digit: c,
        })
    };

    let mut chars = hex.chars();
    let mut out = Vec::with_capacity(hex.len() / 2);
    while let Some(high) = chars.next() {
        // Multi-byte characters can make the byte length even while the char count
        // is odd, so the low nibble may be missing here.
        let low = chars
            .next()
            .ok_or_else(|| HexError::OddLength(hex.to_string()))?;
        out.push((digit(high)? * 16 + digit(low)?) as u8);
    }
    Ok(out)
}

/// Renders the lowest `bit_width` bits of a 32-bit two's-complement integer.
///
/// The result has `ceil(bit_width / 4)` digits, most significant first.
///
/// ```
/// use myshell::hex::int_to_hex;
/// assert_eq!(int_to_hex(-1, 8).unwrap(), "ff");
/// assert_eq!(int_to_hex(0x1f, 32).unwrap(), "0000001f");
/// ```
pub fn int_to_hex(value: i32, bit_width: u32) -> Result<String, HexError> {
    check_bit_width(bit_width, i32::BITS)?;
    Ok(render_hex(value as u32, bit_width))
}

/// Same as [`int_to_hex`] for a single byte; `bit_width` may not exceed 8.
pub fn byte_to_hex(value: u8, bit_width: u32) -> Result<String, HexError> {
    check_bit_width(bit_width, u8::BITS)?;
    Ok(render_hex(u32::from(value), bit_width))
}

fn check_bit_width(width: u32, max: u32) -> Result<(), HexError> {
    if width < 1 || width > max {
        return Err(HexError::InvalidBitWidth { width, max });
    }
    Ok(())
}

/// Unchecked rendering shared with the hexdump formatter, which only ever
/// passes constant widths. `bit_width` must be in `1..=32`.
pub(crate) fn render_hex(value: u32, bit_width: u32) -> String {
    let mask = if bit_width >= u32::BITS {
        u32::MAX
    } else {
        (1u32 << bit_width) - 1
    };
    let digits = bit_width.div_ceil(4) as usize;
    format!("{:0digits$x}", value & mask, digits = digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bytes_to_hex() {
        assert_eq!(bytes_to_hex(&[1, 0xae, 0x22]), "01ae22");
        assert_eq!(bytes_to_hex(&[]), "");
        assert_eq!(bytes_to_hex(&[0xff, 0x00, 0x7f]), "ff007f");
    }

    #[test]
    fn test_hex_to_bytes_mixed_case() {
        assert_eq!(hex_to_bytes("01aE22").unwrap(), vec![1, 0xae, 0x22]);
        assert_eq!(hex_to_bytes("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_hex_to_bytes_rejects_odd_length() {
        assert_eq!(
            hex_to_bytes("abc"),
            Err(HexError::OddLength("abc".to_string()))
        );
    }

    #[test]
    fn test_hex_to_bytes_rejects_non_hex() {
        let err = hex_to_bytes("0g").unwrap_err();
        assert_eq!(
            err,
            HexError::InvalidDigit {
                hex: "0g".to_string(),
                digit: 'g'
            }
        );
        // two bytes, one char
        assert!(matches!(hex_to_bytes("é"), Err(HexError::OddLength(_))));
    }

    #[test]
    fn test_int_to_hex_widths() {
        assert_eq!(int_to_hex(-1, 8).unwrap(), "ff");
        assert_eq!(int_to_hex(-1, 32).unwrap(), "ffffffff");
        assert_eq!(int_to_hex(0x30, 32).unwrap(), "00000030");
        assert_eq!(int_to_hex(0b101, 3).unwrap(), "5");
        assert_eq!(int_to_hex(0x1ff, 9).unwrap(), "1ff");
        assert_eq!(int_to_hex(0x2ff, 9).unwrap(), "0ff");
    }

    #[test]
    fn test_bit_width_out_of_range() {
        assert_eq!(
            int_to_hex(1, 0),
            Err(HexError::InvalidBitWidth { width: 0, max: 32 })
        );
        assert!(int_to_hex(1, 33).is_err());
        assert!(byte_to_hex(1, 9).is_err());
        assert_eq!(byte_to_hex(0xab, 8).unwrap(), "ab");
        assert_eq!(byte_to_hex(0xab, 4).unwrap(), "b");
    }

    proptest! {
        #[test]
        fn hex_round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            prop_assert_eq!(hex_to_bytes(&bytes_to_hex(&bytes)).unwrap(), bytes);
        }

        #[test]
        fn decoded_hex_reencodes_lowercase(hex in "([0-9a-fA-F]{2}){0,32}") {
            let bytes = hex_to_bytes(&hex).unwrap();
            prop_assert_eq!(bytes_to_hex(&bytes), hex.to_lowercase());
        }
    }
}
