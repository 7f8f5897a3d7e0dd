//! Small byte/hex helpers used by the reader and the bignum radix parser.

/// Value of a single ASCII hex digit (`0-9a-zA-Z`), up to base 36, matching
/// the reader's `#x`/`#o`/`#b` literal grammar which allows `A-Z` as digits
/// for radices above 10.
pub fn hex_digit_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        'a'..='z' => Some(c as u32 - 'a' as u32 + 10),
        'A'..='Z' => Some(c as u32 - 'A' as u32 + 10),
        _ => None,
    }
}

/// Read a big-endian `u32` out of a 4-byte slice.
pub fn read_be_u32(buf: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*buf)
}

/// Write a `u32` as big-endian bytes.
pub fn write_be_u32(v: u32) -> [u8; 4] {
    v.to_be_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_digit_covers_base36() {
        assert_eq!(hex_digit_value('0'), Some(0));
        assert_eq!(hex_digit_value('9'), Some(9));
        assert_eq!(hex_digit_value('a'), Some(10));
        assert_eq!(hex_digit_value('Z'), Some(35));
        assert_eq!(hex_digit_value('!'), None);
    }

    #[test]
    fn be_u32_round_trips() {
        let bytes = write_be_u32(0xdead_beef);
        assert_eq!(read_be_u32(&bytes), 0xdead_beef);
    }
}
