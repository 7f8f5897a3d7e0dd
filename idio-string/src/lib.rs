//! Variable-width Unicode-aware string storage (spec §4.5).
//!
//! Plain text strings pick their element width (1/2/4 bytes) from the
//! widest code point they contain, the way a flexible-string-representation
//! implementation does. Octet strings and pathnames always use 1-byte
//! storage but carry no Unicode interpretation: their bytes are opaque,
//! which is what lets a pathname round-trip non-UTF-8 filesystem names.

mod substring;

pub use substring::{Substring, SubstringRangeError};

use std::fmt;
use thiserror::Error;

/// Distinguishes the three byte-storage string variants (spec §3.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringKind {
    /// Unicode text; element width is chosen from content.
    Text,
    /// 1-byte-per-element binary string, no Unicode interpretation.
    Octet,
    /// Like an octet string, but tagged distinctly so it round-trips even
    /// when it contains bytes that are not valid UTF-8.
    Pathname,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Storage {
    W1(Vec<u8>),
    W2(Vec<u16>),
    W4(Vec<u32>),
}

impl Storage {
    fn len(&self) -> usize {
        match self {
            Storage::W1(v) => v.len(),
            Storage::W2(v) => v.len(),
            Storage::W4(v) => v.len(),
        }
    }

    fn width_bytes(&self) -> usize {
        match self {
            Storage::W1(_) => 1,
            Storage::W2(_) => 2,
            Storage::W4(_) => 4,
        }
    }

    fn get(&self, i: usize) -> Option<u32> {
        match self {
            Storage::W1(v) => v.get(i).map(|&b| b as u32),
            Storage::W2(v) => v.get(i).map(|&b| b as u32),
            Storage::W4(v) => v.get(i).copied(),
        }
    }

    fn iter(&self) -> Box<dyn Iterator<Item = u32> + '_> {
        match self {
            Storage::W1(v) => Box::new(v.iter().map(|&b| b as u32)),
            Storage::W2(v) => Box::new(v.iter().map(|&b| b as u32)),
            Storage::W4(v) => Box::new(v.iter().copied()),
        }
    }
}

/// A string value: Unicode text, an octet string, or a pathname (spec
/// §3.3/§4.5). Substrings are a distinct wrapper, see [`Substring`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdioString {
    kind: StringKind,
    storage: Storage,
}

/// Errors raised constructing or slicing a string.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StringError {
    /// Reader/`from_utf8` input was not valid UTF-8.
    #[error("invalid UTF-8 at byte {byte_offset}")]
    InvalidUtf8 {
        /// Byte offset of the first invalid sequence.
        byte_offset: usize,
    },
}

/// Pick the narrowest storage width that can hold every code point.
fn width_for(max_code_point: u32) -> usize {
    if max_code_point <= 0xFF {
        1
    } else if max_code_point <= 0xFFFF {
        2
    } else {
        4
    }
}

fn pack(code_points: &[u32]) -> Storage {
    let max = code_points.iter().copied().max().unwrap_or(0);
    match width_for(max) {
        1 => Storage::W1(code_points.iter().map(|&c| c as u8).collect()),
        2 => Storage::W2(code_points.iter().map(|&c| c as u16).collect()),
        _ => Storage::W4(code_points.to_vec()),
    }
}

impl IdioString {
    /// Decode UTF-8 `bytes` into a text string, selecting element width
    /// from the widest code point present (spec §4.5).
    pub fn from_utf8_bytes(bytes: &[u8]) -> Result<IdioString, StringError> {
        let text =
            std::str::from_utf8(bytes).map_err(|e| StringError::InvalidUtf8 {
                byte_offset: e.valid_up_to(),
            })?;
        let code_points: Vec<u32> = text.chars().map(|c| c as u32).collect();
        Ok(IdioString {
            kind: StringKind::Text,
            storage: pack(&code_points),
        })
    }

    /// Build a text string directly from code points (used by the reader
    /// for escape sequences like `©`).
    pub fn from_code_points(code_points: &[u32]) -> IdioString {
        IdioString {
            kind: StringKind::Text,
            storage: pack(code_points),
        }
    }

    /// An octet string: `len` raw bytes, no Unicode interpretation.
    pub fn octet_string(bytes: &[u8]) -> IdioString {
        IdioString {
            kind: StringKind::Octet,
            storage: Storage::W1(bytes.to_vec()),
        }
    }

    /// A pathname: raw bytes preserved verbatim, including any sequence
    /// that is not valid UTF-8 (spec §4.5).
    pub fn pathname(bytes: &[u8]) -> IdioString {
        IdioString {
            kind: StringKind::Pathname,
            storage: Storage::W1(bytes.to_vec()),
        }
    }

    /// Which string variant this is.
    pub fn kind(&self) -> StringKind {
        self.kind
    }

    /// Storage element width in bytes (1, 2, or 4).
    pub fn width_bytes(&self) -> usize {
        self.storage.width_bytes()
    }

    /// Number of code points (for octet/pathname: number of raw bytes).
    pub fn len_code_points(&self) -> usize {
        self.storage.len()
    }

    /// Total size of the storage buffer in bytes.
    pub fn byte_len(&self) -> usize {
        self.len_code_points() * self.width_bytes()
    }

    /// The code point (or raw byte, for octet/pathname) at index `i`.
    pub fn code_point_at(&self, i: usize) -> Option<u32> {
        self.storage.get(i)
    }

    /// Iterate the string's elements as `u32`s.
    pub fn iter_code_points(&self) -> impl Iterator<Item = u32> + '_ {
        self.storage.iter()
    }

    /// Render back to a Rust `String`, for text strings only (octet strings
    /// and pathnames are not assumed to be valid UTF-8).
    pub fn to_text_string(&self) -> Option<String> {
        if self.kind != StringKind::Text {
            return None;
        }
        self.storage
            .iter()
            .map(char::from_u32)
            .collect::<Option<String>>()
    }

    /// Raw bytes, for octet strings and pathnames (1-byte storage only).
    pub fn as_raw_bytes(&self) -> Option<&[u8]> {
        match (&self.kind, &self.storage) {
            (StringKind::Octet | StringKind::Pathname, Storage::W1(v)) => Some(v),
            _ => None,
        }
    }

    /// Concatenate two strings of the same kind, widening storage as
    /// needed so the result can hold every code point from both operands.
    pub fn concat(&self, other: &IdioString) -> IdioString {
        let mut code_points: Vec<u32> = self.storage.iter().collect();
        code_points.extend(other.storage.iter());
        IdioString {
            kind: self.kind,
            storage: pack(&code_points),
        }
    }
}

impl fmt::Display for IdioString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text_string() {
            Some(s) => write!(f, "{s}"),
            None => write!(f, "#<{:?} {} bytes>", self.kind, self.byte_len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_selection_picks_narrowest_fit() {
        let s = IdioString::from_utf8_bytes("hello".as_bytes()).unwrap();
        assert_eq!(s.width_bytes(), 1);

        let s = IdioString::from_utf8_bytes("caf\u{00e9}".as_bytes()).unwrap();
        assert_eq!(s.width_bytes(), 1); // U+00E9 still fits in a byte

        let s = IdioString::from_utf8_bytes("\u{4e2d}".as_bytes()).unwrap();
        assert_eq!(s.width_bytes(), 2); // CJK ideograph needs 2 bytes

        let s = IdioString::from_utf8_bytes("\u{1F600}".as_bytes()).unwrap();
        assert_eq!(s.width_bytes(), 4); // emoji needs 4 bytes
    }

    #[test]
    fn pathname_round_trips_non_utf8_bytes() {
        let raw = [0x2f, 0xff, 0xfe, 0x00, 0x2f];
        let p = IdioString::pathname(&raw);
        assert_eq!(p.as_raw_bytes().unwrap(), &raw[..]);
        assert_eq!(p.kind(), StringKind::Pathname);
    }

    #[test]
    fn equality_is_code_point_wise_across_widths() {
        let narrow = IdioString::from_code_points(&[65, 66, 67]);
        let wide = IdioString::from_code_points(&[65, 66, 67, 0x1F600]);
        let narrow_again = IdioString::from_code_points(&[65, 66, 67]);
        assert_eq!(narrow, narrow_again);
        assert_ne!(narrow, wide);
    }

    #[test]
    fn concat_widens_storage_when_needed() {
        let a = IdioString::from_code_points(&[65, 66]);
        let b = IdioString::from_code_points(&[0x1F600]);
        let c = a.concat(&b);
        assert_eq!(c.width_bytes(), 4);
        assert_eq!(c.len_code_points(), 3);
    }
}
