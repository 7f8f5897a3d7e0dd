use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::IdioString;

/// A `(parent, offset, length)` view into a parent string, expressed in
/// code-point units (the original C representation uses a byte range into
/// the parent's storage buffer; indexing by code point is equivalent since
/// offsets are always taken at element boundaries, and it is what a safe
/// Rust API should expose).
///
/// Holding `Rc<IdioString>` keeps the parent alive for exactly as long as
/// any substring of it exists (spec §3.4 invariant 5).
#[derive(Debug, Clone)]
pub struct Substring {
    parent: Rc<IdioString>,
    offset: usize,
    len: usize,
}

/// Raised when a substring range does not fit inside its parent.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("substring range {offset}..{end} out of bounds for parent of length {parent_len}")]
pub struct SubstringRangeError {
    offset: usize,
    end: usize,
    parent_len: usize,
}

impl Substring {
    /// Build a substring `offset..offset+len` of `parent`, validating that
    /// the range lies entirely within the parent (spec §3.4 invariant 5).
    pub fn new(
        parent: Rc<IdioString>,
        offset: usize,
        len: usize,
    ) -> Result<Substring, SubstringRangeError> {
        let end = offset + len;
        if end > parent.len_code_points() {
            return Err(SubstringRangeError {
                offset,
                end,
                parent_len: parent.len_code_points(),
            });
        }
        Ok(Substring { parent, offset, len })
    }

    /// The parent string this substring views.
    pub fn parent(&self) -> &Rc<IdioString> {
        &self.parent
    }

    /// Number of code points in the substring.
    pub fn len_code_points(&self) -> usize {
        self.len
    }

    /// Byte offset into the parent's storage buffer.
    pub fn byte_offset(&self) -> usize {
        self.offset * self.parent.width_bytes()
    }

    /// Byte length of the substring's view.
    pub fn byte_len(&self) -> usize {
        self.len * self.parent.width_bytes()
    }

    /// The code point at index `i` within the substring.
    pub fn code_point_at(&self, i: usize) -> Option<u32> {
        if i >= self.len {
            return None;
        }
        self.parent.code_point_at(self.offset + i)
    }

    /// Materialize the substring as an owned, standalone string.
    pub fn to_owned_string(&self) -> IdioString {
        let points: Vec<u32> = (0..self.len)
            .map(|i| self.code_point_at(i).expect("range validated at construction"))
            .collect();
        IdioString::from_code_points(&points)
    }
}

impl PartialEq for Substring {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && (0..self.len).all(|i| self.code_point_at(i) == other.code_point_at(i))
    }
}
impl Eq for Substring {}

impl fmt::Display for Substring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_owned_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_then_concat_recovers_original() {
        let parent = Rc::new(IdioString::from_utf8_bytes("hello world".as_bytes()).unwrap());
        let left = Substring::new(parent.clone(), 0, 5).unwrap();
        let right = Substring::new(parent.clone(), 5, 6).unwrap();
        let rebuilt = left.to_owned_string().concat(&right.to_owned_string());
        assert_eq!(rebuilt.to_text_string().unwrap(), "hello world");
    }

    #[test]
    fn out_of_range_is_rejected() {
        let parent = Rc::new(IdioString::from_utf8_bytes("hi".as_bytes()).unwrap());
        assert!(Substring::new(parent, 1, 5).is_err());
    }
}
