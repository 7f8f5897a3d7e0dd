//! The Idio runtime core facade: one dependency pulling in value
//! encoding, the collector, the numeric tower, strings, bitsets, and the
//! reader, plus the two things no single subsystem owns — the condition
//! type hierarchy (spec §7) and the process-wide print dials (spec §6).

mod condition;
mod print_dials;

pub use condition::Condition;
pub use print_dials::{dials, set_dials, PrintDials};

pub use idio_types::{DPW, SEGMENT_BASE, WORD_BITS};

pub use idio_bignum::{checked_add, checked_div, checked_mul, checked_sub, quotient, remainder};
pub use idio_bignum::{shrink, Bignum, BignumError, BignumFlags, Number, PrintConversionFormat};
pub use idio_bitset::{Bitset, BitsetError};
pub use idio_gc::{GcError, GcStats, HashEntry, HashRecord, Heap, Payload, RootSet, StatsSink};
pub use idio_reader::{
    Handle, LexObj, NoOperators, OperatorExpand, ReadError, ReadErrorKind, Reader, SrcProperties,
    StringHandle,
};
pub use idio_string::{IdioString, StringError, StringKind, Substring, SubstringRangeError};
pub use idio_value::{
    isa, FixnumOverflow, GenericConstant, HeapFlags, HeapHeader, HeapRef, HeapType, Idio,
    ReaderToken, Tag, UnicodeConstant, FIXNUM_MAX, FIXNUM_MIN,
};

/// A ready-to-use reader with no operator table, reading from an
/// in-memory string — the convenience entry point `read-from-string`
/// style callers reach for (spec §4.7 examples).
pub fn read_from_string(filename: impl Into<String>, source: &str) -> (Reader<NoOperators>, StringHandle) {
    (Reader::new(NoOperators), StringHandle::new(filename, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_from_string_reads_a_fixnum() {
        let (mut reader, mut handle) = read_from_string("<test>", "42");
        let v = reader.read(&mut handle).unwrap();
        assert_eq!(v.as_fixnum(), Some(42));
    }

    #[test]
    fn condition_wraps_a_read_error() {
        let (mut reader, mut handle) = read_from_string("<test>", "(1 2");
        let err = reader.read(&mut handle).unwrap_err();
        let condition: Condition = err.into();
        assert!(matches!(condition, Condition::Read(_)));
    }
}
