use core::fmt;

use idio_types::WORD_BITS;

use crate::constant::{ConstantTag, GenericConstant, ReaderToken, UnicodeConstant};
use crate::heap::{HeapRef, HeapType};

/// Low-bit discriminant of an [`Idio`] word (spec §3.1 table).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// `00` — aligned reference into the GC heap.
    Heap,
    /// `01` — an immediate, sign-extended integer.
    Fixnum,
    /// `10` — a further sub-tagged constant.
    Constant,
    /// `11` — reserved sentinel payload (e.g. array holes).
    Placeholder,
}

const TAG_MASK: usize = 0b11;
const TAG_HEAP: usize = 0b00;
const TAG_FIXNUM: usize = 0b01;
const TAG_CONSTANT: usize = 0b10;
const TAG_PLACEHOLDER: usize = 0b11;

const PAYLOAD_SHIFT: u32 = 2;
const FIXNUM_BITS: u32 = WORD_BITS - PAYLOAD_SHIFT;

/// Largest integer representable as a fixnum on this host.
pub const FIXNUM_MAX: isize = (isize::MAX) >> PAYLOAD_SHIFT;
/// Smallest integer representable as a fixnum on this host.
pub const FIXNUM_MIN: isize = (isize::MIN) >> PAYLOAD_SHIFT;

static_assertions::const_assert!(FIXNUM_BITS >= 30);

/// Raised by [`Idio::fixnum`] when the value does not fit in
/// `FIXNUM_MIN..=FIXNUM_MAX`; the caller (`idio-bignum`) promotes to a
/// bignum instead (spec §3.4 invariant 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixnumOverflow;

impl fmt::Display for FixnumOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "integer does not fit in a fixnum")
    }
}

impl std::error::Error for FixnumOverflow {}

/// A single Idio value: either an immediate or a tagged heap reference.
///
/// `#[repr(transparent)]` so it is exactly one machine word, as required by
/// spec §3.1 ("Every value is a single machine word").
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Idio(usize);

impl Idio {
    /// Construct a fixnum, trapping (rather than wrapping) if `v` is out of
    /// range so the caller can promote to a bignum (spec §3.4 invariant 1).
    pub fn fixnum(v: isize) -> Result<Idio, FixnumOverflow> {
        if v > FIXNUM_MAX || v < FIXNUM_MIN {
            return Err(FixnumOverflow);
        }
        Ok(Idio(((v as usize) << PAYLOAD_SHIFT) | TAG_FIXNUM))
    }

    /// Build a heap-tagged value from an opaque GC reference.
    pub fn from_heap_ref(r: HeapRef) -> Idio {
        Idio(((r.raw() as usize) << PAYLOAD_SHIFT) | TAG_HEAP)
    }

    /// Build a generic constant value (`nil`, `#t`, `#f`, …).
    pub const fn generic(c: GenericConstant) -> Idio {
        Idio(Self::pack_constant(ConstantTag::Generic, c as usize))
    }

    /// Build a reader-token constant value.
    pub const fn reader_token(t: ReaderToken) -> Idio {
        Idio(Self::pack_constant(ConstantTag::Token, t as usize))
    }

    /// Build a Unicode code-point constant (21-bit payload, spec §3.1).
    pub fn unicode(u: UnicodeConstant) -> Idio {
        Idio(Self::pack_constant(ConstantTag::Unicode, u.code_point() as usize))
    }

    /// A reserved placeholder sentinel (e.g. an unset array slot).
    pub const fn placeholder() -> Idio {
        Idio(TAG_PLACEHOLDER)
    }

    const fn pack_constant(sub: ConstantTag, payload: usize) -> usize {
        ((payload << 2 | sub as usize) << PAYLOAD_SHIFT) | TAG_CONSTANT
    }

    fn unpack_constant(self) -> (ConstantTag, usize) {
        debug_assert_eq!(self.0 & TAG_MASK, TAG_CONSTANT);
        let rest = self.0 >> PAYLOAD_SHIFT;
        let sub = ConstantTag::from_bits(rest & 0b11);
        (sub, rest >> 2)
    }

    /// The low-bit tag discriminating this word's category.
    pub fn tag(self) -> Tag {
        match self.0 & TAG_MASK {
            TAG_HEAP => Tag::Heap,
            TAG_FIXNUM => Tag::Fixnum,
            TAG_CONSTANT => Tag::Constant,
            TAG_PLACEHOLDER => Tag::Placeholder,
            _ => unreachable!("mask 0b11 has exactly four outcomes"),
        }
    }

    /// Whether this value is a heap reference.
    pub fn is_heap(self) -> bool {
        self.tag() == Tag::Heap
    }

    /// Whether this value is an immediate fixnum.
    pub fn is_fixnum(self) -> bool {
        self.tag() == Tag::Fixnum
    }

    /// Whether this value is any kind of constant.
    pub fn is_constant(self) -> bool {
        self.tag() == Tag::Constant
    }

    /// Whether this value is the reserved placeholder sentinel.
    pub fn is_placeholder(self) -> bool {
        self.tag() == Tag::Placeholder
    }

    /// Recover the signed integer payload if this is a fixnum.
    pub fn as_fixnum(self) -> Option<isize> {
        if !self.is_fixnum() {
            return None;
        }
        // Arithmetic shift sign-extends; payload lives in the upper bits.
        Some((self.0 as isize) >> PAYLOAD_SHIFT)
    }

    /// Recover the opaque heap reference if this is a heap value.
    pub fn as_heap_ref(self) -> Option<HeapRef> {
        if !self.is_heap() {
            return None;
        }
        Some(HeapRef::from_raw((self.0 >> PAYLOAD_SHIFT) as u64))
    }

    /// Recover a generic constant, if this value is one.
    pub fn as_generic_constant(self) -> Option<GenericConstant> {
        if !self.is_constant() {
            return None;
        }
        let (sub, payload) = self.unpack_constant();
        (sub == ConstantTag::Generic)
            .then(|| GenericConstant::from_payload(payload))
            .flatten()
    }

    /// Recover a reader-token constant, if this value is one.
    pub fn as_reader_token(self) -> Option<ReaderToken> {
        if !self.is_constant() {
            return None;
        }
        let (sub, payload) = self.unpack_constant();
        (sub == ConstantTag::Token)
            .then(|| ReaderToken::from_payload(payload))
            .flatten()
    }

    /// Recover a Unicode code-point constant, if this value is one.
    pub fn as_unicode(self) -> Option<UnicodeConstant> {
        if !self.is_constant() {
            return None;
        }
        let (sub, payload) = self.unpack_constant();
        (sub == ConstantTag::Unicode)
            .then(|| UnicodeConstant::from_code_point(payload as u32))
            .flatten()
    }

    /// `nil`, the canonical empty list / "false-ish" sentinel.
    pub const fn nil() -> Idio {
        Idio::generic(GenericConstant::Nil)
    }

    /// Whether this value is `nil`.
    pub fn is_nil(self) -> bool {
        self.as_generic_constant() == Some(GenericConstant::Nil)
    }
}

impl fmt::Debug for Idio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag() {
            Tag::Fixnum => write!(f, "Idio::Fixnum({})", self.as_fixnum().unwrap()),
            Tag::Heap => write!(f, "Idio::Heap({:?})", self.as_heap_ref().unwrap()),
            Tag::Constant => {
                if let Some(g) = self.as_generic_constant() {
                    write!(f, "Idio::Constant({g:?})")
                } else if let Some(t) = self.as_reader_token() {
                    write!(f, "Idio::Token({t:?})")
                } else if let Some(u) = self.as_unicode() {
                    write!(f, "Idio::Unicode({:?})", u.code_point())
                } else {
                    write!(f, "Idio::Constant(<vm-instruction>)")
                }
            }
            Tag::Placeholder => write!(f, "Idio::Placeholder"),
        }
    }
}

/// Type predicate dispatch: inspects the tag first, only consulting the
/// heap header's type discriminator when the value is heap-tagged (spec
/// §4.2, `isa`).
pub fn isa(v: Idio, ty: HeapType, lookup: impl FnOnce(HeapRef) -> HeapType) -> bool {
    match v.as_heap_ref() {
        Some(r) => lookup(r) == ty,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixnum_round_trips() {
        for v in [-1, 0, 1, 42, FIXNUM_MAX, FIXNUM_MIN] {
            let i = Idio::fixnum(v).unwrap();
            assert!(i.is_fixnum());
            assert_eq!(i.as_fixnum(), Some(v));
        }
    }

    #[test]
    fn fixnum_traps_out_of_range() {
        assert!(Idio::fixnum(FIXNUM_MAX + 1).is_err());
        assert!(Idio::fixnum(FIXNUM_MIN - 1).is_err());
    }

    #[test]
    fn tags_are_mutually_exclusive() {
        let f = Idio::fixnum(7).unwrap();
        let c = Idio::nil();
        let p = Idio::placeholder();
        assert!(f.is_fixnum() && !f.is_constant() && !f.is_heap() && !f.is_placeholder());
        assert!(c.is_constant() && !c.is_fixnum() && !c.is_heap() && !c.is_placeholder());
        assert!(p.is_placeholder() && !p.is_fixnum() && !p.is_constant() && !p.is_heap());
    }

    #[test]
    fn heap_ref_round_trips() {
        let r = HeapRef::from_raw(0x1234);
        let v = Idio::from_heap_ref(r);
        assert!(v.is_heap());
        assert_eq!(v.as_heap_ref(), Some(r));
    }

    #[test]
    fn generic_constant_round_trips() {
        for g in [
            GenericConstant::Nil,
            GenericConstant::True,
            GenericConstant::False,
            GenericConstant::Void,
            GenericConstant::Unspec,
            GenericConstant::Eof,
            GenericConstant::Nan,
        ] {
            let v = Idio::generic(g);
            assert!(v.is_constant());
            assert_eq!(v.as_generic_constant(), Some(g));
            assert_eq!(v.as_reader_token(), None);
        }
    }

    #[test]
    fn reader_token_round_trips() {
        for t in [
            ReaderToken::LeftParen,
            ReaderToken::RightParen,
            ReaderToken::Dot,
            ReaderToken::PairSeparator,
            ReaderToken::Eol,
            ReaderToken::Eof,
        ] {
            let v = Idio::reader_token(t);
            assert_eq!(v.as_reader_token(), Some(t));
            assert_eq!(v.as_generic_constant(), None);
        }
    }

    #[test]
    fn unicode_round_trips() {
        let u = UnicodeConstant::from_code_point('λ' as u32).unwrap();
        let v = Idio::unicode(u);
        assert_eq!(v.as_unicode().unwrap().code_point(), 'λ' as u32);
    }
}
