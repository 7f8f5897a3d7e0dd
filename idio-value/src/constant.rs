//! The four constant sub-tags nested under `Tag::Constant` (spec §3.1).

/// Which of the four constant families a `Tag::Constant` word belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConstantTag {
    /// Generic "idio" constants: `nil`, `#t`, `#f`, `void`, …
    Generic = 0b00,
    /// Reader tokens: delimiters, dot, pair separator, eol, eof.
    Token = 0b01,
    /// VM instruction codes — owned by the (out-of-scope) bytecode VM; this
    /// crate only reserves the sub-tag so `Idio` words round-trip through
    /// it without corruption.
    Vm = 0b10,
    /// A 21-bit Unicode scalar value.
    Unicode = 0b11,
}

impl ConstantTag {
    pub(crate) fn from_bits(bits: usize) -> ConstantTag {
        match bits & 0b11 {
            0b00 => ConstantTag::Generic,
            0b01 => ConstantTag::Token,
            0b10 => ConstantTag::Vm,
            0b11 => ConstantTag::Unicode,
            _ => unreachable!(),
        }
    }
}

/// Generic "idio" constants (spec §3.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum GenericConstant {
    /// The empty list / canonical false-ish value.
    Nil = 0,
    /// Boolean true.
    True = 1,
    /// Boolean false.
    False = 2,
    /// The value of expressions evaluated only for effect.
    Void = 3,
    /// An explicitly unspecified result.
    Unspec = 4,
    /// End of file, as a value rather than a condition.
    Eof = 5,
    /// Not-a-number, distinct from a NaN bignum (spec §3.3 flags).
    Nan = 6,
}

impl GenericConstant {
    pub(crate) fn from_payload(p: usize) -> Option<GenericConstant> {
        use GenericConstant::*;
        Some(match p {
            0 => Nil,
            1 => True,
            2 => False,
            3 => Void,
            4 => Unspec,
            5 => Eof,
            6 => Nan,
            _ => return None,
        })
    }
}

/// Reader-only token constants, produced while lexing but never returned as
/// a top-level read result (spec §4.7 "Tokens").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum ReaderToken {
    /// One of `( [ {`.
    LeftParen = 0,
    /// One of `) ] }`.
    RightParen = 1,
    /// A lone `.` outside a number.
    Dot = 2,
    /// The pair-separator `&`.
    PairSeparator = 3,
    /// End of line at the outer read depth.
    Eol = 4,
    /// End of input.
    Eof = 5,
}

impl ReaderToken {
    pub(crate) fn from_payload(p: usize) -> Option<ReaderToken> {
        use ReaderToken::*;
        Some(match p {
            0 => LeftParen,
            1 => RightParen,
            2 => Dot,
            3 => PairSeparator,
            4 => Eol,
            5 => Eof,
            _ => return None,
        })
    }
}

/// A validated Unicode scalar value packed into the 21-bit constant payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnicodeConstant(u32);

impl UnicodeConstant {
    /// Validate and wrap a code point. Surrogates (`U+D800..=U+DFFF`) and
    /// values beyond `U+10FFFF` are not valid Unicode scalar values and are
    /// rejected here, matching the reader's `#U+hhhh` and `\U` escape
    /// validation (spec §4.7, §8 scenario 5).
    pub fn from_code_point(cp: u32) -> Option<UnicodeConstant> {
        char::from_u32(cp).map(|_| UnicodeConstant(cp))
    }

    /// The wrapped code point.
    pub fn code_point(self) -> u32 {
        self.0
    }

    /// The code point as a `char`.
    pub fn as_char(self) -> char {
        char::from_u32(self.0).expect("constructed only from a validated scalar value")
    }
}
