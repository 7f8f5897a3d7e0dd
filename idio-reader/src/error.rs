use thiserror::Error;

use crate::lexobj::LexObj;

/// Every reader failure class (spec §4.7 "Error reporting": "parse,
/// list-EOF, pair-separator, comment, string, bitset, template, pathname,
/// integer, bignum, UTF-8, Unicode"), sharing one condition shape: a
/// lexical object plus a human-readable message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}:{}:{}: {message}", lexobj.filename, lexobj.line, lexobj.pos)]
pub struct ReadError {
    /// Where in the source the failure was detected.
    pub lexobj: LexObj,
    /// The failure class, used by callers that want to match on it.
    pub kind: ReadErrorKind,
    /// A human-readable description.
    pub message: String,
}

/// The distinct `^read-error` classes (spec §4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadErrorKind {
    /// A generic, otherwise-unclassified parse failure.
    Parse,
    /// End of input reached inside an open list.
    ListEof,
    /// The pair separator `&` appeared somewhere invalid.
    PairSeparator,
    /// A block comment was malformed (e.g. unterminated).
    Comment,
    /// A string literal was malformed (bad escape, unterminated, …).
    String,
    /// A `#B{ … }` bitset literal was malformed.
    Bitset,
    /// A `#T{ … }`/`#S"…"` template/interpolated string was malformed.
    Template,
    /// A `#P"…"` pathname literal was malformed.
    Pathname,
    /// An integer literal failed to parse.
    Integer,
    /// A bignum (real) literal failed to parse.
    Bignum,
    /// The UTF-8 byte stream was malformed.
    Utf8,
    /// A `#U+hhhh` or `\U` escape named an invalid Unicode scalar value.
    Unicode,
}

impl ReadError {
    pub(crate) fn new(kind: ReadErrorKind, lexobj: LexObj, message: impl Into<String>) -> ReadError {
        ReadError {
            lexobj,
            kind,
            message: message.into(),
        }
    }
}
