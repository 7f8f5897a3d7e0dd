//! The `^read-error` / `^rt-*-error` condition hierarchy (spec §7).
//!
//! The condition/restart *system* — handlers, `with-condition-handler`,
//! non-local transfer back into the signalling expression — belongs to
//! the evaluator and is out of scope here (spec §1 Non-goals); what this
//! crate owns is the *type hierarchy* itself; the shape every condition
//! value is required to carry, callable from Rust via plain `Result`.

use idio_bignum::BignumError;
use idio_bitset::BitsetError;
use idio_reader::ReadError;

/// Every condition this runtime core can raise, each retaining the
/// subsystem error it was built from (spec §7's constructor list, minus
/// the condition-system plumbing that owns delivering them to a
/// handler).
#[derive(Debug, Clone, thiserror::Error)]
pub enum Condition {
    /// `^read-error (message location detail line pos)`.
    #[error(transparent)]
    Read(#[from] ReadError),

    /// `^rt-bignum-error` / `^rt-bignum-conversion-error (message
    /// location detail number)`.
    #[error("bignum error: {0}")]
    Bignum(#[from] BignumError),

    /// `^rt-fixnum-error (…)`.
    #[error("fixnum error: {message}")]
    Fixnum {
        /// Human-readable description.
        message: String,
    },

    /// `^rt-fixnum-conversion-error (…)`.
    #[error("fixnum conversion error: {message}")]
    FixnumConversion {
        /// Human-readable description.
        message: String,
    },

    /// `^rt-C-conversion-error (…)`: converting to/from a native C
    /// scalar type failed or lost precision.
    #[error("C conversion error: {message}")]
    CConversion {
        /// Human-readable description.
        message: String,
    },

    /// `^rt-bitset-bounds-error (message location detail bit)` /
    /// `^rt-bitset-size-mismatch-error (message location detail size1
    /// size2)`.
    #[error("bitset error: {0}")]
    Bitset(#[from] BitsetError),

    /// `^rt-divide-by-zero-error (…)`.
    #[error("divide by zero")]
    DivideByZero,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bignum_error_converts_via_from() {
        let c: Condition = BignumError::DivideByZero.into();
        assert!(matches!(c, Condition::Bignum(BignumError::DivideByZero)));
    }

    #[test]
    fn bitset_error_converts_via_from() {
        let c: Condition = BitsetError::OutOfBounds { bit: 3, size: 2 }.into();
        assert!(matches!(c, Condition::Bitset(BitsetError::OutOfBounds { .. })));
    }
}
