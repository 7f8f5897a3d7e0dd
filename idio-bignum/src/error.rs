use thiserror::Error;

/// Numeric-tower error conditions (spec §4.4, §7 `^rt-bignum-error` family).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BignumError {
    /// An exponent computation over/underflowed `i32`, e.g. `10e2147483647`.
    #[error("bignum conversion error: exponent overflow")]
    ExponentOverflow,
    /// Integer division, or real division, by a zero divisor.
    #[error("divide by zero")]
    DivideByZero,
    /// A numeric literal did not parse as a valid integer or real.
    #[error("invalid numeric literal: {literal}")]
    InvalidLiteral {
        /// The literal text that failed to parse.
        literal: String,
    },
}
