//! Idio's numeric tower (spec §4.3, §4.4): a fixnum fast path over native
//! machine integers, and arbitrary-precision integer/real bignums built on
//! base-`10^DPW` decimal segments.

mod bignum;
mod decimal;
mod error;
mod fixnum;
pub mod parse;
mod print;
mod real;
mod significand;

pub use bignum::{Bignum, BignumFlags};
pub use error::BignumError;
pub use fixnum::{
    checked_add, checked_div, checked_mul, checked_sub, quotient, remainder, shrink, Number,
};
pub use print::PrintConversionFormat;
