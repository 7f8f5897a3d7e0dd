//! Fixnum fast path with automatic bignum promotion (spec §3.4 invariants
//! 1-2, §4.3).

use idio_value::{Idio, FIXNUM_MAX, FIXNUM_MIN};

use crate::bignum::Bignum;
use crate::error::BignumError;

/// Either end of the numeric tower's fast path/slow path split: a native
/// fixnum, or a promoted bignum once a value or intermediate result no
/// longer fits in `FIXNUM_MIN..=FIXNUM_MAX`.
#[derive(Debug, Clone)]
pub enum Number {
    /// An immediate fixnum value.
    Fixnum(Idio),
    /// A bignum, integer or real.
    Bignum(Bignum),
}

impl Number {
    /// Wrap a native `isize`, staying a fixnum if it fits.
    pub fn from_isize(v: isize) -> Number {
        match Idio::fixnum(v) {
            Ok(i) => Number::Fixnum(i),
            Err(_) => Number::Bignum(Bignum::from_i128(v as i128)),
        }
    }

    fn as_bignum(&self) -> Bignum {
        match self {
            Number::Fixnum(i) => Bignum::from_i128(i.as_fixnum().expect("fixnum tag") as i128),
            Number::Bignum(b) => b.clone(),
        }
    }
}

/// Demote an integer bignum back to a fixnum if its magnitude fits (spec
/// §3.4 invariant 2: "any integer bignum whose magnitude fits
/// `FIXNUM_MIN..FIXNUM_MAX` is automatically converted to a fixnum before
/// being returned from arithmetic").
pub fn shrink(b: &Bignum) -> Number {
    if !b.is_integer() {
        return Number::Bignum(b.clone());
    }
    let digits = crate::decimal::segments_to_digits(b.magnitude());
    let text: String = digits.iter().map(|&d| (d + b'0') as char).collect();
    if let Ok(v) = text.parse::<i128>() {
        let signed = if b.is_negative() { -v } else { v };
        if (FIXNUM_MIN as i128..=FIXNUM_MAX as i128).contains(&signed) {
            if let Ok(i) = Idio::fixnum(signed as isize) {
                return Number::Fixnum(i);
            }
        }
    }
    Number::Bignum(b.clone())
}

/// Checked fixnum addition, promoting to a bignum on overflow (spec's
/// `idio_fixnum_add`-style fast path).
pub fn checked_add(a: Number, b: Number) -> Number {
    if let (Number::Fixnum(x), Number::Fixnum(y)) = (&a, &b) {
        let (xi, yi) = (x.as_fixnum().unwrap(), y.as_fixnum().unwrap());
        if let Some(sum) = xi.checked_add(yi) {
            if let Ok(i) = Idio::fixnum(sum) {
                return Number::Fixnum(i);
            }
        }
    }
    shrink(&a.as_bignum().add(&b.as_bignum()))
}

/// Checked fixnum subtraction, promoting to a bignum on overflow.
pub fn checked_sub(a: Number, b: Number) -> Number {
    if let (Number::Fixnum(x), Number::Fixnum(y)) = (&a, &b) {
        let (xi, yi) = (x.as_fixnum().unwrap(), y.as_fixnum().unwrap());
        if let Some(diff) = xi.checked_sub(yi) {
            if let Ok(i) = Idio::fixnum(diff) {
                return Number::Fixnum(i);
            }
        }
    }
    shrink(&a.as_bignum().sub(&b.as_bignum()))
}

/// Checked fixnum multiplication, promoting to a bignum on overflow.
pub fn checked_mul(a: Number, b: Number) -> Number {
    if let (Number::Fixnum(x), Number::Fixnum(y)) = (&a, &b) {
        let (xi, yi) = (x.as_fixnum().unwrap(), y.as_fixnum().unwrap());
        if let Some(product) = xi.checked_mul(yi) {
            if let Ok(i) = Idio::fixnum(product) {
                return Number::Fixnum(i);
            }
        }
    }
    shrink(&a.as_bignum().mul(&b.as_bignum()))
}

/// Integer division, promoting operands to bignums throughout (spec's
/// numeric tower never does inexact fixnum division: `quotient`/
/// `remainder` are exact integer operations).
pub fn checked_div(a: Number, b: Number) -> Result<(Number, Number), BignumError> {
    let (q, r) = a.as_bignum().div(&b.as_bignum())?;
    Ok((shrink(&q), shrink(&r)))
}

/// `quotient(a, b)`, truncating toward zero.
pub fn quotient(a: Number, b: Number) -> Result<Number, BignumError> {
    checked_div(a, b).map(|(q, _)| q)
}

/// `remainder(a, b)`.
pub fn remainder(a: Number, b: Number) -> Result<Number, BignumError> {
    checked_div(a, b).map(|(_, r)| r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_stays_fixnum_when_it_fits() {
        let a = Number::from_isize(2);
        let b = Number::from_isize(3);
        match checked_add(a, b) {
            Number::Fixnum(i) => assert_eq!(i.as_fixnum(), Some(5)),
            Number::Bignum(_) => panic!("should not have promoted"),
        }
    }

    #[test]
    fn add_promotes_on_overflow() {
        let a = Number::from_isize(FIXNUM_MAX);
        let b = Number::from_isize(1);
        match checked_add(a, b) {
            Number::Bignum(_) => {}
            Number::Fixnum(_) => panic!("should have promoted to bignum"),
        }
    }

    #[test]
    fn mul_overflow_then_shrink_back_down() {
        let big = Bignum::from_i128(FIXNUM_MAX as i128 + 1);
        let one = Bignum::from_i128(1);
        let (q, _) = big.div(&one).unwrap();
        match shrink(&q) {
            Number::Bignum(_) => {}
            Number::Fixnum(_) => panic!("value is out of fixnum range"),
        }
    }

    #[test]
    fn shrink_demotes_small_bignum_to_fixnum() {
        let b = Bignum::from_i128(42);
        match shrink(&b) {
            Number::Fixnum(i) => assert_eq!(i.as_fixnum(), Some(42)),
            Number::Bignum(_) => panic!("42 fits in a fixnum"),
        }
    }

    #[test]
    fn quotient_and_remainder_match_native() {
        let a = Number::from_isize(17);
        let b = Number::from_isize(5);
        let q = quotient(a.clone_for_test(), b.clone_for_test()).unwrap();
        let r = remainder(a, b).unwrap();
        assert!(matches!(q, Number::Fixnum(i) if i.as_fixnum() == Some(3)));
        assert!(matches!(r, Number::Fixnum(i) if i.as_fixnum() == Some(2)));
    }
}

#[cfg(test)]
impl Number {
    fn clone_for_test(&self) -> Number {
        match self {
            Number::Fixnum(i) => Number::Fixnum(*i),
            Number::Bignum(b) => Number::Bignum(b.clone()),
        }
    }
}
