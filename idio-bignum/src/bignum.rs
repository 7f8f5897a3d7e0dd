//! The public [`Bignum`] type: a signed arbitrary-precision integer or real
//! built over [`crate::significand`]'s magnitude arithmetic (spec §4.4).

use std::rc::Rc;

use bitflags::bitflags;

use crate::decimal;
use crate::error::BignumError;
use crate::significand;

bitflags! {
    /// Flags carried alongside a bignum's magnitude and exponent (spec §4.4
    /// "Bignum flags"). `INTEGER` and the rest are mutually exclusive only
    /// in the sense that an integer bignum never sets `INEXACT` or `NAN`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BignumFlags: u8 {
        /// This bignum represents an exact integer; the exponent is always
        /// zero for integers.
        const INTEGER      = 0b0001;
        /// This bignum is a real carrying an inexact (rounded) value, as
        /// division and most real arithmetic necessarily produce.
        const INEXACT      = 0b0010;
        /// The value is negative. Kept as a flag bit (per spec layout)
        /// rather than folded into the magnitude's sign, so every
        /// significand routine stays magnitude-only.
        const REAL_NEGATIVE = 0b0100;
        /// Not-a-number, the result of an invalid real operation.
        const NAN          = 0b1000;
    }
}

/// An arbitrary-precision integer or real (spec §3.4, §4.4). Magnitude
/// segments are least-significant-first, base `10^DPW`; `exponent` scales
/// the magnitude by `10^exponent` and is always `0` for integers.
#[derive(Debug, Clone, PartialEq)]
pub struct Bignum {
    pub(crate) flags: BignumFlags,
    pub(crate) exponent: i32,
    pub(crate) magnitude: Rc<Vec<i64>>,
}

impl Bignum {
    fn new(flags: BignumFlags, exponent: i32, magnitude: Vec<i64>) -> Bignum {
        let magnitude = significand::strip(magnitude);
        let mut flags = flags;
        if significand::is_zero(&magnitude) {
            flags.remove(BignumFlags::REAL_NEGATIVE);
        }
        Bignum {
            flags,
            exponent,
            magnitude: Rc::new(magnitude),
        }
    }

    /// The canonical integer zero.
    pub fn zero() -> Bignum {
        Bignum::new(BignumFlags::INTEGER, 0, vec![0])
    }

    /// Construct an exact integer bignum from a native `i128`.
    pub fn from_i128(v: i128) -> Bignum {
        let negative = v < 0;
        let digits = digit_bytes(v.unsigned_abs());
        let magnitude = decimal::digits_to_segments(&digits);
        let mut flags = BignumFlags::INTEGER;
        if negative {
            flags |= BignumFlags::REAL_NEGATIVE;
        }
        Bignum::new(flags, 0, magnitude)
    }

    /// A not-a-number real, the result of an invalid operation like `0./0.`.
    pub fn nan() -> Bignum {
        Bignum::new(BignumFlags::INEXACT | BignumFlags::NAN, 0, vec![0])
    }

    pub(crate) fn from_parts(
        negative: bool,
        inexact: bool,
        exponent: i32,
        magnitude: Vec<i64>,
    ) -> Bignum {
        let mut flags = BignumFlags::empty();
        if exponent == 0 && !inexact {
            flags |= BignumFlags::INTEGER;
        }
        if inexact {
            flags |= BignumFlags::INEXACT;
        }
        if negative {
            flags |= BignumFlags::REAL_NEGATIVE;
        }
        Bignum::new(flags, exponent, magnitude)
    }

    /// Is this bignum an exact integer?
    pub fn is_integer(&self) -> bool {
        self.flags.contains(BignumFlags::INTEGER)
    }

    /// Is this bignum an inexact real?
    pub fn is_inexact(&self) -> bool {
        self.flags.contains(BignumFlags::INEXACT)
    }

    /// Is this bignum negative?
    pub fn is_negative(&self) -> bool {
        self.flags.contains(BignumFlags::REAL_NEGATIVE)
    }

    /// Is this bignum not-a-number?
    pub fn is_nan(&self) -> bool {
        self.flags.contains(BignumFlags::NAN)
    }

    /// Is this bignum's magnitude zero?
    pub fn is_zero(&self) -> bool {
        significand::is_zero(&self.magnitude)
    }

    pub(crate) fn exponent(&self) -> i32 {
        self.exponent
    }

    pub(crate) fn magnitude(&self) -> &[i64] {
        &self.magnitude
    }

    /// Decimal digit count of the magnitude (spec's `SIG_MAX_DIGITS` bound).
    pub fn digit_count(&self) -> usize {
        decimal::segments_to_digits(&self.magnitude).len()
    }

    /// `self + other`, both integers (spec §4.4 "add": same-sign magnitudes
    /// add directly; opposite signs subtract the smaller from the larger
    /// and take the larger's sign).
    pub fn add(&self, other: &Bignum) -> Bignum {
        debug_assert!(self.is_integer() && other.is_integer());
        if self.is_negative() == other.is_negative() {
            Bignum::from_parts(
                self.is_negative(),
                false,
                0,
                significand::add(&self.magnitude, &other.magnitude),
            )
        } else {
            self.sub(&other.negated())
        }
    }

    /// `self - other`, both integers (spec §4.4 "subtract").
    pub fn sub(&self, other: &Bignum) -> Bignum {
        debug_assert!(self.is_integer() && other.is_integer());
        if self.is_negative() != other.is_negative() {
            return Bignum::from_parts(
                self.is_negative(),
                false,
                0,
                significand::add(&self.magnitude, &other.magnitude),
            );
        }
        match significand::cmp(&self.magnitude, &other.magnitude) {
            std::cmp::Ordering::Less => Bignum::from_parts(
                !self.is_negative(),
                false,
                0,
                significand::sub(&other.magnitude, &self.magnitude),
            ),
            _ => Bignum::from_parts(
                self.is_negative(),
                false,
                0,
                significand::sub(&self.magnitude, &other.magnitude),
            ),
        }
    }

    /// `self * other`, both integers.
    pub fn mul(&self, other: &Bignum) -> Bignum {
        debug_assert!(self.is_integer() && other.is_integer());
        Bignum::from_parts(
            self.is_negative() != other.is_negative(),
            false,
            0,
            significand::mul(&self.magnitude, &other.magnitude),
        )
    }

    /// `(quotient, remainder)` of integer division, truncating toward zero
    /// (spec §4.4 "divide").
    pub fn div(&self, other: &Bignum) -> Result<(Bignum, Bignum), BignumError> {
        debug_assert!(self.is_integer() && other.is_integer());
        if other.is_zero() {
            return Err(BignumError::DivideByZero);
        }
        let (q, r) = significand::div_rem(&self.magnitude, &other.magnitude);
        let quotient = Bignum::from_parts(self.is_negative() != other.is_negative(), false, 0, q);
        let remainder = Bignum::from_parts(self.is_negative(), false, 0, r);
        Ok((quotient, remainder))
    }

    /// `-self`.
    pub fn negated(&self) -> Bignum {
        let mut out = self.clone();
        if !out.is_zero() {
            out.flags.toggle(BignumFlags::REAL_NEGATIVE);
        }
        out
    }

    /// Three-way comparison against another bignum of the same exactness
    /// family (integer vs integer, or real vs real after scaling).
    pub fn cmp(&self, other: &Bignum) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        if self.is_negative() != other.is_negative() {
            return if self.is_negative() {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
        let (a, b) = crate::real::align_exponents(self, other);
        let mag_cmp = significand::cmp(&a, &b);
        if self.is_negative() {
            mag_cmp.reverse()
        } else {
            mag_cmp
        }
    }
}

fn digit_bytes(v: u128) -> Vec<u8> {
    v.to_string().bytes().map(|c| c - b'0').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_same_sign() {
        let a = Bignum::from_i128(123);
        let b = Bignum::from_i128(456);
        assert_eq!(a.add(&b).digit_count(), 3);
        assert!(!a.add(&b).is_negative());
    }

    #[test]
    fn add_opposite_signs_is_subtraction() {
        let a = Bignum::from_i128(100);
        let b = Bignum::from_i128(-30);
        let sum = a.add(&b);
        assert!(!sum.is_negative());
        assert_eq!(sum.magnitude().to_vec(), vec![70]);
    }

    #[test]
    fn sub_crossing_zero_flips_sign() {
        let a = Bignum::from_i128(10);
        let b = Bignum::from_i128(30);
        let diff = a.sub(&b);
        assert!(diff.is_negative());
        assert_eq!(diff.magnitude().to_vec(), vec![20]);
    }

    #[test]
    fn mul_sign_rules() {
        let a = Bignum::from_i128(-6);
        let b = Bignum::from_i128(7);
        assert!(a.mul(&b).is_negative());
        assert!(!a.mul(&a).is_negative());
    }

    #[test]
    fn div_by_zero_is_an_error() {
        let a = Bignum::from_i128(1);
        let zero = Bignum::zero();
        assert_eq!(a.div(&zero), Err(BignumError::DivideByZero));
    }

    #[test]
    fn negated_zero_stays_non_negative() {
        assert!(!Bignum::zero().negated().is_negative());
    }
}
