//! Real (inexact) bignum arithmetic (spec §4.4).
//!
//! A real's value is `(-1)^sign * magnitude * 10^exponent`. Addition and
//! subtraction need both operands at a common exponent before the shared
//! magnitude routines apply; multiplication and division combine exponents
//! directly. Every result is renormalized: trailing zero digits are folded
//! into the exponent, and magnitudes beyond `SIG_MAX_DIGITS` digits are
//! truncated with the exponent raised to compensate (spec §3.4 invariant 4).

use idio_types::SIG_MAX_DIGITS;

use crate::bignum::Bignum;
use crate::decimal;
use crate::error::BignumError;
use crate::significand;

/// Scale both magnitudes to their common (smaller) exponent.
pub(crate) fn align_exponents(a: &Bignum, b: &Bignum) -> (Vec<i64>, Vec<i64>) {
    if a.exponent() == b.exponent() {
        return (a.magnitude().to_vec(), b.magnitude().to_vec());
    }
    if a.exponent() > b.exponent() {
        let shift = (a.exponent() - b.exponent()) as u32;
        (scale_up(a.magnitude(), shift), b.magnitude().to_vec())
    } else {
        let shift = (b.exponent() - a.exponent()) as u32;
        (a.magnitude().to_vec(), scale_up(b.magnitude(), shift))
    }
}

fn scale_up(mag: &[i64], shift: u32) -> Vec<i64> {
    let mut m = mag.to_vec();
    for _ in 0..shift {
        m = significand::shift_left(&m, 0);
    }
    m
}

/// Strip trailing (least-significant) zero digits into the exponent, then
/// truncate any excess leading precision, also compensating the exponent.
fn normalize(magnitude: Vec<i64>, exponent: i32) -> Result<(Vec<i64>, i32), BignumError> {
    let mut digits = decimal::segments_to_digits(&magnitude);
    let mut exp = exponent;
    while digits.len() > 1 && *digits.last().unwrap() == 0 {
        digits.pop();
        exp = exp.checked_add(1).ok_or(BignumError::ExponentOverflow)?;
    }
    if digits.len() > SIG_MAX_DIGITS {
        let drop = digits.len() - SIG_MAX_DIGITS;
        digits.truncate(digits.len() - drop);
        exp = exp
            .checked_add(drop as i32)
            .ok_or(BignumError::ExponentOverflow)?;
    }
    Ok((decimal::digits_to_segments(&digits), exp))
}

pub(crate) fn add(a: &Bignum, b: &Bignum) -> Result<Bignum, BignumError> {
    let common_exp = a.exponent().min(b.exponent());
    let (am, bm) = align_exponents(a, b);
    let (negative, magnitude) = if a.is_negative() == b.is_negative() {
        (a.is_negative(), significand::add(&am, &bm))
    } else {
        match significand::cmp(&am, &bm) {
            std::cmp::Ordering::Less => (b.is_negative(), significand::sub(&bm, &am)),
            _ => (a.is_negative(), significand::sub(&am, &bm)),
        }
    };
    let (magnitude, exponent) = normalize(magnitude, common_exp)?;
    Ok(Bignum::from_parts(
        negative,
        a.is_inexact() || b.is_inexact(),
        exponent,
        magnitude,
    ))
}

pub(crate) fn sub(a: &Bignum, b: &Bignum) -> Result<Bignum, BignumError> {
    add(a, &b.negated())
}

pub(crate) fn mul(a: &Bignum, b: &Bignum) -> Result<Bignum, BignumError> {
    let exponent = a
        .exponent()
        .checked_add(b.exponent())
        .ok_or(BignumError::ExponentOverflow)?;
    let magnitude = significand::mul(a.magnitude(), b.magnitude());
    let (magnitude, exponent) = normalize(magnitude, exponent)?;
    Ok(Bignum::from_parts(
        a.is_negative() != b.is_negative(),
        true,
        exponent,
        magnitude,
    ))
}

/// Real division always yields an inexact result (spec §8: `1/3` and `9/2`
/// both read back as reals). The dividend is scaled up by
/// `SIG_MAX_DIGITS` decimal places before dividing so the quotient carries
/// a full complement of significant digits.
pub(crate) fn div(a: &Bignum, b: &Bignum) -> Result<Bignum, BignumError> {
    if b.is_zero() {
        return Err(BignumError::DivideByZero);
    }
    let mut scaled = a.magnitude().to_vec();
    for _ in 0..SIG_MAX_DIGITS {
        scaled = significand::shift_left(&scaled, 0);
    }
    let (q, _) = significand::div_rem(&scaled, b.magnitude());
    let exponent = a
        .exponent()
        .checked_sub(b.exponent())
        .and_then(|e| e.checked_sub(SIG_MAX_DIGITS as i32))
        .ok_or(BignumError::ExponentOverflow)?;
    let (magnitude, exponent) = normalize(q, exponent)?;
    Ok(Bignum::from_parts(
        a.is_negative() != b.is_negative(),
        true,
        exponent,
        magnitude,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn add_aligns_exponents() {
        let a = parse::real_c("1.5").unwrap();
        let b = parse::real_c("0.25").unwrap();
        let sum = add(&a, &b).unwrap();
        assert_eq!(crate::print::format_real(&sum, crate::print::PrintConversionFormat::D, None), "1.75");
    }

    #[test]
    fn div_is_always_inexact() {
        let one = parse::real_c("1.0").unwrap();
        let three = parse::real_c("3.0").unwrap();
        let q = div(&one, &three).unwrap();
        assert!(q.is_inexact());
    }

    #[test]
    fn mul_exponent_overflow_is_reported() {
        let huge = Bignum::from_parts(false, true, i32::MAX, vec![1]);
        let also_huge = Bignum::from_parts(false, true, 1, vec![1]);
        assert_eq!(mul(&huge, &also_huge), Err(BignumError::ExponentOverflow));
    }
}
