//! Parse numeric literal text into [`Bignum`]s (spec §4.4 `integer_C`,
//! `real_C`, `C`; reader-level radix prefixes like `#x` are stripped by the
//! caller before reaching here, except via [`from_radix_str`]).

use crate::bignum::Bignum;
use crate::error::BignumError;

/// Parse a decimal integer literal, optionally terminated by one or more
/// `#` characters marking unknown trailing digits (the inexact-integer
/// notation Lisps borrow from Common Lisp's `12#` meaning "about 120").
pub fn integer_c(text: &str) -> Result<Bignum, BignumError> {
    let (negative, rest) = strip_sign(text);
    if rest.is_empty() {
        return Err(invalid(text));
    }
    let hash_count = rest.chars().rev().take_while(|&c| c == '#').count();
    let digits_part = &rest[..rest.len() - hash_count];
    if digits_part.is_empty() || !digits_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(text));
    }
    let mut digit_bytes: Vec<u8> = digits_part.bytes().map(|b| b - b'0').collect();
    digit_bytes.extend(std::iter::repeat(0u8).take(hash_count));
    let magnitude = crate::decimal::digits_to_segments(&digit_bytes);
    if hash_count > 0 {
        Ok(Bignum::from_parts(negative, true, hash_count as i32, {
            // Re-derive without the appended zero placeholders: the
            // exponent already accounts for them.
            crate::decimal::digits_to_segments(&digits_part.bytes().map(|b| b - b'0').collect::<Vec<u8>>())
        }))
    } else {
        Ok(Bignum::from_parts(negative, false, 0, magnitude))
    }
}

/// Parse a real literal: `[sign] digits ['.' digits] [marker [sign] digits]`
/// where `marker` is one of `d D e E f F l L s S` (spec §4.4).
pub fn real_c(text: &str) -> Result<Bignum, BignumError> {
    let (negative, rest) = strip_sign(text);
    if rest.is_empty() {
        return Err(invalid(text));
    }
    let marker_pos = rest.find(|c: char| "dDeEfFlLsS".contains(c));
    let (mantissa, exp_part) = match marker_pos {
        Some(i) => (&rest[..i], Some(&rest[i + 1..])),
        None => (rest, None),
    };
    let (int_part, frac_part) = match mantissa.find('.') {
        Some(i) => (&mantissa[..i], &mantissa[i + 1..]),
        None => (mantissa, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid(text));
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid(text));
    }
    let explicit_exp: i32 = match exp_part {
        Some(e) if !e.is_empty() => e.parse().map_err(|_| invalid(text))?,
        Some(_) => return Err(invalid(text)),
        None => 0,
    };
    let mut digit_bytes: Vec<u8> = int_part.bytes().map(|b| b - b'0').collect();
    digit_bytes.extend(frac_part.bytes().map(|b| b - b'0'));
    if digit_bytes.is_empty() {
        digit_bytes.push(0);
    }
    let exponent = explicit_exp
        .checked_sub(frac_part.len() as i32)
        .ok_or(BignumError::ExponentOverflow)?;
    let magnitude = crate::decimal::digits_to_segments(&digit_bytes);
    Ok(Bignum::from_parts(negative, true, exponent, magnitude))
}

/// Dispatch on whether `text` looks like a real (contains `.` or an
/// exponent marker) or a plain integer (spec §4.4 `C`).
pub fn c(text: &str) -> Result<Bignum, BignumError> {
    if text.contains('.') || text.contains(|c: char| "dDeEfFlLsS".contains(c)) {
        real_c(text)
    } else {
        integer_c(text)
    }
}

/// Parse an integer literal in an arbitrary radix (2..=36), used by the
/// reader for `#b`/`#o`/`#d`/`#x` forms.
pub fn from_radix_str(text: &str, radix: u32) -> Result<Bignum, BignumError> {
    let (negative, rest) = strip_sign(text);
    if rest.is_empty() {
        return Err(invalid(text));
    }
    let value = i128::from_str_radix(rest, radix).map_err(|_| invalid(text))?;
    let mut n = Bignum::from_i128(value);
    if negative && !n.is_zero() {
        n = n.negated();
    }
    Ok(n)
}

fn strip_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

fn invalid(text: &str) -> BignumError {
    BignumError::InvalidLiteral {
        literal: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_c_parses_signed_decimal() {
        let n = integer_c("-123").unwrap();
        assert!(n.is_negative());
        assert!(n.is_integer());
    }

    #[test]
    fn integer_c_hash_marks_inexact() {
        let n = integer_c("12#").unwrap();
        assert!(n.is_inexact());
        assert!(!n.is_negative());
    }

    #[test]
    fn real_c_parses_fraction_and_exponent() {
        let n = real_c("1.5e2").unwrap();
        assert!(n.is_inexact());
        assert_eq!(n.magnitude().to_vec(), vec![15]);
        assert_eq!(n.exponent(), 1);
    }

    #[test]
    fn c_dispatches_on_shape() {
        assert!(c("42").unwrap().is_integer());
        assert!(!c("4.2").unwrap().is_integer());
    }

    #[test]
    fn from_radix_str_parses_hex() {
        let n = from_radix_str("ff", 16).unwrap();
        assert!(n.is_integer());
    }
}
