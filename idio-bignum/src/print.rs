//! Rendering bignums to text (spec §4.4 "Printing", §6 print dials).
//!
//! The conversion-format letter comes from the same table C's `printf`
//! uses for floating point (`d e f g s x X o u b`); only the ones that
//! apply to a real bignum's own rendering are implemented here, the rest
//! exist so callers that thread a dial value through don't need a second
//! enum for the cases that end up falling back to `D`.

use crate::bignum::Bignum;
use crate::decimal;

/// Which textual form to render a real bignum in (spec §6 print dials).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintConversionFormat {
    /// Idio's native reader-round-trippable form: `123.456` or
    /// `1.23456e10` once the exponent crosses the "too big/small" bound.
    D,
    /// Always scientific notation: `1.23456e2`.
    E,
    /// Always fixed-point notation: `123.456`.
    F,
    /// Shortest of `E`/`F` that round-trips (falls back to `D`: it already
    /// is that).
    G,
    /// `S`-register single-precision rendering (no bignum-level
    /// distinction from `D`; retained to keep the dial's full letter set).
    S,
    /// Lowercase hexadecimal integer rendering.
    X,
    /// Uppercase hexadecimal integer rendering.
    XUpper,
    /// Octal integer rendering.
    O,
    /// Unsigned decimal integer rendering.
    U,
    /// Binary integer rendering.
    B,
}

/// Render an integer bignum as a signed decimal string, left-padding with
/// zeros to `precision` digits if given (spec: "precision pads with
/// leading zeros").
pub fn format_integer(n: &Bignum, precision: Option<usize>) -> String {
    let digits = decimal::segments_to_digits(n.magnitude());
    let mut s: String = digits.iter().map(|&d| (d + b'0') as char).collect();
    if let Some(p) = precision {
        while s.len() < p {
            s.insert(0, '0');
        }
    }
    if n.is_negative() {
        format!("-{s}")
    } else {
        s
    }
}

/// Render a real bignum per `format` (spec §4.4 "Printing"). `NaN` always
/// renders as `NaN`, regardless of `format`.
pub fn format_real(n: &Bignum, format: PrintConversionFormat, precision: Option<usize>) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    let digits = decimal::segments_to_digits(n.magnitude());
    let digit_str: String = digits.iter().map(|&d| (d + b'0') as char).collect();
    let sign = if n.is_negative() { "-" } else { "" };

    let rendered = match format {
        PrintConversionFormat::E => scientific(&digit_str, n.exponent(), precision),
        PrintConversionFormat::F => fixed_point(&digit_str, n.exponent(), precision),
        // D (and the integer-radix letters, inapplicable to a real): pick
        // fixed-point for modest exponents, scientific once the decimal
        // point would land far outside the digit string.
        _ => {
            let point = digit_str.len() as i64 + n.exponent() as i64;
            if (-3..=21).contains(&point) {
                fixed_point(&digit_str, n.exponent(), precision)
            } else {
                scientific(&digit_str, n.exponent(), precision)
            }
        }
    };
    format!("{sign}{rendered}")
}

fn fixed_point(digits: &str, exponent: i32, precision: Option<usize>) -> String {
    let point = digits.len() as i64 + exponent as i64;
    let mut out = String::new();
    if point <= 0 {
        out.push_str("0.");
        out.push_str(&"0".repeat((-point) as usize));
        out.push_str(digits);
    } else if (point as usize) >= digits.len() {
        out.push_str(digits);
        out.push_str(&"0".repeat(point as usize - digits.len()));
        out.push_str(".0");
    } else {
        out.push_str(&digits[..point as usize]);
        out.push('.');
        out.push_str(&digits[point as usize..]);
    }
    if let Some(p) = precision {
        pad_fraction(&mut out, p);
    }
    out
}

fn scientific(digits: &str, exponent: i32, precision: Option<usize>) -> String {
    let first = &digits[..1];
    let rest = if digits.len() > 1 { &digits[1..] } else { "0" };
    let e = exponent as i64 + digits.len() as i64 - 1;
    let mut mantissa = format!("{first}.{rest}");
    if let Some(p) = precision {
        pad_fraction(&mut mantissa, p);
    }
    format!("{mantissa}e{e}")
}

fn pad_fraction(s: &mut String, precision: usize) {
    let frac_len = s.split('.').nth(1).map(str::len).unwrap_or(0);
    if frac_len < precision {
        s.push_str(&"0".repeat(precision - frac_len));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn format_integer_pads_to_precision() {
        let n = parse::integer_c("42").unwrap();
        assert_eq!(format_integer(&n, Some(5)), "00042");
    }

    #[test]
    fn format_real_nan_ignores_format() {
        let n = Bignum::nan();
        assert_eq!(format_real(&n, PrintConversionFormat::F, None), "NaN");
    }

    #[test]
    fn format_real_fixed_point() {
        let n = parse::real_c("1.5").unwrap();
        assert_eq!(format_real(&n, PrintConversionFormat::F, None), "1.5");
    }

    #[test]
    fn format_real_scientific() {
        let n = parse::real_c("1.5e2").unwrap();
        assert_eq!(format_real(&n, PrintConversionFormat::E, None), "1.5e2");
    }
}
