//! Typed INI values
//!
//! The typed codec decides a value's tag once, at parse time:
//! `true`/`false` (any case) become booleans, decimal numeric literals and
//! `Infinity` become numbers, and everything else stays a string.

use serde::{Serialize, Serializer};
use std::fmt;

/// Largest magnitude at which every integer is exactly representable in an f64
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A single INI value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Num(f64),
    Str(String),
}

impl Value {
    /// Infers the value's type from its trimmed textual form
    pub fn coerce(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        if lower == "true" {
            return Value::Bool(true);
        }
        if lower == "false" {
            return Value::Bool(false);
        }

        if is_decimal_literal(raw) {
            if let Ok(n) = raw.parse::<f64>() {
                return Value::Num(n);
            }
        }

        // Overflowing literals render as `Infinity`, so it has to parse back
        match raw {
            "Infinity" | "+Infinity" => return Value::Num(f64::INFINITY),
            "-Infinity" => return Value::Num(f64::NEG_INFINITY),
            _ => {}
        }

        Value::Str(raw.to_string())
    }
}

/// Checks for an optionally signed decimal literal: `12`, `-3.5`, `.5`, `5.`, `1e-3`
///
/// Hex/octal/binary prefixes, `inf`, `nan` and digit separators are rejected.
/// `Infinity` is handled separately by [`Value::coerce`].
fn is_decimal_literal(s: &str) -> bool {
    let s = s.strip_prefix(['+', '-']).unwrap_or(s);

    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s, None),
    };

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return false;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !digits.is_empty() && all_digits(digits)
        }
    }
}

/// Renders a number in its canonical decimal form
///
/// Integers print without a fraction, `-0` prints as `0`, and magnitudes
/// outside `[1e-6, 1e21)` switch to exponent notation (`1e+21`, `1.5e-7`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }

    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Num(n) => f.write_str(&format_number(*n)),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            // Whole numbers go out as JSON integers (3306, not 3306.0)
            Value::Num(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            Value::Num(n) => serializer.serialize_f64(*n),
            Value::Str(s) => serializer.serialize_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Num(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Num(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_booleans_case_insensitively() {
        assert_eq!(Value::coerce("true"), Value::Bool(true));
        assert_eq!(Value::coerce("FALSE"), Value::Bool(false));
        assert_eq!(Value::coerce("True"), Value::Bool(true));
        assert_eq!(Value::coerce("yes"), Value::Str("yes".to_string()));
    }

    #[test]
    fn coerces_decimal_numbers() {
        assert_eq!(Value::coerce("42"), Value::Num(42.0));
        assert_eq!(Value::coerce("3.14"), Value::Num(3.14));
        assert_eq!(Value::coerce("-7"), Value::Num(-7.0));
        assert_eq!(Value::coerce(".5"), Value::Num(0.5));
        assert_eq!(Value::coerce("5."), Value::Num(5.0));
        assert_eq!(Value::coerce("1e3"), Value::Num(1000.0));
        assert_eq!(Value::coerce("+2.5E-1"), Value::Num(0.25));
        assert_eq!(Value::coerce("007"), Value::Num(7.0));
    }

    #[test]
    fn leaves_non_numbers_as_strings() {
        for raw in ["", ".", "-", "1.2.3", "1e", "e5", "inf", "NaN", "infinity", "INFINITY", "1_000", "12px", "0x10"] {
            assert_eq!(Value::coerce(raw), Value::Str(raw.to_string()), "input {:?}", raw);
        }
    }

    #[test]
    fn coerces_infinity_and_overflow() {
        assert_eq!(Value::coerce("Infinity"), Value::Num(f64::INFINITY));
        assert_eq!(Value::coerce("+Infinity"), Value::Num(f64::INFINITY));
        assert_eq!(Value::coerce("-Infinity"), Value::Num(f64::NEG_INFINITY));
        assert_eq!(Value::coerce("1e400"), Value::Num(f64::INFINITY));
        assert_eq!(Value::coerce("-1e400"), Value::Num(f64::NEG_INFINITY));
    }

    #[test]
    fn overflowing_numbers_survive_rendering() {
        for raw in ["1e400", "-1e400"] {
            let value = Value::coerce(raw);
            assert_eq!(Value::coerce(&value.to_string()), value);
        }
    }

    #[test]
    fn strings_keep_original_case() {
        assert_eq!(Value::coerce("LocalHost"), Value::Str("LocalHost".to_string()));
    }

    #[test]
    fn formats_integers_without_fraction() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-3306.0), "-3306");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn formats_floats_and_exponents() {
        assert_eq!(format_number(3.14), "3.14");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
    }

    #[test]
    fn formats_non_finite_numbers() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn display_dispatches_on_tag() {
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Num(50.0).to_string(), "50");
        assert_eq!(Value::from("x = y").to_string(), "x = y");
    }

    #[test]
    fn serializes_whole_numbers_as_integers() {
        assert_eq!(serde_json::to_string(&Value::Num(3306.0)).unwrap(), "3306");
        assert_eq!(serde_json::to_string(&Value::Num(2.5)).unwrap(), "2.5");
        assert_eq!(serde_json::to_string(&Value::Bool(true)).unwrap(), "true");
        assert_eq!(serde_json::to_string(&Value::from("a")).unwrap(), "\"a\"");
    }
}
