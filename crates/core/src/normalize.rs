//! Numeric normalization of decoded parameters
//!
//! Converts a [`RawValue`] tree into [`Value`], deciding for every number
//! literal whether the database should see an integer or a float.
//!
//! ## Policy
//!
//! | Literal | Result |
//! |---------|--------|
//! | `42`, `-7` | `Int` |
//! | `5.0`, `1e2`, `1.5e1` | `Int` (exactly integral, fits in `i64`) |
//! | `0.1`, `2.5e-3` | `Float`, nearest IEEE-754 double |
//! | `1.0000000000000000001` | `Float` (fractional remainder, however small) |
//! | `18446744073709551616` | `Float` (integral but outside `i64`) |
//! | `1e400`, malformed text | `String` with the original literal |
//!
//! Integrality is decided on the decimal text, never on a parsed double, so
//! a literal that only rounds to a whole number stays a float.
//!
//! Normalization is total: it never fails and never drops keys or elements.

use crate::value::{Params, RawParams, RawValue, Value};

/// Decimal digits in `i64::MAX`.
const I64_MAX_DIGITS: usize = 19;

/// Conversion into the typed [`Value`] model.
///
/// Implemented for [`RawValue`] (the decoding path) and for [`Value`] itself,
/// where it is the identity: an already-normalized tree is returned unchanged.
pub trait Normalize {
    /// Convert into a typed value.
    fn normalize(self) -> Value;
}

impl Normalize for RawValue {
    fn normalize(self) -> Value {
        match self {
            RawValue::Null => Value::Null,
            RawValue::Bool(b) => Value::Bool(b),
            RawValue::Number(literal) => normalize_number(&literal),
            RawValue::String(s) => Value::String(s),
            RawValue::Array(items) => Value::List(items.into_iter().map(Normalize::normalize).collect()),
            RawValue::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (k, v.normalize()))
                    .collect(),
            ),
        }
    }
}

impl Normalize for Value {
    fn normalize(self) -> Value {
        self
    }
}

/// Normalize a value tree.
pub fn normalize(value: impl Normalize) -> Value {
    value.normalize()
}

/// Normalize every entry of a parameter map.
pub fn normalize_params(params: RawParams) -> Params {
    params.into_iter().map(|(k, v)| (k, v.normalize())).collect()
}

/// Type a single number literal.
///
/// See the module documentation for the policy. Text that is not a decimal
/// number, or whose magnitude overflows an IEEE-754 double, comes back as
/// `Value::String` holding the literal unchanged.
pub fn normalize_number(literal: &str) -> Value {
    let Some(decimal) = Decimal::parse(literal.trim()) else {
        return Value::String(literal.to_string());
    };

    if let Some(i) = decimal.to_i64() {
        return Value::Int(i);
    }

    match literal.trim().parse::<f64>() {
        Ok(f) if f.is_finite() => Value::Float(f),
        _ => Value::String(literal.to_string()),
    }
}

/// A decimal literal split into sign, significant digits and a power of ten:
/// `value = sign * digits * 10^scale`.
#[derive(Debug, PartialEq)]
struct Decimal {
    negative: bool,
    /// Significant digits, no leading or trailing zeros. Empty means zero.
    digits: String,
    /// `None` when the exponent does not fit in an `i64`.
    scale: Option<i64>,
}

impl Decimal {
    /// Parse `[+-]int[.frac][(e|E)[+-]exp]`; at least one mantissa digit.
    fn parse(text: &str) -> Option<Decimal> {
        let (negative, rest) = match text.as_bytes().first()? {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };

        let (mantissa, exponent) = match rest.find(['e', 'E']) {
            Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
            None => (rest, None),
        };

        let (int_part, frac_part) = match mantissa.find('.') {
            Some(pos) => (&mantissa[..pos], &mantissa[pos + 1..]),
            None => (mantissa, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let exp = match exponent {
            None => Some(0),
            Some(e) => {
                let unsigned = e.strip_prefix(['+', '-']).unwrap_or(e);
                if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                e.parse::<i64>().ok()
            }
        };

        let mut digits: String = int_part.chars().chain(frac_part.chars()).collect();
        let mut scale = exp.and_then(|e| e.checked_sub(frac_part.len() as i64));

        let trailing = digits.len() - digits.trim_end_matches('0').len();
        digits.truncate(digits.len() - trailing);
        scale = scale.and_then(|s| s.checked_add(trailing as i64));
        let digits = digits.trim_start_matches('0').to_string();

        Some(Decimal {
            negative,
            digits,
            scale,
        })
    }

    /// The exact integer this literal denotes, if it is integral and fits.
    fn to_i64(&self) -> Option<i64> {
        if self.digits.is_empty() {
            return Some(0);
        }
        // Digits carry no trailing zeros, so a negative scale means a fraction.
        let scale = usize::try_from(self.scale?).ok()?;
        if self.digits.len() + scale > I64_MAX_DIGITS {
            return None;
        }

        let mut text = String::with_capacity(self.digits.len() + scale + 1);
        if self.negative {
            text.push('-');
        }
        text.push_str(&self.digits);
        text.extend(std::iter::repeat('0').take(scale));
        text.parse::<i64>().ok()
    }
}
