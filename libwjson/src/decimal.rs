//! Exact fixed-point numbers.

use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};
use std::fmt;

/// A decimal number `mantissa / 10^scale` with no precision limit.
///
/// Equality is structural: `1.5` (mantissa 15, scale 1) and `1.50`
/// (mantissa 150, scale 2) are different values, just as they are different
/// JSON texts.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Decimal {
    mantissa: BigInt,
    scale: u32,
}

impl Decimal {
    pub fn new(mantissa: impl Into<BigInt>, scale: u32) -> Self {
        Self {
            mantissa: mantissa.into(),
            scale,
        }
    }

    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    /// Number of digits after the decimal point.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Whether the value is an integer that fits in an `i32`.
    pub fn to_i32(&self) -> Option<i32> {
        if self.scale == 0 {
            self.mantissa.to_i32()
        } else {
            None
        }
    }

    /// Whether the value is an integer that fits in an `i64`.
    pub fn to_i64(&self) -> Option<i64> {
        if self.scale == 0 {
            self.mantissa.to_i64()
        } else {
            None
        }
    }

    /// Nearest double, correctly rounded from the decimal text.
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// Append an integer-part digit.
    pub(crate) fn push_digit(&mut self, digit: u32) {
        self.mantissa = &self.mantissa * 10u32 + digit;
    }

    /// Append a fractional digit.
    pub(crate) fn push_fraction_digit(&mut self, digit: u32) {
        self.push_digit(digit);
        self.scale += 1;
    }

    pub(crate) fn negate(&mut self) {
        self.mantissa = -std::mem::take(&mut self.mantissa);
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mantissa.sign() == Sign::Minus {
            f.write_str("-")?;
        }
        let digits = self.mantissa.magnitude().to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            return f.write_str(&digits);
        }

        // Pad so at least one digit precedes the point.
        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
        } else {
            digits
        };
        let (whole, frac) = padded.split_at(padded.len() - scale);
        write!(f, "{}.{}", whole, frac)
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({})", self)
    }
}

impl From<i64> for Decimal {
    fn from(n: i64) -> Self {
        Decimal::new(n, 0)
    }
}

impl From<BigInt> for Decimal {
    fn from(n: BigInt) -> Self {
        Decimal::new(n, 0)
    }
}
