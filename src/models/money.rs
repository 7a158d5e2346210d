//! Money type for representing currency amounts
//!
//! Internally stores amounts in hundredths of the currency unit (i64) to avoid
//! floating-point drift when summing. On the wire an amount is a plain JSON
//! number in whole currency units, so `500` means five hundred krónur.
//!
//! Parsed and deserialized amounts are bounded by [`Money::MAX`]; arithmetic
//! saturates so aggregations over stored data can never overflow.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as hundredths of the currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

/// Largest accepted magnitude in hundredths (one trillion currency units)
const LIMIT_CENTS: i64 = 1_000_000_000_000 * 100;

impl Money {
    /// Largest amount accepted from user input or stored data
    pub const MAX: Money = Money(LIMIT_CENTS);

    /// Create a Money amount from hundredths
    ///
    /// # Examples
    /// ```
    /// use expense_tracker::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.major(), 10);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    pub const fn from_major(major: i64) -> Self {
        Self(major * 100)
    }

    /// Create a Money amount from a floating point value in currency units
    ///
    /// Returns `None` for NaN, infinities and amounts beyond [`Money::MAX`].
    pub fn from_major_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents.abs() > LIMIT_CENTS as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// Whether the magnitude is within [`Money::MAX`]
    pub const fn is_within_limit(&self) -> bool {
        self.0 >= -LIMIT_CENTS && self.0 <= LIMIT_CENTS
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in hundredths
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole-unit portion (truncated toward zero)
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Get the fractional portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// The amount in currency units as a float, for ratios and percentages
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Parse a money amount from user input
    ///
    /// Accepts "500", "12.5", "-3.75", "+20", "500 kr", "kr500", "$10.50"
    /// and "1_000". Fractions beyond two digits are truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s.strip_prefix('+').unwrap_or(s))
        };

        let s = s.trim();
        let s = s
            .strip_prefix('$')
            .or_else(|| s.strip_prefix("kr"))
            .unwrap_or(s);
        let s = s.strip_suffix("kr").or_else(|| s.strip_suffix("ISK")).unwrap_or(s);
        let cleaned: String = s.trim().chars().filter(|c| *c != '_').collect();

        if cleaned.is_empty() {
            return Err(MoneyParseError::InvalidFormat(original.to_string()));
        }

        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        let cents = match cleaned.split_once('.') {
            Some((whole, frac)) => {
                if frac.contains('.') || (whole.is_empty() && frac.is_empty()) {
                    return Err(invalid());
                }
                let whole: i64 = if whole.is_empty() {
                    0
                } else {
                    parse_digits(whole).ok_or_else(invalid)?
                };
                let frac_cents = match frac.len() {
                    0 => 0,
                    1 => parse_digits(frac).ok_or_else(invalid)? * 10,
                    _ => {
                        parse_digits(frac).ok_or_else(invalid)?;
                        parse_digits(&frac[..2]).ok_or_else(invalid)?
                    }
                };
                whole
                    .checked_mul(100)
                    .and_then(|c| c.checked_add(frac_cents))
                    .ok_or(MoneyParseError::Overflow)?
            }
            None => parse_digits(&cleaned)
                .ok_or_else(invalid)?
                .checked_mul(100)
                .ok_or(MoneyParseError::Overflow)?,
        };

        if cents > LIMIT_CENTS {
            return Err(MoneyParseError::Overflow);
        }

        Ok(Self(if negative { -cents } else { cents }))
    }
}

/// Parse a run of ASCII digits; anything else (including "NaN" or "inf") fails
fn parse_digits(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.major().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.major(), self.cents_part())
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.cents_part() == 0 {
            serializer.serialize_i64(self.major())
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MoneyVisitor;

        impl<'de> Visitor<'de> for MoneyVisitor {
            type Value = Money;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a finite amount in currency units")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
                v.checked_mul(100)
                    .map(Money)
                    .filter(Money::is_within_limit)
                    .ok_or_else(|| E::custom("amount out of range"))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
                i64::try_from(v)
                    .map_err(|_| E::custom("amount out of range"))
                    .and_then(|v| self.visit_i64(v))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
                Money::from_major_f64(v)
                    .ok_or_else(|| E::custom("amount must be finite and in range"))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
                Money::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(MoneyVisitor)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    Overflow,
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::Overflow => write!(f, "Amount is too large"),
        }
    }
}

impl std::error::Error for MoneyParseError {}

/// How amounts are rendered for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Currency symbol, e.g. "kr" or "$"
    pub symbol: String,
    /// Whether the symbol follows the number ("1.500 kr") or precedes it ("$1,500")
    pub symbol_after: bool,
    /// Fraction digits shown (0-2)
    pub decimals: u8,
    /// Digit group separator, if any
    pub thousands_separator: Option<char>,
    /// Separator between whole and fractional parts
    pub decimal_separator: char,
}

impl Default for CurrencyFormat {
    /// Icelandic króna style, matching the amounts the tracker was built around
    fn default() -> Self {
        Self {
            symbol: "kr".to_string(),
            symbol_after: true,
            decimals: 0,
            thousands_separator: Some('.'),
            decimal_separator: ',',
        }
    }
}

impl CurrencyFormat {
    /// Format an amount, rounding half away from zero to `decimals` digits
    pub fn format(&self, amount: Money) -> String {
        let decimals = u32::from(self.decimals.min(2));
        let scale = 10_i64.pow(2 - decimals);
        let rounded = (amount.cents().abs() + scale / 2) / scale;
        let unit = 10_i64.pow(decimals);
        let whole = rounded / unit;
        let frac = rounded % unit;

        let mut number = group_digits(whole, self.thousands_separator);
        if decimals > 0 {
            number.push(self.decimal_separator);
            number.push_str(&format!("{:0width$}", frac, width = decimals as usize));
        }

        let sign = if amount.is_negative() && rounded != 0 {
            "-"
        } else {
            ""
        };

        if self.symbol.is_empty() {
            format!("{}{}", sign, number)
        } else if self.symbol_after {
            format!("{}{} {}", sign, number, self.symbol)
        } else {
            format!("{}{}{}", sign, self.symbol, number)
        }
    }
}

fn group_digits(value: i64, separator: Option<char>) -> String {
    let digits = value.to_string();
    let Some(sep) = separator else {
        return digits;
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.major(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "10.50");
        assert_eq!(Money::from_cents(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_major(10);
        let b = Money::from_major(5);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("500").unwrap().cents(), 50000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-3.75").unwrap().cents(), -375);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("1500 kr").unwrap().cents(), 150000);
        assert_eq!(Money::parse("1_000").unwrap().cents(), 100000);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("1.239").unwrap().cents(), 123);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("NaN").is_err());
        assert!(Money::parse("inf").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("1,500").is_err());
    }

    #[test]
    fn test_from_major_f64_rejects_non_finite() {
        assert_eq!(Money::from_major_f64(12.345), Some(Money::from_cents(1235)));
        assert_eq!(Money::from_major_f64(f64::NAN), None);
        assert_eq!(Money::from_major_f64(f64::INFINITY), None);
    }

    #[test]
    fn test_parse_rejects_amounts_beyond_limit() {
        assert_eq!(Money::parse("1000000000000").unwrap(), Money::MAX);
        assert_eq!(Money::parse("1000000000000.01"), Err(MoneyParseError::Overflow));
        assert_eq!(Money::parse("-90000000000000000"), Err(MoneyParseError::Overflow));
    }

    #[test]
    fn test_deserialize_rejects_amounts_beyond_limit() {
        assert!(serde_json::from_str::<Money>("90000000000000000").is_err());
        assert!(serde_json::from_str::<Money>("-1e13").is_err());
        let m: Money = serde_json::from_str("1000000000000").unwrap();
        assert_eq!(m, Money::MAX);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(i64::MAX - 1);
        assert_eq!((huge + huge).cents(), i64::MAX);
        assert_eq!((-huge - huge).cents(), i64::MIN);
        let total: Money = [huge, huge, Money::from_major(1)].iter().sum();
        assert_eq!(total.cents(), i64::MAX);
        assert!(!huge.is_within_limit());
        assert!(Money::MAX.is_within_limit());
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_major(1), Money::from_major(2), Money::from_major(3)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::from_major(6));
    }

    #[test]
    fn test_serialization_uses_currency_units() {
        assert_eq!(serde_json::to_string(&Money::from_major(500)).unwrap(), "500");
        assert_eq!(serde_json::to_string(&Money::from_cents(1050)).unwrap(), "10.5");

        let m: Money = serde_json::from_str("500").unwrap();
        assert_eq!(m, Money::from_major(500));
        let m: Money = serde_json::from_str("12.25").unwrap();
        assert_eq!(m.cents(), 1225);
        let m: Money = serde_json::from_str("\"-4\"").unwrap();
        assert_eq!(m.cents(), -400);
    }

    #[test]
    fn test_currency_format_default_isk() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.format(Money::from_major(1500)), "1.500 kr");
        assert_eq!(fmt.format(Money::from_major(500)), "500 kr");
        assert_eq!(fmt.format(Money::from_cents(1050)), "11 kr");
        assert_eq!(fmt.format(Money::from_major(-1234567)), "-1.234.567 kr");
        assert_eq!(fmt.format(Money::from_cents(-20)), "0 kr");
    }

    #[test]
    fn test_currency_format_prefix_symbol() {
        let fmt = CurrencyFormat {
            symbol: "$".to_string(),
            symbol_after: false,
            decimals: 2,
            thousands_separator: Some(','),
            decimal_separator: '.',
        };
        assert_eq!(fmt.format(Money::from_cents(123456)), "$1,234.56");
        assert_eq!(fmt.format(Money::from_cents(-5)), "-$0.05");
    }
}
