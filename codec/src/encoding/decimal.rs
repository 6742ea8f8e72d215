//! Fixed-point decimals and unit conversion.
//!
//! Commission rates travel as integers scaled by 10^18, wrapped in a
//! one-element list (the shape of the chain's `numeric.Dec`). Callers write
//! them as decimal strings, so parsing is strict: no signs, no exponents,
//! no more fractional digits than the precision allows.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::fields::{decode_uint, encode_uint};
use super::rlp::RlpItem;
use crate::config::DECIMAL_PRECISION;
use crate::error::{CodecError, Result};

fn invalid(value: &str, reason: impl Into<String>) -> CodecError {
    CodecError::InvalidDecimal {
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn ten_pow(decimals: u32) -> U256 {
    U256::from(10u64).pow(U256::from(decimals))
}

/// Parse a decimal string into an integer scaled by `10^decimals`.
///
/// `parse_units("1000", 18)` is 1000 ONE in atto. Trailing fractional zeros
/// beyond the precision are tolerated; significant digits are not.
pub fn parse_units(text: &str, decimals: u32) -> Result<U256> {
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid(text, "missing digits"));
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        return Err(invalid(text, "only ASCII digits and one '.' are allowed"));
    }

    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > decimals as usize {
        return Err(invalid(
            text,
            format!("more than {decimals} fractional digits"),
        ));
    }

    let parse = |digits: &str| -> Result<U256> {
        if digits.is_empty() {
            return Ok(U256::ZERO);
        }
        U256::from_str_radix(digits, 10).map_err(|e| invalid(text, e.to_string()))
    };

    let whole = parse(whole)?;
    let fraction_scale = ten_pow(decimals - fraction.len() as u32);
    let fraction = parse(fraction)?
        .checked_mul(fraction_scale)
        .ok_or_else(|| invalid(text, "overflow"))?;

    whole
        .checked_mul(ten_pow(decimals))
        .and_then(|scaled| scaled.checked_add(fraction))
        .ok_or_else(|| invalid(text, "exceeds 256 bits once scaled"))
}

/// Render an integer scaled by `10^decimals` as a decimal string. Whole
/// numbers keep a `.0` suffix.
pub fn format_units(value: U256, decimals: u32) -> String {
    let scale = ten_pow(decimals);
    let whole = value / scale;
    let fraction = value % scale;
    if fraction.is_zero() {
        return format!("{whole}.0");
    }
    let padded = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
    format!("{whole}.{}", padded.trim_end_matches('0'))
}

/// `parse_units(text, 18)`.
pub fn parse_one(text: &str) -> Result<U256> {
    parse_units(text, DECIMAL_PRECISION)
}

/// An 18-digit fixed-point value such as a commission rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal(U256);

impl Decimal {
    pub const ZERO: Self = Self(U256::ZERO);

    /// Wrap an already-scaled integer.
    pub const fn from_scaled(raw: U256) -> Self {
        Self(raw)
    }

    pub fn parse(text: &str) -> Result<Self> {
        parse_units(text, DECIMAL_PRECISION).map(Self)
    }

    /// The integer as it is written on the wire (value * 10^18).
    pub fn scaled(&self) -> U256 {
        self.0
    }

    pub fn encode(&self) -> RlpItem {
        RlpItem::List(vec![encode_uint(self.0)])
    }

    pub fn decode(item: &RlpItem, field: &'static str) -> Result<Self> {
        let inner = item.as_list_of(field, 1)?;
        decode_uint(&inner[0], field).map(Self)
    }

    /// An absent optional decimal is the empty byte string.
    pub fn encode_optional(value: Option<&Decimal>) -> RlpItem {
        value.map_or_else(RlpItem::empty, Decimal::encode)
    }

    pub fn decode_optional(item: &RlpItem, field: &'static str) -> Result<Option<Self>> {
        if item.is_empty_bytes() {
            return Ok(None);
        }
        Self::decode(item, field).map(Some)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_units(self.0, DECIMAL_PRECISION))
    }
}

impl FromStr for Decimal {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Decimal {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Decimal::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e18() -> U256 {
        ten_pow(18)
    }

    #[test]
    fn parses_commission_rates() {
        assert_eq!(Decimal::parse("0.1").unwrap().scaled(), e18() / U256::from(10));
        assert_eq!(Decimal::parse("0.01").unwrap().scaled(), e18() / U256::from(100));
        assert_eq!(Decimal::parse("1").unwrap().scaled(), e18());
        assert_eq!(Decimal::parse(".5").unwrap().scaled(), e18() / U256::from(2));
        assert_eq!(Decimal::parse("0.100000000000000000000").unwrap().scaled(), e18() / U256::from(10));
    }

    #[test]
    fn rejects_bad_decimals() {
        for text in ["", ".", "-1", "1e18", "0.1.2", "abc", "0.0000000000000000001"] {
            assert!(
                matches!(Decimal::parse(text), Err(CodecError::InvalidDecimal { .. })),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn display_matches_input() {
        assert_eq!(Decimal::parse("0.09").unwrap().to_string(), "0.09");
        assert_eq!(Decimal::parse("2").unwrap().to_string(), "2.0");
        assert_eq!(Decimal::ZERO.to_string(), "0.0");
    }

    #[test]
    fn parse_one_scales_amounts() {
        let amount = parse_one("1000").unwrap();
        assert_eq!(amount, U256::from(1000u64) * e18());
        assert_eq!(format_units(amount, 18), "1000.0");
        assert_eq!(parse_units("1.5", 9).unwrap(), U256::from(1_500_000_000u64));
    }

    #[test]
    fn wire_shape_is_single_element_list() {
        let rate = Decimal::parse("0.1").unwrap();
        let item = rate.encode();
        assert!(item.is_list());
        assert_eq!(item.as_list("rate").unwrap().len(), 1);
        assert_eq!(Decimal::decode(&item, "rate").unwrap(), rate);
    }

    #[test]
    fn optional_decimal_uses_empty_string() {
        assert_eq!(Decimal::encode_optional(None), RlpItem::empty());
        assert_eq!(Decimal::decode_optional(&RlpItem::empty(), "rate").unwrap(), None);
        let rate = Decimal::parse("0.05").unwrap();
        let item = Decimal::encode_optional(Some(&rate));
        assert_eq!(Decimal::decode_optional(&item, "rate").unwrap(), Some(rate));
    }

    #[test]
    fn serde_uses_decimal_strings() {
        let rate = Decimal::parse("0.25").unwrap();
        let json = serde_json::to_string(&rate).unwrap();
        assert_eq!(json, "\"0.25\"");
        let back: Decimal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rate);
    }
}
