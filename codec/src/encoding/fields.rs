//! Canonical field rules shared by both transaction families.
//!
//! Integers are minimal-length big-endian with zero as the empty string,
//! addresses are exactly 20 bytes, signature scalars are stripped on the
//! way out and left-padded on the way in, text is raw UTF-8.

use alloy_primitives::{B256, U256};

use super::rlp::RlpItem;
use crate::address::AccountAddress;
use crate::config::{ADDRESS_LENGTH, MAX_INTEGER_BYTES, SIGNATURE_SCALAR_LENGTH};
use crate::error::{CodecError, Result};

/// Strip leading zero bytes. Zero becomes the empty slice.
pub fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[first..]
}

// ---------------------------------------------------------------------------
// Integers
// ---------------------------------------------------------------------------

pub fn encode_uint(value: U256) -> RlpItem {
    let be = value.to_be_bytes::<32>();
    RlpItem::Bytes(trim_leading_zeros(&be).to_vec())
}

pub fn encode_u64(value: u64) -> RlpItem {
    RlpItem::Bytes(trim_leading_zeros(&value.to_be_bytes()).to_vec())
}

pub fn encode_u32(value: u32) -> RlpItem {
    encode_u64(u64::from(value))
}

/// Trimmed integer bytes of at most `max` bytes.
fn integer_bytes<'a>(item: &'a RlpItem, field: &'static str, max: usize) -> Result<&'a [u8]> {
    let trimmed = trim_leading_zeros(item.as_bytes(field)?);
    if trimmed.len() > max {
        return Err(CodecError::FieldTooLong {
            field,
            max,
            actual: trimmed.len(),
        });
    }
    Ok(trimmed)
}

pub fn decode_uint(item: &RlpItem, field: &'static str) -> Result<U256> {
    let bytes = integer_bytes(item, field, MAX_INTEGER_BYTES)?;
    Ok(U256::from_be_slice(bytes))
}

pub fn decode_u64(item: &RlpItem, field: &'static str) -> Result<u64> {
    let bytes = integer_bytes(item, field, 8)?;
    Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}

pub fn decode_u32(item: &RlpItem, field: &'static str) -> Result<u32> {
    let bytes = integer_bytes(item, field, 4)?;
    Ok(bytes.iter().fold(0u32, |acc, b| (acc << 8) | u32::from(*b)))
}

/// Absent optional integer: the empty string. `Some(0)` shares that
/// encoding, so it cannot survive a round trip.
pub fn encode_optional_uint(value: Option<U256>) -> RlpItem {
    value.map_or_else(RlpItem::empty, encode_uint)
}

pub fn decode_optional_uint(item: &RlpItem, field: &'static str) -> Result<Option<U256>> {
    if item.is_empty_bytes() {
        return Ok(None);
    }
    decode_uint(item, field).map(Some)
}

// ---------------------------------------------------------------------------
// Fixed-width fields
// ---------------------------------------------------------------------------

pub fn encode_address(address: &AccountAddress) -> RlpItem {
    RlpItem::Bytes(address.as_bytes().to_vec())
}

/// Recipient field: the address, or the empty string for contract creation.
pub fn encode_optional_address(address: Option<&AccountAddress>) -> RlpItem {
    address.map_or_else(RlpItem::empty, encode_address)
}

pub fn decode_address(item: &RlpItem, field: &'static str) -> Result<AccountAddress> {
    let bytes = item.as_bytes(field)?;
    if bytes.len() != ADDRESS_LENGTH {
        return Err(CodecError::FieldLengthMismatch {
            field,
            expected: ADDRESS_LENGTH,
            actual: bytes.len(),
        });
    }
    AccountAddress::from_slice(bytes)
}

pub fn decode_optional_address(
    item: &RlpItem,
    field: &'static str,
) -> Result<Option<AccountAddress>> {
    if item.is_empty_bytes() {
        return Ok(None);
    }
    decode_address(item, field).map(Some)
}

/// Signature scalar as it goes on the wire: leading zeros stripped.
pub fn encode_scalar(scalar: &B256) -> RlpItem {
    RlpItem::Bytes(trim_leading_zeros(scalar.as_slice()).to_vec())
}

/// Signature scalar from the wire, left-padded back to 32 bytes.
pub fn decode_scalar(item: &RlpItem, field: &'static str) -> Result<B256> {
    let bytes = integer_bytes(item, field, SIGNATURE_SCALAR_LENGTH)?;
    let mut padded = [0u8; SIGNATURE_SCALAR_LENGTH];
    padded[SIGNATURE_SCALAR_LENGTH - bytes.len()..].copy_from_slice(bytes);
    Ok(B256::from(padded))
}

// ---------------------------------------------------------------------------
// Opaque bytes and text
// ---------------------------------------------------------------------------

pub fn encode_bytes(bytes: &[u8]) -> RlpItem {
    RlpItem::Bytes(bytes.to_vec())
}

pub fn decode_bytes(item: &RlpItem, field: &'static str) -> Result<Vec<u8>> {
    item.as_bytes(field).map(<[u8]>::to_vec)
}

pub fn encode_optional_bytes(bytes: Option<&[u8]>) -> RlpItem {
    RlpItem::Bytes(bytes.map(<[u8]>::to_vec).unwrap_or_default())
}

pub fn decode_optional_bytes(item: &RlpItem, field: &'static str) -> Result<Option<Vec<u8>>> {
    let bytes = item.as_bytes(field)?;
    Ok((!bytes.is_empty()).then(|| bytes.to_vec()))
}

pub fn encode_bytes_list(entries: &[Vec<u8>]) -> RlpItem {
    RlpItem::List(entries.iter().map(|e| encode_bytes(e)).collect())
}

pub fn decode_bytes_list(item: &RlpItem, field: &'static str) -> Result<Vec<Vec<u8>>> {
    item.as_list(field)?
        .iter()
        .map(|entry| decode_bytes(entry, field))
        .collect()
}

pub fn encode_text(text: &str) -> RlpItem {
    RlpItem::Bytes(text.as_bytes().to_vec())
}

pub fn decode_text(item: &RlpItem, field: &'static str) -> Result<String> {
    let bytes = item.as_bytes(field)?;
    String::from_utf8(bytes.to_vec())
        .map_err(|_| CodecError::malformed(format!("{field} is not valid UTF-8")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_encodes_as_empty_string() {
        assert_eq!(encode_uint(U256::ZERO), RlpItem::empty());
        assert_eq!(encode_u64(0), RlpItem::empty());
        assert_eq!(decode_uint(&RlpItem::empty(), "value").unwrap(), U256::ZERO);
        assert_eq!(decode_u64(&RlpItem::empty(), "nonce").unwrap(), 0);
    }

    #[test]
    fn integers_are_minimal_big_endian() {
        assert_eq!(encode_u64(1024), RlpItem::Bytes(vec![0x04, 0x00]));
        assert_eq!(
            encode_uint(U256::from(0x01_0000u64)),
            RlpItem::Bytes(vec![0x01, 0x00, 0x00])
        );
        assert_eq!(encode_u32(7), RlpItem::Bytes(vec![0x07]));
    }

    #[test]
    fn decode_tolerates_leading_zeros() {
        let item = RlpItem::Bytes(vec![0x00, 0x00, 0x2a]);
        assert_eq!(decode_u64(&item, "nonce").unwrap(), 42);
    }

    #[test]
    fn integer_wider_than_32_bytes_is_too_long() {
        let item = RlpItem::Bytes(vec![0x01; 33]);
        assert_eq!(
            decode_uint(&item, "value"),
            Err(CodecError::FieldTooLong {
                field: "value",
                max: 32,
                actual: 33
            })
        );
    }

    #[test]
    fn narrow_integers_respect_their_width() {
        let nine = RlpItem::Bytes(vec![0x01; 9]);
        assert!(matches!(
            decode_u64(&nine, "nonce"),
            Err(CodecError::FieldTooLong { max: 8, .. })
        ));
        let five = RlpItem::Bytes(vec![0x01; 5]);
        assert!(matches!(
            decode_u32(&five, "shardID"),
            Err(CodecError::FieldTooLong { max: 4, .. })
        ));
    }

    #[test]
    fn address_must_be_exactly_20_bytes() {
        let short = RlpItem::Bytes(vec![0x11; 19]);
        assert_eq!(
            decode_address(&short, "to"),
            Err(CodecError::FieldLengthMismatch {
                field: "to",
                expected: 20,
                actual: 19
            })
        );
        let addr = AccountAddress::from_bytes([0x11; 20]);
        assert_eq!(decode_address(&encode_address(&addr), "to").unwrap(), addr);
    }

    #[test]
    fn empty_recipient_is_none() {
        assert_eq!(encode_optional_address(None), RlpItem::empty());
        assert_eq!(decode_optional_address(&RlpItem::empty(), "to").unwrap(), None);
    }

    #[test]
    fn scalars_are_stripped_and_repadded() {
        let mut raw = [0u8; 32];
        raw[31] = 0x09;
        let scalar = B256::from(raw);
        let item = encode_scalar(&scalar);
        assert_eq!(item, RlpItem::Bytes(vec![0x09]));
        assert_eq!(decode_scalar(&item, "r").unwrap(), scalar);
    }

    #[test]
    fn optional_integer_sentinel() {
        assert_eq!(encode_optional_uint(None), RlpItem::empty());
        assert_eq!(
            decode_optional_uint(&RlpItem::empty(), "minSelfDelegation").unwrap(),
            None
        );
        // Known ambiguity: an explicit zero collapses to the sentinel.
        assert_eq!(encode_optional_uint(Some(U256::ZERO)), RlpItem::empty());
    }

    #[test]
    fn text_round_trips_and_rejects_invalid_utf8() {
        assert_eq!(decode_text(&encode_text("Validätor"), "name").unwrap(), "Validätor");
        assert_eq!(encode_text(""), RlpItem::empty());
        let bad = RlpItem::Bytes(vec![0xff, 0xfe]);
        assert!(matches!(
            decode_text(&bad, "name"),
            Err(CodecError::MalformedTransaction(_))
        ));
    }

    #[test]
    fn bytes_lists() {
        let keys = vec![vec![0xaa; 48], vec![0xbb; 48]];
        let item = encode_bytes_list(&keys);
        assert_eq!(decode_bytes_list(&item, "slotPubKeys").unwrap(), keys);
        assert_eq!(
            decode_optional_bytes(&RlpItem::empty(), "slotKeyToAdd").unwrap(),
            None
        );
    }
}
