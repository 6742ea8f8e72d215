//! # Account Addresses
//!
//! An account is identified by 20 raw bytes: the tail of the keccak256 hash
//! of its secp256k1 public key. The same bytes have three textual forms:
//!
//! ```text
//! 0x0B585F8DaEfBC68a311FbD4cB20d9174aD174016      checksum hex (EIP-55)
//! one1pdv9lrdwl0rg5vglh4xtyrv3wjk3wsqket7zxy      bech32, mainnet HRP
//! tone1pdv9lrdwl0rg5vglh4xtyrv3wjk3wsqkh7hxx4     bech32, testnet HRP
//! ```
//!
//! [`AccountAddress::parse`] accepts any of them and two addresses compare
//! equal whenever their bytes do, no matter which form produced them.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{keccak256, Address};
use bech32::{Bech32, Hrp};
use serde::{Deserialize, Serialize};

use crate::config::{
    ADDRESS_HEX_LENGTH, ADDRESS_LENGTH, BECH32_DATA_LENGTH, MAINNET_HRP, TESTNET_HRP,
};
use crate::error::{CodecError, Result};

const MAINNET: Hrp = Hrp::parse_unchecked(MAINNET_HRP);
const TESTNET: Hrp = Hrp::parse_unchecked(TESTNET_HRP);

/// The bech32 data alphabet. Addresses are matched against it before the
/// checksum is even looked at, so uppercase or mixed-case bech32 is refused.
const BECH32_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

// ---------------------------------------------------------------------------
// AddressFormat
// ---------------------------------------------------------------------------

/// Which textual form a string is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFormat {
    /// 40 hex characters, optionally `0x`-prefixed.
    Hex,
    /// `one1` followed by 38 bech32 characters.
    Bech32Mainnet,
    /// `tone1` followed by 38 bech32 characters.
    Bech32Testnet,
}

impl AddressFormat {
    /// Classify `text` by shape alone. Checksums are not verified here.
    pub fn detect(text: &str) -> Option<Self> {
        if is_hex_body(strip_hex_prefix(text)) {
            Some(Self::Hex)
        } else if has_bech32_shape(text, MAINNET_HRP) {
            Some(Self::Bech32Mainnet)
        } else if has_bech32_shape(text, TESTNET_HRP) {
            Some(Self::Bech32Testnet)
        } else {
            None
        }
    }
}

fn strip_hex_prefix(text: &str) -> &str {
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
}

fn is_hex_body(body: &str) -> bool {
    body.len() == ADDRESS_HEX_LENGTH && body.bytes().all(|b| b.is_ascii_hexdigit())
}

fn has_bech32_shape(text: &str, hrp: &str) -> bool {
    text.strip_prefix(hrp)
        .and_then(|rest| rest.strip_prefix('1'))
        .is_some_and(|data| {
            data.len() == BECH32_DATA_LENGTH && data.chars().all(|c| BECH32_CHARSET.contains(c))
        })
}

// ---------------------------------------------------------------------------
// AccountAddress
// ---------------------------------------------------------------------------

/// A 20-byte account identifier.
///
/// # Examples
///
/// ```
/// use harmony_codec::address::AccountAddress;
///
/// let a = AccountAddress::parse("0x0B585F8DaEfBC68a311FbD4cB20d9174aD174016").unwrap();
/// let b = AccountAddress::parse("one1pdv9lrdwl0rg5vglh4xtyrv3wjk3wsqket7zxy").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(b.to_bech32_testnet(), "tone1pdv9lrdwl0rg5vglh4xtyrv3wjk3wsqkh7hxx4");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AccountAddress([u8; ADDRESS_LENGTH]);

impl AccountAddress {
    pub const ZERO: Self = Self([0u8; ADDRESS_LENGTH]);

    pub const fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Build from a slice that must be exactly 20 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; ADDRESS_LENGTH] =
            bytes.try_into().map_err(|_| CodecError::FieldLengthMismatch {
                field: "address",
                expected: ADDRESS_LENGTH,
                actual: bytes.len(),
            })?;
        Ok(Self(raw))
    }

    /// Derive the address of an uncompressed secp256k1 public key given
    /// without its `0x04` tag (64 bytes): the last 20 bytes of its keccak256.
    pub fn from_public_key(public_key: &[u8]) -> Self {
        let hash = keccak256(public_key);
        let mut raw = [0u8; ADDRESS_LENGTH];
        raw.copy_from_slice(&hash[32 - ADDRESS_LENGTH..]);
        Self(raw)
    }

    /// Parse any of the three accepted textual forms.
    ///
    /// Mixed-case hex must carry a valid EIP-55 checksum; all-lowercase or
    /// all-uppercase hex is taken as-is.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || CodecError::InvalidAddressFormat(text.to_string());
        match AddressFormat::detect(text).ok_or_else(invalid)? {
            AddressFormat::Hex => Self::parse_hex(text).ok_or_else(invalid),
            AddressFormat::Bech32Mainnet => Self::parse_bech32(text, MAINNET).ok_or_else(invalid),
            AddressFormat::Bech32Testnet => Self::parse_bech32(text, TESTNET).ok_or_else(invalid),
        }
    }

    fn parse_hex(text: &str) -> Option<Self> {
        let body = strip_hex_prefix(text);
        let address = Address::from_str(body).ok()?;
        let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());
        if has_lower && has_upper && address.to_checksum(None)[2..] != *body {
            return None;
        }
        Some(Self(address.0 .0))
    }

    fn parse_bech32(text: &str, expected: Hrp) -> Option<Self> {
        let (hrp, data) = bech32::decode(text).ok()?;
        if hrp != expected {
            return None;
        }
        let address = Self::from_slice(&data).ok()?;
        // `decode` also accepts bech32m checksums; only bech32 is valid here.
        (address.to_bech32(hrp) == text).then_some(address)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Lowercase hex without a prefix.
    pub fn to_basic_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// `0x`-prefixed EIP-55 mixed-case hex.
    pub fn to_checksum_hex(&self) -> String {
        Address::from(self.0).to_checksum(None)
    }

    /// `one1...`
    pub fn to_bech32_mainnet(&self) -> String {
        self.to_bech32(MAINNET)
    }

    /// `tone1...`
    pub fn to_bech32_testnet(&self) -> String {
        self.to_bech32(TESTNET)
    }

    fn to_bech32(&self, hrp: Hrp) -> String {
        bech32::encode::<Bech32>(hrp, &self.0)
            .expect("a 20-byte payload is far below the bech32 length limit")
    }

    /// True if `text` is exactly the unprefixed lowercase hex rendering.
    pub fn is_valid_basic(text: &str) -> bool {
        Self::parse(text).is_ok_and(|a| a.to_basic_hex() == text)
    }

    /// True if `text` is exactly the checksum rendering.
    pub fn is_valid_checksum(text: &str) -> bool {
        Self::parse(text).is_ok_and(|a| a.to_checksum_hex() == text)
    }

    /// True if `text` is a valid mainnet bech32 address.
    pub fn is_valid_bech32(text: &str) -> bool {
        Self::parse(text).is_ok_and(|a| a.to_bech32_mainnet() == text)
    }

    /// True if `text` is a valid testnet bech32 address.
    pub fn is_valid_bech32_testnet(text: &str) -> bool {
        Self::parse(text).is_ok_and(|a| a.to_bech32_testnet() == text)
    }
}

impl From<[u8; ADDRESS_LENGTH]> for AccountAddress {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for AccountAddress {
    fn from(address: Address) -> Self {
        Self(address.0 .0)
    }
}

impl From<AccountAddress> for Address {
    fn from(address: AccountAddress) -> Self {
        Address::from(address.0)
    }
}

impl FromStr for AccountAddress {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum_hex())
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({})", self.to_bech32_mainnet())
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_checksum_hex())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            AccountAddress::parse(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            AccountAddress::from_slice(&bytes).map_err(serde::de::Error::custom)
        }
    }
}
