//! Transaction signing with secp256k1 keys.
//!
//! Signing is a separate step from building because the key may live
//! elsewhere (hardware wallet, remote signer). Anything that can sign a
//! 32-byte digest implements [`DigestSigner`]; [`LocalSigner`] is the
//! in-process implementation.

use std::fmt;

use alloy_primitives::B256;
use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use thiserror::Error;

use super::encode::{encode_signed, signing_hash};
use super::types::{SignatureEnvelope, UnsignedTransaction};
use crate::address::AccountAddress;
use crate::error::CodecError;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SignerError {
    /// The caller named a sender that is not the signer's own address.
    #[error("from address {requested} does not match signer address {signer}")]
    FromAddressMismatch {
        requested: AccountAddress,
        signer: AccountAddress,
    },

    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

// ---------------------------------------------------------------------------
// DigestSigner
// ---------------------------------------------------------------------------

/// Produces recoverable signatures over signing hashes.
pub trait DigestSigner {
    /// Address whose key this signer holds.
    fn address(&self) -> AccountAddress;

    fn sign_digest(&self, digest: &B256) -> Result<SignatureEnvelope, SignerError>;
}

// ---------------------------------------------------------------------------
// LocalSigner
// ---------------------------------------------------------------------------

/// A secp256k1 key held in memory. Signatures are deterministic (RFC 6979).
#[derive(Clone)]
pub struct LocalSigner {
    key: SigningKey,
    address: AccountAddress,
}

impl LocalSigner {
    /// Fresh key from the operating system's RNG.
    pub fn random() -> Self {
        Self::from_key(SigningKey::random(&mut OsRng))
    }

    /// Import a 32-byte big-endian private scalar.
    pub fn from_bytes(secret: &[u8]) -> Result<Self, SignerError> {
        SigningKey::from_slice(secret)
            .map(Self::from_key)
            .map_err(|e| SignerError::InvalidKey(e.to_string()))
    }

    /// Import a hex private key, with or without `0x`.
    pub fn from_hex(secret: &str) -> Result<Self, SignerError> {
        let raw = secret.strip_prefix("0x").unwrap_or(secret);
        let bytes = hex::decode(raw).map_err(|e| SignerError::InvalidKey(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    fn from_key(key: SigningKey) -> Self {
        let point = key.verifying_key().to_encoded_point(false);
        let address = AccountAddress::from_public_key(&point.as_bytes()[1..]);
        Self { key, address }
    }
}

impl fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl DigestSigner for LocalSigner {
    fn address(&self) -> AccountAddress {
        self.address
    }

    fn sign_digest(&self, digest: &B256) -> Result<SignatureEnvelope, SignerError> {
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(digest.as_slice())
            .map_err(|e| SignerError::Signing(e.to_string()))?;
        let bytes = signature.to_bytes();
        let envelope = SignatureEnvelope::new(
            recovery_id.to_byte(),
            B256::from_slice(&bytes[..32]),
            B256::from_slice(&bytes[32..]),
        )?;
        Ok(envelope)
    }
}

// ---------------------------------------------------------------------------
// sign_transaction
// ---------------------------------------------------------------------------

/// Sign `tx` and return its wire bytes.
///
/// When `from` is given it must be the signer's own address; the check
/// runs before anything is signed.
pub fn sign_transaction<S: DigestSigner + ?Sized>(
    signer: &S,
    tx: &UnsignedTransaction,
    from: Option<AccountAddress>,
) -> Result<Vec<u8>, SignerError> {
    let signer_address = signer.address();
    if let Some(requested) = from.filter(|requested| *requested != signer_address) {
        tracing::warn!(
            requested = %requested,
            signer = %signer_address,
            "refusing to sign for a different sender"
        );
        return Err(SignerError::FromAddressMismatch {
            requested,
            signer: signer_address,
        });
    }

    let signature = signer.sign_digest(&signing_hash(tx))?;
    Ok(encode_signed(tx, &signature)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
