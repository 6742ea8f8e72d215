//! Sender recovery from a signing hash and a recoverable signature.

use std::sync::OnceLock;

use alloy_primitives::B256;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{All, Message, Secp256k1};
use thiserror::Error;

use super::types::SignatureEnvelope;
use crate::address::AccountAddress;

/// Why a signature did not yield a sender. Decoding treats every variant
/// as "sender unknown" rather than as a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecoveryError {
    #[error("recovery id {0} is neither 0 nor 1")]
    RecoveryId(u64),

    #[error("signature scalars are out of range: {0}")]
    Signature(String),

    #[error("no public key matches the signature: {0}")]
    PublicKey(String),
}

fn secp() -> &'static Secp256k1<All> {
    static SECP: OnceLock<Secp256k1<All>> = OnceLock::new();
    SECP.get_or_init(Secp256k1::new)
}

/// Recover the address that produced `signature` over `digest`.
pub fn recover_signer(
    digest: &B256,
    signature: &SignatureEnvelope,
) -> Result<AccountAddress, RecoveryError> {
    recover_with_id(digest, u64::from(signature.recovery_id), &signature.r, &signature.s)
}

/// Same as [`recover_signer`] but with an unchecked recovery id, as derived
/// from a `v` found on the wire.
pub(crate) fn recover_with_id(
    digest: &B256,
    recovery_id: u64,
    r: &B256,
    s: &B256,
) -> Result<AccountAddress, RecoveryError> {
    let recid = i32::try_from(recovery_id)
        .ok()
        .and_then(|id| RecoveryId::from_i32(id).ok())
        .filter(|id| id.to_i32() <= 1)
        .ok_or(RecoveryError::RecoveryId(recovery_id))?;

    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(r.as_slice());
    compact[32..].copy_from_slice(s.as_slice());
    let signature = RecoverableSignature::from_compact(&compact, recid)
        .map_err(|e| RecoveryError::Signature(e.to_string()))?;

    let message = Message::from_digest(digest.0);
    let public_key = secp()
        .recover_ecdsa(&message, &signature)
        .map_err(|e| RecoveryError::PublicKey(e.to_string()))?;

    let uncompressed = public_key.serialize_uncompressed();
    Ok(AccountAddress::from_public_key(&uncompressed[1..]))
}
