//! Parsing of serialized transactions and sender recovery.
//!
//! The family is chosen by the shape of the second top-level item: a list
//! is a staking message, a byte string is a gas price. A signature that
//! cannot be recovered leaves `from` empty; only structural problems are
//! errors.

use alloy_primitives::{keccak256, B256};

use super::encode::preimage;
use super::recovery::recover_with_id;
use super::types::{
    DecodedTransaction, PlainTransaction, RawSignature, StakingTransaction, UnsignedTransaction,
};
use crate::config::{
    EIP155_V_OFFSET, LEGACY_V_OFFSET, PLAIN_FIELD_COUNT, SIGNATURE_FIELD_COUNT,
    STAKING_FIELD_COUNT,
};
use crate::encoding::fields::{
    decode_bytes, decode_optional_address, decode_scalar, decode_u32, decode_u64, decode_uint,
};
use crate::encoding::{rlp, RlpItem};
use crate::error::{CodecError, Result};
use crate::staking::{decode_message, Directive};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Plain,
    Staking,
}

impl Family {
    fn of(fields: &[RlpItem]) -> Self {
        if fields.get(1).is_some_and(RlpItem::is_list) {
            Family::Staking
        } else {
            Family::Plain
        }
    }

    fn base_count(self) -> usize {
        match self {
            Family::Plain => PLAIN_FIELD_COUNT,
            Family::Staking => STAKING_FIELD_COUNT,
        }
    }
}

/// Decode either family.
pub fn decode(payload: &[u8]) -> Result<DecodedTransaction> {
    let tree = rlp::decode(payload)?;
    let fields = tree.as_list("transaction")?;
    decode_family(payload, fields, Family::of(fields))
}

/// Decode a payload that must be a plain transaction.
pub fn decode_plain(payload: &[u8]) -> Result<DecodedTransaction> {
    decode_expecting(payload, Family::Plain)
}

/// Decode a payload that must be a staking transaction.
pub fn decode_staking(payload: &[u8]) -> Result<DecodedTransaction> {
    decode_expecting(payload, Family::Staking)
}

/// keccak256 of a serialized transaction, as the network indexes it.
pub fn transaction_hash(payload: &[u8]) -> B256 {
    keccak256(payload)
}

fn decode_expecting(payload: &[u8], expected: Family) -> Result<DecodedTransaction> {
    let tree = rlp::decode(payload)?;
    let fields = tree.as_list("transaction")?;
    let found = Family::of(fields);
    if found != expected {
        return Err(CodecError::malformed(format!(
            "expected a {expected:?} transaction, found {found:?}"
        )));
    }
    decode_family(payload, fields, found)
}

fn decode_family(
    payload: &[u8],
    fields: &[RlpItem],
    family: Family,
) -> Result<DecodedTransaction> {
    let base_count = family.base_count();
    tracing::trace!(fields = fields.len(), family = ?family, "decoding transaction");

    if fields.len() != base_count && fields.len() != base_count + SIGNATURE_FIELD_COUNT {
        return Err(CodecError::malformed(format!(
            "invalid component count for {family:?} transaction: {} (expected {base_count} or {})",
            fields.len(),
            base_count + SIGNATURE_FIELD_COUNT
        )));
    }

    let (base, trailer) = fields.split_at(base_count);
    let mut transaction = match family {
        Family::Plain => UnsignedTransaction::Plain(plain_from_fields(base)?),
        Family::Staking => UnsignedTransaction::Staking(staking_from_fields(base)?),
    };

    let [v, r, s] = trailer else {
        return Ok(DecodedTransaction {
            transaction,
            signature: None,
            from: None,
            hash: None,
        });
    };

    let v = decode_v(v)?;
    let r = decode_scalar(r, "r")?;
    let s = decode_scalar(s, "s")?;

    if r.is_zero() && s.is_zero() {
        // Unsigned, with the chain id parked in `v`.
        transaction.set_chain_id(Some(v).filter(|id| *id != 0));
        return Ok(DecodedTransaction {
            transaction,
            signature: Some(RawSignature { v: 0, r, s }),
            from: None,
            hash: None,
        });
    }

    let chain_id = v.saturating_sub(EIP155_V_OFFSET) / 2;
    transaction.set_chain_id(Some(chain_id).filter(|id| *id != 0));

    let offset = if chain_id != 0 { chain_id * 2 + 8 } else { 0 };
    let digest = keccak256(preimage(base.to_vec(), chain_id));
    let from = match v.checked_sub(LEGACY_V_OFFSET + offset) {
        Some(recovery_id) => match recover_with_id(&digest, recovery_id, &r, &s) {
            Ok(address) => Some(address),
            Err(e) => {
                tracing::debug!(chain_id, v, error = %e, "could not recover transaction sender");
                None
            }
        },
        None => {
            tracing::debug!(chain_id, v, "v is below the legacy offset, sender unknown");
            None
        }
    };

    Ok(DecodedTransaction {
        transaction,
        signature: Some(RawSignature { v, r, s }),
        from,
        hash: Some(keccak256(payload)),
    })
}

/// `v` must fit in 64 bits; anything wider cannot encode a chain id.
fn decode_v(item: &RlpItem) -> Result<u64> {
    decode_u64(item, "v").map_err(|e| match e {
        CodecError::FieldTooLong { actual, .. } => {
            CodecError::InvalidChainId(format!("v is {actual} bytes wide"))
        }
        other => other,
    })
}

fn plain_from_fields(f: &[RlpItem]) -> Result<PlainTransaction> {
    Ok(PlainTransaction {
        nonce: decode_u64(&f[0], "nonce")?,
        gas_price: decode_uint(&f[1], "gasPrice")?,
        gas_limit: decode_u64(&f[2], "gasLimit")?,
        shard_id: decode_u32(&f[3], "shardID")?,
        to_shard_id: decode_u32(&f[4], "toShardID")?,
        to: decode_optional_address(&f[5], "to")?,
        value: decode_uint(&f[6], "value")?,
        data: decode_bytes(&f[7], "data")?,
        chain_id: None,
    })
}

fn staking_from_fields(f: &[RlpItem]) -> Result<StakingTransaction> {
    let directive = Directive::decode(&f[0])?;
    tracing::trace!(%directive, "decoding staking message");
    Ok(StakingTransaction {
        message: decode_message(directive, &f[1])?,
        nonce: decode_u64(&f[2], "nonce")?,
        gas_price: decode_uint(&f[3], "gasPrice")?,
        gas_limit: decode_u64(&f[4], "gasLimit")?,
        chain_id: None,
    })
}
