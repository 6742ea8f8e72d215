//! Serialization of unsigned and signed transactions.
//!
//! ```text
//! plain    [nonce, gasPrice, gasLimit, shardID, toShardID, to, value, data,   chainId, "", ""]
//! staking  [directive, [message...], nonce, gasPrice, gasLimit,                chainId, "", ""]
//! signed   ...same prefix...                                                   v, r, s
//! ```
//!
//! The unsigned form (with the chain id triple) is the signing preimage.

use alloy_primitives::{keccak256, B256};

use super::types::{PlainTransaction, SignatureEnvelope, StakingTransaction, UnsignedTransaction};
use crate::config::{EIP155_V_OFFSET, LEGACY_V_OFFSET};
use crate::encoding::fields::{
    encode_bytes, encode_optional_address, encode_scalar, encode_u32, encode_u64, encode_uint,
};
use crate::encoding::{rlp, RlpItem};
use crate::error::{CodecError, Result};
use crate::staking::encode_message;

/// The positional fields that precede the signature triple.
pub(crate) fn base_fields(tx: &UnsignedTransaction) -> Vec<RlpItem> {
    match tx {
        UnsignedTransaction::Plain(tx) => plain_fields(tx),
        UnsignedTransaction::Staking(tx) => staking_fields(tx),
    }
}

fn plain_fields(tx: &PlainTransaction) -> Vec<RlpItem> {
    vec![
        encode_u64(tx.nonce),
        encode_uint(tx.gas_price),
        encode_u64(tx.gas_limit),
        encode_u32(tx.shard_id),
        encode_u32(tx.to_shard_id),
        encode_optional_address(tx.to.as_ref()),
        encode_uint(tx.value),
        encode_bytes(&tx.data),
    ]
}

fn staking_fields(tx: &StakingTransaction) -> Vec<RlpItem> {
    vec![
        tx.directive().encode(),
        encode_message(&tx.message),
        encode_u64(tx.nonce),
        encode_uint(tx.gas_price),
        encode_u64(tx.gas_limit),
    ]
}

/// Append `[chainId, "", ""]` and serialize.
pub(crate) fn preimage(mut fields: Vec<RlpItem>, chain_id: u64) -> Vec<u8> {
    fields.extend([encode_u64(chain_id), RlpItem::empty(), RlpItem::empty()]);
    rlp::encode_list(&fields)
}

/// The bytes a signer commits to.
pub fn encode_unsigned(tx: &UnsignedTransaction) -> Vec<u8> {
    preimage(base_fields(tx), tx.chain_id().unwrap_or(0))
}

/// keccak256 of [`encode_unsigned`].
pub fn signing_hash(tx: &UnsignedTransaction) -> B256 {
    keccak256(encode_unsigned(tx))
}

/// Fold the recovery id and chain id into `v`.
///
/// Legacy transactions use `27 + recovery_id`; replay-protected ones add
/// `chain_id * 2 + 8` on top, which is `35 + chain_id * 2 + recovery_id`.
pub fn compute_v(recovery_id: u8, chain_id: Option<u64>) -> Result<u64> {
    if recovery_id > 1 {
        return Err(CodecError::InvalidRecoveryId(recovery_id));
    }
    let base = LEGACY_V_OFFSET + u64::from(recovery_id);
    match chain_id.filter(|id| *id != 0) {
        None => Ok(base),
        Some(id) => id
            .checked_mul(2)
            .and_then(|doubled| doubled.checked_add(EIP155_V_OFFSET - LEGACY_V_OFFSET))
            .and_then(|offset| offset.checked_add(base))
            .ok_or_else(|| CodecError::InvalidChainId(format!("chain id {id} overflows v"))),
    }
}

/// Serialize `tx` with its signature.
pub fn encode_signed(tx: &UnsignedTransaction, signature: &SignatureEnvelope) -> Result<Vec<u8>> {
    let v = compute_v(signature.recovery_id, tx.chain_id())?;
    let mut fields = base_fields(tx);
    fields.extend([
        encode_u64(v),
        encode_scalar(&signature.r),
        encode_scalar(&signature.s),
    ]);
    Ok(rlp::encode_list(&fields))
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;

    use super::*;
    use crate::address::AccountAddress;
    use crate::staking::{CollectRewards, Delegate};

    fn transfer(chain_id: Option<u64>) -> UnsignedTransaction {
        PlainTransaction {
            nonce: 1,
            gas_price: U256::from(1_000_000_000u64),
            gas_limit: 21_000,
            shard_id: 0,
            to_shard_id: 1,
            to: Some(AccountAddress::from_bytes([0x42; 20])),
            value: U256::from(10u64).pow(U256::from(18u64)),
            data: vec![],
            chain_id,
        }
        .into()
    }

    #[test]
    fn unsigned_plain_layout() {
        let encoded = encode_unsigned(&transfer(Some(2)));
        let decoded = rlp::decode(&encoded).unwrap();
        let fields = decoded.as_list("transaction").unwrap();
        assert_eq!(fields.len(), 11);
        assert_eq!(fields[3], RlpItem::empty());
        assert_eq!(fields[4], RlpItem::Bytes(vec![0x01]));
        assert_eq!(fields[8], RlpItem::Bytes(vec![0x02]));
        assert_eq!(fields[9], RlpItem::empty());
        assert_eq!(fields[10], RlpItem::empty());
    }

    #[test]
    fn legacy_preimage_carries_zero_chain_id() {
        for chain_id in [None, Some(0)] {
            let encoded = encode_unsigned(&transfer(chain_id));
            let decoded = rlp::decode(&encoded).unwrap();
            assert_eq!(decoded.as_list("transaction").unwrap()[8], RlpItem::empty());
        }
    }

    #[test]
    fn staking_layout_starts_with_directive() {
        let tx: UnsignedTransaction = StakingTransaction {
            message: Delegate {
                delegator_address: AccountAddress::from_bytes([0x01; 20]),
                validator_address: AccountAddress::from_bytes([0x02; 20]),
                amount: U256::from(100u64),
            }
            .into(),
            nonce: 0,
            gas_price: U256::from(100_000_000_000u64),
            gas_limit: 25_000,
            chain_id: Some(1),
        }
        .into();
        let decoded = rlp::decode(&encode_unsigned(&tx)).unwrap();
        let fields = decoded.as_list("transaction").unwrap();
        assert_eq!(fields.len(), 8);
        assert_eq!(fields[0], RlpItem::Bytes(vec![0x02]));
        assert_eq!(fields[1].as_list("message").unwrap().len(), 3);
    }

    #[test]
    fn create_validator_directive_is_empty_string() {
        let tx: UnsignedTransaction = StakingTransaction {
            message: CollectRewards {
                delegator_address: AccountAddress::ZERO,
            }
            .into(),
            nonce: 0,
            gas_price: U256::ZERO,
            gas_limit: 0,
            chain_id: None,
        }
        .into();
        let decoded = rlp::decode(&encode_unsigned(&tx)).unwrap();
        assert_eq!(
            decoded.as_list("transaction").unwrap()[0],
            RlpItem::Bytes(vec![0x04])
        );
        assert_eq!(
            crate::staking::Directive::CreateValidator.encode(),
            RlpItem::empty()
        );
    }

    #[test]
    fn v_values() {
        assert_eq!(compute_v(0, None).unwrap(), 27);
        assert_eq!(compute_v(1, Some(0)).unwrap(), 28);
        assert_eq!(compute_v(0, Some(1)).unwrap(), 37);
        assert_eq!(compute_v(1, Some(2)).unwrap(), 40);
        assert_eq!(compute_v(2, Some(1)), Err(CodecError::InvalidRecoveryId(2)));
        assert!(matches!(
            compute_v(1, Some(u64::MAX / 2)),
            Err(CodecError::InvalidChainId(_))
        ));
    }

    #[test]
    fn signed_form_replaces_triple() {
        let tx = transfer(Some(2));
        let mut r = [0u8; 32];
        r[30] = 0x01;
        r[31] = 0x02;
        let sig = SignatureEnvelope::new(1, B256::from(r), B256::repeat_byte(0x33)).unwrap();
        let encoded = encode_signed(&tx, &sig).unwrap();
        let decoded = rlp::decode(&encoded).unwrap();
        let fields = decoded.as_list("transaction").unwrap();
        assert_eq!(fields[8], RlpItem::Bytes(vec![40]));
        assert_eq!(fields[9], RlpItem::Bytes(vec![0x01, 0x02]));
        assert_eq!(fields[10], RlpItem::Bytes(vec![0x33; 32]));
    }

    #[test]
    fn encoding_is_deterministic() {
        assert_eq!(
            encode_unsigned(&transfer(Some(1))),
            encode_unsigned(&transfer(Some(1)))
        );
        assert_eq!(
            signing_hash(&transfer(Some(1))),
            signing_hash(&transfer(Some(1)))
        );
        assert_ne!(
            signing_hash(&transfer(Some(1))),
            signing_hash(&transfer(Some(2)))
        );
    }
}
