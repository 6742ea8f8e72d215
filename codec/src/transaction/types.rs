//! Transaction value types.
//!
//! Two families share one envelope: plain transfers, whose second field is
//! a gas price, and staking transactions, whose second field is a message
//! list. Both end in the same `[v, r, s]` triple once signed.

use alloy_primitives::{B256, U256};
use serde::{Deserialize, Serialize};

use crate::address::AccountAddress;
use crate::config::{PLAIN_FIELD_COUNT, STAKING_FIELD_COUNT};
use crate::error::{CodecError, Result};
use crate::staking::{Directive, StakingMessage};

// ---------------------------------------------------------------------------
// PlainTransaction
// ---------------------------------------------------------------------------

/// A value transfer, possibly across shards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlainTransaction {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub shard_id: u32,
    pub to_shard_id: u32,
    /// `None` creates a contract.
    pub to: Option<AccountAddress>,
    pub value: U256,
    pub data: Vec<u8>,
    /// `None` or `Some(0)` signs without replay protection.
    pub chain_id: Option<u64>,
}

// ---------------------------------------------------------------------------
// StakingTransaction
// ---------------------------------------------------------------------------

/// A staking operation. The directive comes from the message variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingTransaction {
    pub message: StakingMessage,
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub chain_id: Option<u64>,
}

impl StakingTransaction {
    pub fn directive(&self) -> Directive {
        self.message.directive()
    }
}

// ---------------------------------------------------------------------------
// UnsignedTransaction
// ---------------------------------------------------------------------------

/// Either transaction family, ready to be hashed and signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum UnsignedTransaction {
    Plain(PlainTransaction),
    Staking(StakingTransaction),
}

impl UnsignedTransaction {
    /// The chain id with zero folded into `None`.
    pub fn chain_id(&self) -> Option<u64> {
        let raw = match self {
            Self::Plain(tx) => tx.chain_id,
            Self::Staking(tx) => tx.chain_id,
        };
        raw.filter(|id| *id != 0)
    }

    pub fn nonce(&self) -> u64 {
        match self {
            Self::Plain(tx) => tx.nonce,
            Self::Staking(tx) => tx.nonce,
        }
    }

    pub fn is_staking(&self) -> bool {
        matches!(self, Self::Staking(_))
    }

    /// Fields before the signature triple.
    pub fn field_count(&self) -> usize {
        if self.is_staking() {
            STAKING_FIELD_COUNT
        } else {
            PLAIN_FIELD_COUNT
        }
    }

    pub(crate) fn set_chain_id(&mut self, chain_id: Option<u64>) {
        match self {
            Self::Plain(tx) => tx.chain_id = chain_id,
            Self::Staking(tx) => tx.chain_id = chain_id,
        }
    }
}

impl From<PlainTransaction> for UnsignedTransaction {
    fn from(tx: PlainTransaction) -> Self {
        Self::Plain(tx)
    }
}

impl From<StakingTransaction> for UnsignedTransaction {
    fn from(tx: StakingTransaction) -> Self {
        Self::Staking(tx)
    }
}

// ---------------------------------------------------------------------------
// Signatures
// ---------------------------------------------------------------------------

/// A recoverable secp256k1 signature over the signing hash, before the
/// chain id is folded into `v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureEnvelope {
    /// 0 or 1: parity of the ephemeral point's y coordinate.
    pub recovery_id: u8,
    pub r: B256,
    pub s: B256,
}

impl SignatureEnvelope {
    pub fn new(recovery_id: u8, r: B256, s: B256) -> Result<Self> {
        if recovery_id > 1 {
            return Err(CodecError::InvalidRecoveryId(recovery_id));
        }
        Ok(Self { recovery_id, r, s })
    }

    /// `r || s`, the compact form secp256k1 libraries take.
    pub fn to_compact(&self) -> [u8; 64] {
        let mut compact = [0u8; 64];
        compact[..32].copy_from_slice(self.r.as_slice());
        compact[32..].copy_from_slice(self.s.as_slice());
        compact
    }
}

/// The `[v, r, s]` triple exactly as it was found on the wire, with `r`
/// and `s` left-padded to 32 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawSignature {
    pub v: u64,
    pub r: B256,
    pub s: B256,
}

impl RawSignature {
    /// Both scalars zero: an unsigned transaction that carries its chain
    /// id in `v`.
    pub fn is_placeholder(&self) -> bool {
        self.r.is_zero() && self.s.is_zero()
    }
}

// ---------------------------------------------------------------------------
// DecodedTransaction
// ---------------------------------------------------------------------------

/// Everything recovered from a serialized transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedTransaction {
    /// The unsigned fields, with the chain id recovered from `v`.
    pub transaction: UnsignedTransaction,
    /// Absent for bare 8- and 5-field payloads.
    pub signature: Option<RawSignature>,
    /// Sender, when the signature was real and recovery succeeded.
    pub from: Option<AccountAddress>,
    /// keccak256 of the received bytes, for real signatures only.
    pub hash: Option<B256>,
}

impl DecodedTransaction {
    pub fn chain_id(&self) -> Option<u64> {
        self.transaction.chain_id()
    }

    /// True when a non-placeholder signature was present.
    pub fn is_signed(&self) -> bool {
        self.signature.is_some_and(|sig| !sig.is_placeholder())
    }
}
