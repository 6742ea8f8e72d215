//! Transaction construction via the builder pattern.
//!
//! Builders are seeded from a [`NetworkConfig`] so the chain id and the
//! originating shard come from one explicit value instead of process-wide
//! state. They never sign; that happens in [`super::signing`].

use alloy_primitives::U256;

use super::types::{PlainTransaction, StakingTransaction};
use crate::address::AccountAddress;
use crate::config::{
    NetworkConfig, DEFAULT_GAS_PRICE_WEI, DEFAULT_STAKING_GAS_LIMIT, DEFAULT_TRANSFER_GAS_LIMIT,
};
use crate::staking::StakingMessage;

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`PlainTransaction`].
///
/// # Example
///
/// ```
/// use harmony_codec::config::NetworkConfig;
/// use harmony_codec::address::AccountAddress;
/// use harmony_codec::encoding::parse_one;
/// use harmony_codec::transaction::TransactionBuilder;
///
/// let to = AccountAddress::parse("one1pdv9lrdwl0rg5vglh4xtyrv3wjk3wsqket7zxy").unwrap();
/// let tx = TransactionBuilder::new(&NetworkConfig::testnet())
///     .to(to)
///     .to_shard(1)
///     .value(parse_one("1.5").unwrap())
///     .nonce(4)
///     .build();
///
/// assert_eq!(tx.chain_id, Some(2));
/// assert_eq!(tx.shard_id, 0);
/// assert_eq!(tx.to_shard_id, 1);
/// ```
///
/// Defaults: gas price 100 gwei, gas limit 21 000, recipient shard equal
/// to the originating shard, nonce 0.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    tx: PlainTransaction,
}

impl TransactionBuilder {
    pub fn new(network: &NetworkConfig) -> Self {
        Self {
            tx: PlainTransaction {
                nonce: 0,
                gas_price: U256::from(DEFAULT_GAS_PRICE_WEI),
                gas_limit: DEFAULT_TRANSFER_GAS_LIMIT,
                shard_id: network.shard_id,
                to_shard_id: network.shard_id,
                to: None,
                value: U256::ZERO,
                data: Vec::new(),
                chain_id: Some(network.chain_id),
            },
        }
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.tx.nonce = nonce;
        self
    }

    pub fn gas_price(mut self, gas_price: U256) -> Self {
        self.tx.gas_price = gas_price;
        self
    }

    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.tx.gas_limit = gas_limit;
        self
    }

    /// Recipient. Leave unset to deploy a contract.
    pub fn to(mut self, to: AccountAddress) -> Self {
        self.tx.to = Some(to);
        self
    }

    /// Destination shard for a cross-shard transfer.
    pub fn to_shard(mut self, shard_id: u32) -> Self {
        self.tx.to_shard_id = shard_id;
        self
    }

    /// Amount in atto (10^-18 ONE).
    pub fn value(mut self, value: U256) -> Self {
        self.tx.value = value;
        self
    }

    pub fn data(mut self, data: Vec<u8>) -> Self {
        self.tx.data = data;
        self
    }

    /// Override the network's chain id. `None` signs without replay
    /// protection.
    pub fn chain_id(mut self, chain_id: Option<u64>) -> Self {
        self.tx.chain_id = chain_id;
        self
    }

    pub fn build(self) -> PlainTransaction {
        self.tx
    }
}

// ---------------------------------------------------------------------------
// StakingTransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`StakingTransaction`]. Defaults: gas price 100 gwei,
/// gas limit 210 000, nonce 0.
#[derive(Debug, Clone)]
pub struct StakingTransactionBuilder {
    tx: StakingTransaction,
}

impl StakingTransactionBuilder {
    pub fn new(network: &NetworkConfig, message: impl Into<StakingMessage>) -> Self {
        Self {
            tx: StakingTransaction {
                message: message.into(),
                nonce: 0,
                gas_price: U256::from(DEFAULT_GAS_PRICE_WEI),
                gas_limit: DEFAULT_STAKING_GAS_LIMIT,
                chain_id: Some(network.chain_id),
            },
        }
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.tx.nonce = nonce;
        self
    }

    pub fn gas_price(mut self, gas_price: U256) -> Self {
        self.tx.gas_price = gas_price;
        self
    }

    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.tx.gas_limit = gas_limit;
        self
    }

    pub fn chain_id(mut self, chain_id: Option<u64>) -> Self {
        self.tx.chain_id = chain_id;
        self
    }

    pub fn build(self) -> StakingTransaction {
        self.tx
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staking::{CollectRewards, Directive};
    use crate::transaction::encode::encode_unsigned;
    use crate::transaction::types::UnsignedTransaction;

    #[test]
    fn defaults_come_from_network() {
        let network = NetworkConfig::mainnet().with_shard(3);
        let tx = TransactionBuilder::new(&network).build();
        assert_eq!(tx.chain_id, Some(1));
        assert_eq!(tx.shard_id, 3);
        assert_eq!(tx.to_shard_id, 3);
        assert_eq!(tx.gas_limit, 21_000);
        assert_eq!(tx.gas_price, U256::from(100_000_000_000u64));
        assert_eq!(tx.to, None);
    }

    #[test]
    fn setters_override_defaults() {
        let to = AccountAddress::from_bytes([0x09; 20]);
        let tx = TransactionBuilder::new(&NetworkConfig::testnet())
            .nonce(9)
            .gas_price(U256::from(1u64))
            .gas_limit(50_000)
            .to(to)
            .to_shard(2)
            .value(U256::from(7u64))
            .data(vec![0xde, 0xad])
            .chain_id(None)
            .build();
        assert_eq!(tx.nonce, 9);
        assert_eq!(tx.to, Some(to));
        assert_eq!(tx.to_shard_id, 2);
        assert_eq!(tx.data, vec![0xde, 0xad]);
        assert_eq!(tx.chain_id, None);
    }

    #[test]
    fn builder_output_is_deterministic() {
        let build = || {
            TransactionBuilder::new(&NetworkConfig::testnet())
                .to(AccountAddress::ZERO)
                .nonce(1)
                .build()
        };
        assert_eq!(
            encode_unsigned(&build().into()),
            encode_unsigned(&build().into())
        );
    }

    #[test]
    fn staking_builder_defaults() {
        let msg = CollectRewards {
            delegator_address: AccountAddress::ZERO,
        };
        let tx = StakingTransactionBuilder::new(&NetworkConfig::localnet(), msg)
            .nonce(2)
            .build();
        assert_eq!(tx.directive(), Directive::CollectRewards);
        assert_eq!(tx.gas_limit, 210_000);
        assert_eq!(tx.chain_id, Some(2));
        assert!(UnsignedTransaction::from(tx).is_staking());
    }

    #[test]
    fn staking_builder_setters() {
        let msg = CollectRewards {
            delegator_address: AccountAddress::ZERO,
        };
        let tx = StakingTransactionBuilder::new(&NetworkConfig::mainnet(), msg)
            .gas_price(U256::from(5u64))
            .gas_limit(30_000)
            .chain_id(Some(7))
            .build();
        assert_eq!(tx.gas_price, U256::from(5u64));
        assert_eq!(tx.gas_limit, 30_000);
        assert_eq!(tx.chain_id, Some(7));
    }
}
