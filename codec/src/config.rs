//! # Protocol Configuration & Constants
//!
//! Every wire-format constant the codec depends on lives here. These values
//! are fixed by the Harmony network; changing any of them produces payloads
//! the network will reject, so treat this file as read-only unless the
//! network itself moves.
//!
//! Network-specific values (chain id, shard) are not process-wide state.
//! They travel in a [`NetworkConfig`] that callers hand to the builders.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Network Identifiers
// ---------------------------------------------------------------------------

/// Mainnet chain id, mixed into `v` for replay protection.
pub const MAINNET_CHAIN_ID: u64 = 1;

/// Public testnet chain id.
pub const TESTNET_CHAIN_ID: u64 = 2;

/// Local development network chain id. Shares the testnet value.
pub const LOCALNET_CHAIN_ID: u64 = 2;

/// Bech32 human-readable prefix for mainnet addresses (`one1...`).
pub const MAINNET_HRP: &str = "one";

/// Bech32 human-readable prefix for testnet addresses (`tone1...`).
pub const TESTNET_HRP: &str = "tone";

// ---------------------------------------------------------------------------
// Field Widths
// ---------------------------------------------------------------------------

/// Raw account identifier length in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// Hex characters in an address body (without the `0x` prefix).
pub const ADDRESS_HEX_LENGTH: usize = ADDRESS_LENGTH * 2;

/// Bech32 data characters after the `1` separator: 32 data words plus the
/// 6-character checksum for a 20-byte payload.
pub const BECH32_DATA_LENGTH: usize = 38;

/// Largest minimal-length integer the wire format accepts.
pub const MAX_INTEGER_BYTES: usize = 32;

/// ECDSA scalar width (r and s).
pub const SIGNATURE_SCALAR_LENGTH: usize = 32;

/// Fractional digits carried by commission-rate decimals.
pub const DECIMAL_PRECISION: u32 = 18;

/// Nesting limit for RLP lists. The deepest legitimate payload (a
/// CreateValidator commission rate) sits at depth 4.
pub const MAX_RLP_DEPTH: usize = 16;

// ---------------------------------------------------------------------------
// Signature Envelope
// ---------------------------------------------------------------------------

/// Base `v` for legacy (pre-EIP-155) signatures.
pub const LEGACY_V_OFFSET: u64 = 27;

/// Base `v` for replay-protected signatures: `v = chain_id * 2 + 35 + recid`.
pub const EIP155_V_OFFSET: u64 = 35;

/// Number of trailing fields carrying the signature (`v`, `r`, `s`) or, in
/// the unsigned preimage, the chain id and two empty placeholders.
pub const SIGNATURE_FIELD_COUNT: usize = 3;

// ---------------------------------------------------------------------------
// Top-level Field Counts
// ---------------------------------------------------------------------------

/// Plain transaction without the signature triple.
pub const PLAIN_FIELD_COUNT: usize = 8;

/// Staking transaction without the signature triple.
pub const STAKING_FIELD_COUNT: usize = 5;

// ---------------------------------------------------------------------------
// Builder Defaults
// ---------------------------------------------------------------------------

/// Gas price used when the caller does not pick one: 100 gwei.
pub const DEFAULT_GAS_PRICE_WEI: u64 = 100_000_000_000;

/// Gas limit for a plain transfer with no data.
pub const DEFAULT_TRANSFER_GAS_LIMIT: u64 = 21_000;

/// Gas limit for staking messages, generous enough for CreateValidator.
pub const DEFAULT_STAKING_GAS_LIMIT: u64 = 210_000;

// ---------------------------------------------------------------------------
// NetworkConfig
// ---------------------------------------------------------------------------

/// Network parameters threaded into transaction construction.
///
/// Replaces the notion of a globally selected shard: every builder takes the
/// config it should use, so two networks can be targeted from the same
/// process without interference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Chain id embedded in signatures. Zero disables replay protection.
    pub chain_id: u64,
    /// Shard the transaction originates from.
    #[serde(default)]
    pub shard_id: u32,
}

impl NetworkConfig {
    pub const fn new(chain_id: u64, shard_id: u32) -> Self {
        Self { chain_id, shard_id }
    }

    /// Mainnet, shard 0.
    pub const fn mainnet() -> Self {
        Self::new(MAINNET_CHAIN_ID, 0)
    }

    /// Testnet, shard 0.
    pub const fn testnet() -> Self {
        Self::new(TESTNET_CHAIN_ID, 0)
    }

    /// Localnet, shard 0.
    pub const fn localnet() -> Self {
        Self::new(LOCALNET_CHAIN_ID, 0)
    }

    /// Same network, different originating shard.
    pub const fn with_shard(self, shard_id: u32) -> Self {
        Self::new(self.chain_id, shard_id)
    }

    /// Bech32 prefix that addresses are displayed with on this network.
    pub fn hrp(&self) -> &'static str {
        hrp_for_chain(self.chain_id)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}

// ---------------------------------------------------------------------------
// Utility
// ---------------------------------------------------------------------------

/// Address prefix for a chain id. Only mainnet uses `one`; every other
/// network displays `tone` addresses.
pub fn hrp_for_chain(chain_id: u64) -> &'static str {
    match chain_id {
        MAINNET_CHAIN_ID => MAINNET_HRP,
        _ => TESTNET_HRP,
    }
}

/// Friendly name for a chain id, mainly for logging.
pub fn network_name(chain_id: u64) -> String {
    match chain_id {
        0 => "legacy".to_string(),
        MAINNET_CHAIN_ID => "mainnet".to_string(),
        TESTNET_CHAIN_ID => "testnet".to_string(),
        other => format!("unknown({})", other),
    }
}
