// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Harmony Codec — Core Library
//!
//! Client-side encoding for Harmony's two transaction families: plain value
//! transfers (with cross-shard routing) and staking operations. Everything
//! here is pure computation. Transport, nonce management and gas estimation
//! belong to the caller.
//!
//! ## Architecture
//!
//! Modules are layered bottom-up:
//!
//! - **config** — Protocol constants and the `NetworkConfig` value.
//! - **error** — The shared `CodecError` type.
//! - **encoding** — RLP trees, canonical field rules, fixed-point decimals.
//! - **address** — 20-byte accounts as checksum hex, `one1…` or `tone1…`.
//! - **staking** — The five staking messages and their positional layout.
//! - **transaction** — Signing preimage, EIP-155 `v`, signed form, decoding
//!   with sender recovery, builders and signers.
//!
//! ## Quick Start
//!
//! ```
//! use harmony_codec::config::NetworkConfig;
//! use harmony_codec::transaction::{decode, sign_transaction, LocalSigner, TransactionBuilder};
//! use harmony_codec::transaction::DigestSigner;
//! use harmony_codec::AccountAddress;
//!
//! let signer = LocalSigner::random();
//! let tx = TransactionBuilder::new(&NetworkConfig::testnet())
//!     .to(AccountAddress::parse("tone1pdv9lrdwl0rg5vglh4xtyrv3wjk3wsqkh7hxx4").unwrap())
//!     .nonce(0)
//!     .build();
//!
//! let raw = sign_transaction(&signer, &tx.into(), None).unwrap();
//! let decoded = decode(&raw).unwrap();
//! assert_eq!(decoded.from, Some(signer.address()));
//! ```
//!
//! ## Design Notes
//!
//! 1. A signature that cannot be recovered is not an error: the decoded
//!    transaction simply has no sender.
//! 2. Optional integers use the empty string when absent, so an explicit
//!    zero reads back as absent.
//! 3. No global state. Chain and shard come from a `NetworkConfig`.

pub mod address;
pub mod config;
pub mod encoding;
pub mod error;
pub mod staking;
pub mod transaction;

pub use address::{AccountAddress, AddressFormat};
pub use config::NetworkConfig;
pub use error::{CodecError, Result};
pub use staking::{Directive, StakingMessage};
pub use transaction::{
    decode, encode_signed, encode_unsigned, signing_hash, DecodedTransaction, SignatureEnvelope,
    UnsignedTransaction,
};
