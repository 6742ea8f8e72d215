//! # Transaction Module
//!
//! Encoding, signing, and decoding of both transaction families.
//!
//! ## Architecture
//!
//! ```text
//! types.rs    — PlainTransaction, StakingTransaction, signatures, decoded view
//! builder.rs  — Fluent builders seeded from a NetworkConfig
//! encode.rs   — Signing preimage, signing hash, EIP-155 v, signed form
//! decode.rs   — Family dispatch, chain id extraction, sender recovery
//! recovery.rs — secp256k1 public key recovery
//! signing.rs  — DigestSigner trait, LocalSigner, sign_transaction
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build** — [`TransactionBuilder`] or [`StakingTransactionBuilder`].
//! 2. **Hash** — [`signing_hash`] over [`encode_unsigned`].
//! 3. **Sign** — any [`DigestSigner`], usually through [`sign_transaction`].
//! 4. **Decode** — [`decode`] recovers the fields, the chain id and the sender.

pub mod builder;
pub mod decode;
pub mod encode;
pub mod recovery;
pub mod signing;
pub mod types;

pub use builder::{StakingTransactionBuilder, TransactionBuilder};
pub use decode::{decode, decode_plain, decode_staking, transaction_hash};
pub use encode::{compute_v, encode_signed, encode_unsigned, signing_hash};
pub use recovery::{recover_signer, RecoveryError};
pub use signing::{sign_transaction, DigestSigner, LocalSigner, SignerError};
pub use types::{
    DecodedTransaction, PlainTransaction, RawSignature, SignatureEnvelope, StakingTransaction,
    UnsignedTransaction,
};
