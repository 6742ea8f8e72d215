//! Command-line walkthrough of the codec.
//!
//! Shows one address in all three forms, signs a cross-shard transfer and
//! a delegation with a throwaway key, then decodes both payloads and prints
//! what comes back out.
//!
//! Run with:
//!   cargo run --example demo

use harmony_codec::address::AccountAddress;
use harmony_codec::config::{network_name, NetworkConfig};
use harmony_codec::encoding::{format_units, parse_one};
use harmony_codec::staking::Delegate;
use harmony_codec::transaction::{
    decode, sign_transaction, signing_hash, DecodedTransaction, DigestSigner, LocalSigner,
    StakingTransactionBuilder, TransactionBuilder, UnsignedTransaction,
};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";

fn section(title: &str) {
    println!("\n{BOLD}{CYAN}== {title} =={RESET}");
}

fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {DIM}{label:<14}{RESET} {value}");
}

fn show(decoded: &DecodedTransaction, raw: &[u8]) {
    field("bytes", raw.len());
    field("raw", format!("0x{}", hex::encode(raw)));
    field(
        "chain",
        network_name(decoded.chain_id().unwrap_or_default()),
    );
    if let Some(from) = decoded.from {
        field("from", format!("{GREEN}{}{RESET}", from.to_bech32_mainnet()));
    }
    if let Some(hash) = decoded.hash {
        field("hash", hash);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let network = NetworkConfig::testnet();
    let signer = LocalSigner::random();

    section("Addresses");
    let address = AccountAddress::parse("one1pdv9lrdwl0rg5vglh4xtyrv3wjk3wsqket7zxy")?;
    field("checksum", address.to_checksum_hex());
    field("mainnet", address.to_bech32_mainnet());
    field("testnet", address.to_bech32_testnet());
    field("signer", signer.address().to_bech32_testnet());

    section("Cross-shard transfer");
    let value = parse_one("2.5")?;
    let transfer: UnsignedTransaction = TransactionBuilder::new(&network)
        .to(address)
        .to_shard(1)
        .value(value)
        .nonce(0)
        .build()
        .into();
    field("value", format!("{} ONE", format_units(value, 18)));
    field("signing hash", signing_hash(&transfer));
    let raw = sign_transaction(&signer, &transfer, Some(signer.address()))?;
    show(&decode(&raw)?, &raw);

    section("Delegation");
    let delegate: UnsignedTransaction = StakingTransactionBuilder::new(
        &network,
        Delegate {
            delegator_address: signer.address(),
            validator_address: address,
            amount: parse_one("1000")?,
        },
    )
    .nonce(1)
    .build()
    .into();
    let raw = sign_transaction(&signer, &delegate, None)?;
    show(&decode(&raw)?, &raw);

    println!();
    Ok(())
}
