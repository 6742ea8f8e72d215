//! # Encoding
//!
//! Byte-level building blocks shared by staking messages and transactions.
//!
//! ```text
//! rlp.rs     — RlpItem tree, encoder and bounded decoder
//! fields.rs  — Integer, address, scalar, byte and text field rules
//! decimal.rs — 18-digit fixed point and unit conversion
//! ```

pub mod decimal;
pub mod fields;
pub mod rlp;

pub use decimal::{format_units, parse_one, parse_units, Decimal};
pub use rlp::RlpItem;
