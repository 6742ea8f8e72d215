//! # Staking Messages
//!
//! The five staking operations and their positional wire layout.
//!
//! ```text
//! directive.rs — Directive tag (0..=4) and per-directive field counts
//! message.rs   — Typed messages and the StakingMessage sum type
//! schema.rs    — Message <-> RLP list conversion
//! ```

pub mod directive;
pub mod message;
pub mod schema;

pub use directive::Directive;
pub use message::{
    ActiveStatus, CollectRewards, CommissionRates, CreateValidator, Delegate, Description,
    EditValidator, StakingMessage, Undelegate,
};
pub use schema::{decode_message, encode_message};
