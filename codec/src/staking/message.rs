//! Staking message types.
//!
//! One struct per directive, gathered in [`StakingMessage`]. The field
//! order of each struct matches its order on the wire.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::directive::Directive;
use crate::address::AccountAddress;
use crate::encoding::Decimal;

/// Human-facing validator metadata. Every field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Description {
    pub name: String,
    pub identity: String,
    pub website: String,
    pub security_contact: String,
    pub details: String,
}

impl Description {
    /// True when all five fields are empty.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.identity.is_empty()
            && self.website.is_empty()
            && self.security_contact.is_empty()
            && self.details.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionRates {
    pub rate: Decimal,
    pub max_rate: Decimal,
    pub max_change_rate: Decimal,
}

/// Requested change to a validator's eligibility.
///
/// Three states rather than a `bool` because "leave it alone" has to be
/// told apart from "deactivate".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ActiveStatus {
    #[default]
    Unchanged = 0,
    Active = 1,
    Inactive = 2,
}

impl ActiveStatus {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Unchanged),
            1 => Some(Self::Active),
            2 => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl From<Option<bool>> for ActiveStatus {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            None => Self::Unchanged,
            Some(true) => Self::Active,
            Some(false) => Self::Inactive,
        }
    }
}

impl From<ActiveStatus> for Option<bool> {
    fn from(status: ActiveStatus) -> Self {
        match status {
            ActiveStatus::Unchanged => None,
            ActiveStatus::Active => Some(true),
            ActiveStatus::Inactive => Some(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateValidator {
    pub validator_address: AccountAddress,
    pub description: Description,
    pub commission_rates: CommissionRates,
    pub min_self_delegation: U256,
    pub max_total_delegation: U256,
    /// BLS public keys, passed through untouched.
    pub slot_pub_keys: Vec<Vec<u8>>,
    /// One BLS signature per key in `slot_pub_keys`.
    pub slot_key_sigs: Vec<Vec<u8>>,
    pub amount: U256,
}

/// Changes to an existing validator. Every field but the address is
/// optional; absent fields go on the wire as placeholders.
///
/// `Some(U256::ZERO)` for either delegation bound encodes exactly like
/// `None` and decodes back as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditValidator {
    pub validator_address: AccountAddress,
    pub description: Option<Description>,
    pub commission_rate: Option<Decimal>,
    pub min_self_delegation: Option<U256>,
    pub max_total_delegation: Option<U256>,
    pub slot_key_to_remove: Option<Vec<u8>>,
    pub slot_key_to_add: Option<Vec<u8>>,
    pub slot_key_sig: Option<Vec<u8>>,
    pub active: ActiveStatus,
}

impl EditValidator {
    /// An edit that changes nothing yet.
    pub fn new(validator_address: AccountAddress) -> Self {
        Self {
            validator_address,
            description: None,
            commission_rate: None,
            min_self_delegation: None,
            max_total_delegation: None,
            slot_key_to_remove: None,
            slot_key_to_add: None,
            slot_key_sig: None,
            active: ActiveStatus::Unchanged,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delegate {
    pub delegator_address: AccountAddress,
    pub validator_address: AccountAddress,
    pub amount: U256,
}

/// Same layout as [`Delegate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Undelegate {
    pub delegator_address: AccountAddress,
    pub validator_address: AccountAddress,
    pub amount: U256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectRewards {
    pub delegator_address: AccountAddress,
}

/// A staking message of any kind. The variant decides the directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "msg")]
pub enum StakingMessage {
    CreateValidator(CreateValidator),
    EditValidator(EditValidator),
    Delegate(Delegate),
    Undelegate(Undelegate),
    CollectRewards(CollectRewards),
}

impl StakingMessage {
    pub fn directive(&self) -> Directive {
        match self {
            StakingMessage::CreateValidator(_) => Directive::CreateValidator,
            StakingMessage::EditValidator(_) => Directive::EditValidator,
            StakingMessage::Delegate(_) => Directive::Delegate,
            StakingMessage::Undelegate(_) => Directive::Undelegate,
            StakingMessage::CollectRewards(_) => Directive::CollectRewards,
        }
    }
}

impl From<CreateValidator> for StakingMessage {
    fn from(msg: CreateValidator) -> Self {
        Self::CreateValidator(msg)
    }
}

impl From<EditValidator> for StakingMessage {
    fn from(msg: EditValidator) -> Self {
        Self::EditValidator(msg)
    }
}

impl From<Delegate> for StakingMessage {
    fn from(msg: Delegate) -> Self {
        Self::Delegate(msg)
    }
}

impl From<Undelegate> for StakingMessage {
    fn from(msg: Undelegate) -> Self {
        Self::Undelegate(msg)
    }
}

impl From<CollectRewards> for StakingMessage {
    fn from(msg: CollectRewards) -> Self {
        Self::CollectRewards(msg)
    }
}
