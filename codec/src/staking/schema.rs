//! Wire layout of each staking message.
//!
//! ```text
//! CreateValidator  [validator, [5 x text], [[rate], [maxRate], [maxChangeRate]],
//!                   minSelfDelegation, maxTotalDelegation, [keys], [sigs], amount]
//! EditValidator    [validator, [5 x text], rate | "", min | "", max | "",
//!                   keyToRemove, keyToAdd, keySig, active]
//! Delegate         [delegator, validator, amount]
//! Undelegate       [delegator, validator, amount]
//! CollectRewards   [delegator]
//! ```

use super::directive::Directive;
use super::message::{
    ActiveStatus, CollectRewards, CommissionRates, CreateValidator, Delegate, Description,
    EditValidator, StakingMessage, Undelegate,
};
use crate::encoding::fields::{
    decode_address, decode_bytes_list, decode_optional_bytes, decode_optional_uint, decode_text,
    decode_u64, decode_uint, encode_address, encode_bytes_list, encode_optional_bytes,
    encode_optional_uint, encode_text, encode_u64, encode_uint,
};
use crate::encoding::{Decimal, RlpItem};
use crate::error::{CodecError, Result};

const DESCRIPTION_FIELDS: usize = 5;

/// Build the message list for `msg`.
pub fn encode_message(msg: &StakingMessage) -> RlpItem {
    let fields = match msg {
        StakingMessage::CreateValidator(m) => vec![
            encode_address(&m.validator_address),
            encode_description(&m.description),
            encode_commission_rates(&m.commission_rates),
            encode_uint(m.min_self_delegation),
            encode_uint(m.max_total_delegation),
            encode_bytes_list(&m.slot_pub_keys),
            encode_bytes_list(&m.slot_key_sigs),
            encode_uint(m.amount),
        ],
        StakingMessage::EditValidator(m) => vec![
            encode_address(&m.validator_address),
            // An absent description still occupies five empty strings.
            encode_description(m.description.as_ref().unwrap_or(&Description::default())),
            Decimal::encode_optional(m.commission_rate.as_ref()),
            encode_optional_uint(m.min_self_delegation),
            encode_optional_uint(m.max_total_delegation),
            encode_optional_bytes(m.slot_key_to_remove.as_deref()),
            encode_optional_bytes(m.slot_key_to_add.as_deref()),
            encode_optional_bytes(m.slot_key_sig.as_deref()),
            encode_u64(u64::from(m.active.as_u8())),
        ],
        StakingMessage::Delegate(m) => vec![
            encode_address(&m.delegator_address),
            encode_address(&m.validator_address),
            encode_uint(m.amount),
        ],
        StakingMessage::Undelegate(m) => vec![
            encode_address(&m.delegator_address),
            encode_address(&m.validator_address),
            encode_uint(m.amount),
        ],
        StakingMessage::CollectRewards(m) => vec![encode_address(&m.delegator_address)],
    };
    debug_assert_eq!(fields.len(), msg.directive().field_count());
    RlpItem::List(fields)
}

/// Read the message list of a transaction whose directive is already known.
pub fn decode_message(directive: Directive, item: &RlpItem) -> Result<StakingMessage> {
    let f = item.as_list_of("message", directive.field_count())?;
    let msg = match directive {
        Directive::CreateValidator => CreateValidator {
            validator_address: decode_address(&f[0], "validatorAddress")?,
            description: decode_description(&f[1])?.unwrap_or_default(),
            commission_rates: decode_commission_rates(&f[2])?,
            min_self_delegation: decode_uint(&f[3], "minSelfDelegation")?,
            max_total_delegation: decode_uint(&f[4], "maxTotalDelegation")?,
            slot_pub_keys: decode_bytes_list(&f[5], "slotPubKeys")?,
            slot_key_sigs: decode_bytes_list(&f[6], "slotKeySigs")?,
            amount: decode_uint(&f[7], "amount")?,
        }
        .into(),
        Directive::EditValidator => EditValidator {
            validator_address: decode_address(&f[0], "validatorAddress")?,
            description: decode_description(&f[1])?,
            commission_rate: Decimal::decode_optional(&f[2], "commissionRate")?,
            min_self_delegation: decode_optional_uint(&f[3], "minSelfDelegation")?,
            max_total_delegation: decode_optional_uint(&f[4], "maxTotalDelegation")?,
            slot_key_to_remove: decode_optional_bytes(&f[5], "slotKeyToRemove")?,
            slot_key_to_add: decode_optional_bytes(&f[6], "slotKeyToAdd")?,
            slot_key_sig: decode_optional_bytes(&f[7], "slotKeySig")?,
            active: decode_active(&f[8])?,
        }
        .into(),
        Directive::Delegate => Delegate {
            delegator_address: decode_address(&f[0], "delegatorAddress")?,
            validator_address: decode_address(&f[1], "validatorAddress")?,
            amount: decode_uint(&f[2], "amount")?,
        }
        .into(),
        Directive::Undelegate => Undelegate {
            delegator_address: decode_address(&f[0], "delegatorAddress")?,
            validator_address: decode_address(&f[1], "validatorAddress")?,
            amount: decode_uint(&f[2], "amount")?,
        }
        .into(),
        Directive::CollectRewards => CollectRewards {
            delegator_address: decode_address(&f[0], "delegatorAddress")?,
        }
        .into(),
    };
    Ok(msg)
}

fn encode_description(d: &Description) -> RlpItem {
    RlpItem::List(vec![
        encode_text(&d.name),
        encode_text(&d.identity),
        encode_text(&d.website),
        encode_text(&d.security_contact),
        encode_text(&d.details),
    ])
}

/// `None` for an empty list or five empty strings.
fn decode_description(item: &RlpItem) -> Result<Option<Description>> {
    if item.as_list("description")?.is_empty() {
        return Ok(None);
    }
    let f = item.as_list_of("description", DESCRIPTION_FIELDS)?;
    let description = Description {
        name: decode_text(&f[0], "name")?,
        identity: decode_text(&f[1], "identity")?,
        website: decode_text(&f[2], "website")?,
        security_contact: decode_text(&f[3], "securityContact")?,
        details: decode_text(&f[4], "details")?,
    };
    Ok((!description.is_empty()).then_some(description))
}

fn encode_commission_rates(rates: &CommissionRates) -> RlpItem {
    RlpItem::List(vec![
        rates.rate.encode(),
        rates.max_rate.encode(),
        rates.max_change_rate.encode(),
    ])
}

fn decode_commission_rates(item: &RlpItem) -> Result<CommissionRates> {
    let f = item.as_list_of("commissionRates", 3)?;
    Ok(CommissionRates {
        rate: Decimal::decode(&f[0], "rate")?,
        max_rate: Decimal::decode(&f[1], "maxRate")?,
        max_change_rate: Decimal::decode(&f[2], "maxChangeRate")?,
    })
}

fn decode_active(item: &RlpItem) -> Result<ActiveStatus> {
    let raw = decode_u64(item, "active")?;
    u8::try_from(raw)
        .ok()
        .and_then(ActiveStatus::from_u8)
        .ok_or_else(|| CodecError::malformed(format!("active status must be 0, 1 or 2, got {raw}")))
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;

    use super::*;
    use crate::address::AccountAddress;

    fn addr(byte: u8) -> AccountAddress {
        AccountAddress::from_bytes([byte; 20])
    }

    fn rate(text: &str) -> Decimal {
        Decimal::parse(text).unwrap()
    }

    fn create_validator() -> CreateValidator {
        CreateValidator {
            validator_address: addr(0x11),
            description: Description {
                name: "Alice".into(),
                identity: "alice".into(),
                website: "alice.harmony.one".into(),
                security_contact: "Bob".into(),
                details: "Don't mess with me!!!".into(),
            },
            commission_rates: CommissionRates {
                rate: rate("0.1"),
                max_rate: rate("0.9"),
                max_change_rate: rate("0.05"),
            },
            min_self_delegation: U256::from(10u64),
            max_total_delegation: U256::from(3000u64),
            slot_pub_keys: vec![vec![0xb9; 48]],
            slot_key_sigs: vec![vec![0x68; 96]],
            amount: U256::from(100u64),
        }
    }

    #[test]
    fn create_validator_layout() {
        let msg = StakingMessage::from(create_validator());
        let item = encode_message(&msg);
        let fields = item.as_list("message").unwrap();
        assert_eq!(fields.len(), 8);
        assert_eq!(fields[1].as_list("description").unwrap().len(), 5);
        let rates = fields[2].as_list("commissionRates").unwrap();
        assert_eq!(rates.len(), 3);
        assert!(rates.iter().all(|r| r.as_list("rate").unwrap().len() == 1));
        assert_eq!(decode_message(Directive::CreateValidator, &item).unwrap(), msg);
    }

    #[test]
    fn delegate_has_three_fields() {
        let msg = StakingMessage::from(Delegate {
            delegator_address: addr(0x01),
            validator_address: addr(0x02),
            amount: U256::from(5u64),
        });
        let item = encode_message(&msg);
        assert_eq!(
            item,
            RlpItem::List(vec![
                RlpItem::Bytes(vec![0x01; 20]),
                RlpItem::Bytes(vec![0x02; 20]),
                RlpItem::Bytes(vec![0x05]),
            ])
        );
        assert_eq!(decode_message(Directive::Delegate, &item).unwrap(), msg);
    }

    #[test]
    fn undelegate_and_collect_rewards_round_trip() {
        let undelegate = StakingMessage::from(Undelegate {
            delegator_address: addr(0x03),
            validator_address: addr(0x04),
            amount: U256::from(1u64),
        });
        let collect = StakingMessage::from(CollectRewards {
            delegator_address: addr(0x05),
        });
        for msg in [undelegate, collect] {
            let item = encode_message(&msg);
            assert_eq!(decode_message(msg.directive(), &item).unwrap(), msg);
        }
    }

    #[test]
    fn sparse_edit_validator_uses_placeholders() {
        let mut edit = EditValidator::new(addr(0x22));
        edit.commission_rate = Some(rate("0.2"));
        let item = encode_message(&edit.clone().into());
        let f = item.as_list("message").unwrap();

        assert_eq!(f.len(), 9);
        assert_eq!(f[1], RlpItem::List(vec![RlpItem::empty(); 5]));
        assert!(f[2].is_list());
        for placeholder in &f[3..9] {
            assert_eq!(*placeholder, RlpItem::empty());
        }
        assert_eq!(
            decode_message(Directive::EditValidator, &item).unwrap(),
            StakingMessage::EditValidator(edit)
        );
    }

    #[test]
    fn edit_validator_active_states() {
        for status in [ActiveStatus::Unchanged, ActiveStatus::Active, ActiveStatus::Inactive] {
            let mut edit = EditValidator::new(addr(0x22));
            edit.active = status;
            let item = encode_message(&edit.into());
            match decode_message(Directive::EditValidator, &item).unwrap() {
                StakingMessage::EditValidator(decoded) => assert_eq!(decoded.active, status),
                other => panic!("unexpected message {other:?}"),
            }
        }
        assert_eq!(Option::<bool>::from(ActiveStatus::Inactive), Some(false));
        assert_eq!(ActiveStatus::from(None), ActiveStatus::Unchanged);
    }

    #[test]
    fn active_status_outside_range_is_malformed() {
        let edit = EditValidator::new(addr(0x22));
        let mut fields = match encode_message(&edit.into()) {
            RlpItem::List(fields) => fields,
            RlpItem::Bytes(_) => unreachable!(),
        };
        fields[8] = RlpItem::Bytes(vec![0x03]);
        assert!(matches!(
            decode_message(Directive::EditValidator, &RlpItem::List(fields)),
            Err(CodecError::MalformedTransaction(_))
        ));
    }

    #[test]
    fn empty_description_list_decodes_to_none() {
        let edit = EditValidator::new(addr(0x22));
        let mut fields = match encode_message(&edit.clone().into()) {
            RlpItem::List(fields) => fields,
            RlpItem::Bytes(_) => unreachable!(),
        };
        fields[1] = RlpItem::List(vec![]);
        assert_eq!(
            decode_message(Directive::EditValidator, &RlpItem::List(fields)).unwrap(),
            StakingMessage::EditValidator(edit)
        );
    }

    #[test]
    fn wrong_field_count_is_malformed() {
        let item = RlpItem::List(vec![RlpItem::Bytes(vec![0x01; 20])]);
        assert!(matches!(
            decode_message(Directive::Delegate, &item),
            Err(CodecError::MalformedTransaction(_))
        ));
    }

    #[test]
    fn list_where_address_expected_is_malformed() {
        let item = RlpItem::List(vec![RlpItem::List(vec![])]);
        assert!(matches!(
            decode_message(Directive::CollectRewards, &item),
            Err(CodecError::MalformedTransaction(_))
        ));
    }
}
