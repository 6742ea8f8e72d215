//! The staking directive: which of the five messages a transaction carries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::encoding::fields::{decode_u64, encode_u64};
use crate::encoding::RlpItem;
use crate::error::{CodecError, Result};

/// Wire tag of a staking message. The discriminants are part of the
/// format and must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Directive {
    CreateValidator = 0,
    EditValidator = 1,
    Delegate = 2,
    Undelegate = 3,
    CollectRewards = 4,
}

impl Directive {
    pub const ALL: [Directive; 5] = [
        Directive::CreateValidator,
        Directive::EditValidator,
        Directive::Delegate,
        Directive::Undelegate,
        Directive::CollectRewards,
    ];

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Number of entries in the message list for this directive.
    pub const fn field_count(self) -> usize {
        match self {
            Directive::CreateValidator => 8,
            Directive::EditValidator => 9,
            Directive::Delegate | Directive::Undelegate => 3,
            Directive::CollectRewards => 1,
        }
    }

    /// `CreateValidator` goes out as the empty string like any other zero.
    pub fn encode(self) -> RlpItem {
        encode_u64(u64::from(self.as_u8()))
    }

    pub fn decode(item: &RlpItem) -> Result<Self> {
        Self::try_from(decode_u64(item, "directive")?)
    }
}

impl TryFrom<u64> for Directive {
    type Error = CodecError;

    fn try_from(value: u64) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|d| u64::from(d.as_u8()) == value)
            .ok_or(CodecError::UnknownDirective(value))
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Directive::CreateValidator => "CreateValidator",
            Directive::EditValidator => "EditValidator",
            Directive::Delegate => "Delegate",
            Directive::Undelegate => "Undelegate",
            Directive::CollectRewards => "CollectRewards",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_are_stable() {
        let values: Vec<u8> = Directive::ALL.iter().map(|d| d.as_u8()).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn create_validator_encodes_as_empty_string() {
        assert_eq!(Directive::CreateValidator.encode(), RlpItem::empty());
        assert_eq!(Directive::Delegate.encode(), RlpItem::Bytes(vec![0x02]));
    }

    #[test]
    fn decode_accepts_every_directive() {
        for directive in Directive::ALL {
            assert_eq!(Directive::decode(&directive.encode()).unwrap(), directive);
        }
        // A non-canonical zero byte still means CreateValidator.
        assert_eq!(
            Directive::decode(&RlpItem::Bytes(vec![0x00])).unwrap(),
            Directive::CreateValidator
        );
    }

    #[test]
    fn out_of_range_directive_is_unknown() {
        assert_eq!(Directive::try_from(5), Err(CodecError::UnknownDirective(5)));
        assert_eq!(
            Directive::decode(&RlpItem::Bytes(vec![0x09])),
            Err(CodecError::UnknownDirective(9))
        );
    }

    #[test]
    fn field_counts() {
        assert_eq!(Directive::CreateValidator.field_count(), 8);
        assert_eq!(Directive::EditValidator.field_count(), 9);
        assert_eq!(Directive::Delegate.field_count(), 3);
        assert_eq!(Directive::Undelegate.field_count(), 3);
        assert_eq!(Directive::CollectRewards.field_count(), 1);
    }
}
