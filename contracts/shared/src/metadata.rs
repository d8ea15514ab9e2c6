//! Funding cycle metadata.
//!
//! The funding cycle store hands out its rules as a packed `u128`. The
//! payment pipeline decodes it once per snapshot into
//! [`FundingCycleMetadata`] and reads named fields from then on.
//!
//! ```text
//! bits  0..16   reserved rate
//! bits 16..32   redemption rate
//! bits 32..48   ballot redemption rate
//! bit  48       pause pay
//! bit  49       pause distributions
//! bit  50       pause redeem
//! bit  51       pause burn
//! bit  52       allow minting
//! bit  53       allow terminal migration
//! bit  54       allow controller migration
//! bit  55       hold fees
//! bit  56       use total overflow for redemptions
//! bit  57       use data source for pay
//! bit  58       use data source for redeem
//! ```

use soroban_sdk::{contracttype, Address};

use crate::constants::{MAX_REDEMPTION_RATE, MAX_RESERVED_RATE};
use crate::types::FundingCycle;

const RATE_MASK: u128 = 0xFFFF;

const RESERVED_RATE_SHIFT: u32 = 0;
const REDEMPTION_RATE_SHIFT: u32 = 16;
const BALLOT_REDEMPTION_RATE_SHIFT: u32 = 32;
const PAUSE_PAY_BIT: u32 = 48;
const PAUSE_DISTRIBUTIONS_BIT: u32 = 49;
const PAUSE_REDEEM_BIT: u32 = 50;
const PAUSE_BURN_BIT: u32 = 51;
const ALLOW_MINTING_BIT: u32 = 52;
const ALLOW_TERMINAL_MIGRATION_BIT: u32 = 53;
const ALLOW_CONTROLLER_MIGRATION_BIT: u32 = 54;
const HOLD_FEES_BIT: u32 = 55;
const USE_TOTAL_OVERFLOW_BIT: u32 = 56;
const USE_DATA_SOURCE_FOR_PAY_BIT: u32 = 57;
const USE_DATA_SOURCE_FOR_REDEEM_BIT: u32 = 58;

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FundingCycleMetadata {
    pub reserved_rate: u32,
    pub redemption_rate: u32,
    pub ballot_redemption_rate: u32,
    pub pause_pay: bool,
    pub pause_distributions: bool,
    pub pause_redeem: bool,
    pub pause_burn: bool,
    pub allow_minting: bool,
    pub allow_terminal_migration: bool,
    pub allow_controller_migration: bool,
    pub hold_fees: bool,
    pub use_total_overflow: bool,
    pub use_data_source_for_pay: bool,
    pub use_data_source_for_redeem: bool,
    pub data_source: Option<Address>,
}

fn rate(packed: u128, shift: u32) -> u32 {
    ((packed >> shift) & RATE_MASK) as u32
}

fn flag(packed: u128, bit: u32) -> bool {
    (packed >> bit) & 1 == 1
}

fn set_flag(value: bool, bit: u32) -> u128 {
    (value as u128) << bit
}

impl FundingCycleMetadata {
    /// Decode the metadata of a funding cycle snapshot.
    pub fn from_cycle(cycle: &FundingCycle) -> Self {
        let mut metadata = Self::unpack(cycle.metadata);
        metadata.data_source = cycle.data_source.clone();
        metadata
    }

    pub fn unpack(packed: u128) -> Self {
        Self {
            reserved_rate: rate(packed, RESERVED_RATE_SHIFT),
            redemption_rate: rate(packed, REDEMPTION_RATE_SHIFT),
            ballot_redemption_rate: rate(packed, BALLOT_REDEMPTION_RATE_SHIFT),
            pause_pay: flag(packed, PAUSE_PAY_BIT),
            pause_distributions: flag(packed, PAUSE_DISTRIBUTIONS_BIT),
            pause_redeem: flag(packed, PAUSE_REDEEM_BIT),
            pause_burn: flag(packed, PAUSE_BURN_BIT),
            allow_minting: flag(packed, ALLOW_MINTING_BIT),
            allow_terminal_migration: flag(packed, ALLOW_TERMINAL_MIGRATION_BIT),
            allow_controller_migration: flag(packed, ALLOW_CONTROLLER_MIGRATION_BIT),
            hold_fees: flag(packed, HOLD_FEES_BIT),
            use_total_overflow: flag(packed, USE_TOTAL_OVERFLOW_BIT),
            use_data_source_for_pay: flag(packed, USE_DATA_SOURCE_FOR_PAY_BIT),
            use_data_source_for_redeem: flag(packed, USE_DATA_SOURCE_FOR_REDEEM_BIT),
            data_source: None,
        }
    }

    /// Pack the flags and rates. The data source travels beside the packed
    /// word in [`FundingCycle::data_source`].
    pub fn pack(&self) -> u128 {
        ((self.reserved_rate as u128 & RATE_MASK) << RESERVED_RATE_SHIFT)
            | ((self.redemption_rate as u128 & RATE_MASK) << REDEMPTION_RATE_SHIFT)
            | ((self.ballot_redemption_rate as u128 & RATE_MASK) << BALLOT_REDEMPTION_RATE_SHIFT)
            | set_flag(self.pause_pay, PAUSE_PAY_BIT)
            | set_flag(self.pause_distributions, PAUSE_DISTRIBUTIONS_BIT)
            | set_flag(self.pause_redeem, PAUSE_REDEEM_BIT)
            | set_flag(self.pause_burn, PAUSE_BURN_BIT)
            | set_flag(self.allow_minting, ALLOW_MINTING_BIT)
            | set_flag(self.allow_terminal_migration, ALLOW_TERMINAL_MIGRATION_BIT)
            | set_flag(self.allow_controller_migration, ALLOW_CONTROLLER_MIGRATION_BIT)
            | set_flag(self.hold_fees, HOLD_FEES_BIT)
            | set_flag(self.use_total_overflow, USE_TOTAL_OVERFLOW_BIT)
            | set_flag(self.use_data_source_for_pay, USE_DATA_SOURCE_FOR_PAY_BIT)
            | set_flag(self.use_data_source_for_redeem, USE_DATA_SOURCE_FOR_REDEEM_BIT)
    }

    /// Rates within their denominators.
    pub fn is_valid(&self) -> bool {
        self.reserved_rate <= MAX_RESERVED_RATE
            && self.redemption_rate <= MAX_REDEMPTION_RATE
            && self.ballot_redemption_rate <= MAX_REDEMPTION_RATE
    }

    /// The data source to consult for payments, if the cycle enables one.
    pub fn pay_data_source(&self) -> Option<Address> {
        if self.use_data_source_for_pay {
            self.data_source.clone()
        } else {
            None
        }
    }

    /// The data source to consult for redemptions, if the cycle enables one.
    pub fn redeem_data_source(&self) -> Option<Address> {
        if self.use_data_source_for_redeem {
            self.data_source.clone()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{testutils::Address as _, Env};

    #[test]
    fn test_rates_occupy_their_own_fields() {
        let metadata = FundingCycleMetadata {
            reserved_rate: 2_500,
            redemption_rate: MAX_REDEMPTION_RATE,
            ballot_redemption_rate: 7,
            ..Default::default()
        };
        let packed = metadata.pack();
        assert_eq!(packed & RATE_MASK, 2_500);
        assert_eq!((packed >> 16) & RATE_MASK, 10_000);
        assert_eq!((packed >> 32) & RATE_MASK, 7);
        assert_eq!(FundingCycleMetadata::unpack(packed), metadata);
    }

    #[test]
    fn test_flags_are_independent() {
        let paused = FundingCycleMetadata {
            pause_pay: true,
            ..Default::default()
        };
        let decoded = FundingCycleMetadata::unpack(paused.pack());
        assert!(decoded.pause_pay);
        assert!(!decoded.pause_redeem);
        assert!(!decoded.pause_burn);
        assert!(!decoded.use_data_source_for_pay);

        let data_source_only = FundingCycleMetadata {
            use_data_source_for_redeem: true,
            allow_minting: true,
            ..Default::default()
        };
        let decoded = FundingCycleMetadata::unpack(data_source_only.pack());
        assert!(decoded.use_data_source_for_redeem);
        assert!(decoded.allow_minting);
        assert!(!decoded.use_data_source_for_pay);
        assert!(!decoded.pause_pay);
        assert!(!decoded.use_total_overflow);

        let total_overflow = FundingCycleMetadata {
            use_total_overflow: true,
            ..Default::default()
        };
        let decoded = FundingCycleMetadata::unpack(total_overflow.pack());
        assert!(decoded.use_total_overflow);
        assert!(!decoded.hold_fees);
    }

    #[test]
    fn test_data_source_gated_by_flags() {
        let env = Env::default();
        let source = Address::generate(&env);
        let cycle = FundingCycle {
            number: 1,
            configuration: 100,
            based_on: 0,
            start: 100,
            duration: 0,
            weight: 1,
            discount_rate: 0,
            ballot: None,
            metadata: FundingCycleMetadata {
                use_data_source_for_pay: true,
                ..Default::default()
            }
            .pack(),
            data_source: Some(source.clone()),
        };

        let metadata = FundingCycleMetadata::from_cycle(&cycle);
        assert_eq!(metadata.pay_data_source(), Some(source));
        assert_eq!(metadata.redeem_data_source(), None);
    }

    #[test]
    fn test_is_valid() {
        let mut metadata = FundingCycleMetadata::default();
        assert!(metadata.is_valid());
        metadata.reserved_rate = MAX_RESERVED_RATE + 1;
        assert!(!metadata.is_valid());
    }
}
