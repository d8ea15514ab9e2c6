//! Stand-ins for the collaborators the treasury contracts consume but do not
//! implement: the funding cycle store, the price feed, data sources,
//! delegates, and tokens that misbehave on transfer.
//!
//! Function names are unique across the contracts in this crate so they can
//! share one compilation unit.

#![no_std]

mod delegate;
mod funding_cycles;
mod prices;
mod terminal;
mod token;

pub use delegate::{MockDelegate, MockDelegateClient, PayOverride, RedeemOverride};
pub use funding_cycles::{MockFundingCycleStore, MockFundingCycleStoreClient};
pub use prices::{MockPrices, MockPricesClient};
pub use terminal::{MockTerminal, MockTerminalClient};
pub use token::{FeeOnTransferToken, FeeOnTransferTokenClient};

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockError {
    PriceFeedNotFound = 9001,
    InsufficientBalance = 9002,
}
