use soroban_sdk::{contracttype, Address, Bytes, String, Vec};

/// An amount of some token, tagged with the scale and currency it is
/// accounted in.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenAmount {
    pub token: Address,
    pub value: i128,
    pub decimals: u32,
    pub currency: u32,
}

/// Snapshot of a project's funding cycle as served by the funding cycle store.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundingCycle {
    /// Sequential cycle number; 0 means the project has no cycle.
    pub number: u64,
    /// Timestamp identifying the configuration this cycle runs.
    pub configuration: u64,
    pub based_on: u64,
    pub start: u64,
    pub duration: u64,
    /// Tokens minted per whole unit of the base currency, 18 decimals.
    /// Already decayed by the discount rate.
    pub weight: i128,
    pub discount_rate: u32,
    pub ballot: Option<Address>,
    /// Packed rules, see [`crate::FundingCycleMetadata`].
    pub metadata: u128,
    pub data_source: Option<Address>,
}

/// Decimals and currency a terminal accounts a token in.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountingContext {
    pub token: Address,
    pub decimals: u32,
    pub currency: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionLimit {
    pub amount: i128,
    pub currency: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperatorData {
    pub operator: Address,
    pub domain: u64,
    pub permission_indexes: Vec<u32>,
}

// ============================================
// PAYMENTS
// ============================================

/// Portion of a payment a data source routes to a delegate.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayDelegateAllocation {
    pub delegate: Address,
    pub amount: i128,
}

/// Context handed to a data source before a payment is recorded.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayParamsData {
    pub terminal: Address,
    pub payer: Address,
    pub amount: TokenAmount,
    pub project_id: u64,
    pub funding_cycle_configuration: u64,
    pub beneficiary: Address,
    pub weight: i128,
    pub reserved_rate: u32,
    pub memo: String,
    pub metadata: Bytes,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayParamsResult {
    pub weight: i128,
    pub memo: String,
    pub delegate_allocations: Vec<PayDelegateAllocation>,
}

/// Context handed to each pay delegate after the payment is recorded.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DidPayData {
    pub payer: Address,
    pub project_id: u64,
    pub funding_cycle_configuration: u64,
    pub amount: TokenAmount,
    /// What this particular delegate was sent.
    pub forwarded_amount: TokenAmount,
    pub project_token_count: i128,
    pub beneficiary: Address,
    pub prefer_claimed_tokens: bool,
    pub memo: String,
    pub metadata: Bytes,
}

/// What the terminal store decided for a payment.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentRecord {
    pub funding_cycle: FundingCycle,
    pub token_count: i128,
    pub delegate_allocations: Vec<PayDelegateAllocation>,
    pub memo: String,
}

/// Optional arguments of a forwarded payment.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentOptions {
    pub beneficiary: Option<Address>,
    pub min_returned_tokens: i128,
    pub prefer_claimed_tokens: bool,
    pub memo: String,
    pub metadata: Bytes,
}

// ============================================
// REDEMPTIONS
// ============================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RedemptionDelegateAllocation {
    pub delegate: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RedeemParamsData {
    pub terminal: Address,
    pub holder: Address,
    pub project_id: u64,
    pub funding_cycle_configuration: u64,
    pub token_count: i128,
    pub total_supply: i128,
    pub overflow: TokenAmount,
    pub reclaim_amount: TokenAmount,
    pub redemption_rate: u32,
    pub memo: String,
    pub metadata: Bytes,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RedeemParamsResult {
    pub reclaim_amount: i128,
    pub memo: String,
    pub delegate_allocations: Vec<RedemptionDelegateAllocation>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DidRedeemData {
    pub holder: Address,
    pub project_id: u64,
    pub funding_cycle_configuration: u64,
    pub project_token_count: i128,
    pub reclaimed_amount: TokenAmount,
    pub forwarded_amount: TokenAmount,
    pub beneficiary: Address,
    pub memo: String,
    pub metadata: Bytes,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RedemptionRecord {
    pub funding_cycle: FundingCycle,
    pub reclaim_amount: i128,
    pub delegate_allocations: Vec<RedemptionDelegateAllocation>,
    pub memo: String,
}
