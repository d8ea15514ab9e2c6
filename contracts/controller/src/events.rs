use soroban_sdk::{contracttype, Address, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintTokensEvent {
    pub beneficiary: Address,
    pub project_id: u64,
    pub token_count: i128,
    pub beneficiary_token_count: i128,
    pub memo: String,
    pub reserved_rate: u32,
    pub caller: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BurnTokensEvent {
    pub holder: Address,
    pub project_id: u64,
    pub token_count: i128,
    pub memo: String,
    pub caller: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributeReservedTokensEvent {
    pub funding_cycle_configuration: u64,
    pub funding_cycle_number: u64,
    pub project_id: u64,
    pub beneficiary: Address,
    pub token_count: i128,
    pub memo: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetDistributionLimitEvent {
    pub project_id: u64,
    pub configuration: u64,
    pub terminal: Address,
    pub token: Address,
    pub amount: i128,
    pub currency: u32,
    pub caller: Address,
}
