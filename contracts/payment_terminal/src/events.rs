use soroban_sdk::{contracttype, Address, Bytes, String};
use treasury_shared::{DidPayData, DidRedeemData};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayEvent {
    pub funding_cycle_configuration: u64,
    pub funding_cycle_number: u64,
    pub project_id: u64,
    pub payer: Address,
    pub beneficiary: Address,
    pub amount: i128,
    pub beneficiary_token_count: i128,
    pub memo: String,
    pub metadata: Bytes,
    pub caller: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegateDidPayEvent {
    pub delegate: Address,
    pub data: DidPayData,
    pub delegated_amount: i128,
    pub caller: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddToBalanceEvent {
    pub project_id: u64,
    pub amount: i128,
    pub memo: String,
    pub metadata: Bytes,
    pub caller: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RedeemTokensEvent {
    pub funding_cycle_configuration: u64,
    pub funding_cycle_number: u64,
    pub project_id: u64,
    pub holder: Address,
    pub beneficiary: Address,
    pub token_count: i128,
    pub reclaimed_amount: i128,
    pub memo: String,
    pub metadata: Bytes,
    pub caller: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegateDidRedeemEvent {
    pub delegate: Address,
    pub data: DidRedeemData,
    pub delegated_amount: i128,
    pub caller: Address,
}
