use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IssueEvent {
    pub project_id: u64,
    pub token: Address,
    pub caller: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintEvent {
    pub holder: Address,
    pub project_id: u64,
    pub amount: i128,
    pub claimed: bool,
    pub caller: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BurnEvent {
    pub holder: Address,
    pub project_id: u64,
    pub amount: i128,
    pub claimed_balance_burned: i128,
    pub unclaimed_balance_burned: i128,
    pub prefer_claimed_tokens: bool,
    pub caller: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimEvent {
    pub holder: Address,
    pub project_id: u64,
    pub unclaimed_balance: i128,
    pub amount: i128,
    pub caller: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferEvent {
    pub holder: Address,
    pub project_id: u64,
    pub recipient: Address,
    pub amount: i128,
    pub caller: Address,
}
