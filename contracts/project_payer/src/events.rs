use soroban_sdk::{contracttype, Address, Bytes, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetDefaultValuesEvent {
    pub project_id: u64,
    pub beneficiary: Option<Address>,
    pub prefer_claimed_tokens: bool,
    pub memo: String,
    pub metadata: Bytes,
    pub prefer_add_to_balance: bool,
    pub caller: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferredEvent {
    pub previous_owner: Address,
    pub new_owner: Address,
}
