use soroban_sdk::{contracttype, Address, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreateEvent {
    pub project_id: u64,
    pub owner: Address,
    pub metadata: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetMetadataEvent {
    pub project_id: u64,
    pub metadata: String,
    pub caller: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferOwnershipEvent {
    pub project_id: u64,
    pub from: Address,
    pub to: Address,
}
