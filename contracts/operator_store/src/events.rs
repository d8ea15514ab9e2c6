use soroban_sdk::{contracttype, Address, Vec};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetOperatorEvent {
    pub operator: Address,
    pub account: Address,
    pub domain: u64,
    pub permission_indexes: Vec<u32>,
    pub packed: u128,
}
