use soroban_sdk::{contracttype, Address, Vec};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetControllerEvent {
    pub project_id: u64,
    pub controller: Address,
    pub caller: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetTerminalsEvent {
    pub project_id: u64,
    pub terminals: Vec<Address>,
    pub caller: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetPrimaryTerminalEvent {
    pub project_id: u64,
    pub token: Address,
    pub terminal: Address,
    pub caller: Address,
}
