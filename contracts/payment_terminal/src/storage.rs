use soroban_sdk::{contracttype, Address, Env};
use treasury_shared::constants::{INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD};

use crate::error::Error;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Config,
    Lock,
}

/// Everything a terminal is bound to at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TerminalConfig {
    pub admin: Address,
    pub token: Address,
    pub native: bool,
    pub decimals: u32,
    pub currency: u32,
    pub base_weight_currency: u32,
    pub directory: Address,
    pub operator_store: Address,
    pub terminal_store: Address,
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn config(env: &Env) -> Result<TerminalConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &TerminalConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

/// Take the terminal-wide lock shared by every entry point.
pub fn lock(env: &Env) -> Result<(), Error> {
    if env.storage().temporary().has(&DataKey::Lock) {
        return Err(Error::ReentrantCall);
    }
    env.storage().temporary().set(&DataKey::Lock, &true);
    Ok(())
}

pub fn unlock(env: &Env) {
    env.storage().temporary().remove(&DataKey::Lock);
}
