use soroban_sdk::{contracttype, Address, Bytes, Env, String};
use treasury_shared::constants::{INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD};

use crate::error::Error;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Config,
    Defaults,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayerConfig {
    pub owner: Address,
    pub directory: Address,
    /// Token whose value arrives as `attached` rather than as an amount.
    pub native_token: Address,
}

/// What `receive` uses when nothing else is given.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DefaultValues {
    pub project_id: u64,
    pub beneficiary: Option<Address>,
    pub prefer_claimed_tokens: bool,
    pub memo: String,
    pub metadata: Bytes,
    pub prefer_add_to_balance: bool,
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn config(env: &Env) -> Result<PayerConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &PayerConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn defaults(env: &Env) -> Result<DefaultValues, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Defaults)
        .ok_or(Error::DefaultsNotSet)
}

pub fn set_defaults(env: &Env, defaults: &DefaultValues) {
    env.storage().instance().set(&DataKey::Defaults, defaults);
}
