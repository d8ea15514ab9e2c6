use soroban_sdk::{contracttype, Address, Env};
use treasury_shared::{
    constants::{
        INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT,
        PERSISTENT_LIFETIME_THRESHOLD,
    },
    DistributionLimit,
};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Projects,
    Directory,
    TokenStore,
    FundingCycleStore,
    OperatorStore,
    PendingReserved(u64),
    DistributionLimit(u64, u64, Address, Address), // (project_id, configuration, terminal, token)
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn address(env: &Env, key: &DataKey) -> Option<Address> {
    env.storage().instance().get(key)
}

pub fn pending_reserved_of(env: &Env, project_id: u64) -> i128 {
    let key = DataKey::PendingReserved(project_id);
    let pending = env.storage().persistent().get(&key);
    if pending.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    }
    pending.unwrap_or(0)
}

pub fn set_pending_reserved_of(env: &Env, project_id: u64, amount: i128) {
    let key = DataKey::PendingReserved(project_id);
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn distribution_limit_of(
    env: &Env,
    project_id: u64,
    configuration: u64,
    terminal: &Address,
    token: &Address,
) -> Option<DistributionLimit> {
    env.storage().persistent().get(&DataKey::DistributionLimit(
        project_id,
        configuration,
        terminal.clone(),
        token.clone(),
    ))
}

pub fn set_distribution_limit_of(
    env: &Env,
    project_id: u64,
    configuration: u64,
    terminal: &Address,
    token: &Address,
    limit: &DistributionLimit,
) {
    let key = DataKey::DistributionLimit(project_id, configuration, terminal.clone(), token.clone());
    env.storage().persistent().set(&key, limit);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}
