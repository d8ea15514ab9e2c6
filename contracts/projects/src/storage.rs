use soroban_sdk::{contracttype, Address, Env, String};
use treasury_shared::constants::{
    INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT,
    PERSISTENT_LIFETIME_THRESHOLD,
};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    OperatorStore,
    Count,
    Owner(u64),
    Metadata(u64),
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Returns the ID for the next project, starting at 1.
pub fn next_project_id(env: &Env) -> u64 {
    let count: u64 = env.storage().instance().get(&DataKey::Count).unwrap_or(0);
    let project_id = count + 1;
    env.storage().instance().set(&DataKey::Count, &project_id);
    bump_instance(env);
    project_id
}

pub fn count(env: &Env) -> u64 {
    env.storage().instance().get(&DataKey::Count).unwrap_or(0)
}

pub fn owner_of(env: &Env, project_id: u64) -> Option<Address> {
    let key = DataKey::Owner(project_id);
    let owner = env.storage().persistent().get(&key);
    if owner.is_some() {
        bump_persistent(env, &key);
    }
    owner
}

pub fn set_owner_of(env: &Env, project_id: u64, owner: &Address) {
    let key = DataKey::Owner(project_id);
    env.storage().persistent().set(&key, owner);
    bump_persistent(env, &key);
}

pub fn metadata_of(env: &Env, project_id: u64) -> Option<String> {
    env.storage().persistent().get(&DataKey::Metadata(project_id))
}

pub fn set_metadata_of(env: &Env, project_id: u64, metadata: &String) {
    let key = DataKey::Metadata(project_id);
    env.storage().persistent().set(&key, metadata);
    bump_persistent(env, &key);
}
