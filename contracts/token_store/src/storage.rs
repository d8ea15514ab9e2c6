use soroban_sdk::{contracttype, Address, Env};
use treasury_shared::constants::{
    INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT,
    PERSISTENT_LIFETIME_THRESHOLD,
};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Directory,
    OperatorStore,
    TokenOf(u64),
    ProjectOf(Address),
    Unclaimed(Address, u64), // (holder, project_id)
    UnclaimedTotal(u64),
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn read<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    }
    value
}

fn write<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn token_of(env: &Env, project_id: u64) -> Option<Address> {
    read(env, &DataKey::TokenOf(project_id))
}

pub fn project_of(env: &Env, token: &Address) -> Option<u64> {
    read(env, &DataKey::ProjectOf(token.clone()))
}

pub fn attach_token(env: &Env, project_id: u64, token: &Address) {
    write(env, &DataKey::TokenOf(project_id), token);
    write(env, &DataKey::ProjectOf(token.clone()), &project_id);
}

pub fn unclaimed_balance_of(env: &Env, holder: &Address, project_id: u64) -> i128 {
    read(env, &DataKey::Unclaimed(holder.clone(), project_id)).unwrap_or(0)
}

/// A zero balance is a stored value, not an absence.
pub fn set_unclaimed_balance_of(env: &Env, holder: &Address, project_id: u64, balance: i128) {
    write(env, &DataKey::Unclaimed(holder.clone(), project_id), &balance);
}

pub fn unclaimed_total_supply_of(env: &Env, project_id: u64) -> i128 {
    read(env, &DataKey::UnclaimedTotal(project_id)).unwrap_or(0)
}

pub fn set_unclaimed_total_supply_of(env: &Env, project_id: u64, supply: i128) {
    write(env, &DataKey::UnclaimedTotal(project_id), &supply);
}
