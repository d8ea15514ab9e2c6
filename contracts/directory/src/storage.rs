use soroban_sdk::{contracttype, Address, Env, Vec};
use treasury_shared::constants::{
    INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT,
    PERSISTENT_LIFETIME_THRESHOLD,
};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Projects,
    OperatorStore,
    Controller(u64),
    Terminals(u64),
    PrimaryTerminal(u64, Address), // (project_id, token)
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

pub fn controller_of(env: &Env, project_id: u64) -> Option<Address> {
    read(env, &DataKey::Controller(project_id))
}

pub fn set_controller_of(env: &Env, project_id: u64, controller: &Address) {
    write(env, &DataKey::Controller(project_id), controller);
}

pub fn terminals_of(env: &Env, project_id: u64) -> Vec<Address> {
    read(env, &DataKey::Terminals(project_id)).unwrap_or(Vec::new(env))
}

pub fn set_terminals_of(env: &Env, project_id: u64, terminals: &Vec<Address>) {
    write(env, &DataKey::Terminals(project_id), terminals);
}

pub fn primary_terminal_of(env: &Env, project_id: u64, token: &Address) -> Option<Address> {
    read(env, &DataKey::PrimaryTerminal(project_id, token.clone()))
}

pub fn set_primary_terminal_of(env: &Env, project_id: u64, token: &Address, terminal: &Address) {
    write(env, &DataKey::PrimaryTerminal(project_id, token.clone()), terminal);
}
