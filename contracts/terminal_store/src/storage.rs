use soroban_sdk::{contracttype, Address, Env};
use treasury_shared::{
    constants::{
        INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT,
        PERSISTENT_LIFETIME_THRESHOLD,
    },
    AccountingContext,
};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Directory,
    FundingCycleStore,
    Prices,
    TokenStore,
    AccountingContext(Address), // terminal
    Balance(Address, u64),      // (terminal, project_id)
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn address(env: &Env, key: &DataKey) -> Option<Address> {
    env.storage().instance().get(key)
}

pub fn accounting_context_of(env: &Env, terminal: &Address) -> Option<AccountingContext> {
    let key = DataKey::AccountingContext(terminal.clone());
    let context = env.storage().persistent().get(&key);
    if context.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    }
    context
}

pub fn set_accounting_context_of(env: &Env, terminal: &Address, context: &AccountingContext) {
    let key = DataKey::AccountingContext(terminal.clone());
    env.storage().persistent().set(&key, context);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn balance_of(env: &Env, terminal: &Address, project_id: u64) -> i128 {
    let key = DataKey::Balance(terminal.clone(), project_id);
    let balance = env.storage().persistent().get(&key);
    if balance.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    }
    balance.unwrap_or(0)
}

pub fn set_balance_of(env: &Env, terminal: &Address, project_id: u64, balance: i128) {
    let key = DataKey::Balance(terminal.clone(), project_id);
    env.storage().persistent().set(&key, &balance);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}
