use soroban_sdk::{contracttype, Address, Env};
use treasury_shared::constants::{PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Permissions(Address, Address, u64), // (operator, account, domain)
}

pub fn permissions_of(env: &Env, operator: &Address, account: &Address, domain: u64) -> u128 {
    let key = DataKey::Permissions(operator.clone(), account.clone(), domain);
    let packed = env.storage().persistent().get(&key).unwrap_or(0u128);
    if packed != 0 {
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    }
    packed
}

pub fn set_permissions_of(
    env: &Env,
    operator: &Address,
    account: &Address,
    domain: u64,
    packed: u128,
) {
    let key = DataKey::Permissions(operator.clone(), account.clone(), domain);
    if packed == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, &packed);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}
