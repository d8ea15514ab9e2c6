use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Token,
    Decimals,
}

/// A terminal that only answers which token it accepts.
#[contract]
pub struct MockTerminal;

#[contractimpl]
impl MockTerminal {
    pub fn init_terminal(env: Env, token: Address, decimals: u32) {
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage().instance().set(&DataKey::Decimals, &decimals);
    }

    pub fn accepts_token(env: Env, token: Address, _project_id: u64) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, Address>(&DataKey::Token)
            .map(|accepted| accepted == token)
            .unwrap_or(false)
    }

    pub fn decimals_for_token(env: Env, _token: Address) -> u32 {
        env.storage().instance().get(&DataKey::Decimals).unwrap_or(0)
    }

    pub fn currency_for_token(_env: Env, _token: Address) -> u32 {
        0
    }
}
