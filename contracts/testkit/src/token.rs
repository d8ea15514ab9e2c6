use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

use crate::MockError;

const BASIS_POINTS: i128 = 10_000;

#[contracttype]
#[derive(Clone)]
enum DataKey {
    FeeBps,
    Balance(Address),
}

/// Token that keeps a cut of every transfer, so the recipient is credited
/// less than the amount requested.
#[contract]
pub struct FeeOnTransferToken;

#[contractimpl]
impl FeeOnTransferToken {
    pub fn init_fee(env: Env, fee_bps: i128) {
        env.storage().instance().set(&DataKey::FeeBps, &fee_bps);
    }

    pub fn mint(env: Env, to: Address, amount: i128) {
        let balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .instance()
            .set(&DataKey::Balance(to), &(balance + amount));
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::Balance(id))
            .unwrap_or(0)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), MockError> {
        from.require_auth();

        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            return Err(MockError::InsufficientBalance);
        }

        let fee_bps: i128 = env.storage().instance().get(&DataKey::FeeBps).unwrap_or(0);
        let fee = amount * fee_bps / BASIS_POINTS;
        let to_balance = Self::balance(env.clone(), to.clone());

        env.storage()
            .instance()
            .set(&DataKey::Balance(from), &(from_balance - amount));
        env.storage()
            .instance()
            .set(&DataKey::Balance(to), &(to_balance + amount - fee));

        Ok(())
    }
}
