//! Project Token.
//!
//! The fungible token backing a project's claimed balances. The owner (the
//! token store once the token is issued) mints and burns; holders transfer.

#![no_std]

mod error;
mod events;
mod storage;

use error::Error;
use events::{BurnEvent, MintEvent, OwnershipTransferredEvent, TransferEvent};
use storage::DataKey;

use soroban_sdk::{contract, contractimpl, Address, Env, String, Symbol};
use treasury_shared::constants::WEIGHT_DECIMALS;

#[contract]
pub struct ProjectToken;

#[contractimpl]
impl ProjectToken {
    /// Initialize the token contract
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, owner: Address, name: String, symbol: String) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::Name, &name);
        env.storage().instance().set(&DataKey::Symbol, &symbol);
        storage::bump_instance(&env);

        Ok(())
    }

    /// Hand minting rights to a new owner
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), Error> {
        let owner = Self::owner(env.clone())?;
        owner.require_auth();

        env.storage().instance().set(&DataKey::Owner, &new_owner);

        env.events().publish(
            (Symbol::new(&env, "ownership_transferred"),),
            OwnershipTransferredEvent {
                previous_owner: owner,
                new_owner,
            },
        );

        Ok(())
    }

    /// Mint tokens (owner only)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), Error> {
        let owner = Self::owner(env.clone())?;
        owner.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let balance = storage::balance_of(&env, &to)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        let supply = storage::total_supply(&env)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;

        storage::set_balance_of(&env, &to, balance);
        storage::set_total_supply(&env, supply);
        storage::bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "mint"), to.clone()),
            MintEvent { to, amount },
        );

        Ok(())
    }

    /// Burn tokens from a holder (owner only)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientBalance`: Not enough balance
    pub fn burn(env: Env, from: Address, amount: i128) -> Result<(), Error> {
        let owner = Self::owner(env.clone())?;
        owner.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let balance = storage::balance_of(&env, &from);
        if balance < amount {
            return Err(Error::InsufficientBalance);
        }

        storage::set_balance_of(&env, &from, balance - amount);
        storage::set_total_supply(&env, storage::total_supply(&env) - amount);
        storage::bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "burn"), from.clone()),
            BurnEvent { from, amount },
        );

        Ok(())
    }

    /// Transfer tokens between holders
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientBalance`: Not enough balance
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        from.require_auth();

        let from_balance = storage::balance_of(&env, &from);
        if from_balance < amount {
            return Err(Error::InsufficientBalance);
        }

        if from != to {
            let to_balance = storage::balance_of(&env, &to)
                .checked_add(amount)
                .ok_or(Error::Overflow)?;
            storage::set_balance_of(&env, &from, from_balance - amount);
            storage::set_balance_of(&env, &to, to_balance);
        }

        env.events().publish(
            (Symbol::new(&env, "transfer"), from.clone(), to.clone()),
            TransferEvent { from, to, amount },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn balance(env: Env, id: Address) -> i128 {
        storage::balance_of(&env, &id)
    }

    pub fn total_supply(env: Env) -> i128 {
        storage::total_supply(&env)
    }

    /// Project tokens use the same scale as funding cycle weights.
    pub fn decimals(_env: Env) -> u32 {
        WEIGHT_DECIMALS
    }

    pub fn name(env: Env) -> Result<String, Error> {
        storage::name(&env).ok_or(Error::NotInitialized)
    }

    pub fn symbol(env: Env) -> Result<String, Error> {
        storage::symbol(&env).ok_or(Error::NotInitialized)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(Error::NotInitialized)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::{testutils::Address as _, Address, Env, String};

    const UNIT: i128 = 1_000_000_000_000_000_000;

    fn setup(env: &Env) -> (ProjectTokenClient<'_>, Address) {
        let contract_id = env.register(ProjectToken, ());
        let client = ProjectTokenClient::new(env, &contract_id);

        let owner = Address::generate(env);
        client.initialize(
            &owner,
            &String::from_str(env, "Project One"),
            &String::from_str(env, "ONE"),
        );
        (client, owner)
    }

    #[test]
    fn test_initialize() {
        let env = Env::default();
        let (client, owner) = setup(&env);

        assert_eq!(client.owner(), owner);
        assert_eq!(client.symbol(), String::from_str(&env, "ONE"));
        assert_eq!(client.decimals(), 18);

        let result = client.try_initialize(
            &owner,
            &String::from_str(&env, "Again"),
            &String::from_str(&env, "AGN"),
        );
        assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
    }

    #[test]
    fn test_mint_burn_and_supply() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, _) = setup(&env);

        let holder = Address::generate(&env);
        client.mint(&holder, &(1000 * UNIT));
        client.burn(&holder, &(400 * UNIT));

        assert_eq!(client.balance(&holder), 600 * UNIT);
        assert_eq!(client.total_supply(), 600 * UNIT);
    }

    #[test]
    #[should_panic]
    fn test_mint_requires_owner() {
        let env = Env::default();
        let (client, _) = setup(&env);

        client.mint(&Address::generate(&env), &UNIT);
    }

    #[test]
    fn test_transfer() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, _) = setup(&env);

        let alice = Address::generate(&env);
        let bob = Address::generate(&env);
        client.mint(&alice, &(1000 * UNIT));
        client.transfer(&alice, &bob, &(250 * UNIT));

        assert_eq!(client.balance(&alice), 750 * UNIT);
        assert_eq!(client.balance(&bob), 250 * UNIT);
        assert_eq!(client.total_supply(), 1000 * UNIT);
    }

    #[test]
    fn test_burn_insufficient_balance() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, _) = setup(&env);

        let holder = Address::generate(&env);
        client.mint(&holder, &UNIT);

        let result = client.try_burn(&holder, &(2 * UNIT));
        assert_eq!(result, Err(Ok(Error::InsufficientBalance)));
    }

    #[test]
    fn test_transfer_ownership() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, _) = setup(&env);

        let store = Address::generate(&env);
        client.transfer_ownership(&store);
        assert_eq!(client.owner(), store);
    }
}
