//! Token Store.
//!
//! Ledger of project token balances. A holder's balance is split between a
//! claimed part, held in the project's token contract, and an unclaimed part
//! kept here as bookkeeping only. Only the project's controller moves supply.

#![no_std]

mod error;
mod events;
mod storage;

use error::Error;
use events::{BurnEvent, ClaimEvent, IssueEvent, MintEvent, TransferEvent};
use storage::DataKey;

use soroban_sdk::{contract, contractimpl, log, Address, Env, Symbol};
use treasury_shared::{
    interfaces::{DirectoryClient, ProjectTokenClient},
    permissions::{self, check_permission},
};

#[contract]
pub struct TokenStore;

#[contractimpl]
impl TokenStore {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Initialize the token store
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, directory: Address, operator_store: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Directory, &directory);
        env.storage()
            .instance()
            .set(&DataKey::OperatorStore, &operator_store);
        storage::bump_instance(&env);

        Ok(())
    }

    // ============================================
    // CONTROLLER OPERATIONS
    // ============================================

    /// Attach the token contract that backs a project's claimed balances
    ///
    /// The token must already be owned by this store.
    ///
    /// # Errors
    /// - `ControllerUnauthorized`: Caller is not the project's controller
    /// - `ProjectAlreadyHasToken`: A token is already attached to the project
    /// - `TokenAlreadyInUse`: The token backs another project
    /// - `TokenNotOwnedByStore`: The token's owner is not this store
    pub fn issue_for(env: Env, caller: Address, project_id: u64, token: Address) -> Result<(), Error> {
        caller.require_auth();
        Self::require_controller(&env, &caller, project_id)?;

        if storage::token_of(&env, project_id).is_some() {
            return Err(Error::ProjectAlreadyHasToken);
        }
        if storage::project_of(&env, &token).is_some() {
            return Err(Error::TokenAlreadyInUse);
        }
        if ProjectTokenClient::new(&env, &token).owner() != env.current_contract_address() {
            return Err(Error::TokenNotOwnedByStore);
        }

        storage::attach_token(&env, project_id, &token);

        env.events().publish(
            (Symbol::new(&env, "issue"), project_id),
            IssueEvent {
                project_id,
                token,
                caller,
            },
        );

        Ok(())
    }

    /// Mint project tokens to a holder
    ///
    /// Mints claimed tokens when the holder prefers them and the project has
    /// a token; otherwise credits the unclaimed ledger.
    ///
    /// # Errors
    /// - `ControllerUnauthorized`: Caller is not the project's controller
    /// - `InvalidAmount`: Amount <= 0
    pub fn mint_for(
        env: Env,
        caller: Address,
        holder: Address,
        project_id: u64,
        amount: i128,
        prefer_claimed_tokens: bool,
    ) -> Result<(), Error> {
        caller.require_auth();
        Self::require_controller(&env, &caller, project_id)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let token = storage::token_of(&env, project_id);
        let claimed = prefer_claimed_tokens && token.is_some();

        match token {
            Some(token) if claimed => {
                ProjectTokenClient::new(&env, &token).mint(&holder, &amount);
            }
            _ => {
                let balance = storage::unclaimed_balance_of(&env, &holder, project_id)
                    .checked_add(amount)
                    .ok_or(Error::Overflow)?;
                let supply = storage::unclaimed_total_supply_of(&env, project_id)
                    .checked_add(amount)
                    .ok_or(Error::Overflow)?;
                storage::set_unclaimed_balance_of(&env, &holder, project_id, balance);
                storage::set_unclaimed_total_supply_of(&env, project_id, supply);
            }
        }

        env.events().publish(
            (Symbol::new(&env, "mint"), project_id, holder.clone()),
            MintEvent {
                holder,
                project_id,
                amount,
                claimed,
                caller,
            },
        );

        Ok(())
    }

    /// Burn a holder's project tokens
    ///
    /// Burns from the preferred pool first and spills the remainder into the
    /// other pool.
    ///
    /// # Errors
    /// - `ControllerUnauthorized`: Caller is not the project's controller
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientFunds`: Amount exceeds claimed plus unclaimed balance
    pub fn burn_from(
        env: Env,
        caller: Address,
        holder: Address,
        project_id: u64,
        amount: i128,
        prefer_claimed_tokens: bool,
    ) -> Result<(), Error> {
        caller.require_auth();
        Self::require_controller(&env, &caller, project_id)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let token = storage::token_of(&env, project_id);
        let claimed_balance = token
            .as_ref()
            .map(|token| ProjectTokenClient::new(&env, token).balance(&holder))
            .unwrap_or(0);
        let unclaimed_balance = storage::unclaimed_balance_of(&env, &holder, project_id);

        let available = claimed_balance
            .checked_add(unclaimed_balance)
            .ok_or(Error::Overflow)?;
        if amount > available {
            return Err(Error::InsufficientFunds);
        }

        let (claimed_burned, unclaimed_burned) = if prefer_claimed_tokens {
            let claimed_burned = amount.min(claimed_balance);
            (claimed_burned, amount - claimed_burned)
        } else {
            let unclaimed_burned = amount.min(unclaimed_balance);
            (amount - unclaimed_burned, unclaimed_burned)
        };

        log!(
            &env,
            "burn split: project {}, claimed {}, unclaimed {}",
            project_id,
            claimed_burned,
            unclaimed_burned
        );

        if unclaimed_burned > 0 {
            storage::set_unclaimed_balance_of(
                &env,
                &holder,
                project_id,
                unclaimed_balance - unclaimed_burned,
            );
            storage::set_unclaimed_total_supply_of(
                &env,
                project_id,
                storage::unclaimed_total_supply_of(&env, project_id) - unclaimed_burned,
            );
        }

        if claimed_burned > 0 {
            if let Some(token) = token {
                ProjectTokenClient::new(&env, &token).burn(&holder, &claimed_burned);
            }
        }

        env.events().publish(
            (Symbol::new(&env, "burn"), project_id, holder.clone()),
            BurnEvent {
                holder,
                project_id,
                amount,
                claimed_balance_burned: claimed_burned,
                unclaimed_balance_burned: unclaimed_burned,
                prefer_claimed_tokens,
                caller,
            },
        );

        Ok(())
    }

    // ============================================
    // HOLDER OPERATIONS
    // ============================================

    /// Convert unclaimed balance into tokens of the project's token contract
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is not the holder, a `CLAIM` operator, or the controller
    /// - `TokenNotFound`: Project has no token yet
    /// - `InsufficientFunds`: Amount exceeds the unclaimed balance
    pub fn claim_for(
        env: Env,
        caller: Address,
        holder: Address,
        project_id: u64,
        amount: i128,
    ) -> Result<(), Error> {
        caller.require_auth();

        let is_controller = Self::controller_of(&env, project_id)?
            .map(|controller| controller == caller)
            .unwrap_or(false);
        Self::require_holder_permission(&env, &caller, &holder, project_id, permissions::CLAIM, is_controller)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let token = storage::token_of(&env, project_id).ok_or(Error::TokenNotFound)?;

        let unclaimed_balance = storage::unclaimed_balance_of(&env, &holder, project_id);
        if amount > unclaimed_balance {
            return Err(Error::InsufficientFunds);
        }

        storage::set_unclaimed_balance_of(&env, &holder, project_id, unclaimed_balance - amount);
        storage::set_unclaimed_total_supply_of(
            &env,
            project_id,
            storage::unclaimed_total_supply_of(&env, project_id) - amount,
        );

        ProjectTokenClient::new(&env, &token).mint(&holder, &amount);

        env.events().publish(
            (Symbol::new(&env, "claim"), project_id, holder.clone()),
            ClaimEvent {
                holder,
                project_id,
                unclaimed_balance,
                amount,
                caller,
            },
        );

        Ok(())
    }

    /// Move unclaimed balance to another holder
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is not the holder or a `TRANSFER` operator
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientFunds`: Amount exceeds the unclaimed balance
    pub fn transfer_from(
        env: Env,
        caller: Address,
        holder: Address,
        project_id: u64,
        recipient: Address,
        amount: i128,
    ) -> Result<(), Error> {
        caller.require_auth();
        Self::require_holder_permission(&env, &caller, &holder, project_id, permissions::TRANSFER, false)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let holder_balance = storage::unclaimed_balance_of(&env, &holder, project_id);
        if amount > holder_balance {
            return Err(Error::InsufficientFunds);
        }

        if holder != recipient {
            let recipient_balance = storage::unclaimed_balance_of(&env, &recipient, project_id)
                .checked_add(amount)
                .ok_or(Error::Overflow)?;
            storage::set_unclaimed_balance_of(&env, &holder, project_id, holder_balance - amount);
            storage::set_unclaimed_balance_of(&env, &recipient, project_id, recipient_balance);
        }

        env.events().publish(
            (Symbol::new(&env, "transfer"), project_id, holder.clone()),
            TransferEvent {
                holder,
                project_id,
                recipient,
                amount,
                caller,
            },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Claimed plus unclaimed balance.
    pub fn balance_of(env: Env, holder: Address, project_id: u64) -> i128 {
        let claimed = storage::token_of(&env, project_id)
            .map(|token| ProjectTokenClient::new(&env, &token).balance(&holder))
            .unwrap_or(0);
        claimed + storage::unclaimed_balance_of(&env, &holder, project_id)
    }

    pub fn unclaimed_balance_of(env: Env, holder: Address, project_id: u64) -> i128 {
        storage::unclaimed_balance_of(&env, &holder, project_id)
    }

    pub fn unclaimed_total_supply_of(env: Env, project_id: u64) -> i128 {
        storage::unclaimed_total_supply_of(&env, project_id)
    }

    /// Unclaimed supply plus the token contract's supply.
    pub fn total_supply_of(env: Env, project_id: u64) -> i128 {
        let claimed = storage::token_of(&env, project_id)
            .map(|token| ProjectTokenClient::new(&env, &token).total_supply())
            .unwrap_or(0);
        claimed + storage::unclaimed_total_supply_of(&env, project_id)
    }

    pub fn token_of(env: Env, project_id: u64) -> Option<Address> {
        storage::token_of(&env, project_id)
    }

    pub fn project_of(env: Env, token: Address) -> Option<u64> {
        storage::project_of(&env, &token)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn controller_of(env: &Env, project_id: u64) -> Result<Option<Address>, Error> {
        let directory: Address = env
            .storage()
            .instance()
            .get(&DataKey::Directory)
            .ok_or(Error::NotInitialized)?;
        Ok(DirectoryClient::new(env, &directory).controller_of(&project_id))
    }

    fn require_controller(env: &Env, caller: &Address, project_id: u64) -> Result<(), Error> {
        match Self::controller_of(env, project_id)? {
            Some(controller) if controller == *caller => Ok(()),
            _ => Err(Error::ControllerUnauthorized),
        }
    }

    fn require_holder_permission(
        env: &Env,
        caller: &Address,
        holder: &Address,
        project_id: u64,
        permission_index: u32,
        allow_override: bool,
    ) -> Result<(), Error> {
        let operator_store: Address = env
            .storage()
            .instance()
            .get(&DataKey::OperatorStore)
            .ok_or(Error::NotInitialized)?;

        if !check_permission(
            env,
            &operator_store,
            caller,
            holder,
            project_id,
            permission_index,
            allow_override,
        ) {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }
}
