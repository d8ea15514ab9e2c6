//! Controller.
//!
//! Mints and burns a project's tokens on behalf of its owner, its operators
//! and its terminals, holding back the reserved share of every mint until
//! it is distributed. Also keeps the per-terminal distribution limits the
//! terminal store derives overflow from.

#![no_std]

mod error;
mod events;
mod storage;

use error::Error;
use events::{
    BurnTokensEvent, DistributeReservedTokensEvent, MintTokensEvent, SetDistributionLimitEvent,
};
use storage::DataKey;

use soroban_sdk::{contract, contractimpl, log, Address, Env, String, Symbol};
use treasury_shared::{
    fixed_point::reserved_split,
    interfaces::{DirectoryClient, FundingCycleStoreClient, ProjectsClient, TokenStoreClient},
    permissions::{self, check_permission},
    DistributionLimit, FundingCycle, FundingCycleMetadata,
};

#[contract]
pub struct Controller;

#[contractimpl]
impl Controller {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Initialize the controller
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(
        env: Env,
        projects: Address,
        directory: Address,
        token_store: Address,
        funding_cycle_store: Address,
        operator_store: Address,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        let instance = env.storage().instance();
        instance.set(&DataKey::Initialized, &true);
        instance.set(&DataKey::Projects, &projects);
        instance.set(&DataKey::Directory, &directory);
        instance.set(&DataKey::TokenStore, &token_store);
        instance.set(&DataKey::FundingCycleStore, &funding_cycle_store);
        instance.set(&DataKey::OperatorStore, &operator_store);
        storage::bump_instance(&env);

        Ok(())
    }

    // ============================================
    // MINT / BURN
    // ============================================

    /// Mint project tokens, setting aside the reserved share
    ///
    /// Terminals mint as part of a payment. Anyone else needs the `MINT`
    /// permission and a cycle that allows minting.
    ///
    /// # Returns
    /// Tokens credited to the beneficiary after the reserved split
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is not the owner, a `MINT` operator, or a terminal
    /// - `ZeroTokensToMint`: Token count <= 0
    /// - `MintNotAllowed`: Current cycle disallows minting outside payments
    pub fn mint_tokens_of(
        env: Env,
        caller: Address,
        project_id: u64,
        token_count: i128,
        beneficiary: Address,
        memo: String,
        prefer_claimed_tokens: bool,
        use_reserved_rate: bool,
    ) -> Result<i128, Error> {
        caller.require_auth();

        let is_terminal = Self::is_terminal(&env, project_id, &caller)?;
        let owner = Self::owner_of(&env, project_id)?;
        Self::require_permission(&env, &caller, &owner, project_id, permissions::MINT, is_terminal)?;

        if token_count <= 0 {
            return Err(Error::ZeroTokensToMint);
        }

        let (_, metadata) = Self::current_cycle(&env, project_id)?;
        if !is_terminal && !metadata.allow_minting {
            return Err(Error::MintNotAllowed);
        }

        let reserved_rate = if use_reserved_rate {
            metadata.reserved_rate
        } else {
            0
        };
        let (beneficiary_token_count, reserved) = reserved_split(&env, token_count, reserved_rate);

        if reserved > 0 {
            let pending = storage::pending_reserved_of(&env, project_id)
                .checked_add(reserved)
                .ok_or(Error::Overflow)?;
            storage::set_pending_reserved_of(&env, project_id, pending);
        }

        if beneficiary_token_count > 0 {
            Self::token_store(&env)?.mint_for(
                &env.current_contract_address(),
                &beneficiary,
                &project_id,
                &beneficiary_token_count,
                &prefer_claimed_tokens,
            );
        }

        log!(
            &env,
            "mint: project {}, beneficiary {}, reserved {}",
            project_id,
            beneficiary_token_count,
            reserved
        );

        env.events().publish(
            (Symbol::new(&env, "mint_tokens"), project_id),
            MintTokensEvent {
                beneficiary,
                project_id,
                token_count,
                beneficiary_token_count,
                memo,
                reserved_rate,
                caller,
            },
        );

        Ok(beneficiary_token_count)
    }

    /// Burn a holder's project tokens
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is not the holder, a `BURN` operator, or a terminal
    /// - `ZeroTokensToBurn`: Token count <= 0
    /// - `BurnPaused`: Current cycle pauses burning outside redemptions
    pub fn burn_tokens_of(
        env: Env,
        caller: Address,
        holder: Address,
        project_id: u64,
        token_count: i128,
        memo: String,
        prefer_claimed_tokens: bool,
    ) -> Result<(), Error> {
        caller.require_auth();

        let is_terminal = Self::is_terminal(&env, project_id, &caller)?;
        Self::require_permission(&env, &caller, &holder, project_id, permissions::BURN, is_terminal)?;

        if token_count <= 0 {
            return Err(Error::ZeroTokensToBurn);
        }

        let (_, metadata) = Self::current_cycle(&env, project_id)?;
        if !is_terminal && metadata.pause_burn {
            return Err(Error::BurnPaused);
        }

        Self::token_store(&env)?.burn_from(
            &env.current_contract_address(),
            &holder,
            &project_id,
            &token_count,
            &prefer_claimed_tokens,
        );

        env.events().publish(
            (Symbol::new(&env, "burn_tokens"), project_id),
            BurnTokensEvent {
                holder,
                project_id,
                token_count,
                memo,
                caller,
            },
        );

        Ok(())
    }

    /// Mint the pending reserved tokens to the project owner
    ///
    /// # Returns
    /// Number of tokens distributed
    pub fn distribute_reserved_tokens_of(env: Env, project_id: u64, memo: String) -> Result<i128, Error> {
        let token_count = storage::pending_reserved_of(&env, project_id);
        if token_count == 0 {
            return Ok(0);
        }

        let (cycle, _) = Self::current_cycle(&env, project_id)?;
        let owner = Self::owner_of(&env, project_id)?;

        storage::set_pending_reserved_of(&env, project_id, 0);

        Self::token_store(&env)?.mint_for(
            &env.current_contract_address(),
            &owner,
            &project_id,
            &token_count,
            &false,
        );

        env.events().publish(
            (Symbol::new(&env, "distribute_reserved"), project_id),
            DistributeReservedTokensEvent {
                funding_cycle_configuration: cycle.configuration,
                funding_cycle_number: cycle.number,
                project_id,
                beneficiary: owner,
                token_count,
                memo,
            },
        );

        Ok(token_count)
    }

    /// Attach a token contract to a project through the token store
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is not the owner or an `ISSUE` operator
    pub fn issue_token_for(env: Env, caller: Address, project_id: u64, token: Address) -> Result<(), Error> {
        caller.require_auth();

        let owner = Self::owner_of(&env, project_id)?;
        Self::require_permission(&env, &caller, &owner, project_id, permissions::ISSUE, false)?;

        Self::token_store(&env)?.issue_for(&env.current_contract_address(), &project_id, &token);

        Ok(())
    }

    // ============================================
    // FUND ACCESS CONSTRAINTS
    // ============================================

    /// Cap what a terminal may distribute of `token` under a configuration.
    /// Anything above the cap is overflow.
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is not the owner or a `SET_FUND_ACCESS_CONSTRAINTS` operator
    /// - `InvalidDistributionLimit`: Limit < 0
    pub fn set_distribution_limit_of(
        env: Env,
        caller: Address,
        project_id: u64,
        configuration: u64,
        terminal: Address,
        token: Address,
        limit: i128,
        currency: u32,
    ) -> Result<(), Error> {
        caller.require_auth();

        let owner = Self::owner_of(&env, project_id)?;
        Self::require_permission(
            &env,
            &caller,
            &owner,
            project_id,
            permissions::SET_FUND_ACCESS_CONSTRAINTS,
            false,
        )?;

        if limit < 0 {
            return Err(Error::InvalidDistributionLimit);
        }

        storage::set_distribution_limit_of(
            &env,
            project_id,
            configuration,
            &terminal,
            &token,
            &DistributionLimit {
                amount: limit,
                currency,
            },
        );

        env.events().publish(
            (Symbol::new(&env, "set_distribution_limit"), project_id),
            SetDistributionLimitEvent {
                project_id,
                configuration,
                terminal,
                token,
                amount: limit,
                currency,
                caller,
            },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// A zero amount when none was set.
    pub fn distribution_limit_of(
        env: Env,
        project_id: u64,
        configuration: u64,
        terminal: Address,
        token: Address,
    ) -> DistributionLimit {
        storage::distribution_limit_of(&env, project_id, configuration, &terminal, &token).unwrap_or(
            DistributionLimit {
                amount: 0,
                currency: 0,
            },
        )
    }

    pub fn reserved_token_balance_of(env: Env, project_id: u64) -> i128 {
        storage::pending_reserved_of(&env, project_id)
    }

    /// Ledger supply plus reserved tokens not yet distributed.
    pub fn total_outstanding_tokens_of(env: Env, project_id: u64) -> Result<i128, Error> {
        let supply = Self::token_store(&env)?.total_supply_of(&project_id);
        supply
            .checked_add(storage::pending_reserved_of(&env, project_id))
            .ok_or(Error::Overflow)
    }

    pub fn current_funding_cycle_of(
        env: Env,
        project_id: u64,
    ) -> Result<(FundingCycle, FundingCycleMetadata), Error> {
        Self::current_cycle(&env, project_id)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn token_store(env: &Env) -> Result<TokenStoreClient<'_>, Error> {
        let address = storage::address(env, &DataKey::TokenStore).ok_or(Error::NotInitialized)?;
        Ok(TokenStoreClient::new(env, &address))
    }

    fn owner_of(env: &Env, project_id: u64) -> Result<Address, Error> {
        let projects = storage::address(env, &DataKey::Projects).ok_or(Error::NotInitialized)?;
        Ok(ProjectsClient::new(env, &projects).owner_of(&project_id))
    }

    fn is_terminal(env: &Env, project_id: u64, caller: &Address) -> Result<bool, Error> {
        let directory = storage::address(env, &DataKey::Directory).ok_or(Error::NotInitialized)?;
        Ok(DirectoryClient::new(env, &directory).is_terminal_of(&project_id, caller))
    }

    fn current_cycle(env: &Env, project_id: u64) -> Result<(FundingCycle, FundingCycleMetadata), Error> {
        let store =
            storage::address(env, &DataKey::FundingCycleStore).ok_or(Error::NotInitialized)?;
        let cycle = FundingCycleStoreClient::new(env, &store).current_of(&project_id);
        let metadata = FundingCycleMetadata::from_cycle(&cycle);
        Ok((cycle, metadata))
    }

    fn require_permission(
        env: &Env,
        caller: &Address,
        account: &Address,
        project_id: u64,
        permission_index: u32,
        allow_override: bool,
    ) -> Result<(), Error> {
        let operator_store =
            storage::address(env, &DataKey::OperatorStore).ok_or(Error::NotInitialized)?;
        if !check_permission(
            env,
            &operator_store,
            caller,
            account,
            project_id,
            permission_index,
            allow_override,
        ) {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }
}
