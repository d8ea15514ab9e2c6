//! Payment Terminal.
//!
//! Entry point through which a project receives one token: takes the
//! funds in, has the terminal store record them, mints through the
//! project's controller, and forwards the delegated share to each delegate
//! before notifying it. Redemptions run the same pipeline in reverse.

#![no_std]

mod error;
mod events;
mod storage;

#[cfg(test)]
mod test;

use error::Error;
use events::{
    AddToBalanceEvent, DelegateDidPayEvent, DelegateDidRedeemEvent, PayEvent, RedeemTokensEvent,
};
use storage::{DataKey, TerminalConfig};

use soroban_sdk::{contract, contractimpl, log, token, Address, Bytes, Env, String, Symbol, Vec};
use treasury_shared::{
    constants::{CURRENCY_NATIVE, NATIVE_DECIMALS},
    interfaces::{
        ControllerClient, DirectoryClient, PayDelegateClient, RedemptionDelegateClient,
        TerminalStoreClient,
    },
    permissions::{self, check_permission},
    DidPayData, DidRedeemData, PayDelegateAllocation, RedemptionDelegateAllocation, TokenAmount,
};

#[contract]
pub struct PaymentTerminal;

#[contractimpl]
impl PaymentTerminal {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Bind the terminal to its token and collaborators, and register its
    /// accounting context with the terminal store
    ///
    /// A native terminal always accounts with 18 decimals in the native
    /// currency, whatever `decimals` and `currency` say.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        native: bool,
        decimals: u32,
        currency: u32,
        base_weight_currency: u32,
        directory: Address,
        operator_store: Address,
        terminal_store: Address,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        let (decimals, currency) = if native {
            (NATIVE_DECIMALS, CURRENCY_NATIVE)
        } else {
            (decimals, currency)
        };

        env.storage().instance().set(&DataKey::Initialized, &true);
        storage::set_config(
            &env,
            &TerminalConfig {
                admin,
                token: token.clone(),
                native,
                decimals,
                currency,
                base_weight_currency,
                directory,
                operator_store,
                terminal_store: terminal_store.clone(),
            },
        );
        storage::bump_instance(&env);

        TerminalStoreClient::new(&env, &terminal_store).set_accounting_context(
            &env.current_contract_address(),
            &token,
            &decimals,
            &currency,
        );

        Ok(())
    }

    // ============================================
    // PAYMENTS
    // ============================================

    /// Pay a project
    ///
    /// On a native terminal the paid value is `attached` and `amount` is
    /// ignored. Otherwise `amount` is pulled from the caller and nothing
    /// may be attached. Either way the credited value is what the terminal
    /// actually received.
    ///
    /// # Returns
    /// Project tokens credited to the beneficiary
    ///
    /// # Errors
    /// - `PayToZeroAddress`: No beneficiary
    /// - `ReentrantCall`: A terminal entry point is already running
    /// - `TokenNotAccepted`: `token` is not this terminal's token
    /// - `ProjectTerminalMismatch`: Terminal not registered for the project
    /// - `NoAttachedValue` / `NoMsgValueAllowed`: Attached value does not fit the terminal
    /// - `InadequateTokenCount`: Fewer tokens than `min_returned_tokens`
    pub fn pay(
        env: Env,
        caller: Address,
        project_id: u64,
        amount: i128,
        token: Address,
        beneficiary: Option<Address>,
        min_returned_tokens: i128,
        prefer_claimed_tokens: bool,
        memo: String,
        metadata: Bytes,
        attached: i128,
    ) -> Result<i128, Error> {
        caller.require_auth();
        let beneficiary = beneficiary.ok_or(Error::PayToZeroAddress)?;
        storage::lock(&env)?;

        let config = storage::config(&env)?;
        if token != config.token {
            return Err(Error::TokenNotAccepted);
        }
        Self::require_terminal_of(&env, &config, project_id)?;

        let received = Self::accept_funds(&env, &config, &caller, amount, attached)?;
        let amount = TokenAmount {
            token: config.token.clone(),
            value: received,
            decimals: config.decimals,
            currency: config.currency,
        };

        let this = env.current_contract_address();
        let record = TerminalStoreClient::new(&env, &config.terminal_store).record_payment_from(
            &this,
            &caller,
            &amount,
            &project_id,
            &config.base_weight_currency,
            &beneficiary,
            &memo,
            &metadata,
        );

        let mut beneficiary_token_count = 0;
        if record.token_count > 0 {
            beneficiary_token_count = Self::controller(&env, &config, project_id)?.mint_tokens_of(
                &this,
                &project_id,
                &record.token_count,
                &beneficiary,
                &String::from_str(&env, ""),
                &prefer_claimed_tokens,
                &true,
            );
        }

        if beneficiary_token_count < min_returned_tokens {
            return Err(Error::InadequateTokenCount);
        }

        if !record.delegate_allocations.is_empty() {
            let data = DidPayData {
                payer: caller.clone(),
                project_id,
                funding_cycle_configuration: record.funding_cycle.configuration,
                amount: amount.clone(),
                forwarded_amount: TokenAmount {
                    value: 0,
                    ..amount.clone()
                },
                project_token_count: beneficiary_token_count,
                beneficiary: beneficiary.clone(),
                prefer_claimed_tokens,
                memo: record.memo.clone(),
                metadata: metadata.clone(),
            };
            Self::fulfill_pay_delegates(&env, &config, record.delegate_allocations, data, &caller);
        }

        env.events().publish(
            (Symbol::new(&env, "pay"), project_id),
            PayEvent {
                funding_cycle_configuration: record.funding_cycle.configuration,
                funding_cycle_number: record.funding_cycle.number,
                project_id,
                payer: caller.clone(),
                beneficiary,
                amount: amount.value,
                beneficiary_token_count,
                memo: record.memo,
                metadata,
                caller,
            },
        );

        storage::unlock(&env);
        Ok(beneficiary_token_count)
    }

    /// Add funds to a project's balance without minting
    ///
    /// # Errors
    /// - `ReentrantCall`: A terminal entry point is already running
    /// - `TokenNotAccepted`: `token` is not this terminal's token
    /// - `ProjectTerminalMismatch`: Terminal not registered for the project
    /// - `NoAttachedValue` / `NoMsgValueAllowed`: Attached value does not fit the terminal
    pub fn add_to_balance_of(
        env: Env,
        caller: Address,
        project_id: u64,
        amount: i128,
        token: Address,
        memo: String,
        metadata: Bytes,
        attached: i128,
    ) -> Result<(), Error> {
        caller.require_auth();
        storage::lock(&env)?;

        let config = storage::config(&env)?;
        if token != config.token {
            return Err(Error::TokenNotAccepted);
        }
        Self::require_terminal_of(&env, &config, project_id)?;

        let received = Self::accept_funds(&env, &config, &caller, amount, attached)?;

        TerminalStoreClient::new(&env, &config.terminal_store).record_added_balance_for(
            &env.current_contract_address(),
            &project_id,
            &TokenAmount {
                token: config.token.clone(),
                value: received,
                decimals: config.decimals,
                currency: config.currency,
            },
        );

        env.events().publish(
            (Symbol::new(&env, "add_to_balance"), project_id),
            AddToBalanceEvent {
                project_id,
                amount: received,
                memo,
                metadata,
                caller,
            },
        );

        storage::unlock(&env);
        Ok(())
    }

    // ============================================
    // REDEMPTIONS
    // ============================================

    /// Burn a holder's tokens and send the reclaimed share of overflow to
    /// `beneficiary`
    ///
    /// # Returns
    /// Amount sent to the beneficiary
    ///
    /// # Errors
    /// - `ReentrantCall`: A terminal entry point is already running
    /// - `Unauthorized`: Caller is not the holder or a `REDEEM` operator
    /// - `RedeemToZeroAddress`: No beneficiary
    /// - `ProjectTerminalMismatch`: Terminal not registered for the project
    /// - `InadequateReclaimAmount`: Less than `min_returned_tokens` reclaimed
    pub fn redeem_tokens_of(
        env: Env,
        caller: Address,
        holder: Address,
        project_id: u64,
        token_count: i128,
        min_returned_tokens: i128,
        beneficiary: Option<Address>,
        memo: String,
        metadata: Bytes,
    ) -> Result<i128, Error> {
        caller.require_auth();
        storage::lock(&env)?;

        let config = storage::config(&env)?;
        if !check_permission(
            &env,
            &config.operator_store,
            &caller,
            &holder,
            project_id,
            permissions::REDEEM,
            false,
        ) {
            return Err(Error::Unauthorized);
        }
        let beneficiary = beneficiary.ok_or(Error::RedeemToZeroAddress)?;
        Self::require_terminal_of(&env, &config, project_id)?;

        let this = env.current_contract_address();
        let record = TerminalStoreClient::new(&env, &config.terminal_store).record_redemption_for(
            &this,
            &holder,
            &project_id,
            &token_count,
            &memo,
            &metadata,
        );

        if record.reclaim_amount < min_returned_tokens {
            return Err(Error::InadequateReclaimAmount);
        }

        if token_count > 0 {
            Self::controller(&env, &config, project_id)?.burn_tokens_of(
                &this,
                &holder,
                &project_id,
                &token_count,
                &String::from_str(&env, ""),
                &false,
            );
        }

        let reclaimed = TokenAmount {
            token: config.token.clone(),
            value: record.reclaim_amount,
            decimals: config.decimals,
            currency: config.currency,
        };

        if !record.delegate_allocations.is_empty() {
            let data = DidRedeemData {
                holder: holder.clone(),
                project_id,
                funding_cycle_configuration: record.funding_cycle.configuration,
                project_token_count: token_count,
                reclaimed_amount: reclaimed.clone(),
                forwarded_amount: TokenAmount {
                    value: 0,
                    ..reclaimed.clone()
                },
                beneficiary: beneficiary.clone(),
                memo: record.memo.clone(),
                metadata: metadata.clone(),
            };
            Self::fulfill_redemption_delegates(
                &env,
                &config,
                record.delegate_allocations,
                data,
                &caller,
            );
        }

        if record.reclaim_amount > 0 {
            token::Client::new(&env, &config.token).transfer(
                &this,
                &beneficiary,
                &record.reclaim_amount,
            );
        }

        env.events().publish(
            (Symbol::new(&env, "redeem_tokens"), project_id, holder.clone()),
            RedeemTokensEvent {
                funding_cycle_configuration: record.funding_cycle.configuration,
                funding_cycle_number: record.funding_cycle.number,
                project_id,
                holder,
                beneficiary,
                token_count,
                reclaimed_amount: record.reclaim_amount,
                memo: record.memo,
                metadata,
                caller,
            },
        );

        storage::unlock(&env);
        Ok(record.reclaim_amount)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn token(env: Env) -> Result<Address, Error> {
        Ok(storage::config(&env)?.token)
    }

    pub fn accepts_token(env: Env, token: Address, _project_id: u64) -> bool {
        storage::config(&env)
            .map(|config| config.token == token)
            .unwrap_or(false)
    }

    pub fn decimals_for_token(env: Env, token: Address) -> Result<u32, Error> {
        let config = storage::config(&env)?;
        if token != config.token {
            return Err(Error::TokenNotAccepted);
        }
        Ok(config.decimals)
    }

    pub fn currency_for_token(env: Env, token: Address) -> Result<u32, Error> {
        let config = storage::config(&env)?;
        if token != config.token {
            return Err(Error::TokenNotAccepted);
        }
        Ok(config.currency)
    }

    /// Overflow in this terminal's accounting decimals and currency.
    pub fn current_overflow_of(env: Env, project_id: u64) -> Result<i128, Error> {
        let config = storage::config(&env)?;
        Ok(
            TerminalStoreClient::new(&env, &config.terminal_store).current_overflow_of(
                &env.current_contract_address(),
                &project_id,
                &config.decimals,
                &config.currency,
            ),
        )
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn require_terminal_of(env: &Env, config: &TerminalConfig, project_id: u64) -> Result<(), Error> {
        let is_terminal = DirectoryClient::new(env, &config.directory)
            .is_terminal_of(&project_id, &env.current_contract_address());
        if !is_terminal {
            return Err(Error::ProjectTerminalMismatch);
        }
        Ok(())
    }

    fn controller<'a>(
        env: &'a Env,
        config: &TerminalConfig,
        project_id: u64,
    ) -> Result<ControllerClient<'a>, Error> {
        let controller = DirectoryClient::new(env, &config.directory)
            .controller_of(&project_id)
            .ok_or(Error::ControllerNotFound)?;
        Ok(ControllerClient::new(env, &controller))
    }

    /// Pull the paid value from `caller` and return what actually arrived.
    fn accept_funds(
        env: &Env,
        config: &TerminalConfig,
        caller: &Address,
        amount: i128,
        attached: i128,
    ) -> Result<i128, Error> {
        let value = if config.native {
            if attached <= 0 {
                return Err(Error::NoAttachedValue);
            }
            attached
        } else {
            if attached != 0 {
                return Err(Error::NoMsgValueAllowed);
            }
            if amount < 0 {
                return Err(Error::InvalidAmount);
            }
            amount
        };

        if value == 0 {
            return Ok(0);
        }

        let token = token::Client::new(env, &config.token);
        let this = env.current_contract_address();
        let before = token.balance(&this);
        token.transfer(caller, &this, &value);
        token
            .balance(&this)
            .checked_sub(before)
            .ok_or(Error::Overflow)
    }

    fn fulfill_pay_delegates(
        env: &Env,
        config: &TerminalConfig,
        allocations: Vec<PayDelegateAllocation>,
        data: DidPayData,
        caller: &Address,
    ) {
        let token = token::Client::new(env, &config.token);
        let this = env.current_contract_address();

        for allocation in allocations.iter() {
            if allocation.amount > 0 {
                token.transfer(&this, &allocation.delegate, &allocation.amount);
            }

            let mut delegate_data = data.clone();
            delegate_data.forwarded_amount.value = allocation.amount;
            PayDelegateClient::new(env, &allocation.delegate).did_pay(&delegate_data);

            log!(
                env,
                "delegate paid: project {}, forwarded {}",
                data.project_id,
                allocation.amount
            );

            env.events().publish(
                (
                    Symbol::new(env, "delegate_did_pay"),
                    data.project_id,
                    allocation.delegate.clone(),
                ),
                DelegateDidPayEvent {
                    delegate: allocation.delegate,
                    data: delegate_data,
                    delegated_amount: allocation.amount,
                    caller: caller.clone(),
                },
            );
        }
    }

    fn fulfill_redemption_delegates(
        env: &Env,
        config: &TerminalConfig,
        allocations: Vec<RedemptionDelegateAllocation>,
        data: DidRedeemData,
        caller: &Address,
    ) {
        let token = token::Client::new(env, &config.token);
        let this = env.current_contract_address();

        for allocation in allocations.iter() {
            if allocation.amount > 0 {
                token.transfer(&this, &allocation.delegate, &allocation.amount);
            }

            let mut delegate_data = data.clone();
            delegate_data.forwarded_amount.value = allocation.amount;
            RedemptionDelegateClient::new(env, &allocation.delegate).did_redeem(&delegate_data);

            env.events().publish(
                (
                    Symbol::new(env, "delegate_did_redeem"),
                    data.project_id,
                    allocation.delegate.clone(),
                ),
                DelegateDidRedeemEvent {
                    delegate: allocation.delegate,
                    data: delegate_data,
                    delegated_amount: allocation.amount,
                    caller: caller.clone(),
                },
            );
        }
    }
}
