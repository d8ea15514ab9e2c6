//! Project Payer.
//!
//! Forwards funds to a project's primary terminal for one token. Holds a
//! set of default values so that a bare `receive` pays (or tops up) a
//! preconfigured project.

#![no_std]

mod error;
mod events;
mod storage;


use error::Error;
use events::{OwnershipTransferredEvent, SetDefaultValuesEvent};
use storage::{DataKey, DefaultValues, PayerConfig};

use soroban_sdk::{
    auth::{ContractContext, InvokerContractAuthEntry, SubContractInvocation},
    contract, contractimpl, log, token, vec, Address, Bytes, Env, IntoVal, String, Symbol,
};
use treasury_shared::{
    constants::NATIVE_DECIMALS,
    interfaces::{DirectoryClient, PaymentTerminalClient},
    PaymentOptions,
};

#[contract]
pub struct ProjectPayer;

#[contractimpl]
impl ProjectPayer {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(
        env: Env,
        owner: Address,
        directory: Address,
        native_token: Address,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        owner.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        storage::set_config(
            &env,
            &PayerConfig {
                owner,
                directory,
                native_token,
            },
        );
        storage::bump_instance(&env);

        Ok(())
    }

    // ============================================
    // OWNER FUNCTIONS
    // ============================================

    /// Set what `receive` pays with
    pub fn set_default_values(
        env: Env,
        project_id: u64,
        beneficiary: Option<Address>,
        prefer_claimed_tokens: bool,
        memo: String,
        metadata: Bytes,
        prefer_add_to_balance: bool,
    ) -> Result<(), Error> {
        let config = storage::config(&env)?;
        config.owner.require_auth();

        storage::set_defaults(
            &env,
            &DefaultValues {
                project_id,
                beneficiary: beneficiary.clone(),
                prefer_claimed_tokens,
                memo: memo.clone(),
                metadata: metadata.clone(),
                prefer_add_to_balance,
            },
        );
        storage::bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "set_default_values"), project_id),
            SetDefaultValuesEvent {
                project_id,
                beneficiary,
                prefer_claimed_tokens,
                memo,
                metadata,
                prefer_add_to_balance,
                caller: config.owner,
            },
        );

        Ok(())
    }

    pub fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), Error> {
        let mut config = storage::config(&env)?;
        config.owner.require_auth();

        let previous_owner = config.owner.clone();
        config.owner = new_owner.clone();
        storage::set_config(&env, &config);

        env.events().publish(
            (Symbol::new(&env, "ownership_transferred"),),
            OwnershipTransferredEvent {
                previous_owner,
                new_owner,
            },
        );

        Ok(())
    }

    // ============================================
    // FORWARDING
    // ============================================

    /// Pay `project_id` through its primary terminal for `token`
    ///
    /// For the native token the paid value is `attached` with 18 decimals,
    /// whatever `amount` and `decimals` say. The beneficiary defaults to
    /// the caller.
    ///
    /// # Returns
    /// Project tokens credited to the beneficiary
    ///
    /// # Errors
    /// - `NoMsgValueAllowed`: Value attached to a non-native payment
    /// - `TerminalNotFound`: Project has no terminal for `token`
    /// - `IncorrectDecimalAmount`: `decimals` differ from the terminal's
    pub fn pay(
        env: Env,
        caller: Address,
        project_id: u64,
        token: Address,
        amount: i128,
        decimals: u32,
        options: PaymentOptions,
        attached: i128,
    ) -> Result<i128, Error> {
        caller.require_auth();

        let config = storage::config(&env)?;
        let native = token == config.native_token;
        let decimals = if native { NATIVE_DECIMALS } else { decimals };

        let terminal = Self::terminal_of(&env, &config, project_id, &token)?;
        if terminal.decimals_for_token(&token) != decimals {
            return Err(Error::IncorrectDecimalAmount);
        }

        let received = Self::take_funds(&env, &config, &caller, &token, amount, attached)?;
        let options = PaymentOptions {
            beneficiary: Some(options.beneficiary.unwrap_or(caller)),
            ..options
        };

        Ok(Self::forward_pay(
            &env, &terminal, &token, native, project_id, received, options,
        ))
    }

    /// Add to `project_id`'s balance through its primary terminal for
    /// `token`, without minting
    ///
    /// # Errors
    /// - `NoMsgValueAllowed`: Value attached to a non-native payment
    /// - `TerminalNotFound`: Project has no terminal for `token`
    /// - `IncorrectDecimalAmount`: `decimals` differ from the terminal's
    pub fn add_to_balance_of(
        env: Env,
        caller: Address,
        project_id: u64,
        token: Address,
        amount: i128,
        decimals: u32,
        memo: String,
        attached: i128,
    ) -> Result<(), Error> {
        caller.require_auth();

        let config = storage::config(&env)?;
        let native = token == config.native_token;
        let decimals = if native { NATIVE_DECIMALS } else { decimals };

        let terminal = Self::terminal_of(&env, &config, project_id, &token)?;
        if terminal.decimals_for_token(&token) != decimals {
            return Err(Error::IncorrectDecimalAmount);
        }

        let received = Self::take_funds(&env, &config, &caller, &token, amount, attached)?;
        Self::forward_add_to_balance(
            &env,
            &terminal,
            &token,
            native,
            project_id,
            received,
            memo,
            Bytes::new(&env),
        );

        Ok(())
    }

    /// Route funds sent without instructions using the default values
    ///
    /// # Returns
    /// Project tokens credited, zero when the funds were added to balance
    ///
    /// # Errors
    /// - `DefaultsNotSet`: No default values configured
    /// - `NoMsgValueAllowed`: Value attached to a non-native payment
    /// - `TerminalNotFound`: Default project has no terminal for `token`
    pub fn receive(
        env: Env,
        caller: Address,
        token: Address,
        amount: i128,
        attached: i128,
    ) -> Result<i128, Error> {
        caller.require_auth();

        let config = storage::config(&env)?;
        let defaults = storage::defaults(&env)?;
        let native = token == config.native_token;

        let terminal = Self::terminal_of(&env, &config, defaults.project_id, &token)?;
        let received = Self::take_funds(&env, &config, &caller, &token, amount, attached)?;

        if defaults.prefer_add_to_balance {
            Self::forward_add_to_balance(
                &env,
                &terminal,
                &token,
                native,
                defaults.project_id,
                received,
                defaults.memo,
                defaults.metadata,
            );
            return Ok(0);
        }

        let options = PaymentOptions {
            beneficiary: Some(defaults.beneficiary.unwrap_or(caller)),
            min_returned_tokens: 0,
            prefer_claimed_tokens: defaults.prefer_claimed_tokens,
            memo: defaults.memo,
            metadata: defaults.metadata,
        };
        Ok(Self::forward_pay(
            &env,
            &terminal,
            &token,
            native,
            defaults.project_id,
            received,
            options,
        ))
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn default_values(env: Env) -> Result<DefaultValues, Error> {
        storage::defaults(&env)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        Ok(storage::config(&env)?.owner)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn terminal_of<'a>(
        env: &'a Env,
        config: &PayerConfig,
        project_id: u64,
        token: &Address,
    ) -> Result<PaymentTerminalClient<'a>, Error> {
        let terminal = DirectoryClient::new(env, &config.directory)
            .primary_terminal_of(&project_id, token)
            .ok_or(Error::TerminalNotFound)?;
        Ok(PaymentTerminalClient::new(env, &terminal))
    }

    /// Pull the paid value from `caller` and return what actually arrived.
    fn take_funds(
        env: &Env,
        config: &PayerConfig,
        caller: &Address,
        token: &Address,
        amount: i128,
        attached: i128,
    ) -> Result<i128, Error> {
        let value = if *token == config.native_token {
            attached
        } else {
            if attached != 0 {
                return Err(Error::NoMsgValueAllowed);
            }
            amount
        };
        if value < 0 {
            return Err(Error::InvalidAmount);
        }
        if value == 0 {
            return Ok(0);
        }

        let client = token::Client::new(env, token);
        let this = env.current_contract_address();
        let before = client.balance(&this);
        client.transfer(caller, &this, &value);
        client
            .balance(&this)
            .checked_sub(before)
            .ok_or(Error::Overflow)
    }

    /// Let `terminal` pull `value` of `token` out of this contract.
    fn approve_pull(env: &Env, terminal: &Address, token: &Address, value: i128) {
        if value == 0 {
            return;
        }
        let this = env.current_contract_address();
        env.authorize_as_current_contract(vec![
            env,
            InvokerContractAuthEntry::Contract(SubContractInvocation {
                context: ContractContext {
                    contract: token.clone(),
                    fn_name: Symbol::new(env, "transfer"),
                    args: (this, terminal.clone(), value).into_val(env),
                },
                sub_invocations: vec![env],
            }),
        ]);
    }

    fn forward_pay(
        env: &Env,
        terminal: &PaymentTerminalClient,
        token: &Address,
        native: bool,
        project_id: u64,
        value: i128,
        options: PaymentOptions,
    ) -> i128 {
        Self::approve_pull(env, &terminal.address, token, value);
        let (amount, attached) = if native { (0, value) } else { (value, 0) };

        log!(env, "forwarding payment: project {}, value {}", project_id, value);

        terminal.pay(
            &env.current_contract_address(),
            &project_id,
            &amount,
            token,
            &options.beneficiary,
            &options.min_returned_tokens,
            &options.prefer_claimed_tokens,
            &options.memo,
            &options.metadata,
            &attached,
        )
    }

    fn forward_add_to_balance(
        env: &Env,
        terminal: &PaymentTerminalClient,
        token: &Address,
        native: bool,
        project_id: u64,
        value: i128,
        memo: String,
        metadata: Bytes,
    ) {
        Self::approve_pull(env, &terminal.address, token, value);
        let (amount, attached) = if native { (0, value) } else { (value, 0) };

        terminal.add_to_balance_of(
            &env.current_contract_address(),
            &project_id,
            &amount,
            token,
            &memo,
            &metadata,
            &attached,
        );
    }
}
