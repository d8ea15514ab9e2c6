//! Terminal Store.
//!
//! Bookkeeping behind every payment terminal: decides how many tokens a
//! payment mints and how much a redemption reclaims, consults the cycle's
//! data source, and keeps each terminal's per-project balance. Terminals
//! move the funds; this contract only records.

#![no_std]

mod error;
mod storage;

use error::Error;
use storage::DataKey;

use soroban_fixed_point_math::SorobanFixedPoint;
use soroban_sdk::{contract, contractimpl, log, Address, Bytes, Env, String, Vec};
use treasury_shared::{
    constants::MAX_DECIMALS,
    fixed_point::{adjust_decimals, pow10, reclaimable_overflow, tokens_for, validate_decimals},
    interfaces::{
        ControllerClient, DirectoryClient, FundingCycleStoreClient, PayDataSourceClient,
        PricesClient, RedemptionDataSourceClient, TokenStoreClient,
    },
    AccountingContext, FundingCycle, FundingCycleMetadata, PayDelegateAllocation, PayParamsData,
    PaymentRecord, RedeemParamsData, RedemptionDelegateAllocation, RedemptionRecord, TokenAmount,
};

#[contract]
pub struct TerminalStore;

#[contractimpl]
impl TerminalStore {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Initialize the terminal store
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(
        env: Env,
        directory: Address,
        funding_cycle_store: Address,
        prices: Address,
        token_store: Address,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        let instance = env.storage().instance();
        instance.set(&DataKey::Initialized, &true);
        instance.set(&DataKey::Directory, &directory);
        instance.set(&DataKey::FundingCycleStore, &funding_cycle_store);
        instance.set(&DataKey::Prices, &prices);
        instance.set(&DataKey::TokenStore, &token_store);
        storage::bump_instance(&env);

        Ok(())
    }

    /// Register the token a terminal accounts in, once
    ///
    /// # Errors
    /// - `AccountingContextAlreadySet`: Terminal already registered
    /// - `InvalidDecimals`: Decimals beyond what an `i128` can scale
    pub fn set_accounting_context(
        env: Env,
        terminal: Address,
        token: Address,
        decimals: u32,
        currency: u32,
    ) -> Result<(), Error> {
        terminal.require_auth();

        if storage::accounting_context_of(&env, &terminal).is_some() {
            return Err(Error::AccountingContextAlreadySet);
        }
        if decimals > MAX_DECIMALS {
            return Err(Error::InvalidDecimals);
        }

        storage::set_accounting_context_of(
            &env,
            &terminal,
            &AccountingContext {
                token,
                decimals,
                currency,
            },
        );

        Ok(())
    }

    // ============================================
    // PAYMENTS
    // ============================================

    /// Record a payment received by `terminal`
    ///
    /// Credits the terminal's project balance with what stays in the
    /// treasury, the paid value minus what the data source routes to
    /// delegates. The token count is computed on the full value.
    ///
    /// # Errors
    /// - `AccountingContextNotFound`: Terminal unregistered or token not its own
    /// - `IncorrectDecimalAmount`: Amount decimals differ from the terminal's
    /// - `InvalidFundingCycle`: Project has no funding cycle
    /// - `FundingCyclePaymentPaused`: Current cycle pauses payments
    /// - `InvalidAmountToSendDelegate`: Delegate allocations exceed the payment
    pub fn record_payment_from(
        env: Env,
        terminal: Address,
        payer: Address,
        amount: TokenAmount,
        project_id: u64,
        base_weight_currency: u32,
        beneficiary: Address,
        memo: String,
        metadata: Bytes,
    ) -> Result<PaymentRecord, Error> {
        terminal.require_auth();

        Self::validate_amount(&env, &terminal, &amount)?;

        let funding_cycle = Self::current_cycle(&env, project_id)?;
        let rules = FundingCycleMetadata::from_cycle(&funding_cycle);
        if rules.pause_pay {
            return Err(Error::FundingCyclePaymentPaused);
        }

        let mut weight = funding_cycle.weight;
        let mut memo = memo;
        let mut delegate_allocations: Vec<PayDelegateAllocation> = Vec::new(&env);

        if let Some(data_source) = rules.pay_data_source() {
            let result = PayDataSourceClient::new(&env, &data_source).pay_params(&PayParamsData {
                terminal: terminal.clone(),
                payer,
                amount: amount.clone(),
                project_id,
                funding_cycle_configuration: funding_cycle.configuration,
                beneficiary,
                weight,
                reserved_rate: rules.reserved_rate,
                memo: memo.clone(),
                metadata,
            });
            weight = result.weight;
            memo = result.memo;
            delegate_allocations = result.delegate_allocations;
        }

        let mut delegated: i128 = 0;
        for allocation in delegate_allocations.iter() {
            if allocation.amount < 0 {
                return Err(Error::InvalidAmountToSendDelegate);
            }
            delegated = delegated
                .checked_add(allocation.amount)
                .ok_or(Error::InvalidAmountToSendDelegate)?;
        }
        if delegated > amount.value {
            return Err(Error::InvalidAmountToSendDelegate);
        }

        if amount.value == 0 {
            return Ok(PaymentRecord {
                funding_cycle,
                token_count: 0,
                delegate_allocations,
                memo,
            });
        }

        let retained = amount.value - delegated;
        if retained > 0 {
            let balance = storage::balance_of(&env, &terminal, project_id)
                .checked_add(retained)
                .ok_or(Error::Overflow)?;
            storage::set_balance_of(&env, &terminal, project_id, balance);
        }

        let token_count = if weight == 0 {
            0
        } else {
            let weight_ratio = if amount.currency == base_weight_currency {
                pow10(amount.decimals).ok_or(Error::InvalidDecimals)?
            } else {
                Self::prices(&env)?.price_for(
                    &amount.currency,
                    &base_weight_currency,
                    &amount.decimals,
                )
            };
            tokens_for(&env, amount.value, weight, weight_ratio)
        };

        log!(
            &env,
            "payment recorded: project {}, value {}, delegated {}, tokens {}",
            project_id,
            amount.value,
            delegated,
            token_count
        );

        Ok(PaymentRecord {
            funding_cycle,
            token_count,
            delegate_allocations,
            memo,
        })
    }

    /// Record funds added to a project's balance without minting
    ///
    /// # Errors
    /// - `AccountingContextNotFound`: Terminal unregistered or token not its own
    /// - `IncorrectDecimalAmount`: Amount decimals differ from the terminal's
    pub fn record_added_balance_for(
        env: Env,
        terminal: Address,
        project_id: u64,
        amount: TokenAmount,
    ) -> Result<(), Error> {
        terminal.require_auth();

        Self::validate_amount(&env, &terminal, &amount)?;

        let balance = storage::balance_of(&env, &terminal, project_id)
            .checked_add(amount.value)
            .ok_or(Error::Overflow)?;
        storage::set_balance_of(&env, &terminal, project_id, balance);

        Ok(())
    }

    // ============================================
    // REDEMPTIONS
    // ============================================

    /// Record a redemption of `token_count` project tokens held by `holder`
    ///
    /// The reclaim amount follows the redemption bonding curve over the
    /// terminal's overflow, unless the cycle's data source overrides it. The
    /// reclaim and any delegate allocations are debited here, before the
    /// terminal moves any funds.
    ///
    /// # Errors
    /// - `InvalidFundingCycle`: Project has no funding cycle
    /// - `FundingCycleRedeemPaused`: Current cycle pauses redemptions
    /// - `InsufficientTokens`: Holder owns fewer tokens than redeemed
    /// - `InadequateTerminalStoreBalance`: Reclaim exceeds the terminal's balance
    /// - `InvalidAmountToSendDelegate`: Delegate allocations exceed what is left
    pub fn record_redemption_for(
        env: Env,
        terminal: Address,
        holder: Address,
        project_id: u64,
        token_count: i128,
        memo: String,
        metadata: Bytes,
    ) -> Result<RedemptionRecord, Error> {
        terminal.require_auth();

        let context =
            storage::accounting_context_of(&env, &terminal).ok_or(Error::AccountingContextNotFound)?;

        let funding_cycle = Self::current_cycle(&env, project_id)?;
        let rules = FundingCycleMetadata::from_cycle(&funding_cycle);
        if rules.pause_redeem {
            return Err(Error::FundingCycleRedeemPaused);
        }

        let token_store = storage::address(&env, &DataKey::TokenStore).ok_or(Error::NotInitialized)?;
        let holder_balance = TokenStoreClient::new(&env, &token_store).balance_of(&holder, &project_id);
        if token_count < 0 || token_count > holder_balance {
            return Err(Error::InsufficientTokens);
        }

        let controller = ControllerClient::new(&env, &Self::controller_of(&env, project_id)?);
        let total_supply = controller.total_outstanding_tokens_of(&project_id);

        let overflow = Self::overflow_of(&env, &terminal, project_id, &funding_cycle, &context)?;
        let mut reclaim_amount = reclaimable_overflow(
            &env,
            overflow,
            token_count,
            total_supply,
            rules.redemption_rate,
        );
        let mut memo = memo;
        let mut delegate_allocations: Vec<RedemptionDelegateAllocation> = Vec::new(&env);

        if let Some(data_source) = rules.redeem_data_source() {
            let result =
                RedemptionDataSourceClient::new(&env, &data_source).redeem_params(&RedeemParamsData {
                    terminal: terminal.clone(),
                    holder,
                    project_id,
                    funding_cycle_configuration: funding_cycle.configuration,
                    token_count,
                    total_supply,
                    overflow: Self::tagged(&context, overflow),
                    reclaim_amount: Self::tagged(&context, reclaim_amount),
                    redemption_rate: rules.redemption_rate,
                    memo: memo.clone(),
                    metadata,
                });
            reclaim_amount = result.reclaim_amount;
            memo = result.memo;
            delegate_allocations = result.delegate_allocations;
        }

        if reclaim_amount < 0 {
            return Err(Error::InvalidAmount);
        }

        let balance = storage::balance_of(&env, &terminal, project_id);
        if reclaim_amount > balance {
            return Err(Error::InadequateTerminalStoreBalance);
        }

        let mut debited = reclaim_amount;
        for allocation in delegate_allocations.iter() {
            if allocation.amount < 0 {
                return Err(Error::InvalidAmountToSendDelegate);
            }
            debited = debited
                .checked_add(allocation.amount)
                .ok_or(Error::InvalidAmountToSendDelegate)?;
        }
        if debited > balance {
            return Err(Error::InvalidAmountToSendDelegate);
        }

        if debited > 0 {
            storage::set_balance_of(&env, &terminal, project_id, balance - debited);
        }

        log!(
            &env,
            "redemption recorded: project {}, tokens {}, reclaim {}, debited {}",
            project_id,
            token_count,
            reclaim_amount,
            debited
        );

        Ok(RedemptionRecord {
            funding_cycle,
            reclaim_amount,
            delegate_allocations,
            memo,
        })
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Balance in the terminal's accounting decimals and currency.
    pub fn balance_of(env: Env, terminal: Address, project_id: u64) -> i128 {
        storage::balance_of(&env, &terminal, project_id)
    }

    pub fn accounting_context_of(env: Env, terminal: Address) -> Option<AccountingContext> {
        storage::accounting_context_of(&env, &terminal)
    }

    /// A terminal's overflow for a project, expressed with `decimals` in
    /// `currency`
    ///
    /// # Errors
    /// - `AccountingContextNotFound`: Terminal unregistered
    /// - `ControllerNotFound`: Project has no controller
    pub fn current_overflow_of(
        env: Env,
        terminal: Address,
        project_id: u64,
        decimals: u32,
        currency: u32,
    ) -> Result<i128, Error> {
        let context =
            storage::accounting_context_of(&env, &terminal).ok_or(Error::AccountingContextNotFound)?;
        let funding_cycle = Self::current_cycle(&env, project_id)?;

        let overflow = Self::overflow_of(&env, &terminal, project_id, &funding_cycle, &context)?;
        let overflow = adjust_decimals(overflow, context.decimals, decimals).ok_or(Error::Overflow)?;
        Self::convert(&env, overflow, context.currency, currency, decimals)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn validate_amount(env: &Env, terminal: &Address, amount: &TokenAmount) -> Result<(), Error> {
        let context =
            storage::accounting_context_of(env, terminal).ok_or(Error::AccountingContextNotFound)?;
        if context.token != amount.token {
            return Err(Error::AccountingContextNotFound);
        }
        validate_decimals(amount.decimals, context.decimals)
            .map_err(|_| Error::IncorrectDecimalAmount)?;
        if amount.value < 0 {
            return Err(Error::InvalidAmount);
        }
        Ok(())
    }

    fn current_cycle(env: &Env, project_id: u64) -> Result<FundingCycle, Error> {
        let store =
            storage::address(env, &DataKey::FundingCycleStore).ok_or(Error::NotInitialized)?;
        let funding_cycle = FundingCycleStoreClient::new(env, &store).current_of(&project_id);
        if funding_cycle.number == 0 {
            return Err(Error::InvalidFundingCycle);
        }
        Ok(funding_cycle)
    }

    fn prices(env: &Env) -> Result<PricesClient<'_>, Error> {
        let prices = storage::address(env, &DataKey::Prices).ok_or(Error::NotInitialized)?;
        Ok(PricesClient::new(env, &prices))
    }

    fn controller_of(env: &Env, project_id: u64) -> Result<Address, Error> {
        let directory = storage::address(env, &DataKey::Directory).ok_or(Error::NotInitialized)?;
        DirectoryClient::new(env, &directory)
            .controller_of(&project_id)
            .ok_or(Error::ControllerNotFound)
    }

    /// Balance above the cycle's distribution limit, floored at zero, in the
    /// terminal's accounting decimals and currency.
    fn overflow_of(
        env: &Env,
        terminal: &Address,
        project_id: u64,
        funding_cycle: &FundingCycle,
        context: &AccountingContext,
    ) -> Result<i128, Error> {
        let balance = storage::balance_of(env, terminal, project_id);
        if balance == 0 {
            return Ok(0);
        }

        let limit = ControllerClient::new(env, &Self::controller_of(env, project_id)?)
            .distribution_limit_of(
                &project_id,
                &funding_cycle.configuration,
                terminal,
                &context.token,
            );
        let limit = if limit.amount == 0 {
            0
        } else {
            Self::convert(env, limit.amount, limit.currency, context.currency, context.decimals)?
        };

        Ok((balance - limit).max(0))
    }

    /// Convert `value` from `from` to `to`, both expressed with `decimals`.
    fn convert(env: &Env, value: i128, from: u32, to: u32, decimals: u32) -> Result<i128, Error> {
        if from == to || value == 0 {
            return Ok(value);
        }
        let price = Self::prices(env)?.price_for(&from, &to, &decimals);
        let unit = pow10(decimals).ok_or(Error::InvalidDecimals)?;
        Ok(value.fixed_mul_floor(env, &unit, &price))
    }

    fn tagged(context: &AccountingContext, value: i128) -> TokenAmount {
        TokenAmount {
            token: context.token.clone(),
            value,
            decimals: context.decimals,
            currency: context.currency,
        }
    }
}
