//! Clients of every contract the protocol calls across a contract boundary.
//!
//! Generated clients trap when the callee fails, so a failing collaborator
//! rolls back the whole invocation instead of leaving partial state behind.

use soroban_sdk::{contractclient, Address, Bytes, Env, String, Vec};

use crate::types::{
    DidPayData, DidRedeemData, DistributionLimit, FundingCycle, PayParamsData, PayParamsResult,
    PaymentRecord, RedeemParamsData, RedeemParamsResult, RedemptionRecord, TokenAmount,
};

// ============================================
// EXTERNAL COLLABORATORS
// ============================================

#[contractclient(name = "FundingCycleStoreClient")]
pub trait FundingCycleStoreInterface {
    fn current_of(env: Env, project_id: u64) -> FundingCycle;
}

#[contractclient(name = "PricesClient")]
pub trait PricesInterface {
    /// Units of `currency` that one unit of `base` costs, with `decimals`.
    fn price_for(env: Env, currency: u32, base: u32, decimals: u32) -> i128;
}

#[contractclient(name = "PayDataSourceClient")]
pub trait PayDataSourceInterface {
    fn pay_params(env: Env, data: PayParamsData) -> PayParamsResult;
}

#[contractclient(name = "RedemptionDataSourceClient")]
pub trait RedemptionDataSourceInterface {
    fn redeem_params(env: Env, data: RedeemParamsData) -> RedeemParamsResult;
}

#[contractclient(name = "PayDelegateClient")]
pub trait PayDelegateInterface {
    fn did_pay(env: Env, data: DidPayData);
}

#[contractclient(name = "RedemptionDelegateClient")]
pub trait RedemptionDelegateInterface {
    fn did_redeem(env: Env, data: DidRedeemData);
}

// ============================================
// PROTOCOL CONTRACTS
// ============================================

#[contractclient(name = "ProjectsClient")]
pub trait ProjectsInterface {
    fn owner_of(env: Env, project_id: u64) -> Address;
}

#[contractclient(name = "OperatorStoreClient")]
pub trait OperatorStoreInterface {
    fn has_permission(
        env: Env,
        operator: Address,
        account: Address,
        domain: u64,
        permission_index: u32,
    ) -> bool;
}

#[contractclient(name = "DirectoryClient")]
pub trait DirectoryInterface {
    fn controller_of(env: Env, project_id: u64) -> Option<Address>;
    fn terminals_of(env: Env, project_id: u64) -> Vec<Address>;
    fn is_terminal_of(env: Env, project_id: u64, terminal: Address) -> bool;
    fn primary_terminal_of(env: Env, project_id: u64, token: Address) -> Option<Address>;
}

#[contractclient(name = "ControllerClient")]
pub trait ControllerInterface {
    fn mint_tokens_of(
        env: Env,
        caller: Address,
        project_id: u64,
        token_count: i128,
        beneficiary: Address,
        memo: String,
        prefer_claimed_tokens: bool,
        use_reserved_rate: bool,
    ) -> i128;

    fn burn_tokens_of(
        env: Env,
        caller: Address,
        holder: Address,
        project_id: u64,
        token_count: i128,
        memo: String,
        prefer_claimed_tokens: bool,
    );

    fn total_outstanding_tokens_of(env: Env, project_id: u64) -> i128;

    fn distribution_limit_of(
        env: Env,
        project_id: u64,
        configuration: u64,
        terminal: Address,
        token: Address,
    ) -> DistributionLimit;
}

#[contractclient(name = "TokenStoreClient")]
pub trait TokenStoreInterface {
    fn issue_for(env: Env, caller: Address, project_id: u64, token: Address);

    fn mint_for(
        env: Env,
        caller: Address,
        holder: Address,
        project_id: u64,
        amount: i128,
        prefer_claimed_tokens: bool,
    );

    fn burn_from(
        env: Env,
        caller: Address,
        holder: Address,
        project_id: u64,
        amount: i128,
        prefer_claimed_tokens: bool,
    );

    fn balance_of(env: Env, holder: Address, project_id: u64) -> i128;
    fn total_supply_of(env: Env, project_id: u64) -> i128;
}

/// The claimed-balance token of a project, owned by the token store.
#[contractclient(name = "ProjectTokenClient")]
pub trait ProjectTokenInterface {
    fn mint(env: Env, to: Address, amount: i128);
    fn burn(env: Env, from: Address, amount: i128);
    fn balance(env: Env, id: Address) -> i128;
    fn total_supply(env: Env) -> i128;
    fn owner(env: Env) -> Address;
}

#[contractclient(name = "TerminalStoreClient")]
pub trait TerminalStoreInterface {
    fn set_accounting_context(
        env: Env,
        terminal: Address,
        token: Address,
        decimals: u32,
        currency: u32,
    );

    fn record_payment_from(
        env: Env,
        terminal: Address,
        payer: Address,
        amount: TokenAmount,
        project_id: u64,
        base_weight_currency: u32,
        beneficiary: Address,
        memo: String,
        metadata: Bytes,
    ) -> PaymentRecord;

    fn record_added_balance_for(env: Env, terminal: Address, project_id: u64, amount: TokenAmount);

    fn record_redemption_for(
        env: Env,
        terminal: Address,
        holder: Address,
        project_id: u64,
        token_count: i128,
        memo: String,
        metadata: Bytes,
    ) -> RedemptionRecord;

    fn balance_of(env: Env, terminal: Address, project_id: u64) -> i128;

    fn current_overflow_of(
        env: Env,
        terminal: Address,
        project_id: u64,
        decimals: u32,
        currency: u32,
    ) -> i128;
}

#[contractclient(name = "PaymentTerminalClient")]
pub trait PaymentTerminalInterface {
    fn accepts_token(env: Env, token: Address, project_id: u64) -> bool;
    fn decimals_for_token(env: Env, token: Address) -> u32;
    fn currency_for_token(env: Env, token: Address) -> u32;

    fn pay(
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
    ) -> i128;

    fn add_to_balance_of(
        env: Env,
        caller: Address,
        project_id: u64,
        amount: i128,
        token: Address,
        memo: String,
        metadata: Bytes,
        attached: i128,
    );
}
