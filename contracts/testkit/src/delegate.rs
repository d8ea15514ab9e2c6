use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, String, Vec};
use treasury_shared::{
    interfaces::PaymentTerminalClient, DidPayData, DidRedeemData, PayDelegateAllocation,
    PayParamsData, PayParamsResult, RedeemParamsData, RedeemParamsResult,
    RedemptionDelegateAllocation,
};

/// What the data source answers for payments. Unset fields pass the
/// terminal's values through.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayOverride {
    pub weight: Option<i128>,
    pub memo: Option<String>,
    pub delegate_allocations: Vec<PayDelegateAllocation>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RedeemOverride {
    pub reclaim_amount: Option<i128>,
    pub memo: Option<String>,
    pub delegate_allocations: Vec<RedemptionDelegateAllocation>,
}

#[contracttype]
#[derive(Clone)]
enum DataKey {
    PayOverride,
    RedeemOverride,
    LastPay,
    LastRedeem,
    PayCount,
    RedeemCount,
    Reenter,
}

/// Data source and delegate in one contract: answers `pay_params` /
/// `redeem_params` from its configured overrides and records every
/// `did_pay` / `did_redeem` it receives.
#[contract]
pub struct MockDelegate;

#[contractimpl]
impl MockDelegate {
    pub fn set_pay_override(env: Env, value: PayOverride) {
        env.storage().instance().set(&DataKey::PayOverride, &value);
    }

    pub fn set_redeem_override(env: Env, value: RedeemOverride) {
        env.storage().instance().set(&DataKey::RedeemOverride, &value);
    }

    /// Make `did_pay` call back into `terminal`.
    pub fn set_reenter(env: Env, terminal: Address) {
        env.storage().instance().set(&DataKey::Reenter, &terminal);
    }

    pub fn pay_params(env: Env, data: PayParamsData) -> PayParamsResult {
        match env
            .storage()
            .instance()
            .get::<DataKey, PayOverride>(&DataKey::PayOverride)
        {
            Some(value) => PayParamsResult {
                weight: value.weight.unwrap_or(data.weight),
                memo: value.memo.unwrap_or(data.memo),
                delegate_allocations: value.delegate_allocations,
            },
            None => PayParamsResult {
                weight: data.weight,
                memo: data.memo,
                delegate_allocations: Vec::new(&env),
            },
        }
    }

    pub fn redeem_params(env: Env, data: RedeemParamsData) -> RedeemParamsResult {
        match env
            .storage()
            .instance()
            .get::<DataKey, RedeemOverride>(&DataKey::RedeemOverride)
        {
            Some(value) => RedeemParamsResult {
                reclaim_amount: value.reclaim_amount.unwrap_or(data.reclaim_amount.value),
                memo: value.memo.unwrap_or(data.memo),
                delegate_allocations: value.delegate_allocations,
            },
            None => RedeemParamsResult {
                reclaim_amount: data.reclaim_amount.value,
                memo: data.memo,
                delegate_allocations: Vec::new(&env),
            },
        }
    }

    pub fn did_pay(env: Env, data: DidPayData) {
        let count: u32 = env.storage().instance().get(&DataKey::PayCount).unwrap_or(0);
        env.storage().instance().set(&DataKey::PayCount, &(count + 1));
        env.storage().instance().set(&DataKey::LastPay, &data);

        if let Some(terminal) = env
            .storage()
            .instance()
            .get::<DataKey, Address>(&DataKey::Reenter)
        {
            let me = env.current_contract_address();
            PaymentTerminalClient::new(&env, &terminal).pay(
                &me,
                &data.project_id,
                &data.forwarded_amount.value,
                &data.forwarded_amount.token,
                &Some(me.clone()),
                &0,
                &false,
                &data.memo,
                &data.metadata,
                &0,
            );
        }
    }

    pub fn did_redeem(env: Env, data: DidRedeemData) {
        let count: u32 = env.storage().instance().get(&DataKey::RedeemCount).unwrap_or(0);
        env.storage()
            .instance()
            .set(&DataKey::RedeemCount, &(count + 1));
        env.storage().instance().set(&DataKey::LastRedeem, &data);
    }

    pub fn last_pay(env: Env) -> Option<DidPayData> {
        env.storage().instance().get(&DataKey::LastPay)
    }

    pub fn last_redeem(env: Env) -> Option<DidRedeemData> {
        env.storage().instance().get(&DataKey::LastRedeem)
    }

    pub fn pay_count(env: Env) -> u32 {
        env.storage().instance().get(&DataKey::PayCount).unwrap_or(0)
    }

    pub fn redeem_count(env: Env) -> u32 {
        env.storage().instance().get(&DataKey::RedeemCount).unwrap_or(0)
    }
}
