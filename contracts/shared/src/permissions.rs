//! Permission Gate.
//!
//! An account (a project owner or a token holder) can let operators act on
//! its behalf by granting permission indexes in the operator store, either
//! for one project or for every project through [`WILDCARD_DOMAIN`].

use soroban_sdk::{Address, Env};

use crate::constants::WILDCARD_DOMAIN;
use crate::interfaces::OperatorStoreClient;

pub const RECONFIGURE: u32 = 1;
pub const REDEEM: u32 = 2;
pub const SET_METADATA: u32 = 6;
pub const ISSUE: u32 = 7;
pub const MINT: u32 = 9;
pub const BURN: u32 = 10;
pub const CLAIM: u32 = 11;
pub const TRANSFER: u32 = 12;
pub const SET_CONTROLLER: u32 = 14;
pub const SET_TERMINALS: u32 = 15;
pub const SET_PRIMARY_TERMINAL: u32 = 16;
pub const SET_FUND_ACCESS_CONSTRAINTS: u32 = RECONFIGURE;

/// Whether `caller` may exercise `permission_index` over `account`'s
/// `project_id`.
///
/// Passes when the caller is the account itself, when `allow_override`
/// holds, or when the account granted the permission to the caller for this
/// project or for every project. Reads only; the caller must already have
/// been authenticated with `require_auth`.
pub fn check_permission(
    env: &Env,
    operator_store: &Address,
    caller: &Address,
    account: &Address,
    project_id: u64,
    permission_index: u32,
    allow_override: bool,
) -> bool {
    if caller == account || allow_override {
        return true;
    }

    let operators = OperatorStoreClient::new(env, operator_store);
    operators.has_permission(caller, account, &project_id, &permission_index)
        || operators.has_permission(caller, account, &WILDCARD_DOMAIN, &permission_index)
}
