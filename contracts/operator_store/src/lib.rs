#![no_std]

mod error;
mod events;
mod storage;

use error::Error;
use events::SetOperatorEvent;

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol, Vec};
use treasury_shared::{constants::PERMISSION_INDEX_LIMIT, OperatorData};

#[contract]
pub struct OperatorStore;

#[contractimpl]
impl OperatorStore {
    // ============================================
    // GRANTING
    // ============================================

    /// Replace the permissions `account` grants `operator` within `domain`
    ///
    /// # Errors
    /// - `PermissionIndexOutOfBounds`: An index is 128 or above
    pub fn set_operator(
        env: Env,
        account: Address,
        operator: Address,
        domain: u64,
        permission_indexes: Vec<u32>,
    ) -> Result<(), Error> {
        account.require_auth();
        Self::write_operator(&env, &account, &operator, domain, permission_indexes)
    }

    /// Batch form of `set_operator`
    ///
    /// # Errors
    /// - `PermissionIndexOutOfBounds`: An index is 128 or above
    pub fn set_operators(env: Env, account: Address, operators: Vec<OperatorData>) -> Result<(), Error> {
        account.require_auth();
        for data in operators.iter() {
            Self::write_operator(
                &env,
                &account,
                &data.operator,
                data.domain,
                data.permission_indexes,
            )?;
        }
        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Packed permission bitmap
    pub fn permissions_of(env: Env, operator: Address, account: Address, domain: u64) -> u128 {
        storage::permissions_of(&env, &operator, &account, domain)
    }

    /// # Errors
    /// - `PermissionIndexOutOfBounds`: Index is 128 or above
    pub fn has_permission(
        env: Env,
        operator: Address,
        account: Address,
        domain: u64,
        permission_index: u32,
    ) -> Result<bool, Error> {
        let bit = Self::bit_of(permission_index)?;
        Ok(storage::permissions_of(&env, &operator, &account, domain) & bit != 0)
    }

    /// True only when every index is granted
    ///
    /// # Errors
    /// - `PermissionIndexOutOfBounds`: An index is 128 or above
    pub fn has_permissions(
        env: Env,
        operator: Address,
        account: Address,
        domain: u64,
        permission_indexes: Vec<u32>,
    ) -> Result<bool, Error> {
        let required = Self::pack(&permission_indexes)?;
        Ok(storage::permissions_of(&env, &operator, &account, domain) & required == required)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn write_operator(
        env: &Env,
        account: &Address,
        operator: &Address,
        domain: u64,
        permission_indexes: Vec<u32>,
    ) -> Result<(), Error> {
        let packed = Self::pack(&permission_indexes)?;
        storage::set_permissions_of(env, operator, account, domain, packed);

        env.events().publish(
            (Symbol::new(env, "set_operator"), account.clone(), domain),
            SetOperatorEvent {
                operator: operator.clone(),
                account: account.clone(),
                domain,
                permission_indexes,
                packed,
            },
        );

        Ok(())
    }

    fn bit_of(permission_index: u32) -> Result<u128, Error> {
        if permission_index >= PERMISSION_INDEX_LIMIT {
            return Err(Error::PermissionIndexOutOfBounds);
        }
        Ok(1u128 << permission_index)
    }

    fn pack(permission_indexes: &Vec<u32>) -> Result<u128, Error> {
        let mut packed = 0u128;
        for index in permission_indexes.iter() {
            packed |= Self::bit_of(index)?;
        }
        Ok(packed)
    }
}
