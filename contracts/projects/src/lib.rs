#![no_std]

mod error;
mod events;
mod storage;

use error::Error;
use events::{CreateEvent, SetMetadataEvent, TransferOwnershipEvent};
use storage::DataKey;

use soroban_sdk::{contract, contractimpl, Address, Env, String, Symbol};
use treasury_shared::permissions::{self, check_permission};

#[contract]
pub struct Projects;

#[contractimpl]
impl Projects {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Initialize the registry
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, operator_store: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage()
            .instance()
            .set(&DataKey::OperatorStore, &operator_store);
        storage::bump_instance(&env);

        Ok(())
    }

    // ============================================
    // PROJECT LIFECYCLE
    // ============================================

    /// Create a project owned by `owner`, returning its ID
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn create_for(env: Env, owner: Address, metadata: String) -> Result<u64, Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        let project_id = storage::next_project_id(&env);
        storage::set_owner_of(&env, project_id, &owner);
        storage::set_metadata_of(&env, project_id, &metadata);

        env.events().publish(
            (Symbol::new(&env, "create"), project_id),
            CreateEvent {
                project_id,
                owner,
                metadata,
            },
        );

        Ok(project_id)
    }

    /// Replace a project's metadata
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `ProjectNotFound`: No project with this ID
    /// - `Unauthorized`: Caller is not the owner or a `SET_METADATA` operator
    pub fn set_metadata_of(
        env: Env,
        caller: Address,
        project_id: u64,
        metadata: String,
    ) -> Result<(), Error> {
        caller.require_auth();

        let owner = storage::owner_of(&env, project_id).ok_or(Error::ProjectNotFound)?;
        let operator_store: Address = env
            .storage()
            .instance()
            .get(&DataKey::OperatorStore)
            .ok_or(Error::NotInitialized)?;

        if !check_permission(
            &env,
            &operator_store,
            &caller,
            &owner,
            project_id,
            permissions::SET_METADATA,
            false,
        ) {
            return Err(Error::Unauthorized);
        }

        storage::set_metadata_of(&env, project_id, &metadata);

        env.events().publish(
            (Symbol::new(&env, "set_metadata"), project_id),
            SetMetadataEvent {
                project_id,
                metadata,
                caller,
            },
        );

        Ok(())
    }

    /// Hand a project to a new owner
    ///
    /// # Errors
    /// - `ProjectNotFound`: No project with this ID
    pub fn transfer_ownership(env: Env, project_id: u64, new_owner: Address) -> Result<(), Error> {
        let owner = storage::owner_of(&env, project_id).ok_or(Error::ProjectNotFound)?;
        owner.require_auth();

        storage::set_owner_of(&env, project_id, &new_owner);

        env.events().publish(
            (Symbol::new(&env, "transfer_ownership"), project_id),
            TransferOwnershipEvent {
                project_id,
                from: owner,
                to: new_owner,
            },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// # Errors
    /// - `ProjectNotFound`: No project with this ID
    pub fn owner_of(env: Env, project_id: u64) -> Result<Address, Error> {
        storage::owner_of(&env, project_id).ok_or(Error::ProjectNotFound)
    }

    /// # Errors
    /// - `ProjectNotFound`: No project with this ID
    pub fn metadata_of(env: Env, project_id: u64) -> Result<String, Error> {
        storage::metadata_of(&env, project_id).ok_or(Error::ProjectNotFound)
    }

    pub fn count(env: Env) -> u64 {
        storage::count(&env)
    }
}
