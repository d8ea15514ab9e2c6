#![no_std]

mod error;
mod events;
mod storage;

use error::Error;
use events::{SetControllerEvent, SetPrimaryTerminalEvent, SetTerminalsEvent};
use storage::DataKey;

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol, Vec};
use treasury_shared::{
    interfaces::{PaymentTerminalClient, ProjectsClient},
    permissions::{self, check_permission},
};

#[contract]
pub struct Directory;

#[contractimpl]
impl Directory {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Initialize the directory
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, projects: Address, operator_store: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Projects, &projects);
        env.storage()
            .instance()
            .set(&DataKey::OperatorStore, &operator_store);
        storage::bump_instance(&env);

        Ok(())
    }

    // ============================================
    // CONTROLLER
    // ============================================

    /// Set the controller that mints and burns a project's tokens
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not the owner or a `SET_CONTROLLER` operator
    pub fn set_controller_of(
        env: Env,
        caller: Address,
        project_id: u64,
        controller: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        Self::require_permission(&env, &caller, project_id, permissions::SET_CONTROLLER, false)?;

        storage::set_controller_of(&env, project_id, &controller);

        env.events().publish(
            (Symbol::new(&env, "set_controller"), project_id),
            SetControllerEvent {
                project_id,
                controller,
                caller,
            },
        );

        Ok(())
    }

    // ============================================
    // TERMINALS
    // ============================================

    /// Replace the terminals a project accepts funds through
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not the owner, a `SET_TERMINALS` operator, or the controller
    /// - `DuplicateTerminals`: A terminal is listed twice
    pub fn set_terminals_of(
        env: Env,
        caller: Address,
        project_id: u64,
        terminals: Vec<Address>,
    ) -> Result<(), Error> {
        caller.require_auth();

        let is_controller = storage::controller_of(&env, project_id)
            .map(|controller| controller == caller)
            .unwrap_or(false);
        Self::require_permission(
            &env,
            &caller,
            project_id,
            permissions::SET_TERMINALS,
            is_controller,
        )?;

        for (i, terminal) in terminals.iter().enumerate() {
            for other in terminals.iter().skip(i + 1) {
                if terminal == other {
                    return Err(Error::DuplicateTerminals);
                }
            }
        }

        storage::set_terminals_of(&env, project_id, &terminals);

        env.events().publish(
            (Symbol::new(&env, "set_terminals"), project_id),
            SetTerminalsEvent {
                project_id,
                terminals,
                caller,
            },
        );

        Ok(())
    }

    /// Pin the terminal that receives `token` for a project, adding it to
    /// the project's terminals when missing
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not the owner or a `SET_PRIMARY_TERMINAL` operator
    /// - `TokenNotAccepted`: Terminal does not accept `token`
    pub fn set_primary_terminal_of(
        env: Env,
        caller: Address,
        project_id: u64,
        token: Address,
        terminal: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        Self::require_permission(
            &env,
            &caller,
            project_id,
            permissions::SET_PRIMARY_TERMINAL,
            false,
        )?;

        if !PaymentTerminalClient::new(&env, &terminal).accepts_token(&token, &project_id) {
            return Err(Error::TokenNotAccepted);
        }

        let mut terminals = storage::terminals_of(&env, project_id);
        if !terminals.contains(&terminal) {
            terminals.push_back(terminal.clone());
            storage::set_terminals_of(&env, project_id, &terminals);

            env.events().publish(
                (Symbol::new(&env, "set_terminals"), project_id),
                SetTerminalsEvent {
                    project_id,
                    terminals,
                    caller: caller.clone(),
                },
            );
        }

        storage::set_primary_terminal_of(&env, project_id, &token, &terminal);

        env.events().publish(
            (Symbol::new(&env, "set_primary_terminal"), project_id),
            SetPrimaryTerminalEvent {
                project_id,
                token,
                terminal,
                caller,
            },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn controller_of(env: Env, project_id: u64) -> Option<Address> {
        storage::controller_of(&env, project_id)
    }

    pub fn terminals_of(env: Env, project_id: u64) -> Vec<Address> {
        storage::terminals_of(&env, project_id)
    }

    pub fn is_terminal_of(env: Env, project_id: u64, terminal: Address) -> bool {
        storage::terminals_of(&env, project_id).contains(&terminal)
    }

    /// The pinned primary terminal while it is still listed, else the first
    /// listed terminal accepting `token`
    pub fn primary_terminal_of(env: Env, project_id: u64, token: Address) -> Option<Address> {
        let terminals = storage::terminals_of(&env, project_id);

        if let Some(primary) = storage::primary_terminal_of(&env, project_id, &token) {
            if terminals.contains(&primary) {
                return Some(primary);
            }
        }

        terminals
            .iter()
            .find(|terminal| PaymentTerminalClient::new(&env, terminal).accepts_token(&token, &project_id))
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn require_permission(
        env: &Env,
        caller: &Address,
        project_id: u64,
        permission_index: u32,
        allow_override: bool,
    ) -> Result<(), Error> {
        let projects: Address = env
            .storage()
            .instance()
            .get(&DataKey::Projects)
            .ok_or(Error::NotInitialized)?;
        let operator_store: Address = env
            .storage()
            .instance()
            .get(&DataKey::OperatorStore)
            .ok_or(Error::NotInitialized)?;

        let owner = ProjectsClient::new(env, &projects).owner_of(&project_id);
        if !check_permission(
            env,
            &operator_store,
            caller,
            &owner,
            project_id,
            permission_index,
            allow_override,
        ) {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use operator_store::{OperatorStore, OperatorStoreClient};
    use projects::{Projects, ProjectsClient as RegistryClient};
    use soroban_sdk::{testutils::Address as _, vec, Address, Env, String};
    use testkit::{MockTerminal, MockTerminalClient};

    struct Setup {
        env: Env,
        directory: DirectoryClient<'static>,
        operators: OperatorStoreClient<'static>,
        owner: Address,
        project_id: u64,
    }

    fn setup() -> Setup {
        let env = Env::default();
        env.mock_all_auths();

        let operator_store_id = env.register(OperatorStore, ());
        let projects_id = env.register(Projects, ());
        let registry = RegistryClient::new(&env, &projects_id);
        registry.initialize(&operator_store_id);

        let directory_id = env.register(Directory, ());
        let directory = DirectoryClient::new(&env, &directory_id);
        directory.initialize(&projects_id, &operator_store_id);

        let owner = Address::generate(&env);
        let project_id = registry.create_for(&owner, &String::from_str(&env, ""));

        Setup {
            operators: OperatorStoreClient::new(&env, &operator_store_id),
            env,
            directory,
            owner,
            project_id,
        }
    }

    fn terminal_for(env: &Env, token: &Address) -> Address {
        let terminal_id = env.register(MockTerminal, ());
        MockTerminalClient::new(env, &terminal_id).init_terminal(token, &18);
        terminal_id
    }

    #[test]
    fn test_owner_sets_controller() {
        let s = setup();
        let controller = Address::generate(&s.env);

        assert_eq!(s.directory.controller_of(&s.project_id), None);
        s.directory
            .set_controller_of(&s.owner, &s.project_id, &controller);
        assert_eq!(s.directory.controller_of(&s.project_id), Some(controller));
    }

    #[test]
    fn test_stranger_cannot_set_controller() {
        let s = setup();
        let stranger = Address::generate(&s.env);

        let result = s
            .directory
            .try_set_controller_of(&stranger, &s.project_id, &stranger);
        assert_eq!(result, Err(Ok(Error::Unauthorized)));
    }

    #[test]
    fn test_operator_sets_controller() {
        let s = setup();
        let operator = Address::generate(&s.env);
        let controller = Address::generate(&s.env);

        s.operators.set_operator(
            &s.owner,
            &operator,
            &s.project_id,
            &vec![&s.env, permissions::SET_CONTROLLER],
        );
        s.directory
            .set_controller_of(&operator, &s.project_id, &controller);
        assert_eq!(s.directory.controller_of(&s.project_id), Some(controller));
    }

    #[test]
    fn test_controller_may_set_terminals() {
        let s = setup();
        let controller = Address::generate(&s.env);
        let terminal = Address::generate(&s.env);

        s.directory
            .set_controller_of(&s.owner, &s.project_id, &controller);
        s.directory
            .set_terminals_of(&controller, &s.project_id, &vec![&s.env, terminal.clone()]);

        assert!(s.directory.is_terminal_of(&s.project_id, &terminal));
        assert_eq!(s.directory.terminals_of(&s.project_id).len(), 1);
    }

    #[test]
    fn test_duplicate_terminals_rejected() {
        let s = setup();
        let terminal = Address::generate(&s.env);

        let result = s.directory.try_set_terminals_of(
            &s.owner,
            &s.project_id,
            &vec![&s.env, terminal.clone(), terminal],
        );
        assert_eq!(result, Err(Ok(Error::DuplicateTerminals)));
    }

    #[test]
    fn test_primary_terminal_resolution() {
        let s = setup();
        let usdc = Address::generate(&s.env);
        let xlm = Address::generate(&s.env);
        let usdc_terminal = terminal_for(&s.env, &usdc);
        let xlm_terminal = terminal_for(&s.env, &xlm);

        // Falls back to the first listed terminal that accepts the token.
        s.directory.set_terminals_of(
            &s.owner,
            &s.project_id,
            &vec![&s.env, usdc_terminal.clone(), xlm_terminal.clone()],
        );
        assert_eq!(
            s.directory.primary_terminal_of(&s.project_id, &xlm),
            Some(xlm_terminal.clone())
        );
        assert_eq!(
            s.directory.primary_terminal_of(&s.project_id, &Address::generate(&s.env)),
            None
        );

        // A pinned terminal wins while it stays listed.
        let second_xlm_terminal = terminal_for(&s.env, &xlm);
        s.directory
            .set_primary_terminal_of(&s.owner, &s.project_id, &xlm, &second_xlm_terminal);
        assert!(s.directory.is_terminal_of(&s.project_id, &second_xlm_terminal));
        assert_eq!(
            s.directory.primary_terminal_of(&s.project_id, &xlm),
            Some(second_xlm_terminal)
        );

        s.directory.set_terminals_of(
            &s.owner,
            &s.project_id,
            &vec![&s.env, usdc_terminal, xlm_terminal.clone()],
        );
        assert_eq!(
            s.directory.primary_terminal_of(&s.project_id, &xlm),
            Some(xlm_terminal)
        );
    }

    #[test]
    fn test_primary_terminal_must_accept_token() {
        let s = setup();
        let usdc = Address::generate(&s.env);
        let terminal = terminal_for(&s.env, &usdc);

        let result = s.directory.try_set_primary_terminal_of(
            &s.owner,
            &s.project_id,
            &Address::generate(&s.env),
            &terminal,
        );
        assert_eq!(result, Err(Ok(Error::TokenNotAccepted)));
    }
}
