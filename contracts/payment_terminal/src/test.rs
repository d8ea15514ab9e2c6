use super::*;
use controller::{Controller, ControllerClient as MintClient};
use directory::{Directory, DirectoryClient as RegistryDirectoryClient};
use operator_store::{OperatorStore, OperatorStoreClient};
use projects::{Projects, ProjectsClient};
use soroban_sdk::{
    testutils::{Address as _, Events},
    token::{StellarAssetClient, TokenClient},
    vec, Address, Bytes, Env, IntoVal, String, TryIntoVal,
};
use terminal_store::{TerminalStore, TerminalStoreClient as RecorderClient};
use testkit::{
    FeeOnTransferToken, FeeOnTransferTokenClient, MockDelegate, MockDelegateClient,
    MockFundingCycleStore, MockFundingCycleStoreClient, MockPrices, PayOverride, RedeemOverride,
};
use token_store::{TokenStore, TokenStoreClient as LedgerClient};
use treasury_shared::{constants::CURRENCY_USD, FundingCycleMetadata};

const ONE: i128 = 1_000_000_000_000_000_000;
const CONFIGURATION: u64 = 1_000;

struct Stack {
    env: Env,
    owner: Address,
    project_id: u64,
    directory: RegistryDirectoryClient<'static>,
    operators: OperatorStoreClient<'static>,
    ledger: LedgerClient<'static>,
    recorder: RecorderClient<'static>,
    controller: MintClient<'static>,
    cycles: MockFundingCycleStoreClient<'static>,
}

struct Terminal {
    client: PaymentTerminalClient<'static>,
    token: Address,
}

/// Deploys every protocol contract and creates one project whose
/// controller is the real controller.
fn stack() -> Stack {
    let env = Env::default();
    env.mock_all_auths();

    let operator_store_id = env.register(OperatorStore, ());
    let projects_id = env.register(Projects, ());
    let projects = ProjectsClient::new(&env, &projects_id);
    projects.initialize(&operator_store_id);

    let directory_id = env.register(Directory, ());
    let directory = RegistryDirectoryClient::new(&env, &directory_id);
    directory.initialize(&projects_id, &operator_store_id);

    let ledger_id = env.register(TokenStore, ());
    let ledger = LedgerClient::new(&env, &ledger_id);
    ledger.initialize(&directory_id, &operator_store_id);

    let cycles_id = env.register(MockFundingCycleStore, ());
    let prices_id = env.register(MockPrices, ());

    let controller_id = env.register(Controller, ());
    let controller = MintClient::new(&env, &controller_id);
    controller.initialize(
        &projects_id,
        &directory_id,
        &ledger_id,
        &cycles_id,
        &operator_store_id,
    );

    let recorder_id = env.register(TerminalStore, ());
    let recorder = RecorderClient::new(&env, &recorder_id);
    recorder.initialize(&directory_id, &cycles_id, &prices_id, &ledger_id);

    let owner = Address::generate(&env);
    let project_id = projects.create_for(&owner, &String::from_str(&env, ""));
    directory.set_controller_of(&owner, &project_id, &controller_id);

    Stack {
        operators: OperatorStoreClient::new(&env, &operator_store_id),
        cycles: MockFundingCycleStoreClient::new(&env, &cycles_id),
        env,
        owner,
        project_id,
        directory,
        ledger,
        recorder,
        controller,
    }
}

fn deploy_terminal(
    s: &Stack,
    token: &Address,
    native: bool,
    decimals: u32,
    currency: u32,
) -> Terminal {
    let terminal_id = s.env.register(PaymentTerminal, ());
    let client = PaymentTerminalClient::new(&s.env, &terminal_id);
    client.initialize(
        &s.owner,
        token,
        &native,
        &decimals,
        &currency,
        &currency,
        &s.directory.address,
        &s.operators.address,
        &s.recorder.address,
    );

    let mut terminals = s.directory.terminals_of(&s.project_id);
    terminals.push_back(terminal_id);
    s.directory
        .set_terminals_of(&s.owner, &s.project_id, &terminals);

    Terminal {
        client,
        token: token.clone(),
    }
}

fn native_terminal(s: &Stack) -> Terminal {
    let sac = s.env.register_stellar_asset_contract_v2(Address::generate(&s.env));
    // Native terminals always account with 18 decimals.
    deploy_terminal(s, &sac.address(), true, 7, CURRENCY_NATIVE)
}

fn fund(s: &Stack, terminal: &Terminal, who: &Address, amount: i128) {
    StellarAssetClient::new(&s.env, &terminal.token).mint(who, &amount);
}

fn native_balance(s: &Stack, terminal: &Terminal, who: &Address) -> i128 {
    TokenClient::new(&s.env, &terminal.token).balance(who)
}

fn set_rules(s: &Stack, weight: i128, metadata: FundingCycleMetadata) {
    s.cycles
        .set_cycle(&s.project_id, &CONFIGURATION, &weight, &metadata);
}

fn pay_native(
    s: &Stack,
    terminal: &Terminal,
    payer: &Address,
    beneficiary: &Address,
    attached: i128,
) -> i128 {
    terminal.client.pay(
        payer,
        &s.project_id,
        &0,
        &terminal.token,
        &Some(beneficiary.clone()),
        &0,
        &false,
        &String::from_str(&s.env, "gm"),
        &Bytes::new(&s.env),
        &attached,
    )
}

fn last_pay_event(s: &Stack, terminal: &Terminal) -> PayEvent {
    let last_event = s.env.events().all().last().expect("No events found");
    assert_eq!(last_event.0, terminal.client.address);
    let expected_topics = vec![
        &s.env,
        Symbol::new(&s.env, "pay").into_val(&s.env),
        s.project_id.into_val(&s.env),
    ];
    assert_eq!(last_event.1, expected_topics);
    last_event.2.try_into_val(&s.env).unwrap()
}

fn with_data_source(
    s: &Stack,
    weight: i128,
    metadata: FundingCycleMetadata,
) -> MockDelegateClient<'static> {
    let source_id = s.env.register(MockDelegate, ());
    set_rules(
        s,
        weight,
        FundingCycleMetadata {
            data_source: Some(source_id.clone()),
            ..metadata
        },
    );
    MockDelegateClient::new(&s.env, &source_id)
}

// ============================================
// PAY
// ============================================

#[test]
fn test_native_payment_mints_and_holds_funds() {
    let s = stack();
    let terminal = native_terminal(&s);
    set_rules(&s, 200 * ONE, FundingCycleMetadata::default());

    let payer = Address::generate(&s.env);
    let beneficiary = Address::generate(&s.env);
    fund(&s, &terminal, &payer, 5 * ONE);

    // The explicit amount is ignored on the native path.
    let minted = terminal.client.pay(
        &payer,
        &s.project_id,
        &12_345,
        &terminal.token,
        &Some(beneficiary.clone()),
        &0,
        &false,
        &String::from_str(&s.env, "gm"),
        &Bytes::new(&s.env),
        &ONE,
    );

    let event = last_pay_event(&s, &terminal);
    assert_eq!(minted, 200 * ONE);
    assert_eq!(event.beneficiary_token_count, minted);
    assert_eq!(event.amount, ONE);
    assert_eq!(event.funding_cycle_configuration, CONFIGURATION);
    assert_eq!(event.beneficiary, beneficiary);
    assert_eq!(s.ledger.balance_of(&beneficiary, &s.project_id), minted);

    assert_eq!(native_balance(&s, &terminal, &terminal.client.address), ONE);
    assert_eq!(native_balance(&s, &terminal, &payer), 4 * ONE);
    assert_eq!(
        s.recorder
            .balance_of(&terminal.client.address, &s.project_id),
        ONE
    );
}

#[test]
fn test_native_terminal_accounts_in_eighteen_decimals() {
    let s = stack();
    let terminal = native_terminal(&s);

    assert!(terminal.client.accepts_token(&terminal.token, &s.project_id));
    assert_eq!(terminal.client.decimals_for_token(&terminal.token), 18);
    assert_eq!(terminal.client.currency_for_token(&terminal.token), CURRENCY_NATIVE);
    assert!(!terminal
        .client
        .accepts_token(&Address::generate(&s.env), &s.project_id));
}

#[test]
fn test_fee_on_transfer_token_credits_net_amount() {
    let s = stack();
    let fee_token_id = s.env.register(FeeOnTransferToken, ());
    let fee_token = FeeOnTransferTokenClient::new(&s.env, &fee_token_id);
    fee_token.init_fee(&100);
    let terminal = deploy_terminal(&s, &fee_token_id, false, 18, CURRENCY_USD);
    set_rules(&s, ONE, FundingCycleMetadata::default());

    let payer = Address::generate(&s.env);
    fee_token.mint(&payer, &1_000);

    let minted = terminal.client.pay(
        &payer,
        &s.project_id,
        &101,
        &fee_token_id,
        &Some(payer.clone()),
        &0,
        &false,
        &String::from_str(&s.env, ""),
        &Bytes::new(&s.env),
        &0,
    );

    let event = last_pay_event(&s, &terminal);
    assert_eq!(event.amount, 100);
    assert_eq!(minted, 100);
    assert_eq!(
        s.recorder
            .balance_of(&terminal.client.address, &s.project_id),
        100
    );
    assert_eq!(fee_token.balance(&payer), 899);
}

#[test]
fn test_delegates_receive_exact_allocations() {
    let s = stack();
    let terminal = native_terminal(&s);
    let source = with_data_source(
        &s,
        200 * ONE,
        FundingCycleMetadata {
            use_data_source_for_pay: true,
            ..Default::default()
        },
    );

    let first = MockDelegateClient::new(&s.env, &s.env.register(MockDelegate, ()));
    let second = MockDelegateClient::new(&s.env, &s.env.register(MockDelegate, ()));
    source.set_pay_override(&PayOverride {
        weight: None,
        memo: None,
        delegate_allocations: vec![
            &s.env,
            PayDelegateAllocation {
                delegate: first.address.clone(),
                amount: ONE / 4,
            },
            PayDelegateAllocation {
                delegate: second.address.clone(),
                amount: ONE / 2,
            },
        ],
    });

    let payer = Address::generate(&s.env);
    let beneficiary = Address::generate(&s.env);
    fund(&s, &terminal, &payer, ONE);
    let minted = pay_native(&s, &terminal, &payer, &beneficiary, ONE);

    // Minting is based on the whole payment, not what stayed in the treasury.
    let event = last_pay_event(&s, &terminal);
    assert_eq!(minted, 200 * ONE);
    assert_eq!(event.beneficiary_token_count, 200 * ONE);

    assert_eq!(native_balance(&s, &terminal, &first.address), ONE / 4);
    assert_eq!(native_balance(&s, &terminal, &second.address), ONE / 2);
    assert_eq!(
        native_balance(&s, &terminal, &terminal.client.address),
        ONE / 4
    );
    assert_eq!(
        s.recorder
            .balance_of(&terminal.client.address, &s.project_id),
        ONE / 4
    );

    let first_data = first.last_pay().unwrap();
    assert_eq!(first_data.forwarded_amount.value, ONE / 4);
    assert_eq!(first_data.amount.value, ONE);
    assert_eq!(first_data.project_token_count, 200 * ONE);
    assert_eq!(first_data.beneficiary, beneficiary);
    assert_eq!(first_data.funding_cycle_configuration, CONFIGURATION);
    assert_eq!(second.last_pay().unwrap().forwarded_amount.value, ONE / 2);
    assert_eq!(first.pay_count(), 1);
    assert_eq!(second.pay_count(), 1);
    assert_eq!(source.pay_count(), 0);
}

#[test]
fn test_reserved_rate_reduces_beneficiary_count() {
    let s = stack();
    let terminal = native_terminal(&s);
    set_rules(
        &s,
        200 * ONE,
        FundingCycleMetadata {
            reserved_rate: 5_000,
            ..Default::default()
        },
    );

    let payer = Address::generate(&s.env);
    fund(&s, &terminal, &payer, ONE);
    let minted = pay_native(&s, &terminal, &payer, &payer, ONE);

    assert_eq!(minted, 100 * ONE);
    assert_eq!(last_pay_event(&s, &terminal).beneficiary_token_count, 100 * ONE);
    assert_eq!(s.controller.reserved_token_balance_of(&s.project_id), 100 * ONE);
}

#[test]
fn test_pay_to_zero_address_fails() {
    let s = stack();
    let terminal = native_terminal(&s);
    let source = with_data_source(
        &s,
        ONE,
        FundingCycleMetadata {
            use_data_source_for_pay: true,
            ..Default::default()
        },
    );
    source.set_pay_override(&PayOverride {
        weight: None,
        memo: None,
        delegate_allocations: vec![
            &s.env,
            PayDelegateAllocation {
                delegate: Address::generate(&s.env),
                amount: 1,
            },
        ],
    });

    let payer = Address::generate(&s.env);
    fund(&s, &terminal, &payer, ONE);

    for attached in [1, ONE] {
        let result = terminal.client.try_pay(
            &payer,
            &s.project_id,
            &0,
            &terminal.token,
            &None,
            &0,
            &false,
            &String::from_str(&s.env, ""),
            &Bytes::new(&s.env),
            &attached,
        );
        assert_eq!(result, Err(Ok(Error::PayToZeroAddress)));
    }

    // Reported even when the rest of the payment is also wrong.
    let result = terminal.client.try_pay(
        &payer,
        &(s.project_id + 1),
        &0,
        &Address::generate(&s.env),
        &None,
        &0,
        &false,
        &String::from_str(&s.env, ""),
        &Bytes::new(&s.env),
        &0,
    );
    assert_eq!(result, Err(Ok(Error::PayToZeroAddress)));
    assert_eq!(native_balance(&s, &terminal, &payer), ONE);
}

#[test]
fn test_pay_rejects_unregistered_project() {
    let s = stack();
    let terminal = native_terminal(&s);
    let payer = Address::generate(&s.env);
    fund(&s, &terminal, &payer, ONE);

    let result = terminal.client.try_pay(
        &payer,
        &(s.project_id + 1),
        &0,
        &terminal.token,
        &Some(payer.clone()),
        &0,
        &false,
        &String::from_str(&s.env, ""),
        &Bytes::new(&s.env),
        &ONE,
    );
    assert_eq!(result, Err(Ok(Error::ProjectTerminalMismatch)));
}

#[test]
fn test_attached_value_must_fit_terminal() {
    let s = stack();
    let native = native_terminal(&s);
    let fee_token_id = s.env.register(FeeOnTransferToken, ());
    let token_terminal = deploy_terminal(&s, &fee_token_id, false, 18, CURRENCY_USD);
    set_rules(&s, ONE, FundingCycleMetadata::default());
    let payer = Address::generate(&s.env);

    let result = native.client.try_pay(
        &payer,
        &s.project_id,
        &ONE,
        &native.token,
        &Some(payer.clone()),
        &0,
        &false,
        &String::from_str(&s.env, ""),
        &Bytes::new(&s.env),
        &0,
    );
    assert_eq!(result, Err(Ok(Error::NoAttachedValue)));

    let result = token_terminal.client.try_pay(
        &payer,
        &s.project_id,
        &100,
        &fee_token_id,
        &Some(payer.clone()),
        &0,
        &false,
        &String::from_str(&s.env, ""),
        &Bytes::new(&s.env),
        &1,
    );
    assert_eq!(result, Err(Ok(Error::NoMsgValueAllowed)));

    let result = token_terminal.client.try_pay(
        &payer,
        &s.project_id,
        &100,
        &native.token,
        &Some(payer.clone()),
        &0,
        &false,
        &String::from_str(&s.env, ""),
        &Bytes::new(&s.env),
        &0,
    );
    assert_eq!(result, Err(Ok(Error::TokenNotAccepted)));
}

#[test]
fn test_min_returned_tokens_enforced() {
    let s = stack();
    let terminal = native_terminal(&s);
    set_rules(&s, 200 * ONE, FundingCycleMetadata::default());
    let payer = Address::generate(&s.env);
    fund(&s, &terminal, &payer, ONE);

    let result = terminal.client.try_pay(
        &payer,
        &s.project_id,
        &0,
        &terminal.token,
        &Some(payer.clone()),
        &(200 * ONE + 1),
        &false,
        &String::from_str(&s.env, ""),
        &Bytes::new(&s.env),
        &ONE,
    );
    assert_eq!(result, Err(Ok(Error::InadequateTokenCount)));
    assert_eq!(native_balance(&s, &terminal, &payer), ONE);
    assert_eq!(s.ledger.balance_of(&payer, &s.project_id), 0);
}

#[test]
fn test_delegate_cannot_reenter() {
    let s = stack();
    let terminal = native_terminal(&s);
    let source = with_data_source(
        &s,
        ONE,
        FundingCycleMetadata {
            use_data_source_for_pay: true,
            ..Default::default()
        },
    );
    let delegate = MockDelegateClient::new(&s.env, &s.env.register(MockDelegate, ()));
    delegate.set_reenter(&terminal.client.address);
    source.set_pay_override(&PayOverride {
        weight: None,
        memo: None,
        delegate_allocations: vec![
            &s.env,
            PayDelegateAllocation {
                delegate: delegate.address.clone(),
                amount: ONE / 2,
            },
        ],
    });

    let payer = Address::generate(&s.env);
    fund(&s, &terminal, &payer, ONE);

    let result = terminal.client.try_pay(
        &payer,
        &s.project_id,
        &0,
        &terminal.token,
        &Some(payer.clone()),
        &0,
        &false,
        &String::from_str(&s.env, ""),
        &Bytes::new(&s.env),
        &ONE,
    );
    assert!(result.is_err());
    assert_eq!(native_balance(&s, &terminal, &payer), ONE);
    assert_eq!(delegate.pay_count(), 0);
}

#[test]
fn test_entry_points_reject_while_locked() {
    let s = stack();
    let terminal = native_terminal(&s);
    set_rules(&s, ONE, FundingCycleMetadata::default());
    let payer = Address::generate(&s.env);
    fund(&s, &terminal, &payer, ONE);

    s.env.as_contract(&terminal.client.address, || {
        assert_eq!(storage::lock(&s.env), Ok(()));
    });

    let result = terminal.client.try_pay(
        &payer,
        &s.project_id,
        &0,
        &terminal.token,
        &Some(payer.clone()),
        &0,
        &false,
        &String::from_str(&s.env, ""),
        &Bytes::new(&s.env),
        &ONE,
    );
    assert_eq!(result, Err(Ok(Error::ReentrantCall)));

    let result = terminal.client.try_add_to_balance_of(
        &payer,
        &s.project_id,
        &0,
        &terminal.token,
        &String::from_str(&s.env, ""),
        &Bytes::new(&s.env),
        &ONE,
    );
    assert_eq!(result, Err(Ok(Error::ReentrantCall)));

    let result = terminal.client.try_redeem_tokens_of(
        &payer,
        &payer,
        &s.project_id,
        &0,
        &0,
        &Some(payer.clone()),
        &String::from_str(&s.env, ""),
        &Bytes::new(&s.env),
    );
    assert_eq!(result, Err(Ok(Error::ReentrantCall)));

    s.env.as_contract(&terminal.client.address, || storage::unlock(&s.env));
    assert_eq!(pay_native(&s, &terminal, &payer, &payer, ONE), ONE);
}

#[test]
fn test_zero_payment_cannot_release_pooled_funds() {
    let s = stack();
    let token_id = s.env.register(FeeOnTransferToken, ());
    let token = FeeOnTransferTokenClient::new(&s.env, &token_id);
    let terminal = deploy_terminal(&s, &token_id, false, 18, CURRENCY_USD);
    set_rules(&s, ONE, FundingCycleMetadata::default());

    let payer = Address::generate(&s.env);
    token.mint(&payer, &1_000_000);
    terminal.client.pay(
        &payer,
        &s.project_id,
        &1_000_000,
        &token_id,
        &Some(payer.clone()),
        &0,
        &false,
        &String::from_str(&s.env, ""),
        &Bytes::new(&s.env),
        &0,
    );

    let source = with_data_source(
        &s,
        ONE,
        FundingCycleMetadata {
            use_data_source_for_pay: true,
            ..Default::default()
        },
    );
    let receiver = Address::generate(&s.env);
    source.set_pay_override(&PayOverride {
        weight: None,
        memo: None,
        delegate_allocations: vec![
            &s.env,
            PayDelegateAllocation {
                delegate: receiver.clone(),
                amount: 1_000_000,
            },
        ],
    });

    let result = terminal.client.try_pay(
        &payer,
        &s.project_id,
        &0,
        &token_id,
        &Some(payer.clone()),
        &0,
        &false,
        &String::from_str(&s.env, ""),
        &Bytes::new(&s.env),
        &0,
    );
    assert!(result.is_err());
    assert_eq!(token.balance(&receiver), 0);
    assert_eq!(token.balance(&terminal.client.address), 1_000_000);
    assert_eq!(
        s.recorder
            .balance_of(&terminal.client.address, &s.project_id),
        1_000_000
    );
}

// ============================================
// ADD TO BALANCE
// ============================================

#[test]
fn test_add_to_balance_mints_nothing() {
    let s = stack();
    let terminal = native_terminal(&s);
    set_rules(&s, 200 * ONE, FundingCycleMetadata::default());
    let payer = Address::generate(&s.env);
    fund(&s, &terminal, &payer, ONE);

    terminal.client.add_to_balance_of(
        &payer,
        &s.project_id,
        &0,
        &terminal.token,
        &String::from_str(&s.env, ""),
        &Bytes::new(&s.env),
        &ONE,
    );

    assert_eq!(
        s.recorder
            .balance_of(&terminal.client.address, &s.project_id),
        ONE
    );
    assert_eq!(s.ledger.total_supply_of(&s.project_id), 0);
    assert_eq!(terminal.client.current_overflow_of(&s.project_id), ONE);
}

// ============================================
// REDEEM
// ============================================

fn redeemable(s: &Stack) -> (Terminal, Address) {
    let terminal = native_terminal(s);
    set_rules(
        s,
        200 * ONE,
        FundingCycleMetadata {
            redemption_rate: 10_000,
            ..Default::default()
        },
    );
    let holder = Address::generate(&s.env);
    fund(s, &terminal, &holder, ONE);
    pay_native(s, &terminal, &holder, &holder, ONE);
    (terminal, holder)
}

#[test]
fn test_redeem_returns_overflow() {
    let s = stack();
    let (terminal, holder) = redeemable(&s);
    let beneficiary = Address::generate(&s.env);

    let reclaimed = terminal.client.redeem_tokens_of(
        &holder,
        &holder,
        &s.project_id,
        &(100 * ONE),
        &0,
        &Some(beneficiary.clone()),
        &String::from_str(&s.env, ""),
        &Bytes::new(&s.env),
    );

    assert_eq!(reclaimed, ONE / 2);
    assert_eq!(native_balance(&s, &terminal, &beneficiary), ONE / 2);
    assert_eq!(s.ledger.balance_of(&holder, &s.project_id), 100 * ONE);
    assert_eq!(
        s.recorder
            .balance_of(&terminal.client.address, &s.project_id),
        ONE / 2
    );
}

#[test]
fn test_redeem_rejections() {
    let s = stack();
    let (terminal, holder) = redeemable(&s);
    let stranger = Address::generate(&s.env);

    let result = terminal.client.try_redeem_tokens_of(
        &stranger,
        &holder,
        &s.project_id,
        &ONE,
        &0,
        &Some(stranger.clone()),
        &String::from_str(&s.env, ""),
        &Bytes::new(&s.env),
    );
    assert_eq!(result, Err(Ok(Error::Unauthorized)));

    let result = terminal.client.try_redeem_tokens_of(
        &holder,
        &holder,
        &s.project_id,
        &ONE,
        &0,
        &None,
        &String::from_str(&s.env, ""),
        &Bytes::new(&s.env),
    );
    assert_eq!(result, Err(Ok(Error::RedeemToZeroAddress)));

    let result = terminal.client.try_redeem_tokens_of(
        &holder,
        &holder,
        &s.project_id,
        &(200 * ONE),
        &(ONE + 1),
        &Some(holder.clone()),
        &String::from_str(&s.env, ""),
        &Bytes::new(&s.env),
    );
    assert_eq!(result, Err(Ok(Error::InadequateReclaimAmount)));
    assert_eq!(s.ledger.balance_of(&holder, &s.project_id), 200 * ONE);
}

#[test]
fn test_redeem_through_removed_terminal_fails() {
    let s = stack();
    let (terminal, holder) = redeemable(&s);
    s.directory
        .set_terminals_of(&s.owner, &s.project_id, &vec![&s.env]);

    let result = terminal.client.try_redeem_tokens_of(
        &holder,
        &holder,
        &s.project_id,
        &(100 * ONE),
        &0,
        &Some(holder.clone()),
        &String::from_str(&s.env, ""),
        &Bytes::new(&s.env),
    );
    assert_eq!(result, Err(Ok(Error::ProjectTerminalMismatch)));
    assert_eq!(s.ledger.balance_of(&holder, &s.project_id), 200 * ONE);
}

#[test]
fn test_operator_redeems_for_holder() {
    let s = stack();
    let (terminal, holder) = redeemable(&s);
    let operator = Address::generate(&s.env);
    s.operators.set_operator(
        &holder,
        &operator,
        &s.project_id,
        &vec![&s.env, permissions::REDEEM],
    );

    let reclaimed = terminal.client.redeem_tokens_of(
        &operator,
        &holder,
        &s.project_id,
        &(200 * ONE),
        &ONE,
        &Some(holder.clone()),
        &String::from_str(&s.env, ""),
        &Bytes::new(&s.env),
    );
    assert_eq!(reclaimed, ONE);
    assert_eq!(native_balance(&s, &terminal, &holder), ONE);
    assert_eq!(s.ledger.total_supply_of(&s.project_id), 0);
}

#[test]
fn test_redemption_delegate_receives_allocation() {
    let s = stack();
    let (terminal, holder) = redeemable(&s);
    let source = with_data_source(
        &s,
        200 * ONE,
        FundingCycleMetadata {
            redemption_rate: 10_000,
            use_data_source_for_redeem: true,
            ..Default::default()
        },
    );
    let delegate = MockDelegateClient::new(&s.env, &s.env.register(MockDelegate, ()));
    source.set_redeem_override(&RedeemOverride {
        reclaim_amount: Some(ONE / 4),
        memo: None,
        delegate_allocations: vec![
            &s.env,
            RedemptionDelegateAllocation {
                delegate: delegate.address.clone(),
                amount: ONE / 4,
            },
        ],
    });

    let reclaimed = terminal.client.redeem_tokens_of(
        &holder,
        &holder,
        &s.project_id,
        &(200 * ONE),
        &0,
        &Some(holder.clone()),
        &String::from_str(&s.env, ""),
        &Bytes::new(&s.env),
    );

    assert_eq!(reclaimed, ONE / 4);
    assert_eq!(native_balance(&s, &terminal, &holder), ONE / 4);
    assert_eq!(native_balance(&s, &terminal, &delegate.address), ONE / 4);
    assert_eq!(
        s.recorder
            .balance_of(&terminal.client.address, &s.project_id),
        ONE / 2
    );

    let data = delegate.last_redeem().unwrap();
    assert_eq!(data.forwarded_amount.value, ONE / 4);
    assert_eq!(data.reclaimed_amount.value, ONE / 4);
    assert_eq!(data.project_token_count, 200 * ONE);
}
