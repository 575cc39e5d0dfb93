use carbonlink::call::CallBuilder;
use carbonlink::error::ErrorKind;
use carbonlink::executor::{
    EndpointError, ExecutionPhase, LedgerEvent, MockConfirmation, MockLedgerEndpoint, MockWallet,
    TransactionExecutor,
};
use carbonlink::ledger::Address;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// FIXTURES
// ============================================================================

fn vote_call() -> carbonlink::call::CallDescription {
    CallBuilder::new()
        .target("0xpkg::carbon_marketplace::vote_on_a_claim")
        .u64(1)
        .build()
        .unwrap()
}

fn voted_event() -> LedgerEvent {
    LedgerEvent::new(
        "0xpkg::carbon_marketplace::ClaimVoted",
        json!({"claim_id": "0xclaim", "vote": 1}),
    )
}

fn executor(
    wallet: MockWallet,
    endpoint: MockLedgerEndpoint,
) -> TransactionExecutor<MockWallet, MockLedgerEndpoint> {
    TransactionExecutor::new(Arc::new(wallet), Arc::new(endpoint))
}

// ============================================================================
// PHASE TRANSITION TESTS
// ============================================================================

/// Test: only the documented phase transitions are legal
#[test]
fn test_phase_transitions() {
    use ExecutionPhase::*;

    assert!(Idle.can_transition_to(Signing));
    assert!(Signing.can_transition_to(Broadcasting));
    assert!(Signing.can_transition_to(Failed));
    assert!(Broadcasting.can_transition_to(Confirming));
    assert!(Confirming.can_transition_to(Succeeded));
    assert!(Confirming.can_transition_to(Failed));

    assert!(!Idle.can_transition_to(Broadcasting));
    assert!(!Signing.can_transition_to(Succeeded));
    assert!(!Broadcasting.can_transition_to(Succeeded), "Confirmation cannot be skipped");
    assert!(!Succeeded.can_transition_to(Failed));

    assert!(Succeeded.is_terminal());
    assert!(Failed.is_terminal());
    assert!(!Confirming.is_terminal());
}

// ============================================================================
// SUBMISSION TESTS
// ============================================================================

/// Test: the happy path signs, broadcasts, confirms, and extracts the event
#[tokio::test]
async fn test_submit_success() {
    let wallet = MockWallet::approving(Address::new("0xvoter"));
    let endpoint =
        MockLedgerEndpoint::new().with_confirmation(MockConfirmation::Events(vec![voted_event()]));
    let mut executor = executor(wallet, endpoint);

    let report = executor.submit(vote_call(), "ClaimVoted").await;

    assert!(report.is_success());
    assert_eq!(report.phase(), ExecutionPhase::Succeeded);
    assert!(report.digest().is_some());
    assert!(report.notice().is_none());
    let event = report.event().expect("Completion event extracted");
    assert_eq!(event.payload()["claim_id"], "0xclaim");
}

/// Test: a wallet rejection fails before broadcast with UserCancelled
#[tokio::test]
async fn test_submit_wallet_rejection() {
    let wallet = MockWallet::rejecting(Address::new("0xvoter"));
    let endpoint = MockLedgerEndpoint::new();
    let mut executor = executor(wallet, endpoint);

    let report = executor.submit(vote_call(), "ClaimVoted").await;

    assert!(!report.is_success());
    assert_eq!(report.failure(), Some(&ErrorKind::UserCancelled));
    assert!(report.digest().is_none(), "Nothing was broadcast");
}

/// Test: a slow wallet is waited on without any bound
#[tokio::test]
async fn test_submit_waits_for_slow_wallet() {
    let wallet = MockWallet::approving(Address::new("0xvoter")).with_delay_ms(100);
    let endpoint =
        MockLedgerEndpoint::new().with_confirmation(MockConfirmation::Events(vec![voted_event()]));
    let mut executor = executor(wallet, endpoint).with_finality_timeout(Duration::from_millis(10));

    // The finality timeout is far shorter than the wallet delay; it must not
    // apply to the signing wait.
    let report = executor.submit(vote_call(), "ClaimVoted").await;
    assert!(report.is_success());
    assert!(report.event().is_some());
}

/// Test: a broadcast failure is classified and terminal
#[tokio::test]
async fn test_submit_broadcast_failure() {
    let wallet = MockWallet::approving(Address::new("0xvoter"));
    let endpoint = MockLedgerEndpoint::new()
        .with_broadcast_failure(EndpointError::Unreachable("connection refused".to_string()));
    let mut executor = executor(wallet, endpoint);

    let report = executor.submit(vote_call(), "ClaimVoted").await;

    assert!(!report.is_success());
    assert!(matches!(report.failure(), Some(ErrorKind::Network(_))));
}

/// Test: a structured abort during confirmation maps to its domain error
#[tokio::test]
async fn test_submit_confirmation_abort() {
    let wallet = MockWallet::approving(Address::new("0xvoter"));
    let endpoint = MockLedgerEndpoint::new().with_confirmation(MockConfirmation::Fail(
        EndpointError::Abort {
            code: 2,
            message: "already voted".to_string(),
        },
    ));
    let mut executor = executor(wallet, endpoint);

    let report = executor.submit(vote_call(), "ClaimVoted").await;

    assert!(!report.is_success());
    assert_eq!(report.failure(), Some(&ErrorKind::AlreadyVoted));
    assert!(report.digest().is_some(), "The broadcast did happen");
}

/// Test: a confirmation that never arrives is a soft success with a notice
#[tokio::test]
async fn test_submit_finality_timeout_soft_success() {
    let wallet = MockWallet::approving(Address::new("0xvoter"));
    let endpoint = MockLedgerEndpoint::new().with_confirmation(MockConfirmation::Hang);
    let mut executor = executor(wallet, endpoint).with_finality_timeout(Duration::from_millis(50));

    let report = executor.submit(vote_call(), "ClaimVoted").await;

    assert!(report.is_success(), "Timeout after broadcast is not a failure");
    assert!(report.digest().is_some());
    assert!(report.event().is_none());
    let notice = report.notice().expect("Soft outcome carries a notice");
    assert!(notice.contains("may still complete"), "got: {notice}");
}

/// Test: a confirmed call missing its completion event still succeeds (Scenario E)
#[tokio::test]
async fn test_submit_missing_event_still_succeeds() {
    let unrelated = LedgerEvent::new("0xpkg::carbon_marketplace::SomethingElse", json!({}));
    let wallet = MockWallet::approving(Address::new("0xvoter"));
    let endpoint =
        MockLedgerEndpoint::new().with_confirmation(MockConfirmation::Events(vec![unrelated]));
    let mut executor = executor(wallet, endpoint);

    let report = executor.submit(vote_call(), "ClaimVoted").await;

    assert!(report.is_success());
    assert!(report.event().is_none());
    let notice = report.notice().expect("Missing event leaves a notice");
    assert!(notice.contains("ClaimVoted"), "got: {notice}");
}

/// Test: an executor can be reused for a second submission
#[tokio::test]
async fn test_executor_reuse() {
    let wallet = MockWallet::approving(Address::new("0xvoter"));
    let endpoint =
        MockLedgerEndpoint::new().with_confirmation(MockConfirmation::Events(vec![voted_event()]));
    let mut executor = executor(wallet, endpoint);

    let first = executor.submit(vote_call(), "ClaimVoted").await;
    assert!(first.is_success());

    let second = executor.submit(vote_call(), "ClaimVoted").await;
    assert!(second.is_success());
    assert_eq!(executor.phase(), ExecutionPhase::Succeeded);
}

// ============================================================================
// READ PATH TESTS
// ============================================================================

/// Test: read evaluates via simulation without prompting the wallet
#[tokio::test]
async fn test_read_simulated() {
    let wallet = MockWallet::rejecting(Address::new("0xvoter")); // would fail any sign request
    let endpoint = MockLedgerEndpoint::new().with_simulation(
        "get_all_organisation_ids",
        Ok(vec![LedgerEvent::new(
            "0xpkg::carbon_marketplace::OrganisationIDsEvent",
            json!({"ids": ["0x11"]}),
        )]),
    );
    let executor = executor(wallet, endpoint);

    let call = CallBuilder::new()
        .target("0xpkg::carbon_marketplace::get_all_organisation_ids")
        .build()
        .unwrap();
    let event = executor
        .read(&call, "OrganisationIDsEvent")
        .await
        .expect("Simulation should succeed");
    assert_eq!(event.payload()["ids"][0], "0x11");
}

/// Test: read requires a connected account
#[tokio::test]
async fn test_read_requires_connection() {
    let executor = executor(MockWallet::disconnected(), MockLedgerEndpoint::new());
    let call = CallBuilder::new().target("0xpkg::m::f").build().unwrap();

    let result = executor.read(&call, "AnyEvent").await;
    assert!(matches!(result, Err(ErrorKind::Validation(_))));
}
