use carbonlink::error::ErrorKind;
use carbonlink::ledger::{
    Address, ClaimRecord, ClaimStatus, DecodeOutcome, ObjectId, OrganizationRecord,
};
use carbonlink::marketplace::{MarketplaceView, ViewUpdate};
use carbonlink::timewindow::{LedgerDuration, LedgerInstant};

// ============================================================================
// FIXTURES
// ============================================================================

fn sample_claim() -> ClaimRecord {
    ClaimRecord {
        claim_id: ObjectId::new("0xclaim"),
        submitter: Address::new("0xsubmitter"),
        longitude: 1.0,
        latitude: 2.0,
        requested_credits: 100,
        status: ClaimStatus::Voting,
        ipfs_hash: "QmHash".to_string(),
        description: "Peatland protection".to_string(),
        time_of_issue: LedgerInstant::from_seconds(1_700_000_000),
        yes_votes: 0,
        no_votes: 0,
        total_votes: 0,
        voting_period: LedgerDuration::from_seconds(604_800),
    }
}

fn sample_org() -> OrganizationRecord {
    OrganizationRecord {
        organisation_id: ObjectId::new("0x11"),
        name: "Acme Carbon".to_string(),
        description: "Offsets".to_string(),
        owner: Address::new("0xowner"),
        wallet_address: Address::new("0xowner"),
        carbon_credits: 1000,
        reputation_score: 85,
        times_lent: 0,
        total_lent: 0,
        times_borrowed: 0,
        total_borrowed: 0,
        times_returned: 0,
        total_returned: 0,
        emissions: 0,
    }
}

fn claims_outcome() -> DecodeOutcome<ClaimRecord> {
    let mut outcome = DecodeOutcome::empty();
    outcome.records.push(sample_claim());
    outcome
}

fn loaded_view() -> MarketplaceView {
    MarketplaceView::new().apply(ViewUpdate::ClaimsLoaded {
        outcome: claims_outcome(),
        at: LedgerInstant::from_seconds(1_700_000_100),
    })
}

// ============================================================================
// REDUCER TESTS
// ============================================================================

/// Test: applying an update never mutates the previous view
#[test]
fn test_apply_is_pure() {
    let before = MarketplaceView::new();
    let after = before.apply(ViewUpdate::LoadStarted);

    assert!(!before.is_loading());
    assert!(after.is_loading());
}

/// Test: a claims load populates the listing and stamps the refresh time
#[test]
fn test_claims_loaded() {
    let view = MarketplaceView::new()
        .apply(ViewUpdate::LoadStarted)
        .apply(ViewUpdate::ClaimsLoaded {
            outcome: claims_outcome(),
            at: LedgerInstant::from_seconds(1_700_000_100),
        });

    assert!(!view.is_loading());
    assert_eq!(view.claims().len(), 1);
    assert_eq!(
        view.refreshed_at(),
        Some(LedgerInstant::from_seconds(1_700_000_100))
    );
    assert!(view.notice().is_none());
}

/// Test: a degraded load surfaces its first note as the visible notice
#[test]
fn test_degraded_load_surfaces_note() {
    let outcome: DecodeOutcome<ClaimRecord> = DecodeOutcome::with_note("2 entries skipped");
    let view = MarketplaceView::new().apply(ViewUpdate::ClaimsLoaded {
        outcome,
        at: LedgerInstant::from_seconds(1_700_000_100),
    });

    assert_eq!(view.notice(), Some("2 entries skipped"));
}

/// Test: organisations and claims are independent slices of the view
#[test]
fn test_organisations_loaded() {
    let mut outcome = DecodeOutcome::empty();
    outcome.records.push(sample_org());

    let view = loaded_view().apply(ViewUpdate::OrganisationsLoaded {
        outcome,
        at: LedgerInstant::from_seconds(1_700_000_200),
    });

    assert_eq!(view.claims().len(), 1, "Claims survive an organisation load");
    assert_eq!(view.organisations().len(), 1);
}

/// Test: the connected wallet's own organisation is tracked separately
#[test]
fn test_my_organisation_loaded() {
    let view = MarketplaceView::new().apply(ViewUpdate::MyOrganisationLoaded(sample_org()));
    assert_eq!(view.my_organisation().map(|o| o.name.as_str()), Some("Acme Carbon"));
    assert!(view.organisations().is_empty());
}

// ============================================================================
// FAILURE DEGRADATION TESTS
// ============================================================================

/// Test: a hard failure clears the listings and shows the error message
#[test]
fn test_hard_failure_clears_listings() {
    let view = loaded_view().apply(ViewUpdate::Failed(ErrorKind::Network(
        "connection refused".to_string(),
    )));

    assert!(view.claims().is_empty());
    assert!(!view.is_loading());
    let notice = view.notice().expect("Failure is surfaced");
    assert!(notice.contains("connection refused"));
}

/// Test: a soft failure keeps the listings (Scenario F style outcome)
#[test]
fn test_soft_failure_keeps_listings() {
    let view = loaded_view().apply(ViewUpdate::Failed(ErrorKind::FinalityTimeout));

    assert_eq!(view.claims().len(), 1, "Soft failures do not discard data");
    assert!(view.notice().expect("Notice shown").contains("may still complete"));
}

/// Test: dismissing the notice removes it and nothing else
#[test]
fn test_dismiss_notice() {
    let view = loaded_view()
        .apply(ViewUpdate::Failed(ErrorKind::FinalityTimeout))
        .apply(ViewUpdate::DismissNotice);

    assert!(view.notice().is_none());
    assert_eq!(view.claims().len(), 1);
}
