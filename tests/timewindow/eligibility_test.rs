use carbonlink::ledger::{Address, ClaimRecord, ClaimStatus, ObjectId};
use carbonlink::timewindow::{
    can_vote, vote_eligibility, LedgerDuration, LedgerInstant, VoteEligibility,
};

// ============================================================================
// FIXTURES
// ============================================================================

fn open_claim(submitter: &str) -> ClaimRecord {
    ClaimRecord {
        claim_id: ObjectId::new("0xclaim"),
        submitter: Address::new(submitter),
        longitude: 12.0,
        latitude: 34.0,
        requested_credits: 100,
        status: ClaimStatus::Voting,
        ipfs_hash: "QmHash".to_string(),
        description: "Mangrove restoration".to_string(),
        time_of_issue: LedgerInstant::from_seconds(1_700_000_000),
        yes_votes: 0,
        no_votes: 0,
        total_votes: 0,
        voting_period: LedgerDuration::from_seconds(604_800),
    }
}

fn during_window() -> LedgerInstant {
    LedgerInstant::from_seconds(1_700_000_000 + 3_600)
}

fn after_window() -> LedgerInstant {
    LedgerInstant::from_seconds(1_700_000_000 + 604_800 + 1)
}

// ============================================================================
// ELIGIBILITY TESTS
// ============================================================================

/// Test: a connected non-submitter may vote while the window is open
#[test]
fn test_eligible_voter() {
    let claim = open_claim("0xsubmitter");
    let voter = Address::new("0xvoter");
    assert_eq!(
        vote_eligibility(&claim, Some(&voter), during_window()),
        VoteEligibility::Eligible
    );
    assert!(can_vote(&claim, Some(&voter), during_window()));
}

/// Test: no connected account means no vote
#[test]
fn test_not_connected() {
    let claim = open_claim("0xsubmitter");
    assert_eq!(
        vote_eligibility(&claim, None, during_window()),
        VoteEligibility::NotConnected
    );
}

/// Test: the submitter can never vote on their own claim, regardless of
/// time or status
#[test]
fn test_self_vote_excluded() {
    let mut claim = open_claim("0xsubmitter");
    let submitter = Address::new("0xSUBMITTER"); // case differs, same account

    assert_eq!(
        vote_eligibility(&claim, Some(&submitter), during_window()),
        VoteEligibility::OwnClaim
    );
    assert_eq!(
        vote_eligibility(&claim, Some(&submitter), after_window()),
        VoteEligibility::OwnClaim
    );

    claim.status = ClaimStatus::Approved;
    assert_eq!(
        vote_eligibility(&claim, Some(&submitter), during_window()),
        VoteEligibility::OwnClaim,
        "Self-vote rule precedes status"
    );
}

/// Test: an approved claim cannot be voted on even inside its window (Scenario B)
#[test]
fn test_closed_status_blocks_vote() {
    let mut claim = open_claim("0xsubmitter");
    claim.status = ClaimStatus::Approved;
    let voter = Address::new("0xvoter");

    assert_eq!(
        vote_eligibility(&claim, Some(&voter), during_window()),
        VoteEligibility::ClosedStatus(ClaimStatus::Approved)
    );
    assert!(!can_vote(&claim, Some(&voter), during_window()));
}

/// Test: an expired window blocks the vote
#[test]
fn test_expired_window_blocks_vote() {
    let claim = open_claim("0xsubmitter");
    let voter = Address::new("0xvoter");

    assert_eq!(
        vote_eligibility(&claim, Some(&voter), after_window()),
        VoteEligibility::WindowExpired
    );
}

/// Test: every ineligible outcome carries a display reason
#[test]
fn test_reasons_present() {
    for outcome in [
        VoteEligibility::NotConnected,
        VoteEligibility::OwnClaim,
        VoteEligibility::ClosedStatus(ClaimStatus::Rejected),
        VoteEligibility::WindowExpired,
    ] {
        assert!(!outcome.reason().is_empty());
        assert!(!outcome.is_eligible());
    }
}
