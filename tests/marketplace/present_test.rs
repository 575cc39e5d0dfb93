use carbonlink::ledger::{Address, ClaimStatus};
use carbonlink::marketplace::{
    format_duration_days, short_address, status_badge, voting_deadline_phrase, BadgeTone,
    ReputationTier,
};
use carbonlink::timewindow::{LedgerDuration, LedgerInstant, VotingWindow};

// ============================================================================
// BADGE TESTS
// ============================================================================

/// Test: each claim status maps to its badge label and tone
#[test]
fn test_status_badges() {
    assert_eq!(status_badge(ClaimStatus::Voting).label, "Voting");
    assert_eq!(status_badge(ClaimStatus::Voting).tone, BadgeTone::Orange);
    assert_eq!(status_badge(ClaimStatus::Approved).tone, BadgeTone::Green);
    assert_eq!(status_badge(ClaimStatus::Rejected).tone, BadgeTone::Red);
    assert_eq!(status_badge(ClaimStatus::Unknown).tone, BadgeTone::Gray);
}

/// Test: reputation tiers band at 80 and 50
#[test]
fn test_reputation_tiers() {
    assert_eq!(ReputationTier::from_score(100), ReputationTier::Excellent);
    assert_eq!(ReputationTier::from_score(80), ReputationTier::Excellent);
    assert_eq!(ReputationTier::from_score(79), ReputationTier::Good);
    assert_eq!(ReputationTier::from_score(50), ReputationTier::Good);
    assert_eq!(
        ReputationTier::from_score(49),
        ReputationTier::NeedsImprovement
    );
    assert_eq!(ReputationTier::Good.badge().label, "Good");
}

// ============================================================================
// FORMATTING TESTS
// ============================================================================

/// Test: addresses abbreviate for table cells
#[test]
fn test_short_address() {
    let address = Address::new("0x3e93f9c3174505789f34825c4833e59a");
    assert_eq!(short_address(&address), "0x3e93...e59a");
}

/// Test: durations render in whole days with pluralization
#[test]
fn test_format_duration_days() {
    assert_eq!(format_duration_days(LedgerDuration::from_seconds(86_400)), "1 day");
    assert_eq!(
        format_duration_days(LedgerDuration::from_seconds(604_800)),
        "7 days"
    );
    assert_eq!(format_duration_days(LedgerDuration::from_seconds(3_600)), "0 days");
}

/// Test: deadline phrasing flips from "ends in" to "ended ... ago"
#[test]
fn test_voting_deadline_phrase() {
    let window = VotingWindow::new(
        LedgerInstant::from_seconds(1_700_000_000),
        LedgerDuration::from_seconds(604_800),
    );

    let before = LedgerInstant::from_seconds(1_700_000_000 + 604_800 - 2 * 86_400);
    assert_eq!(voting_deadline_phrase(&window, before), "ends in about 2 days");

    let after = LedgerInstant::from_seconds(1_700_000_000 + 604_800 + 2 * 3_600);
    assert_eq!(
        voting_deadline_phrase(&window, after),
        "ended about 2 hours ago"
    );

    let closing = window.ends_at();
    assert_eq!(
        voting_deadline_phrase(&window, closing),
        "ends in less than a minute"
    );
}
