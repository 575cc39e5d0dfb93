// Vote eligibility
// A voter may cast a vote only while connected, on someone else's claim,
// while the claim is still in the Voting status, and while the window is open.

use crate::ledger::{Address, ClaimRecord, ClaimStatus};
use crate::timewindow::{LedgerInstant, VotingWindow};

/// The outcome of an eligibility check, naming the first failing rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoteEligibility {
    /// The voter may vote on this claim.
    Eligible,
    /// No wallet account is connected.
    NotConnected,
    /// The voter submitted this claim; self-votes are never allowed.
    OwnClaim,
    /// The claim is no longer (or not yet) accepting votes.
    ClosedStatus(ClaimStatus),
    /// The voting window has elapsed.
    WindowExpired,
}

impl VoteEligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }

    /// A short explanation suitable for surfacing next to a disabled action.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Eligible => "eligible to vote",
            Self::NotConnected => "connect a wallet to vote",
            Self::OwnClaim => "you cannot vote on your own claim",
            Self::ClosedStatus(_) => "voting is closed for this claim",
            Self::WindowExpired => "the voting period has expired",
        }
    }
}

/// Evaluate whether `voter` may vote on `claim` at time `now`.
///
/// The self-vote rule is checked before status and timing, so a submitter
/// is ineligible on their own claim no matter what the clock says.
pub fn vote_eligibility(
    claim: &ClaimRecord,
    voter: Option<&Address>,
    now: LedgerInstant,
) -> VoteEligibility {
    let voter = match voter {
        Some(addr) => addr,
        None => return VoteEligibility::NotConnected,
    };

    if *voter == claim.submitter {
        return VoteEligibility::OwnClaim;
    }

    if claim.status != ClaimStatus::Voting {
        return VoteEligibility::ClosedStatus(claim.status);
    }

    if !VotingWindow::for_claim(claim).is_open_at(now) {
        return VoteEligibility::WindowExpired;
    }

    VoteEligibility::Eligible
}

/// Convenience predicate over [`vote_eligibility`].
pub fn can_vote(claim: &ClaimRecord, voter: Option<&Address>, now: LedgerInstant) -> bool {
    vote_eligibility(claim, voter, now).is_eligible()
}
