// Voting window evaluation
// A claim's window opens at its issuance instant and closes after its voting
// period. Openness is a pure function of the clock, so once a window has
// closed at time t it stays closed for every later t.

use crate::ledger::ClaimRecord;
use crate::timewindow::{LedgerDuration, LedgerInstant};
use chrono::{DateTime, Utc};

/// The closing bound of a claim's voting period.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VotingWindow {
    ends_at: LedgerInstant,
}

impl VotingWindow {
    /// Compute the window for a claim from its normalized issuance time
    /// and voting period.
    pub fn for_claim(claim: &ClaimRecord) -> Self {
        Self {
            ends_at: claim.time_of_issue.saturating_add(claim.voting_period),
        }
    }

    /// Build a window directly from an issuance instant and period.
    pub fn new(issued_at: LedgerInstant, period: LedgerDuration) -> Self {
        Self {
            ends_at: issued_at.saturating_add(period),
        }
    }

    /// The instant at which voting closes.
    pub fn ends_at(&self) -> LedgerInstant {
        self.ends_at
    }

    /// Whether the window is still open at `now`. The window includes its
    /// closing instant.
    pub fn is_open_at(&self, now: LedgerInstant) -> bool {
        now <= self.ends_at
    }

    /// Whether the window is open against the system clock.
    pub fn is_open(&self) -> bool {
        self.is_open_at(LedgerInstant::now())
    }

    /// Time left before the window closes, or `None` once it has closed.
    pub fn remaining(&self, now: LedgerInstant) -> Option<LedgerDuration> {
        if self.is_open_at(now) {
            now.until(self.ends_at)
        } else {
            None
        }
    }

    /// The closing instant as a calendar datetime for display.
    pub fn ends_at_utc(&self) -> Option<DateTime<Utc>> {
        self.ends_at.to_datetime()
    }
}
