// Presentation helpers
// Badge tones, reputation tiers, and human phrasing for voting deadlines.
// Pure mappings; rendering itself lives outside this crate.

use crate::ledger::{Address, ClaimStatus};
use crate::timewindow::{LedgerDuration, LedgerInstant, VotingWindow};

// ============================================================================
// BADGES
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeTone {
    Orange,
    Green,
    Red,
    Yellow,
    Gray,
}

/// A status badge: label plus tone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub tone: BadgeTone,
}

/// Total mapping from claim status to its badge; unrecognized status codes
/// already collapsed to `Unknown` at decode.
pub fn status_badge(status: ClaimStatus) -> Badge {
    match status {
        ClaimStatus::Voting => Badge {
            label: "Voting",
            tone: BadgeTone::Orange,
        },
        ClaimStatus::Approved => Badge {
            label: "Approved",
            tone: BadgeTone::Green,
        },
        ClaimStatus::Rejected => Badge {
            label: "Rejected",
            tone: BadgeTone::Red,
        },
        ClaimStatus::Unknown => Badge {
            label: "Unknown",
            tone: BadgeTone::Gray,
        },
    }
}

// ============================================================================
// REPUTATION
// ============================================================================

/// Coarse reputation banding for the organisation directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReputationTier {
    Excellent,
    Good,
    NeedsImprovement,
}

impl ReputationTier {
    pub fn from_score(score: u64) -> Self {
        if score >= 80 {
            Self::Excellent
        } else if score >= 50 {
            Self::Good
        } else {
            Self::NeedsImprovement
        }
    }

    pub fn badge(&self) -> Badge {
        match self {
            Self::Excellent => Badge {
                label: "Excellent",
                tone: BadgeTone::Green,
            },
            Self::Good => Badge {
                label: "Good",
                tone: BadgeTone::Yellow,
            },
            Self::NeedsImprovement => Badge {
                label: "Needs Improvement",
                tone: BadgeTone::Red,
            },
        }
    }
}

// ============================================================================
// FORMATTING
// ============================================================================

/// Abbreviated address for table cells.
pub fn short_address(address: &Address) -> String {
    address.short()
}

/// "7 days" style rendering of a lending or voting duration.
pub fn format_duration_days(duration: LedgerDuration) -> String {
    let days = duration.as_days();
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}

/// Human phrasing of a voting deadline relative to `now`.
pub fn voting_deadline_phrase(window: &VotingWindow, now: LedgerInstant) -> String {
    match window.remaining(now) {
        Some(remaining) => format!("ends in {}", humanize(remaining)),
        None => match window.ends_at().until(now) {
            Some(elapsed) => format!("ended {} ago", humanize(elapsed)),
            None => "ended just now".to_string(),
        },
    }
}

fn humanize(duration: LedgerDuration) -> String {
    let secs = duration.as_seconds();
    if secs >= 86_400 {
        let days = secs / 86_400;
        format!("about {} day{}", days, if days == 1 { "" } else { "s" })
    } else if secs >= 3_600 {
        let hours = secs / 3_600;
        format!("about {} hour{}", hours, if hours == 1 { "" } else { "s" })
    } else if secs >= 60 {
        let minutes = secs / 60;
        format!(
            "about {} minute{}",
            minutes,
            if minutes == 1 { "" } else { "s" }
        )
    } else {
        "less than a minute".to_string()
    }
}
