use crate::timewindow::{LedgerDuration, LedgerInstant};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ADDRESS
// ============================================================================

/// A participant wallet address (`0x`-prefixed hex). Comparison is
/// case-insensitive; the stored form is lowercased.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// Create an address, normalizing case.
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into().to_lowercase())
    }

    /// The full address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for display: first six and last four characters.
    /// Counts characters, not bytes; snapshot strings are not guaranteed to
    /// be ASCII.
    pub fn short(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 10 {
            return self.0.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// ============================================================================
// OBJECT ID
// ============================================================================

/// Identifier of a ledger-resident object (handler, claim, organisation).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// ============================================================================
// CLAIM STATUS
// ============================================================================

/// Lifecycle status of a claim. The ledger is the only authority over status;
/// the client maps the raw code for presentation and never writes it back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Accepting votes (raw 0).
    Voting,
    /// Approved by vote (raw 1).
    Approved,
    /// Rejected by vote (raw 2).
    Rejected,
    /// Any raw code the client does not recognize.
    Unknown,
}

impl ClaimStatus {
    /// Total mapping from the ledger's raw status code.
    pub fn from_raw(raw: u64) -> Self {
        match raw {
            0 => Self::Voting,
            1 => Self::Approved,
            2 => Self::Rejected,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Voting => "Voting",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// CLAIM RECORD
// ============================================================================

/// A carbon-credit claim projected from a ledger snapshot or event payload.
///
/// Derived data: rebuilt on every decode pass and discarded on refresh. Vote
/// totals are ledger-computed (`total = yes + no` is enforced there and not
/// re-validated here).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub claim_id: ObjectId,
    /// Wallet address of the submitting organisation.
    pub submitter: Address,
    pub longitude: f64,
    pub latitude: f64,
    pub requested_credits: u64,
    pub status: ClaimStatus,
    /// IPFS hash of the supporting evidence.
    pub ipfs_hash: String,
    pub description: String,
    pub time_of_issue: LedgerInstant,
    pub yes_votes: u64,
    pub no_votes: u64,
    pub total_votes: u64,
    pub voting_period: LedgerDuration,
}

// ============================================================================
// ORGANISATION RECORD
// ============================================================================

/// A registered organisation projected from the organisation handler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRecord {
    pub organisation_id: ObjectId,
    pub name: String,
    pub description: String,
    pub owner: Address,
    pub wallet_address: Address,
    pub carbon_credits: u64,
    /// 0-100, maintained by the ledger.
    pub reputation_score: u64,
    pub times_lent: u64,
    pub total_lent: u64,
    pub times_borrowed: u64,
    pub total_borrowed: u64,
    pub times_returned: u64,
    pub total_returned: u64,
    pub emissions: u64,
}
