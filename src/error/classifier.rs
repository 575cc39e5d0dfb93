use crate::executor::{EndpointError, SignError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// ERROR KINDS
// ============================================================================

/// Abort code the ledger returns for an invalid or missing target object.
pub const ABORT_NOT_FOUND: u64 = 0;
/// Abort code for a vote cast after the window closed.
pub const ABORT_VOTING_EXPIRED: u64 = 1;
/// Abort code for a repeat vote from the same account.
pub const ABORT_ALREADY_VOTED: u64 = 2;

/// User-facing classification of a failed (or softly-degraded) operation.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    #[error("Claim not found or invalid")]
    NotFound,

    #[error("Voting period has expired for this claim")]
    VotingExpired,

    #[error("You have already voted on this claim")]
    AlreadyVoted,

    #[error("Ledger rejected the call with abort code {0}")]
    LedgerAbort(u64),

    #[error("Signature request was cancelled in the wallet")]
    UserCancelled,

    #[error("Transaction submitted; confirmation timed out but it may still complete")]
    FinalityTimeout,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Could not read ledger data: {0}")]
    Decode(String),

    #[error("Network failure: {0}")]
    Network(String),

    #[error("{0}")]
    Unknown(String),
}

impl ErrorKind {
    /// Map a structured ledger abort code.
    pub fn from_abort_code(code: u64) -> Self {
        match code {
            ABORT_NOT_FOUND => Self::NotFound,
            ABORT_VOTING_EXPIRED => Self::VotingExpired,
            ABORT_ALREADY_VOTED => Self::AlreadyVoted,
            other => Self::LedgerAbort(other),
        }
    }

    /// Soft failures report overall success: the broadcast already happened
    /// and the transaction may still land.
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::FinalityTimeout)
    }
}

// ============================================================================
// CLASSIFIERS
// ============================================================================

/// Classify an endpoint failure. The structured abort code is preferred;
/// for endpoints that only surface text, the abort marker is parsed out of
/// the message as a fallback.
pub fn classify_endpoint_error(error: &EndpointError) -> ErrorKind {
    match error {
        EndpointError::Abort { code, .. } => ErrorKind::from_abort_code(*code),
        EndpointError::Timeout => ErrorKind::FinalityTimeout,
        EndpointError::Unreachable(msg) => ErrorKind::Network(msg.clone()),
        EndpointError::Other(msg) => match parse_abort_code(msg) {
            Some(code) => ErrorKind::from_abort_code(code),
            None => ErrorKind::Unknown(msg.clone()),
        },
    }
}

/// Classify a signing failure. A rejection is the user saying no; anything
/// else is a provider/connectivity problem.
pub fn classify_sign_error(error: &SignError) -> ErrorKind {
    match error {
        SignError::Rejected => ErrorKind::UserCancelled,
        SignError::Unavailable(msg) => ErrorKind::Network(msg.clone()),
    }
}

/// Extract an abort code from a textual failure message.
///
/// Ledger aborts render as `MoveAbort(<location>, <code>)`; the code is the
/// trailing `, N)` marker. Returns `None` unless the abort marker is present.
pub fn parse_abort_code(message: &str) -> Option<u64> {
    if !message.contains("MoveAbort") {
        return None;
    }

    let mut code = None;
    for (idx, _) in message.match_indices(", ") {
        let rest = &message[idx + 2..];
        let end = match rest.find(')') {
            Some(end) => end,
            None => continue,
        };
        if let Ok(parsed) = rest[..end].parse::<u64>() {
            code = Some(parsed);
        }
    }
    code
}
