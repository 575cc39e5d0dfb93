// Ledger object decoder
// Flattens handler-object snapshots into typed records. Decoding is total:
// malformed or partial structure is skipped and noted, never raised. It is
// also pure - the same snapshot always yields the same records in entry order.

use crate::ledger::value::{
    entry_key, entry_value_fields, f64_field, fields_of, id_field, map_entries, object_content,
    str_field, u64_field,
};
use crate::ledger::{Address, ClaimRecord, ClaimStatus, ObjectId, OrganizationRecord};
use crate::timewindow::{LedgerDuration, LedgerInstant};
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// Sentinel for absent string fields, matching what the ledger UI showed.
const UNKNOWN: &str = "Unknown";
const NO_DESCRIPTION: &str = "No description";

// ============================================================================
// DECODE OUTCOME
// ============================================================================

/// Best-effort decode result: the records that could be read, plus soft
/// diagnostics about what could not.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecodeOutcome<T> {
    pub records: Vec<T>,
    /// Entries dropped for missing required sub-fields.
    pub skipped: usize,
    /// Human-readable notes about degraded input.
    pub notes: Vec<String>,
}

impl<T> DecodeOutcome<T> {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
            notes: Vec::new(),
        }
    }

    /// An empty outcome carrying a single note.
    pub fn with_note(note: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
            notes: vec![note.into()],
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// CLAIMS
// ============================================================================

/// Decode the claim handler's embedded claims map.
///
/// Accepts the full RPC object response or the bare content value.
pub fn decode_claims(snapshot: &Value) -> DecodeOutcome<ClaimRecord> {
    let content = object_content(snapshot);
    let fields = match fields_of(content) {
        Some(f) => f,
        None => return DecodeOutcome::with_note("claim handler snapshot has no fields"),
    };

    let entries = map_entries(fields, "claims");
    let mut outcome = DecodeOutcome::empty();

    for entry in entries {
        let key = entry_key(entry);
        let value_fields = entry_value_fields(entry);
        let (key, claim) = match (key, value_fields) {
            (Some(k), Some(v)) => (k, v),
            _ => {
                outcome.skipped += 1;
                debug!("skipping malformed claim entry");
                continue;
            }
        };

        outcome.records.push(ClaimRecord {
            claim_id: ObjectId::new(key),
            submitter: Address::new(str_field(claim, "organisation_wallet_address", UNKNOWN)),
            longitude: f64_field(claim, "longitude"),
            latitude: f64_field(claim, "latitude"),
            requested_credits: u64_field(claim, "requested_carbon_credits"),
            status: ClaimStatus::from_raw(u64_field(claim, "status")),
            ipfs_hash: str_field(claim, "ipfs_hash", "").to_string(),
            description: str_field(claim, "description", NO_DESCRIPTION).to_string(),
            time_of_issue: LedgerInstant::from_raw(u64_field(claim, "time_of_issue")),
            yes_votes: u64_field(claim, "yes_votes"),
            no_votes: u64_field(claim, "no_votes"),
            total_votes: u64_field(claim, "total_votes"),
            voting_period: LedgerDuration::from_raw(u64_field(claim, "voting_period")),
        });
    }

    if outcome.skipped > 0 {
        outcome
            .notes
            .push(format!("{} claim entries could not be read", outcome.skipped));
    }
    outcome
}

// ============================================================================
// ORGANISATIONS
// ============================================================================

/// Decode the organisation handler's embedded organisations map.
pub fn decode_organizations(snapshot: &Value) -> DecodeOutcome<OrganizationRecord> {
    let content = object_content(snapshot);
    let fields = match fields_of(content) {
        Some(f) => f,
        None => return DecodeOutcome::with_note("organisation handler snapshot has no fields"),
    };

    let entries = map_entries(fields, "organisations");
    let mut outcome = DecodeOutcome::empty();

    for entry in entries {
        let key = entry_key(entry);
        let value_fields = entry_value_fields(entry);
        let (key, org) = match (key, value_fields) {
            (Some(k), Some(v)) => (k, v),
            _ => {
                outcome.skipped += 1;
                debug!("skipping malformed organisation entry");
                continue;
            }
        };

        let owner = str_field(org, "owner", UNKNOWN);
        // The id may be wrapped as {id: "0x.."}; the map key is the fallback.
        let org_id = id_field(org, "id").unwrap_or(key);

        outcome.records.push(OrganizationRecord {
            organisation_id: ObjectId::new(org_id),
            name: str_field(org, "name", UNKNOWN).to_string(),
            description: str_field(org, "description", NO_DESCRIPTION).to_string(),
            owner: Address::new(owner),
            wallet_address: Address::new(str_field(org, "wallet_address", owner)),
            carbon_credits: u64_field(org, "carbon_credits"),
            reputation_score: u64_field(org, "reputation_score"),
            times_lent: u64_field(org, "times_lent"),
            total_lent: u64_field(org, "total_lent"),
            times_borrowed: u64_field(org, "times_borrowed"),
            total_borrowed: u64_field(org, "total_borrowed"),
            times_returned: u64_field(org, "times_returned"),
            total_returned: u64_field(org, "total_returned"),
            emissions: u64_field(org, "emissions"),
        });
    }

    if outcome.skipped > 0 {
        outcome.notes.push(format!(
            "{} organisation entries could not be read",
            outcome.skipped
        ));
    }
    outcome
}

// ============================================================================
// REGISTRATION MAP
// ============================================================================

/// The set of wallet addresses registered in the organisation handler's
/// `wallet_addressToOrg` map.
pub fn registered_addresses(snapshot: &Value) -> HashSet<Address> {
    let content = object_content(snapshot);
    let fields = match fields_of(content) {
        Some(f) => f,
        None => return HashSet::new(),
    };

    map_entries(fields, "wallet_addressToOrg")
        .iter()
        .filter_map(entry_key)
        .map(Address::new)
        .collect()
}
