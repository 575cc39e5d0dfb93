// Event payload shapes
// Completion events carry JSON payloads whose integer fields may be encoded
// as numbers or as decimal strings, depending on the RPC node. The wire
// structs here absorb that and convert into the typed records, resolving
// time units once at the boundary.

use crate::ledger::{Address, ClaimRecord, ClaimStatus, ObjectId, OrganizationRecord};
use crate::timewindow::{LedgerDuration, LedgerInstant};
use serde::{Deserialize, Deserializer};

/// Deserialize a u64 that may arrive as a JSON number or a decimal string.
fn u64_compat<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Text(s) => Ok(s.parse::<u64>().unwrap_or(0)),
    }
}

/// Deserialize an f64 that may arrive as a JSON number or a numeric string.
fn f64_compat<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Text(s) => Ok(s.parse::<f64>().unwrap_or(0.0)),
    }
}

// ============================================================================
// CLAIM EVENTS
// ============================================================================

/// One claim as carried inside `AllClaimsEvent`.
#[derive(Clone, Debug, Deserialize)]
pub struct ClaimWire {
    pub claim_id: String,
    pub organisation_wallet_address: String,
    #[serde(deserialize_with = "f64_compat", default)]
    pub longitude: f64,
    #[serde(deserialize_with = "f64_compat", default)]
    pub latitude: f64,
    #[serde(deserialize_with = "u64_compat", default)]
    pub requested_carbon_credits: u64,
    #[serde(deserialize_with = "u64_compat", default)]
    pub status: u64,
    #[serde(default)]
    pub ipfs_hash: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "u64_compat", default)]
    pub time_of_issue: u64,
    #[serde(deserialize_with = "u64_compat", default)]
    pub yes_votes: u64,
    #[serde(deserialize_with = "u64_compat", default)]
    pub no_votes: u64,
    #[serde(deserialize_with = "u64_compat", default)]
    pub total_votes: u64,
    #[serde(deserialize_with = "u64_compat", default)]
    pub voting_period: u64,
}

impl From<ClaimWire> for ClaimRecord {
    fn from(wire: ClaimWire) -> Self {
        ClaimRecord {
            claim_id: ObjectId::new(wire.claim_id),
            submitter: Address::new(wire.organisation_wallet_address),
            longitude: wire.longitude,
            latitude: wire.latitude,
            requested_credits: wire.requested_carbon_credits,
            status: ClaimStatus::from_raw(wire.status),
            ipfs_hash: wire.ipfs_hash,
            description: wire.description,
            time_of_issue: LedgerInstant::from_raw(wire.time_of_issue),
            yes_votes: wire.yes_votes,
            no_votes: wire.no_votes,
            total_votes: wire.total_votes,
            voting_period: LedgerDuration::from_raw(wire.voting_period),
        }
    }
}

/// Payload of `AllClaimsEvent`.
#[derive(Clone, Debug, Deserialize)]
pub struct AllClaimsEvent {
    #[serde(default)]
    pub claims: Vec<ClaimWire>,
}

/// Payload of `ClaimCreated`.
#[derive(Clone, Debug, Deserialize)]
pub struct ClaimCreatedEvent {
    pub claim_id: String,
}

// ============================================================================
// ORGANISATION EVENTS
// ============================================================================

/// Payload of `OrganisationDetailsEvent`.
#[derive(Clone, Debug, Deserialize)]
pub struct OrganisationWire {
    pub organisation_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub wallet_address: String,
    #[serde(deserialize_with = "u64_compat", default)]
    pub carbon_credits: u64,
    #[serde(deserialize_with = "u64_compat", default)]
    pub reputation_score: u64,
    #[serde(deserialize_with = "u64_compat", default)]
    pub times_lent: u64,
    #[serde(deserialize_with = "u64_compat", default)]
    pub total_lent: u64,
    #[serde(deserialize_with = "u64_compat", default)]
    pub times_borrowed: u64,
    #[serde(deserialize_with = "u64_compat", default)]
    pub total_borrowed: u64,
    #[serde(deserialize_with = "u64_compat", default)]
    pub times_returned: u64,
    #[serde(deserialize_with = "u64_compat", default)]
    pub total_returned: u64,
    #[serde(deserialize_with = "u64_compat", default)]
    pub emissions: u64,
}

impl From<OrganisationWire> for OrganizationRecord {
    fn from(wire: OrganisationWire) -> Self {
        // Some event payloads omit the wallet address; fall back to the owner.
        let wallet = if wire.wallet_address.is_empty() {
            wire.owner.clone()
        } else {
            wire.wallet_address
        };
        OrganizationRecord {
            organisation_id: ObjectId::new(wire.organisation_id),
            name: wire.name,
            description: wire.description,
            owner: Address::new(wire.owner),
            wallet_address: Address::new(wallet),
            carbon_credits: wire.carbon_credits,
            reputation_score: wire.reputation_score,
            times_lent: wire.times_lent,
            total_lent: wire.total_lent,
            times_borrowed: wire.times_borrowed,
            total_borrowed: wire.total_borrowed,
            times_returned: wire.times_returned,
            total_returned: wire.total_returned,
            emissions: wire.emissions,
        }
    }
}

/// Payload of `OrganisationIDsEvent`.
#[derive(Clone, Debug, Deserialize)]
pub struct OrganisationIdsEvent {
    #[serde(default)]
    pub ids: Vec<String>,
}
