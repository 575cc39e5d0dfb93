// Marketplace client
// The full call surface: claim submission and voting, claim discovery,
// organisation registration and lookup, and lend requests. Each write builds
// a call description and hands it to a fresh transaction executor; reads go
// either through direct object snapshots or simulated execution.

use crate::call::{CallBuilder, CallDescription};
use crate::error::ErrorKind;
use crate::executor::{
    EventExtractor, ExecutionReport, LedgerEndpoint, SigningProvider, TransactionExecutor,
    TxDigest,
};
use crate::ledger::{
    decode_claims, decode_organizations, registered_addresses, Address, AllClaimsEvent,
    ClaimCreatedEvent, ClaimRecord, DecodeOutcome, ObjectId, OrganisationIdsEvent,
    OrganisationWire, OrganizationRecord,
};
use crate::marketplace::MarketplaceConfig;
use crate::timewindow::{vote_eligibility, LedgerInstant, VoteEligibility};
use std::sync::Arc;
use tracing::debug;

// ============================================================================
// DRAFTS
// ============================================================================

/// Form input for a new claim, validated before any call is built.
#[derive(Clone, Debug)]
pub struct ClaimDraft {
    pub longitude: u64,
    pub latitude: u64,
    pub requested_credits: u64,
    pub ipfs_hash: String,
    pub description: String,
    /// Initial status code submitted with the claim.
    pub status: u64,
    /// Voting period in whole seconds.
    pub voting_period_secs: u64,
}

impl ClaimDraft {
    /// A draft with the customary seven-day voting period.
    pub fn new(longitude: u64, latitude: u64, requested_credits: u64) -> Self {
        Self {
            longitude,
            latitude,
            requested_credits,
            ipfs_hash: String::new(),
            description: String::new(),
            status: 1,
            voting_period_secs: 604_800,
        }
    }

    pub fn with_ipfs_hash(mut self, hash: impl Into<String>) -> Self {
        self.ipfs_hash = hash.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_voting_period_secs(mut self, secs: u64) -> Self {
        self.voting_period_secs = secs;
        self
    }

    fn validate(&self) -> Result<(), ErrorKind> {
        if self.ipfs_hash.trim().is_empty() || self.description.trim().is_empty() {
            return Err(ErrorKind::Validation("all fields are required".to_string()));
        }
        if self.requested_credits == 0 {
            return Err(ErrorKind::Validation(
                "requested credits must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Form input for a lend request.
#[derive(Clone, Debug)]
pub struct LendRequestDraft {
    pub organisation_id: ObjectId,
    /// Owner of the borrowing organisation, used to refuse self-lending.
    pub organisation_owner: Address,
    pub amount: u64,
    /// Lending duration in whole seconds.
    pub duration_secs: u64,
}

impl LendRequestDraft {
    pub fn new(organisation_id: ObjectId, organisation_owner: Address, amount: u64) -> Self {
        Self {
            organisation_id,
            organisation_owner,
            amount,
            duration_secs: 604_800,
        }
    }

    pub fn with_duration_secs(mut self, secs: u64) -> Self {
        self.duration_secs = secs;
        self
    }

    fn validate(&self, lender: &Address) -> Result<(), ErrorKind> {
        if self.amount == 0 {
            return Err(ErrorKind::Validation(
                "amount must be a positive whole number".to_string(),
            ));
        }
        if *lender == self.organisation_owner {
            return Err(ErrorKind::Validation(
                "cannot lend to your own organisation".to_string(),
            ));
        }
        Ok(())
    }
}

/// A yes/no vote, encoded as the ledger expects (1 = yes, 0 = no).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteChoice {
    Yes,
    No,
}

impl VoteChoice {
    pub fn as_raw(&self) -> u64 {
        match self {
            Self::Yes => 1,
            Self::No => 0,
        }
    }
}

/// Result of a successful claim submission.
#[derive(Clone, Debug)]
pub struct ClaimReceipt {
    pub digest: Option<TxDigest>,
    /// The new claim's id, when the completion event was located.
    pub claim_id: Option<ObjectId>,
    pub notice: Option<String>,
}

// ============================================================================
// CLIENT
// ============================================================================

/// High-level marketplace operations over a wallet and a ledger endpoint.
pub struct MarketplaceClient<W, L> {
    config: MarketplaceConfig,
    wallet: Arc<W>,
    endpoint: Arc<L>,
}

impl<W, L> MarketplaceClient<W, L>
where
    W: SigningProvider,
    L: LedgerEndpoint,
{
    pub fn new(config: MarketplaceConfig, wallet: Arc<W>, endpoint: Arc<L>) -> Self {
        Self {
            config,
            wallet,
            endpoint,
        }
    }

    pub fn config(&self) -> &MarketplaceConfig {
        &self.config
    }

    /// The connected account, threaded read-only into every call.
    pub fn connected_address(&self) -> Option<Address> {
        self.wallet.address()
    }

    fn executor(&self) -> TransactionExecutor<W, L> {
        TransactionExecutor::new(Arc::clone(&self.wallet), Arc::clone(&self.endpoint))
            .with_finality_timeout(self.config.finality_timeout)
    }

    async fn write(&self, call: CallDescription, event: &str) -> Result<ExecutionReport, ErrorKind> {
        let report = self
            .executor()
            .submit(call, &self.config.event_suffix(event))
            .await;
        match report.failure() {
            Some(failure) => Err(failure.clone()),
            None => Ok(report),
        }
    }

    // ------------------------------------------------------------------
    // Claims
    // ------------------------------------------------------------------

    /// Submit a new carbon-credit claim.
    pub async fn create_claim(&self, draft: ClaimDraft) -> Result<ClaimReceipt, ErrorKind> {
        draft.validate()?;

        let call = CallBuilder::new()
            .target(self.config.target("create_claim"))
            .object(&self.config.claim_handler)
            .object(&self.config.clock_object)
            .u64(draft.longitude)
            .u64(draft.latitude)
            .u64(draft.requested_credits)
            .u64(draft.status)
            .string(draft.ipfs_hash)
            .string(draft.description)
            .u64(draft.voting_period_secs)
            .build()
            .map_err(|e| ErrorKind::Validation(e.to_string()))?;

        let report = self.write(call, "ClaimCreated").await?;

        let claim_id = report
            .event()
            .and_then(|event| EventExtractor::payload_as::<ClaimCreatedEvent>(event).ok())
            .map(|payload| ObjectId::new(payload.claim_id));

        Ok(ClaimReceipt {
            digest: report.digest().cloned(),
            claim_id,
            notice: report.notice().map(str::to_string),
        })
    }

    /// Cast a vote on a claim. Eligibility is re-checked immediately before
    /// submission; the ledger remains the final authority.
    pub async fn vote_on_claim(
        &self,
        claim: &ClaimRecord,
        choice: VoteChoice,
    ) -> Result<ExecutionReport, ErrorKind> {
        let voter = self.connected_address();
        match vote_eligibility(claim, voter.as_ref(), LedgerInstant::now()) {
            VoteEligibility::Eligible => {}
            VoteEligibility::WindowExpired => return Err(ErrorKind::VotingExpired),
            other => return Err(ErrorKind::Validation(other.reason().to_string())),
        }

        let call = CallBuilder::new()
            .target(self.config.target("vote_on_a_claim"))
            .object(&self.config.claim_handler)
            .object(&self.config.clock_object)
            .object(&claim.claim_id)
            .u64(choice.as_raw())
            .build()
            .map_err(|e| ErrorKind::Validation(e.to_string()))?;

        self.write(call, "ClaimVoted").await
    }

    /// Load every claim via the ledger program itself (signed call emitting
    /// `AllClaimsEvent`). Consistent, but prompts the wallet.
    pub async fn fetch_all_claims(&self) -> Result<DecodeOutcome<ClaimRecord>, ErrorKind> {
        let call = CallBuilder::new()
            .target(self.config.target("get_all_claims"))
            .object(&self.config.organisation_handler)
            .object(&self.config.claim_handler)
            .object(&self.config.clock_object)
            .build()
            .map_err(|e| ErrorKind::Validation(e.to_string()))?;

        let report = self.write(call, "AllClaimsEvent").await?;

        let event = match report.event() {
            Some(event) => event,
            // Degrade to an empty listing with a notice rather than failing;
            // the call itself succeeded.
            None => {
                return Ok(DecodeOutcome::with_note(
                    "no claims event found in the transaction result",
                ))
            }
        };

        let payload: AllClaimsEvent =
            EventExtractor::payload_as(event).map_err(|e| ErrorKind::Decode(e.to_string()))?;
        let mut outcome = DecodeOutcome::empty();
        outcome.records = payload.claims.into_iter().map(ClaimRecord::from).collect();
        debug!(claims = outcome.len(), "fetched claims via transaction");
        Ok(outcome)
    }

    /// Load claims from the claim handler's object snapshot. May be stale,
    /// costs nothing, needs no wallet interaction.
    pub async fn snapshot_claims(&self) -> Result<DecodeOutcome<ClaimRecord>, ErrorKind> {
        let snapshot = self
            .endpoint
            .fetch_object(&self.config.claim_handler)
            .await
            .map_err(|e| ErrorKind::Network(e.to_string()))?;
        Ok(decode_claims(&snapshot))
    }

    // ------------------------------------------------------------------
    // Organisations
    // ------------------------------------------------------------------

    /// Register an organisation for the connected wallet.
    pub async fn register_organisation(
        &self,
        name: &str,
        description: &str,
    ) -> Result<ExecutionReport, ErrorKind> {
        if name.trim().is_empty() || description.trim().is_empty() {
            return Err(ErrorKind::Validation(
                "please fill in both name and description".to_string(),
            ));
        }

        let call = CallBuilder::new()
            .target(self.config.target("register_organisation"))
            .object(&self.config.organisation_handler)
            .string(name)
            .string(description)
            .build()
            .map_err(|e| ErrorKind::Validation(e.to_string()))?;

        self.write(call, "OrganisationCreated").await
    }

    /// Details of the connected wallet's own organisation.
    pub async fn my_organisation(&self) -> Result<OrganizationRecord, ErrorKind> {
        let call = CallBuilder::new()
            .target(self.config.target("get_my_organisation_details"))
            .object(&self.config.organisation_handler)
            .build()
            .map_err(|e| ErrorKind::Validation(e.to_string()))?;

        let report = self.write(call, "OrganisationDetailsEvent").await?;
        let event = report
            .event()
            .ok_or_else(|| ErrorKind::Decode("organisation details not found".to_string()))?;
        let wire: OrganisationWire =
            EventExtractor::payload_as(event).map_err(|e| ErrorKind::Decode(e.to_string()))?;
        Ok(wire.into())
    }

    /// List every organisation through simulated execution: first the id
    /// directory, then per-id details. A failing id is skipped with a note,
    /// matching the pull-through, best-effort listing semantics.
    pub async fn organisation_directory(
        &self,
    ) -> Result<DecodeOutcome<OrganizationRecord>, ErrorKind> {
        let executor = self.executor();

        let ids_call = CallBuilder::new()
            .target(self.config.target("get_all_organisation_ids"))
            .object(&self.config.organisation_handler)
            .build()
            .map_err(|e| ErrorKind::Validation(e.to_string()))?;

        let ids_event = executor
            .read(&ids_call, &self.config.event_suffix("OrganisationIDsEvent"))
            .await?;
        let ids: OrganisationIdsEvent =
            EventExtractor::payload_as(&ids_event).map_err(|e| ErrorKind::Decode(e.to_string()))?;

        let mut outcome = DecodeOutcome::empty();
        for id in ids.ids {
            let org_id = ObjectId::new(id);
            let details_call = CallBuilder::new()
                .target(self.config.target("get_organisation_details"))
                .object(&self.config.organisation_handler)
                .id(&org_id)
                .build()
                .map_err(|e| ErrorKind::Validation(e.to_string()))?;

            let details = executor
                .read(
                    &details_call,
                    &self.config.event_suffix("OrganisationDetailsEvent"),
                )
                .await
                .and_then(|event| {
                    EventExtractor::payload_as::<OrganisationWire>(&event)
                        .map_err(|e| ErrorKind::Decode(e.to_string()))
                });

            match details {
                Ok(wire) => outcome.records.push(wire.into()),
                Err(error) => {
                    outcome.skipped += 1;
                    outcome
                        .notes
                        .push(format!("organisation {org_id} skipped: {error}"));
                }
            }
        }
        Ok(outcome)
    }

    /// Load organisations from the handler's object snapshot.
    pub async fn snapshot_organisations(
        &self,
    ) -> Result<DecodeOutcome<OrganizationRecord>, ErrorKind> {
        let snapshot = self
            .endpoint
            .fetch_object(&self.config.organisation_handler)
            .await
            .map_err(|e| ErrorKind::Network(e.to_string()))?;
        Ok(decode_organizations(&snapshot))
    }

    /// Whether `address` already has a registered organisation, read from
    /// the handler's wallet-address map.
    pub async fn is_registered(&self, address: &Address) -> Result<bool, ErrorKind> {
        let snapshot = self
            .endpoint
            .fetch_object(&self.config.organisation_handler)
            .await
            .map_err(|e| ErrorKind::Network(e.to_string()))?;
        Ok(registered_addresses(&snapshot).contains(address))
    }

    // ------------------------------------------------------------------
    // Lending
    // ------------------------------------------------------------------

    /// Create a lend request toward another organisation.
    pub async fn create_lend_request(
        &self,
        draft: LendRequestDraft,
    ) -> Result<ExecutionReport, ErrorKind> {
        let lender = self
            .connected_address()
            .ok_or_else(|| ErrorKind::Validation("wallet not connected".to_string()))?;
        draft.validate(&lender)?;

        let call = CallBuilder::new()
            .target(self.config.target("create_lend_request"))
            .object(&self.config.organisation_handler)
            .object(&self.config.clock_object)
            .object(&self.config.lend_request_handler)
            .id(&draft.organisation_id)
            .u64(draft.amount)
            .u64(LedgerInstant::now().as_seconds())
            .u64(draft.duration_secs)
            .build()
            .map_err(|e| ErrorKind::Validation(e.to_string()))?;

        self.write(call, "LendRequestCreated").await
    }
}
