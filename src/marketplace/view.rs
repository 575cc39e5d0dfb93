// Shared view-model
// One immutable view per process plus a pure update function, so every
// screen observing the same claim or organisation sees the same copy.
// Failures degrade the view to a dismissible notice; nothing ever crashes
// the surrounding application.

use crate::error::ErrorKind;
use crate::ledger::{ClaimRecord, DecodeOutcome, OrganizationRecord};
use crate::timewindow::LedgerInstant;

// ============================================================================
// VIEW
// ============================================================================

/// The whole marketplace as last fetched. Staleness is by design: state only
/// moves on explicit refresh or on completion of the user's own write.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarketplaceView {
    claims: Vec<ClaimRecord>,
    organisations: Vec<OrganizationRecord>,
    my_organisation: Option<OrganizationRecord>,
    notice: Option<String>,
    refreshed_at: Option<LedgerInstant>,
    loading: bool,
}

impl MarketplaceView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claims(&self) -> &[ClaimRecord] {
        &self.claims
    }

    pub fn organisations(&self) -> &[OrganizationRecord] {
        &self.organisations
    }

    pub fn my_organisation(&self) -> Option<&OrganizationRecord> {
        self.my_organisation.as_ref()
    }

    /// The current dismissible notice, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn refreshed_at(&self) -> Option<LedgerInstant> {
        self.refreshed_at
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Apply one update, producing the next view. Pure: the receiver is
    /// untouched.
    pub fn apply(&self, update: ViewUpdate) -> MarketplaceView {
        let mut next = self.clone();
        match update {
            ViewUpdate::LoadStarted => {
                next.loading = true;
            }
            ViewUpdate::ClaimsLoaded { outcome, at } => {
                next.loading = false;
                next.refreshed_at = Some(at);
                next.notice = outcome.notes.first().cloned();
                next.claims = outcome.records;
            }
            ViewUpdate::OrganisationsLoaded { outcome, at } => {
                next.loading = false;
                next.refreshed_at = Some(at);
                next.notice = outcome.notes.first().cloned();
                next.organisations = outcome.records;
            }
            ViewUpdate::MyOrganisationLoaded(org) => {
                next.loading = false;
                next.my_organisation = Some(org);
            }
            ViewUpdate::Failed(error) => {
                next.loading = false;
                next.notice = Some(error.to_string());
                // Hard failures empty the affected listing on the next
                // render; soft ones keep whatever was already shown.
                if !error.is_soft() {
                    next.claims.clear();
                    next.organisations.clear();
                }
            }
            ViewUpdate::DismissNotice => {
                next.notice = None;
            }
        }
        next
    }
}

// ============================================================================
// UPDATES
// ============================================================================

/// Unidirectional updates feeding [`MarketplaceView::apply`].
#[derive(Clone, Debug)]
pub enum ViewUpdate {
    /// A refresh began.
    LoadStarted,
    /// A claims fetch finished (possibly degraded).
    ClaimsLoaded {
        outcome: DecodeOutcome<ClaimRecord>,
        at: LedgerInstant,
    },
    /// An organisation fetch finished (possibly degraded).
    OrganisationsLoaded {
        outcome: DecodeOutcome<OrganizationRecord>,
        at: LedgerInstant,
    },
    /// The connected wallet's own organisation resolved.
    MyOrganisationLoaded(OrganizationRecord),
    /// An operation failed; surface it and degrade.
    Failed(ErrorKind),
    /// The user dismissed the visible notice.
    DismissNotice,
}
