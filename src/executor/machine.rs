// Transaction executor
// Drives one write call through sign -> broadcast -> confirm -> extract.
// Signing waits indefinitely on the wallet; confirmation is always bounded
// by an explicit timeout. A timeout after broadcast is a soft success, since
// the transaction is already on the wire and may still land.

use crate::call::CallDescription;
use crate::error::{classify_endpoint_error, classify_sign_error, ErrorKind};
use crate::executor::{
    EventExtractor, LedgerEndpoint, LedgerEvent, SigningProvider, TxDigest,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default bound on the wait for ledger finality.
pub const DEFAULT_FINALITY_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// EXECUTION PHASE
// ============================================================================

/// Where a submission currently is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionPhase {
    Idle,
    Signing,
    Broadcasting,
    Confirming,
    Succeeded,
    Failed,
}

impl ExecutionPhase {
    /// Check whether a transition to `target` is legal.
    pub fn can_transition_to(&self, target: ExecutionPhase) -> bool {
        matches!(
            (self, target),
            (Self::Idle, Self::Signing)
                | (Self::Signing, Self::Broadcasting)
                | (Self::Signing, Self::Failed)
                | (Self::Broadcasting, Self::Confirming)
                | (Self::Broadcasting, Self::Failed)
                | (Self::Confirming, Self::Succeeded)
                | (Self::Confirming, Self::Failed)
                | (Self::Succeeded, Self::Signing)
                | (Self::Failed, Self::Signing)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl Default for ExecutionPhase {
    fn default() -> Self {
        Self::Idle
    }
}

// ============================================================================
// EXECUTION REPORT
// ============================================================================

/// Outcome of one submission.
#[derive(Clone, Debug)]
pub struct ExecutionReport {
    phase: ExecutionPhase,
    digest: Option<TxDigest>,
    event: Option<LedgerEvent>,
    notice: Option<String>,
    failure: Option<ErrorKind>,
}

impl ExecutionReport {
    fn succeeded(digest: TxDigest, event: Option<LedgerEvent>, notice: Option<String>) -> Self {
        Self {
            phase: ExecutionPhase::Succeeded,
            digest: Some(digest),
            event,
            notice,
            failure: None,
        }
    }

    fn failed(failure: ErrorKind, digest: Option<TxDigest>) -> Self {
        Self {
            phase: ExecutionPhase::Failed,
            digest,
            event: None,
            notice: None,
            failure: Some(failure),
        }
    }

    pub fn is_success(&self) -> bool {
        self.phase == ExecutionPhase::Succeeded
    }

    pub fn phase(&self) -> ExecutionPhase {
        self.phase
    }

    /// The transaction digest, once broadcast happened.
    pub fn digest(&self) -> Option<&TxDigest> {
        self.digest.as_ref()
    }

    /// The extracted completion event, when one was found.
    pub fn event(&self) -> Option<&LedgerEvent> {
        self.event.as_ref()
    }

    /// A soft diagnostic attached to a success (pending confirmation,
    /// missing completion event).
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// The classified failure, when the submission failed.
    pub fn failure(&self) -> Option<&ErrorKind> {
        self.failure.as_ref()
    }
}

// ============================================================================
// TRANSACTION EXECUTOR
// ============================================================================

/// State machine executing one write call at a time. Each `submit` is
/// independent; callers serialize their own actions.
pub struct TransactionExecutor<W, L> {
    wallet: Arc<W>,
    endpoint: Arc<L>,
    phase: ExecutionPhase,
    finality_timeout: Duration,
}

impl<W, L> TransactionExecutor<W, L>
where
    W: SigningProvider,
    L: LedgerEndpoint,
{
    pub fn new(wallet: Arc<W>, endpoint: Arc<L>) -> Self {
        Self {
            wallet,
            endpoint,
            phase: ExecutionPhase::Idle,
            finality_timeout: DEFAULT_FINALITY_TIMEOUT,
        }
    }

    /// Bound the finality wait. Always present; this replaces it rather
    /// than enabling it.
    pub fn with_finality_timeout(mut self, timeout: Duration) -> Self {
        self.finality_timeout = timeout;
        self
    }

    pub fn phase(&self) -> ExecutionPhase {
        self.phase
    }

    fn enter(&mut self, next: ExecutionPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal phase transition {:?} -> {:?}",
            self.phase,
            next
        );
        debug!(from = ?self.phase, to = ?next, "executor phase");
        self.phase = next;
    }

    /// Drive one call through the full lifecycle, expecting a completion
    /// event whose type name matches `expected_event`.
    pub async fn submit(
        &mut self,
        call: CallDescription,
        expected_event: &str,
    ) -> ExecutionReport {
        let target = call.target().to_string();
        self.enter(ExecutionPhase::Signing);

        // Unbounded: the wallet UI owns this wait entirely.
        let signed = match self.wallet.sign(&call).await {
            Ok(signed) => signed,
            Err(error) => {
                warn!(%target, %error, "signing failed");
                self.enter(ExecutionPhase::Failed);
                return ExecutionReport::failed(classify_sign_error(&error), None);
            }
        };

        self.enter(ExecutionPhase::Broadcasting);
        let digest = match self.endpoint.broadcast(signed).await {
            Ok(digest) => digest,
            Err(error) => {
                warn!(%target, %error, "broadcast failed");
                self.enter(ExecutionPhase::Failed);
                return ExecutionReport::failed(classify_endpoint_error(&error), None);
            }
        };

        self.enter(ExecutionPhase::Confirming);
        let confirmed =
            match tokio::time::timeout(self.finality_timeout, self.endpoint.wait_for_finality(&digest))
                .await
            {
                Err(_elapsed) => {
                    // Soft: the broadcast already happened.
                    debug!(%target, %digest, "finality wait timed out");
                    self.enter(ExecutionPhase::Succeeded);
                    return ExecutionReport::succeeded(
                        digest,
                        None,
                        Some(ErrorKind::FinalityTimeout.to_string()),
                    );
                }
                Ok(Err(error)) => {
                    warn!(%target, %error, "confirmation failed");
                    self.enter(ExecutionPhase::Failed);
                    return ExecutionReport::failed(
                        classify_endpoint_error(&error),
                        Some(digest),
                    );
                }
                Ok(Ok(confirmed)) => confirmed,
            };

        self.enter(ExecutionPhase::Succeeded);
        match EventExtractor::find_by_suffix(confirmed.events(), expected_event) {
            Some(event) => ExecutionReport::succeeded(digest, Some(event.clone()), None),
            None => {
                // Non-fatal: the call reached the ledger even if the domain
                // event could not be located.
                debug!(%target, expected_event, "completion event not found");
                ExecutionReport::succeeded(
                    digest,
                    None,
                    Some(format!(
                        "call confirmed but no {expected_event} event was emitted"
                    )),
                )
            }
        }
    }

    /// Read-only path: evaluate the call via simulated execution (no wallet
    /// prompt, no state mutation) and extract the expected event.
    pub async fn read(
        &self,
        call: &CallDescription,
        expected_event: &str,
    ) -> Result<LedgerEvent, ErrorKind> {
        let sender = self
            .wallet
            .address()
            .ok_or_else(|| ErrorKind::Validation("wallet not connected".to_string()))?;

        let events = self
            .endpoint
            .simulate(call, &sender)
            .await
            .map_err(|e| classify_endpoint_error(&e))?;

        EventExtractor::find_by_suffix(&events, expected_event)
            .cloned()
            .ok_or_else(|| {
                ErrorKind::Decode(format!("no {expected_event} event in simulation result"))
            })
    }
}
