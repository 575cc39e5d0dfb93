// Executor seams - Signing provider and ledger endpoint
// The wallet and the RPC node are external collaborators behind these traits.
// Mock implementations live here too, mirroring how scripted doubles are used
// throughout the test suite.

use crate::call::CallDescription;
use crate::executor::LedgerEvent;
use crate::ledger::{Address, ObjectId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// TRANSACTION DIGEST
// ============================================================================

/// Identifier of a broadcast transaction, as issued by the ledger endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxDigest(String);

impl TxDigest {
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// SIGNED CALL
// ============================================================================

/// A call description approved by the signing provider, ready to broadcast.
#[derive(Clone, Debug)]
pub struct SignedCall {
    call: CallDescription,
    sender: Address,
    signature: Vec<u8>,
}

impl SignedCall {
    pub fn from_parts(call: CallDescription, sender: Address, signature: Vec<u8>) -> Self {
        Self {
            call,
            sender,
            signature,
        }
    }

    pub fn call(&self) -> &CallDescription {
        &self.call
    }

    pub fn sender(&self) -> &Address {
        &self.sender
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }
}

// ============================================================================
// CONFIRMED TRANSACTION
// ============================================================================

/// A transaction the ledger reports as final, with its emitted events.
#[derive(Clone, Debug)]
pub struct ConfirmedTransaction {
    digest: TxDigest,
    events: Vec<LedgerEvent>,
}

impl ConfirmedTransaction {
    pub fn new(digest: TxDigest, events: Vec<LedgerEvent>) -> Self {
        Self { digest, events }
    }

    pub fn digest(&self) -> &TxDigest {
        &self.digest
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Failures from the signing provider.
#[derive(Error, Debug, Clone)]
pub enum SignError {
    #[error("signature request rejected in the wallet")]
    Rejected,

    #[error("signing provider unavailable: {0}")]
    Unavailable(String),
}

/// Failures from the ledger endpoint. Aborts carry the structured code the
/// ledger returned alongside the human-readable message.
#[derive(Error, Debug, Clone)]
pub enum EndpointError {
    #[error("ledger aborted the call (code {code}): {message}")]
    Abort { code: u64, message: String },

    #[error("ledger endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("timed out waiting for the ledger")]
    Timeout,

    #[error("{0}")]
    Other(String),
}

// ============================================================================
// SIGNING PROVIDER TRAIT
// ============================================================================

/// The wallet seam. Signing is an externally-driven suspension point: the
/// user may approve, reject, or stall indefinitely, and this layer imposes
/// no bound on the wait.
#[async_trait]
pub trait SigningProvider: Send + Sync {
    /// The currently-connected account, if any.
    fn address(&self) -> Option<Address>;

    /// Ask the wallet to sign a call.
    async fn sign(&self, call: &CallDescription) -> Result<SignedCall, SignError>;
}

// ============================================================================
// LEDGER ENDPOINT TRAIT
// ============================================================================

/// The RPC seam to the distributed ledger.
#[async_trait]
pub trait LedgerEndpoint: Send + Sync {
    /// Fetch an object snapshot by id. May be stale; zero cost.
    async fn fetch_object(&self, id: &ObjectId) -> Result<Value, EndpointError>;

    /// Broadcast a signed call, returning its digest.
    async fn broadcast(&self, signed: SignedCall) -> Result<TxDigest, EndpointError>;

    /// Wait until the given transaction is final and return its events.
    async fn wait_for_finality(
        &self,
        digest: &TxDigest,
    ) -> Result<ConfirmedTransaction, EndpointError>;

    /// Evaluate a call read-only, without committing state, and return the
    /// events it would emit.
    async fn simulate(
        &self,
        call: &CallDescription,
        sender: &Address,
    ) -> Result<Vec<LedgerEvent>, EndpointError>;
}

// ============================================================================
// MOCK SIGNING PROVIDER
// ============================================================================

enum MockWalletMode {
    Approve,
    Reject,
    Unavailable(String),
    Disconnected,
}

/// Mock wallet for tests: approves, rejects, or stalls on request.
pub struct MockWallet {
    address: Address,
    mode: MockWalletMode,
    delay_ms: u64,
}

impl MockWallet {
    /// A connected wallet that approves every request.
    pub fn approving(address: Address) -> Self {
        Self {
            address,
            mode: MockWalletMode::Approve,
            delay_ms: 0,
        }
    }

    /// A connected wallet that rejects every request.
    pub fn rejecting(address: Address) -> Self {
        Self {
            address,
            mode: MockWalletMode::Reject,
            delay_ms: 0,
        }
    }

    /// A wallet whose provider fails outright.
    pub fn unavailable(address: Address, message: &str) -> Self {
        Self {
            address,
            mode: MockWalletMode::Unavailable(message.to_string()),
            delay_ms: 0,
        }
    }

    /// A wallet with no connected account.
    pub fn disconnected() -> Self {
        Self {
            address: Address::new("0x0"),
            mode: MockWalletMode::Disconnected,
            delay_ms: 0,
        }
    }

    /// Delay before responding, to exercise the suspension point.
    pub fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }
}

#[async_trait]
impl SigningProvider for MockWallet {
    fn address(&self) -> Option<Address> {
        match self.mode {
            MockWalletMode::Disconnected => None,
            _ => Some(self.address.clone()),
        }
    }

    async fn sign(&self, call: &CallDescription) -> Result<SignedCall, SignError> {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        match &self.mode {
            MockWalletMode::Approve => Ok(SignedCall::from_parts(
                call.clone(),
                self.address.clone(),
                call.digest().to_vec(),
            )),
            MockWalletMode::Reject => Err(SignError::Rejected),
            MockWalletMode::Unavailable(msg) => Err(SignError::Unavailable(msg.clone())),
            MockWalletMode::Disconnected => {
                Err(SignError::Unavailable("no connected account".to_string()))
            }
        }
    }
}

// ============================================================================
// MOCK LEDGER ENDPOINT
// ============================================================================

/// What the mock endpoint does when asked to confirm a broadcast call.
#[derive(Clone, Debug)]
pub enum MockConfirmation {
    /// Confirm immediately with these events.
    Events(Vec<LedgerEvent>),
    /// Fail confirmation with this error.
    Fail(EndpointError),
    /// Never confirm (sleeps well past any sane timeout).
    Hang,
}

/// Scripted ledger endpoint for tests.
pub struct MockLedgerEndpoint {
    objects: HashMap<ObjectId, Value>,
    broadcast_failure: Option<EndpointError>,
    confirmation: MockConfirmation,
    /// Simulation scripts keyed by target function name suffix. Scripts for
    /// the same function are consumed in order; the last one repeats.
    simulations: Mutex<HashMap<String, VecDeque<Result<Vec<LedgerEvent>, EndpointError>>>>,
    confirm_delay_ms: u64,
    calls: Mutex<Vec<String>>,
}

impl MockLedgerEndpoint {
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            broadcast_failure: None,
            confirmation: MockConfirmation::Events(Vec::new()),
            simulations: Mutex::new(HashMap::new()),
            confirm_delay_ms: 0,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Serve this snapshot for `fetch_object(id)`.
    pub fn with_object(mut self, id: ObjectId, snapshot: Value) -> Self {
        self.objects.insert(id, snapshot);
        self
    }

    /// Fail every broadcast with this error.
    pub fn with_broadcast_failure(mut self, error: EndpointError) -> Self {
        self.broadcast_failure = Some(error);
        self
    }

    /// Script the confirmation outcome for broadcast calls.
    pub fn with_confirmation(mut self, confirmation: MockConfirmation) -> Self {
        self.confirmation = confirmation;
        self
    }

    /// Delay before confirming, to exercise finality timeouts.
    pub fn with_confirm_delay_ms(mut self, ms: u64) -> Self {
        self.confirm_delay_ms = ms;
        self
    }

    /// Script a simulated-execution result for calls whose target ends with
    /// `function` (e.g. "get_all_organisation_ids"). Repeated scripts for the
    /// same function are served in order; the final one repeats.
    pub fn with_simulation(
        self,
        function: &str,
        result: Result<Vec<LedgerEvent>, EndpointError>,
    ) -> Self {
        if let Ok(mut simulations) = self.simulations.lock() {
            simulations
                .entry(function.to_string())
                .or_default()
                .push_back(result);
        }
        self
    }

    /// The targets of every call seen, in order.
    pub fn seen_calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, target: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(target.to_string());
        }
    }
}

impl Default for MockLedgerEndpoint {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerEndpoint for MockLedgerEndpoint {
    async fn fetch_object(&self, id: &ObjectId) -> Result<Value, EndpointError> {
        self.record(&format!("fetch_object:{id}"));
        self.objects
            .get(id)
            .cloned()
            .ok_or_else(|| EndpointError::Other(format!("object {id} not found")))
    }

    async fn broadcast(&self, signed: SignedCall) -> Result<TxDigest, EndpointError> {
        self.record(signed.call().target());
        if let Some(error) = &self.broadcast_failure {
            return Err(error.clone());
        }
        Ok(TxDigest::new(hex::encode(signed.call().digest())))
    }

    async fn wait_for_finality(
        &self,
        digest: &TxDigest,
    ) -> Result<ConfirmedTransaction, EndpointError> {
        if self.confirm_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.confirm_delay_ms)).await;
        }

        match &self.confirmation {
            MockConfirmation::Events(events) => {
                Ok(ConfirmedTransaction::new(digest.clone(), events.clone()))
            }
            MockConfirmation::Fail(error) => Err(error.clone()),
            MockConfirmation::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(EndpointError::Timeout)
            }
        }
    }

    async fn simulate(
        &self,
        call: &CallDescription,
        _sender: &Address,
    ) -> Result<Vec<LedgerEvent>, EndpointError> {
        self.record(&format!("simulate:{}", call.target()));
        let mut simulations = match self.simulations.lock() {
            Ok(guard) => guard,
            Err(_) => return Ok(Vec::new()),
        };
        let key = simulations
            .keys()
            .find(|function| call.target().ends_with(function.as_str()))
            .cloned();
        if let Some(key) = key {
            if let Some(queue) = simulations.get_mut(&key) {
                if queue.len() > 1 {
                    if let Some(result) = queue.pop_front() {
                        return result;
                    }
                } else if let Some(result) = queue.front() {
                    return result.clone();
                }
            }
        }
        Ok(Vec::new())
    }
}
