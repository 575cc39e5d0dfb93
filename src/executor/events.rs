// Event extraction
// Every write call emits a namespace-qualified completion event. The
// extractor finds the first event whose type name ends with the expected
// suffix and decodes its payload. Pure lookup; never mutates anything.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors from event extraction. A missing event is non-fatal to the caller:
/// the transaction still reached the ledger.
#[derive(Error, Debug, Clone)]
pub enum ExtractError {
    #[error("no event matching '{0}' in the transaction result")]
    NotFound(String),

    #[error("event payload did not match the expected shape: {0}")]
    BadShape(String),
}

// ============================================================================
// LEDGER EVENT
// ============================================================================

/// A single event emitted by a confirmed or simulated transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerEvent {
    event_type: String,
    payload: Value,
}

impl LedgerEvent {
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
        }
    }

    /// The fully-qualified event type name.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The parsed JSON payload.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Whether this event's type name ends with `suffix`. A bare local name
    /// (no leading `::`) only matches on a namespace boundary.
    pub fn matches_suffix(&self, suffix: &str) -> bool {
        if suffix.starts_with("::") {
            self.event_type.ends_with(suffix)
        } else {
            self.event_type == suffix || self.event_type.ends_with(&format!("::{suffix}"))
        }
    }
}

// ============================================================================
// EVENT EXTRACTOR
// ============================================================================

/// Finds a named domain event inside a transaction's event list.
pub struct EventExtractor;

impl EventExtractor {
    /// The first event whose type name matches `suffix`.
    pub fn find_by_suffix<'a>(events: &'a [LedgerEvent], suffix: &str) -> Option<&'a LedgerEvent> {
        events.iter().find(|event| event.matches_suffix(suffix))
    }

    /// Find and decode in one step.
    pub fn extract<T: DeserializeOwned>(
        events: &[LedgerEvent],
        suffix: &str,
    ) -> Result<T, ExtractError> {
        let event = Self::find_by_suffix(events, suffix)
            .ok_or_else(|| ExtractError::NotFound(suffix.to_string()))?;
        Self::payload_as(event)
    }

    /// Decode an event's payload into a typed shape.
    pub fn payload_as<T: DeserializeOwned>(event: &LedgerEvent) -> Result<T, ExtractError> {
        serde_json::from_value(event.payload.clone())
            .map_err(|e| ExtractError::BadShape(e.to_string()))
    }
}
