// Ledger time units
// The ledger emits timestamps in either whole seconds or milliseconds depending
// on which program path produced them. The unit is resolved exactly once, when a
// raw value crosses into the typed model; everything downstream works in
// milliseconds and never re-guesses.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Raw timestamps above this value are taken to be milliseconds.
/// Observed cutover of the ledger's clock encoding (roughly year 33658 in
/// seconds, Sep 2001 in milliseconds).
pub const INSTANT_MILLIS_CUTOVER: u64 = 1_000_000_000_000;

/// Raw durations above this value are taken to be milliseconds.
/// A duration of 1e9 seconds is ~31 years, far beyond any voting period.
pub const DURATION_MILLIS_CUTOVER: u64 = 1_000_000_000;

// ============================================================================
// LEDGER INSTANT
// ============================================================================

/// A point in time, stored as milliseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LedgerInstant(u64);

impl LedgerInstant {
    /// Resolve a raw ledger timestamp whose unit is not tagged.
    pub fn from_raw(raw: u64) -> Self {
        if raw > INSTANT_MILLIS_CUTOVER {
            Self(raw)
        } else {
            Self(raw.saturating_mul(1000))
        }
    }

    /// Create from whole seconds since the epoch.
    pub fn from_seconds(secs: u64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    /// Create from milliseconds since the epoch.
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// The current system time.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self(millis)
    }

    /// Milliseconds since the epoch.
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Whole seconds since the epoch.
    pub fn as_seconds(&self) -> u64 {
        self.0 / 1000
    }

    /// Add a duration, saturating at the numeric bound.
    pub fn saturating_add(&self, duration: LedgerDuration) -> LedgerInstant {
        Self(self.0.saturating_add(duration.as_millis()))
    }

    /// Milliseconds from this instant until `later`, or `None` if `later`
    /// is not after this instant.
    pub fn until(&self, later: LedgerInstant) -> Option<LedgerDuration> {
        later.0.checked_sub(self.0).map(LedgerDuration::from_millis)
    }

    /// Convert to a calendar datetime for display.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.0 as i64).single()
    }
}

impl fmt::Display for LedgerInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339()),
            None => write!(f, "{}ms", self.0),
        }
    }
}

// ============================================================================
// LEDGER DURATION
// ============================================================================

/// A span of time, stored in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LedgerDuration(u64);

impl LedgerDuration {
    /// Resolve a raw ledger duration whose unit is not tagged.
    pub fn from_raw(raw: u64) -> Self {
        if raw > DURATION_MILLIS_CUTOVER {
            Self(raw)
        } else {
            Self(raw.saturating_mul(1000))
        }
    }

    /// Create from whole seconds.
    pub fn from_seconds(secs: u64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    /// Create from milliseconds.
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Milliseconds in this span.
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Whole seconds in this span.
    pub fn as_seconds(&self) -> u64 {
        self.0 / 1000
    }

    /// Whole days in this span.
    pub fn as_days(&self) -> u64 {
        self.0 / 86_400_000
    }
}
