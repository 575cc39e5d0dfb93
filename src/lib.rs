//! carbonlink - client for a ledger-hosted carbon-credit marketplace.
//!
//! Synchronizes ledger state into typed records, evaluates voting windows,
//! and drives write calls through the sign/broadcast/confirm/extract-event
//! lifecycle. The ledger program itself (vote tallying, status transitions,
//! balance arithmetic) is an external authority and is treated as opaque.

pub mod call;
pub mod error;
pub mod executor;
pub mod ledger;
pub mod marketplace;
pub mod timewindow;
pub mod wallet;
