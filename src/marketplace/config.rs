use crate::executor::DEFAULT_FINALITY_TIMEOUT;
use crate::ledger::ObjectId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ledger module that hosts the marketplace program.
pub const MARKETPLACE_MODULE: &str = "carbon_marketplace";

/// The network-wide shared clock object.
pub const CLOCK_OBJECT: &str = "0x6";

/// Deployment coordinates of the marketplace: package, handler objects, and
/// the always-present finality bound applied to every write.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarketplaceConfig {
    pub package_id: ObjectId,
    pub module: String,
    pub organisation_handler: ObjectId,
    pub claim_handler: ObjectId,
    pub lend_request_handler: ObjectId,
    pub clock_object: ObjectId,
    pub finality_timeout: Duration,
}

impl MarketplaceConfig {
    pub fn new(
        package_id: ObjectId,
        organisation_handler: ObjectId,
        claim_handler: ObjectId,
        lend_request_handler: ObjectId,
    ) -> Self {
        Self {
            package_id,
            module: MARKETPLACE_MODULE.to_string(),
            organisation_handler,
            claim_handler,
            lend_request_handler,
            clock_object: ObjectId::new(CLOCK_OBJECT),
            finality_timeout: DEFAULT_FINALITY_TIMEOUT,
        }
    }

    pub fn with_module(mut self, module: &str) -> Self {
        self.module = module.to_string();
        self
    }

    pub fn with_clock_object(mut self, clock: ObjectId) -> Self {
        self.clock_object = clock;
        self
    }

    pub fn with_finality_timeout(mut self, timeout: Duration) -> Self {
        self.finality_timeout = timeout;
        self
    }

    /// Fully-qualified call target for a marketplace function.
    pub fn target(&self, function: &str) -> String {
        format!("{}::{}::{}", self.package_id, self.module, function)
    }

    /// Namespace-qualified suffix for matching a completion event.
    pub fn event_suffix(&self, event: &str) -> String {
        format!("::{}::{}", self.module, event)
    }
}
