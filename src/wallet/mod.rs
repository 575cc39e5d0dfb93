// Wallet module - Local signing provider
// An ed25519-backed in-process wallet for tests and tooling. External wallet
// providers implement the same SigningProvider seam.

mod local;

pub use local::*;
