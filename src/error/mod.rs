// Error module - Failure classification
// Maps wallet, network, and ledger-abort failures onto a small set of
// user-facing kinds. The ledger's abort codes are the authority on why a
// call was refused; everything else degrades to a surfaced message.

mod classifier;

pub use classifier::*;
