// Call module - Ledger call descriptions
// A call is the unit handed to the transaction executor: a named remote
// function plus ordered typed arguments.

mod description;

pub use description::*;
