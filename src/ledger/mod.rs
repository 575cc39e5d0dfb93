// Ledger module - State projection
// Typed records for claims and organisations, and the tolerant decoder that
// rebuilds them from the ledger's nested map-object snapshots. All records
// are derived: the ledger is the single source of truth and every decode
// pass starts from scratch.

mod decoder;
mod model;
pub mod value;
mod wire;

pub use decoder::*;
pub use model::*;
pub use wire::*;
