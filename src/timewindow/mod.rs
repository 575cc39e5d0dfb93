// Timewindow module - Voting-window timing
// Normalizes the ledger's mixed second/millisecond timestamps and decides
// whether a claim is still accepting votes.

mod eligibility;
mod units;
mod window;

pub use eligibility::*;
pub use units::*;
pub use window::*;
