// Executor module - Write-call lifecycle
// Orchestrates submit -> sign -> broadcast -> confirm -> extract-event for
// every write operation, and the simulated-execution read path for
// directory-style listings.

mod events;
mod machine;
mod traits;

pub use events::*;
pub use machine::*;
pub use traits::*;
