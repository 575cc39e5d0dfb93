// Marketplace module - The call surface
// High-level operations over the carbon marketplace program, the deployment
// configuration, the shared view-model, and presentation helpers.

mod client;
mod config;
mod present;
mod view;

pub use client::*;
pub use config::*;
pub use present::*;
pub use view::*;
