//! Impact calculation engine and assessment plumbing for LCA Forge.
//!
//! The heart of the crate is [`analysis::calculate_lca`]. The other modules
//! build and validate products, hold per-session state, and persist or log
//! what the engine produces.

pub mod analysis;
pub mod builder;
pub mod error;
pub mod factors;
pub mod logger;
pub mod quick;
pub mod session;
pub mod store;

pub use analysis::calculate_lca;
pub use error::LcaError;
pub use session::LcaSession;
