//! Configuration management
//!
//! Store-file paths for the chain and the pending-transaction pool,
//! seeded from environment variables.

pub mod settings;

pub use settings::{Config, GLOBAL_CONFIG};
