//! Utility functions and helpers
//!
//! This module contains the hashing primitive, timestamp helper, and the
//! bincode-based extended serialization used throughout the ledger.

pub mod crypto;
pub mod serialization;

pub use crypto::{current_timestamp, sha256_digest, HASH_LEN};
pub use serialization::{deserialize, serialize};
