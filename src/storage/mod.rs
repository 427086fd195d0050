//! Persistence layer
//!
//! The legacy fixed-width store codec and the file-backed store exposing
//! load/save and the submit/mine operations.

pub mod codec;
pub mod store;

pub use store::LedgerStore;
