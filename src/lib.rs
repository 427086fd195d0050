//! # Ledger Chain - A Single-Node Educational Blockchain
//!
//! An append-only chain of blocks, each committing a batch of transactions,
//! linked by SHA-256 hashes and sealed by a proof-of-work search.
//!
//! ## What This Is
//! - **Chain engine**: block/transaction data model, hash chaining, and
//!   full-chain integrity validation
//! - **Proof of work**: brute-force nonce search against a leading-zero-byte
//!   difficulty predicate, with elapsed-time difficulty adjustment
//! - **Persistence**: a fixed-width little-endian binary store format that
//!   round-trips the in-memory structures exactly, plus a bincode-based
//!   extended codec
//! - **Pending pool**: a flat, ordered pool of transactions persisted
//!   independently and drained into each mined block
//!
//! ## How The Code Is Organized
//! - `core/`: transactions, blocks, the chain, mining, difficulty
//! - `storage/`: the legacy store codec and the file-backed store
//! - `config/`: store-file paths from environment variables
//! - `error/`: the error enum and `Result` alias
//! - `utils/`: SHA-256, timestamps, bincode helpers
//! - `cli/`: command-line parsing for the binary
//!
//! ## Known Limitations
//! - Single writer: operations are load/mutate/save cycles with no locking;
//!   concurrent runs race and the last write wins
//! - The mining loop is unbounded and difficulty has no ceiling, so a
//!   runaway difficulty can stall mining indefinitely
//! - No networking, consensus, signatures, or spend tracking

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod storage;
pub mod utils;

// Re-export commonly used types for convenience
pub use cli::{Command, Opt};
pub use config::{Config, GLOBAL_CONFIG};
pub use core::{
    block_digest, Block, BlockSummary, Blockchain, DifficultyAdjustment, ProofOfWork, Transaction,
    TransactionBatch,
};
pub use error::{LedgerError, Result};
pub use storage::LedgerStore;
pub use utils::{current_timestamp, sha256_digest, HASH_LEN};
