//! Core ledger functionality
//!
//! This module contains the fundamental chain components: transactions,
//! blocks, the chain itself, proof-of-work mining, and difficulty
//! adjustment.

pub mod block;
pub mod blockchain;
pub mod difficulty;
pub mod proof_of_work;
pub mod transaction;

pub use block::Block;
pub use blockchain::{BlockSummary, Blockchain};
pub use difficulty::DifficultyAdjustment;
pub use proof_of_work::{block_digest, ProofOfWork};
pub use transaction::{
    Transaction, TransactionBatch, AMOUNT_FIELD_LEN, RECEIVER_FIELD_LEN, SENDER_FIELD_LEN,
};
