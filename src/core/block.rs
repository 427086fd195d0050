use crate::core::proof_of_work::block_digest;
use crate::core::{ProofOfWork, Transaction, TransactionBatch};
use crate::error::{LedgerError, Result};
use crate::utils::{current_timestamp, HASH_LEN};
use serde::{Deserialize, Serialize};

/// One link in the chain.
///
/// Invariant: `curr_hash` equals the digest of (index, timestamp, prev_hash,
/// nonce, transactions), and `prev_hash` equals the predecessor's `curr_hash`
/// (all-zero for the genesis block).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct Block {
    index: u32,
    timestamp: u64,
    nonce: u32,
    prev_hash: [u8; HASH_LEN],
    curr_hash: [u8; HASH_LEN],
    transactions: TransactionBatch,
}

impl Block {
    /// Build and mine a new block at the given difficulty. The timestamp is
    /// taken at creation; the nonce and hash come from the mining search.
    pub fn new_block(
        index: u32,
        prev_hash: [u8; HASH_LEN],
        transactions: TransactionBatch,
        difficulty: u32,
    ) -> Result<Block> {
        if transactions.is_empty() {
            return Err(LedgerError::InvalidBlock(
                "Block must contain at least one transaction".to_string(),
            ));
        }

        let timestamp = current_timestamp()?;
        Ok(Self::mine_at(
            index,
            timestamp,
            prev_hash,
            transactions,
            difficulty,
        ))
    }

    fn mine_at(
        index: u32,
        timestamp: u64,
        prev_hash: [u8; HASH_LEN],
        transactions: TransactionBatch,
        difficulty: u32,
    ) -> Block {
        let pow = ProofOfWork::new(
            index,
            timestamp,
            &prev_hash,
            transactions.as_slice(),
            difficulty,
        );
        let (nonce, curr_hash) = pow.run();
        Block {
            index,
            timestamp,
            nonce,
            prev_hash,
            curr_hash,
            transactions,
        }
    }

    /// The genesis block: a single sentinel transaction mined over an
    /// all-zero previous hash.
    pub fn generate_genesis_block(difficulty: u32) -> Result<Block> {
        let mut transactions = TransactionBatch::new();
        transactions.push(Transaction::new(0, "Genesis", "Blockchain", "0"));
        Block::new_block(0, [0u8; HASH_LEN], transactions, difficulty)
    }

    /// Reassemble a block from stored fields. Used by the store codec; no
    /// integrity check happens here, `Blockchain::validate` does that.
    pub fn from_parts(
        index: u32,
        timestamp: u64,
        nonce: u32,
        prev_hash: [u8; HASH_LEN],
        curr_hash: [u8; HASH_LEN],
        transactions: TransactionBatch,
    ) -> Block {
        Block {
            index,
            timestamp,
            nonce,
            prev_hash,
            curr_hash,
            transactions,
        }
    }

    /// Recompute this block's digest from its stored fields and nonce.
    pub fn compute_hash(&self) -> [u8; HASH_LEN] {
        block_digest(
            self.index,
            self.timestamp,
            &self.prev_hash,
            self.nonce,
            self.transactions.as_slice(),
        )
    }

    pub fn get_index(&self) -> u32 {
        self.index
    }

    pub fn get_timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn get_nonce(&self) -> u32 {
        self.nonce
    }

    pub fn get_prev_hash(&self) -> &[u8; HASH_LEN] {
        &self.prev_hash
    }

    pub fn get_hash(&self) -> &[u8; HASH_LEN] {
        &self.curr_hash
    }

    pub fn get_transactions(&self) -> &[Transaction] {
        self.transactions.as_slice()
    }

    pub fn get_batch(&self) -> &TransactionBatch {
        &self.transactions
    }

    /// Create a block with a fixed timestamp (for testing only)
    #[cfg(test)]
    pub fn new_test_block(
        timestamp: u64,
        index: u32,
        prev_hash: [u8; HASH_LEN],
        transactions: TransactionBatch,
        difficulty: u32,
    ) -> Block {
        Self::mine_at(index, timestamp, prev_hash, transactions, difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_batch() -> TransactionBatch {
        let mut batch = TransactionBatch::new();
        batch.push(Transaction::new(0, "Alice", "Bob", "10"));
        batch
    }

    #[test]
    fn test_new_block_satisfies_invariant() {
        let block = Block::new_block(1, [9u8; HASH_LEN], sample_batch(), 1).unwrap();
        assert_eq!(block.get_index(), 1);
        assert_eq!(block.compute_hash(), *block.get_hash());
        assert!(ProofOfWork::is_valid_hash(block.get_hash(), 1));
    }

    #[test]
    fn test_empty_batch_rejected() {
        let result = Block::new_block(1, [0u8; HASH_LEN], TransactionBatch::new(), 1);
        assert!(result.is_err());
    }

    #[test]
    fn test_genesis_block_shape() {
        let genesis = Block::generate_genesis_block(1).unwrap();
        assert_eq!(genesis.get_index(), 0);
        assert_eq!(genesis.get_prev_hash(), &[0u8; HASH_LEN]);

        let txs = genesis.get_transactions();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].get_sender(), "Genesis");
        assert_eq!(txs[0].get_receiver(), "Blockchain");
        assert_eq!(txs[0].get_amount(), "0");
    }

    #[test]
    fn test_mining_same_inputs_same_block() {
        let a = Block::new_test_block(1_700_000_000, 3, [1u8; HASH_LEN], sample_batch(), 1);
        let b = Block::new_test_block(1_700_000_000, 3, [1u8; HASH_LEN], sample_batch(), 1);
        assert_eq!(a, b);
    }
}
