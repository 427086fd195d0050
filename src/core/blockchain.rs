// The chain itself: an owned, ordered list of blocks plus the difficulty the
// next block will be mined at. The chain only ever grows; persistence is
// handled by the storage layer.

use crate::core::{Block, DifficultyAdjustment, Transaction, TransactionBatch};
use crate::error::{LedgerError, Result};
use crate::utils::{deserialize, serialize, HASH_LEN};
use data_encoding::HEXLOWER;
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct Blockchain {
    blocks: Vec<Block>,
    difficulty: u32,
}

impl Blockchain {
    /// Create a fresh chain holding only the genesis block, mined at the
    /// initial difficulty.
    pub fn genesis() -> Result<Blockchain> {
        let difficulty = DifficultyAdjustment::get_initial_difficulty();
        info!("Creating new chain with genesis block at difficulty {difficulty}");
        let genesis_block = Block::generate_genesis_block(difficulty)?;
        Ok(Blockchain {
            blocks: vec![genesis_block],
            difficulty,
        })
    }

    /// Reassemble a chain from stored parts. Used by the store codec.
    pub fn from_parts(blocks: Vec<Block>, difficulty: u32) -> Blockchain {
        Blockchain { blocks, difficulty }
    }

    /// Mine a block committing `transactions` and link it as the new tail.
    /// The new block's index is the current length and its previous hash is
    /// the tail's hash; the chain grows by exactly one block.
    pub fn append(&mut self, transactions: TransactionBatch) -> Result<&Block> {
        let tail = self.blocks.last().ok_or_else(|| {
            LedgerError::InvalidBlock("Cannot append to a chain without a genesis block".to_string())
        })?;

        let block = Block::new_block(
            self.blocks.len() as u32,
            *tail.get_hash(),
            transactions,
            self.difficulty,
        )?;
        self.blocks.push(block);

        Ok(self
            .blocks
            .last()
            .expect("Chain cannot be empty right after a push"))
    }

    /// Walk the chain from genesis and verify both invariants for every
    /// block: the stored hash matches a recomputation over the stored
    /// fields, and the stored previous hash matches the predecessor (the
    /// genesis block must chain from all-zero). Returns the index of the
    /// first failing block.
    pub fn first_invalid(&self) -> Option<u32> {
        let mut expected_prev = [0u8; HASH_LEN];
        for block in &self.blocks {
            if block.compute_hash() != *block.get_hash() || *block.get_prev_hash() != expected_prev
            {
                return Some(block.get_index());
            }
            expected_prev = *block.get_hash();
        }
        None
    }

    /// True when every block passes integrity checks. An empty chain is
    /// invalid; a chain always holds at least its genesis block.
    pub fn validate(&self) -> bool {
        !self.blocks.is_empty() && self.first_invalid().is_none()
    }

    /// Re-derive the difficulty from the timestamps bracketing the last
    /// mining cycle.
    pub fn adjust_difficulty(&mut self, started: u64, finished: u64) {
        self.difficulty = DifficultyAdjustment::adjust(started, finished, self.difficulty);
    }

    pub fn get_difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: u32) {
        self.difficulty = difficulty;
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        self.blocks.as_slice()
    }

    pub fn tip(&self) -> Option<&Block> {
        self.blocks.last()
    }

    /// Display records for an external presentation layer, hashes hex-encoded.
    pub fn render(&self) -> Vec<BlockSummary> {
        self.blocks
            .iter()
            .map(|block| BlockSummary {
                index: block.get_index(),
                timestamp: block.get_timestamp(),
                transactions: block.get_transactions().to_vec(),
                prev_hash: HEXLOWER.encode(block.get_prev_hash()),
                curr_hash: HEXLOWER.encode(block.get_hash()),
            })
            .collect()
    }

    /// Extended (bincode) encoding; the legacy fixed-width store format
    /// lives in `storage::codec`.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        serialize(self)
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Blockchain> {
        deserialize::<Blockchain>(bytes)
    }
}

/// One chain entry prepared for display.
#[derive(Debug, Clone)]
pub struct BlockSummary {
    pub index: u32,
    pub timestamp: u64,
    pub transactions: Vec<Transaction>,
    pub prev_hash: String,
    pub curr_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_with_one_appended_block() -> Blockchain {
        let mut chain = Blockchain::genesis().unwrap();
        chain.set_difficulty(1); // Keep the test search short

        let mut batch = TransactionBatch::new();
        batch.push(Transaction::new(0, "A", "B", "10"));
        batch.push(Transaction::new(1, "C", "D", "5"));
        chain.append(batch).unwrap();
        chain
    }

    #[test]
    fn test_genesis_chain_is_valid() {
        let chain = Blockchain::genesis().unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(
            chain.get_difficulty(),
            DifficultyAdjustment::get_initial_difficulty()
        );
        assert!(chain.validate());
    }

    #[test]
    fn test_append_links_blocks() {
        let chain = chain_with_one_appended_block();
        assert_eq!(chain.len(), 2);

        let blocks = chain.blocks();
        assert_eq!(blocks[1].get_index(), 1);
        assert_eq!(blocks[1].get_prev_hash(), blocks[0].get_hash());
        assert!(chain.validate());
    }

    #[test]
    fn test_tampered_hash_detected() {
        let chain = chain_with_one_appended_block();
        let blocks = chain.blocks();

        // Flip one byte of the tail block's stored hash
        let mut tampered_hash = *blocks[1].get_hash();
        tampered_hash[0] ^= 0xFF;
        let tampered = Block::from_parts(
            blocks[1].get_index(),
            blocks[1].get_timestamp(),
            blocks[1].get_nonce(),
            *blocks[1].get_prev_hash(),
            tampered_hash,
            blocks[1].get_batch().clone(),
        );

        let bad_chain = Blockchain::from_parts(vec![blocks[0].clone(), tampered], 1);
        assert!(!bad_chain.validate());
        assert_eq!(bad_chain.first_invalid(), Some(1));
    }

    #[test]
    fn test_broken_link_detected() {
        let chain = chain_with_one_appended_block();
        let blocks = chain.blocks();

        let mut wrong_prev = *blocks[1].get_prev_hash();
        wrong_prev[31] ^= 0x01;
        let unlinked = Block::from_parts(
            blocks[1].get_index(),
            blocks[1].get_timestamp(),
            blocks[1].get_nonce(),
            wrong_prev,
            *blocks[1].get_hash(),
            blocks[1].get_batch().clone(),
        );

        let bad_chain = Blockchain::from_parts(vec![blocks[0].clone(), unlinked], 1);
        assert_eq!(bad_chain.first_invalid(), Some(1));
    }

    #[test]
    fn test_empty_chain_is_invalid() {
        let chain = Blockchain::from_parts(vec![], 2);
        assert!(!chain.validate());
    }

    #[test]
    fn test_extended_codec_round_trip() {
        let chain = chain_with_one_appended_block();
        let bytes = chain.serialize().unwrap();
        let restored = Blockchain::deserialize(&bytes).unwrap();
        assert_eq!(chain, restored);
    }

    #[test]
    fn test_render_produces_hex_hashes() {
        let chain = chain_with_one_appended_block();
        let summaries = chain.render();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].prev_hash, "0".repeat(64));
        assert_eq!(summaries[1].curr_hash.len(), 64);
        assert_eq!(summaries[1].transactions.len(), 2);
    }
}
