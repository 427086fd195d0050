use crate::core::transaction::{
    extend_fixed_width, Transaction, AMOUNT_FIELD_LEN, RECEIVER_FIELD_LEN, SENDER_FIELD_LEN,
};
use crate::utils::{sha256_digest, HASH_LEN};
use data_encoding::HEXLOWER;
use log::info;

/// Proof-of-work search over the header fields and payload of one block.
///
/// The digest is SHA-256 over a fixed-order concatenation: index (4 bytes
/// little-endian), timestamp (8 bytes LE), previous hash (32 bytes), nonce
/// (4 bytes LE), then each transaction's sender/receiver/amount encoded to
/// its declared fixed width. No separators are added between transactions.
pub struct ProofOfWork<'a> {
    index: u32,
    timestamp: u64,
    prev_hash: &'a [u8; HASH_LEN],
    transactions: &'a [Transaction],
    difficulty: u32,
}

impl<'a> ProofOfWork<'a> {
    pub fn new(
        index: u32,
        timestamp: u64,
        prev_hash: &'a [u8; HASH_LEN],
        transactions: &'a [Transaction],
        difficulty: u32,
    ) -> ProofOfWork<'a> {
        ProofOfWork {
            index,
            timestamp,
            prev_hash,
            transactions,
            difficulty,
        }
    }

    /// A hash is valid when its first `difficulty` bytes are all zero.
    /// Difficulty is a byte count, not a bit count; the coarse granularity
    /// is kept for compatibility with persisted chains.
    pub fn is_valid_hash(hash: &[u8; HASH_LEN], difficulty: u32) -> bool {
        hash.iter().take(difficulty as usize).all(|&byte| byte == 0)
    }

    /// Compute the block digest for a candidate nonce.
    pub fn digest(&self, nonce: u32) -> [u8; HASH_LEN] {
        block_digest(
            self.index,
            self.timestamp,
            self.prev_hash,
            nonce,
            self.transactions,
        )
    }

    /// Brute-force the nonce space from zero until the digest satisfies the
    /// difficulty predicate. The search has no upper bound; the difficulty
    /// must stay low enough to terminate in practice.
    pub fn run(&self) -> (u32, [u8; HASH_LEN]) {
        let mut nonce: u32 = 0;
        info!(
            "Mining block {} at difficulty {}",
            self.index, self.difficulty
        );
        loop {
            let hash = self.digest(nonce);
            if Self::is_valid_hash(&hash, self.difficulty) {
                info!(
                    "Block {} mined with nonce {}: {}",
                    self.index,
                    nonce,
                    HEXLOWER.encode(&hash)
                );
                return (nonce, hash);
            }
            nonce = nonce.wrapping_add(1);
        }
    }
}

/// Deterministic digest over a block's hashed fields and a nonce.
///
/// Used both by the mining search and by chain validation, which recomputes
/// each stored block's hash from its stored fields.
pub fn block_digest(
    index: u32,
    timestamp: u64,
    prev_hash: &[u8; HASH_LEN],
    nonce: u32,
    transactions: &[Transaction],
) -> [u8; HASH_LEN] {
    let tx_width = SENDER_FIELD_LEN + RECEIVER_FIELD_LEN + AMOUNT_FIELD_LEN;
    let mut data_bytes = Vec::with_capacity(4 + 8 + HASH_LEN + 4 + transactions.len() * tx_width);
    data_bytes.extend(index.to_le_bytes());
    data_bytes.extend(timestamp.to_le_bytes());
    data_bytes.extend(prev_hash);
    data_bytes.extend(nonce.to_le_bytes());
    for transaction in transactions {
        extend_fixed_width(&mut data_bytes, transaction.get_sender(), SENDER_FIELD_LEN);
        extend_fixed_width(&mut data_bytes, transaction.get_receiver(), RECEIVER_FIELD_LEN);
        extend_fixed_width(&mut data_bytes, transaction.get_amount(), AMOUNT_FIELD_LEN);
    }
    sha256_digest(data_bytes.as_slice())
}
