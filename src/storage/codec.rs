//! Legacy fixed-width store format.
//!
//! All integers are little-endian. Layout:
//!
//! ```text
//! ChainFile   := difficulty(4B) { Block }*
//! Block       := index(4B) timestamp(8B) nonce(4B) prevHash(32B) currHash(32B)
//!                txCount(4B) { Transaction }*
//! Transaction := index(4B) sender(1024B) receiver(1024B) amount(20B)
//! ```
//!
//! Text fields are NUL-padded to their declared widths; there are no
//! delimiters. The pool file is the same Transaction encoding with no
//! header. A short read ends decoding: trailing partial records are
//! silently dropped (end-of-valid-data, not corruption), so decoding
//! never fails.

use crate::core::transaction::extend_fixed_width;
use crate::core::{
    Block, Blockchain, DifficultyAdjustment, Transaction, TransactionBatch, AMOUNT_FIELD_LEN,
    RECEIVER_FIELD_LEN, SENDER_FIELD_LEN,
};
use crate::utils::HASH_LEN;

/// Cursor over a store file's bytes. Every read is all-or-nothing.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Reader<'a> {
        Reader { buf, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        if self.pos + len > self.buf.len() {
            return None;
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Some(slice)
    }

    fn read_u32(&mut self) -> Option<u32> {
        let bytes = self.take(4)?;
        Some(u32::from_le_bytes(
            bytes.try_into().expect("slice length checked above"),
        ))
    }

    fn read_u64(&mut self) -> Option<u64> {
        let bytes = self.take(8)?;
        Some(u64::from_le_bytes(
            bytes.try_into().expect("slice length checked above"),
        ))
    }

    fn read_hash(&mut self) -> Option<[u8; HASH_LEN]> {
        let bytes = self.take(HASH_LEN)?;
        let mut hash = [0u8; HASH_LEN];
        hash.copy_from_slice(bytes);
        Some(hash)
    }

    fn read_text_field(&mut self, width: usize) -> Option<String> {
        let bytes = self.take(width)?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(width);
        Some(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }
}

fn encode_transaction(buf: &mut Vec<u8>, transaction: &Transaction) {
    buf.extend(transaction.get_index().to_le_bytes());
    extend_fixed_width(buf, transaction.get_sender(), SENDER_FIELD_LEN);
    extend_fixed_width(buf, transaction.get_receiver(), RECEIVER_FIELD_LEN);
    extend_fixed_width(buf, transaction.get_amount(), AMOUNT_FIELD_LEN);
}

fn decode_transaction(reader: &mut Reader) -> Option<Transaction> {
    let index = reader.read_u32()?;
    let sender = reader.read_text_field(SENDER_FIELD_LEN)?;
    let receiver = reader.read_text_field(RECEIVER_FIELD_LEN)?;
    let amount = reader.read_text_field(AMOUNT_FIELD_LEN)?;
    Some(Transaction::new(index, &sender, &receiver, &amount))
}

fn encode_block(buf: &mut Vec<u8>, block: &Block) {
    buf.extend(block.get_index().to_le_bytes());
    buf.extend(block.get_timestamp().to_le_bytes());
    buf.extend(block.get_nonce().to_le_bytes());
    buf.extend(block.get_prev_hash());
    buf.extend(block.get_hash());
    buf.extend((block.get_transactions().len() as u32).to_le_bytes());
    for transaction in block.get_transactions() {
        encode_transaction(buf, transaction);
    }
}

// All-or-nothing: a block that cannot be read in full is dropped whole.
fn decode_block(reader: &mut Reader) -> Option<Block> {
    let index = reader.read_u32()?;
    let timestamp = reader.read_u64()?;
    let nonce = reader.read_u32()?;
    let prev_hash = reader.read_hash()?;
    let curr_hash = reader.read_hash()?;
    let tx_count = reader.read_u32()?;

    let mut transactions = TransactionBatch::new();
    for _ in 0..tx_count {
        transactions.push(decode_transaction(reader)?);
    }

    Some(Block::from_parts(
        index,
        timestamp,
        nonce,
        prev_hash,
        curr_hash,
        transactions,
    ))
}

pub fn encode_chain(chain: &Blockchain) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend(chain.get_difficulty().to_le_bytes());
    for block in chain.blocks() {
        encode_block(&mut buf, block);
    }
    buf
}

pub fn decode_chain(bytes: &[u8]) -> Blockchain {
    let mut reader = Reader::new(bytes);
    let difficulty = match reader.read_u32() {
        Some(difficulty) => difficulty,
        None => {
            return Blockchain::from_parts(
                Vec::new(),
                DifficultyAdjustment::get_initial_difficulty(),
            )
        }
    };

    let mut blocks = Vec::new();
    while let Some(block) = decode_block(&mut reader) {
        blocks.push(block);
    }
    Blockchain::from_parts(blocks, difficulty)
}

pub fn encode_pool(pool: &TransactionBatch) -> Vec<u8> {
    let mut buf = Vec::new();
    for transaction in pool.iter() {
        encode_transaction(&mut buf, transaction);
    }
    buf
}

pub fn decode_pool(bytes: &[u8]) -> TransactionBatch {
    let mut reader = Reader::new(bytes);
    let mut pool = TransactionBatch::new();
    while let Some(transaction) = decode_transaction(&mut reader) {
        pool.push(transaction);
    }
    pool
}
