use serde::{Deserialize, Serialize};

/// Fixed field widths shared by the hash engine and the legacy store codec.
/// A trailing NUL byte is reserved in each buffer, so the longest text a
/// field can carry is one byte less than its width.
pub const SENDER_FIELD_LEN: usize = 1024;
pub const RECEIVER_FIELD_LEN: usize = 1024;
pub const AMOUNT_FIELD_LEN: usize = 20;

/// A single value transfer awaiting (or committed to) a block.
///
/// The amount is opaque text; the ledger never interprets it numerically.
/// Oversized fields are silently truncated at construction so that the
/// in-memory value, the hash input, and the store encoding always agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct Transaction {
    index: u32,
    sender: String,
    receiver: String,
    amount: String,
}

impl Transaction {
    pub fn new(index: u32, sender: &str, receiver: &str, amount: &str) -> Transaction {
        Transaction {
            index,
            sender: truncate_to_field(sender, SENDER_FIELD_LEN),
            receiver: truncate_to_field(receiver, RECEIVER_FIELD_LEN),
            amount: truncate_to_field(amount, AMOUNT_FIELD_LEN),
        }
    }

    pub fn get_index(&self) -> u32 {
        self.index
    }

    pub fn get_sender(&self) -> &str {
        self.sender.as_str()
    }

    pub fn get_receiver(&self) -> &str {
        self.receiver.as_str()
    }

    pub fn get_amount(&self) -> &str {
        self.amount.as_str()
    }
}

/// An ordered batch of transactions: a block's payload, or the pending pool.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct TransactionBatch {
    transactions: Vec<Transaction>,
}

impl TransactionBatch {
    pub fn new() -> TransactionBatch {
        TransactionBatch {
            transactions: Vec::new(),
        }
    }

    pub fn push(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn as_slice(&self) -> &[Transaction] {
        self.transactions.as_slice()
    }
}

/// Append `text` to `buf` as a fixed-width field: NUL-padded when short,
/// silently truncated when long. Field boundaries in the hash input and the
/// store format rely entirely on these widths.
pub(crate) fn extend_fixed_width(buf: &mut Vec<u8>, text: &str, width: usize) {
    let bytes = text.as_bytes();
    let take = bytes.len().min(width - 1);
    buf.extend_from_slice(&bytes[..take]);
    buf.resize(buf.len() + (width - take), 0);
}

fn truncate_to_field(text: &str, width: usize) -> String {
    let max = width - 1;
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_fields() {
        let tx = Transaction::new(3, "Alice", "Bob", "42");
        assert_eq!(tx.get_index(), 3);
        assert_eq!(tx.get_sender(), "Alice");
        assert_eq!(tx.get_receiver(), "Bob");
        assert_eq!(tx.get_amount(), "42");
    }

    #[test]
    fn test_oversized_fields_are_truncated() {
        let long_sender = "s".repeat(SENDER_FIELD_LEN + 100);
        let long_amount = "9".repeat(AMOUNT_FIELD_LEN + 5);
        let tx = Transaction::new(0, &long_sender, "Bob", &long_amount);

        assert_eq!(tx.get_sender().len(), SENDER_FIELD_LEN - 1);
        assert_eq!(tx.get_amount().len(), AMOUNT_FIELD_LEN - 1);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 7 three-byte chars = 21 bytes, one over the 19-byte amount capacity
        let amount = "\u{20AC}".repeat(7);
        let tx = Transaction::new(0, "a", "b", &amount);
        assert!(tx.get_amount().len() <= AMOUNT_FIELD_LEN - 1);
        assert_eq!(tx.get_amount(), "\u{20AC}".repeat(6));
    }

    #[test]
    fn test_extend_fixed_width_pads_and_truncates() {
        let mut buf = Vec::new();
        extend_fixed_width(&mut buf, "ab", 5);
        assert_eq!(buf, vec![b'a', b'b', 0, 0, 0]);

        let mut buf = Vec::new();
        extend_fixed_width(&mut buf, "abcdef", 5);
        assert_eq!(buf, vec![b'a', b'b', b'c', b'd', 0]);
    }

    #[test]
    fn test_batch_preserves_insertion_order() {
        let mut batch = TransactionBatch::new();
        batch.push(Transaction::new(0, "A", "B", "10"));
        batch.push(Transaction::new(1, "C", "D", "5"));

        assert_eq!(batch.len(), 2);
        let senders: Vec<&str> = batch.iter().map(|tx| tx.get_sender()).collect();
        assert_eq!(senders, vec!["A", "C"]);
    }
}
