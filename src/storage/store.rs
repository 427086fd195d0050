use crate::config::GLOBAL_CONFIG;
use crate::core::{Block, Blockchain, Transaction, TransactionBatch};
use crate::error::{LedgerError, Result};
use crate::storage::codec;
use crate::utils::current_timestamp;
use log::info;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-backed store for the chain and the pending-transaction pool.
///
/// Every operation is a full load -> mutate -> save cycle over the two
/// store files; there is no locking or atomic rename. Two concurrent
/// invocations race and the last writer wins, so callers serialize
/// invocations externally.
pub struct LedgerStore {
    chain_path: PathBuf,
    pool_path: PathBuf,
}

impl LedgerStore {
    pub fn new(chain_path: impl Into<PathBuf>, pool_path: impl Into<PathBuf>) -> LedgerStore {
        LedgerStore {
            chain_path: chain_path.into(),
            pool_path: pool_path.into(),
        }
    }

    /// Store rooted at the paths from the global configuration.
    pub fn from_config() -> LedgerStore {
        LedgerStore::new(
            GLOBAL_CONFIG.get_chain_path(),
            GLOBAL_CONFIG.get_pool_path(),
        )
    }

    pub fn chain_path(&self) -> &Path {
        &self.chain_path
    }

    pub fn pool_path(&self) -> &Path {
        &self.pool_path
    }

    fn read_store_file(path: &Path) -> Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(LedgerError::Io(format!(
                "Failed to read {}: {err}",
                path.display()
            ))),
        }
    }

    fn write_store_file(path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| {
                    LedgerError::Io(format!("Failed to create {}: {err}", parent.display()))
                })?;
            }
        }
        fs::write(path, bytes)
            .map_err(|err| LedgerError::Io(format!("Failed to write {}: {err}", path.display())))
    }

    /// Load the persisted chain. A missing store file, or one holding no
    /// complete blocks, yields a fresh genesis chain rather than an error.
    pub fn load_chain(&self) -> Result<Blockchain> {
        match Self::read_store_file(&self.chain_path)? {
            Some(bytes) => {
                let chain = codec::decode_chain(&bytes);
                if chain.is_empty() {
                    info!(
                        "Chain store {} holds no complete blocks, starting fresh",
                        self.chain_path.display()
                    );
                    return Blockchain::genesis();
                }
                Ok(chain)
            }
            None => {
                info!(
                    "No chain store at {}, creating genesis chain",
                    self.chain_path.display()
                );
                Blockchain::genesis()
            }
        }
    }

    pub fn save_chain(&self, chain: &Blockchain) -> Result<()> {
        Self::write_store_file(&self.chain_path, &codec::encode_chain(chain))
    }

    /// Load the pending pool; a missing file yields an empty pool.
    pub fn load_pool(&self) -> Result<TransactionBatch> {
        Ok(match Self::read_store_file(&self.pool_path)? {
            Some(bytes) => codec::decode_pool(&bytes),
            None => TransactionBatch::new(),
        })
    }

    pub fn save_pool(&self, pool: &TransactionBatch) -> Result<()> {
        Self::write_store_file(&self.pool_path, &codec::encode_pool(pool))
    }

    /// Queue a transaction for the next block and persist the pool.
    pub fn submit_transaction(
        &self,
        sender: &str,
        receiver: &str,
        amount: &str,
    ) -> Result<Transaction> {
        let mut pool = self.load_pool()?;
        let transaction = Transaction::new(pool.len() as u32, sender, receiver, amount);
        pool.push(transaction.clone());
        self.save_pool(&pool)?;

        info!(
            "Transaction {} queued ({} now pending)",
            transaction.get_index(),
            pool.len()
        );
        Ok(transaction)
    }

    /// Drain the pending pool into a newly mined block: append it to the
    /// chain, adjust the difficulty from how long mining took, verify chain
    /// integrity, then persist the chain and an emptied pool.
    pub fn mine_next_block(&self) -> Result<Block> {
        let mut chain = self.load_chain()?;
        let pool = self.load_pool()?;

        if pool.is_empty() {
            return Err(LedgerError::Mining(
                "No pending transactions to mine".to_string(),
            ));
        }

        let started = current_timestamp()?;
        chain.append(pool)?;
        let finished = current_timestamp()?;
        chain.adjust_difficulty(started, finished);

        if !chain.validate() {
            return Err(LedgerError::InvalidBlock(
                "Chain failed integrity check after mining".to_string(),
            ));
        }

        self.save_chain(&chain)?;
        self.save_pool(&TransactionBatch::new())?;

        let block = chain.tip().cloned().ok_or_else(|| {
            LedgerError::InvalidBlock("Chain has no tip after mining".to_string())
        })?;
        info!(
            "Block {} committed, next difficulty {}",
            block.get_index(),
            chain.get_difficulty()
        );
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> LedgerStore {
        LedgerStore::new(dir.join("blockchain.dat"), dir.join("transactions.dat"))
    }

    #[test]
    fn test_load_chain_creates_genesis_when_missing() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let chain = store.load_chain().unwrap();
        assert_eq!(chain.len(), 1);
        assert!(chain.validate());
    }

    #[test]
    fn test_load_pool_empty_when_missing() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(store.load_pool().unwrap().is_empty());
    }

    #[test]
    fn test_submit_assigns_sequential_indices() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let first = store.submit_transaction("A", "B", "10").unwrap();
        let second = store.submit_transaction("C", "D", "5").unwrap();
        assert_eq!(first.get_index(), 0);
        assert_eq!(second.get_index(), 1);

        let pool = store.load_pool().unwrap();
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_mine_with_empty_pool_fails() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let result = store.mine_next_block();
        assert!(matches!(result, Err(LedgerError::Mining(_))));
    }

    #[test]
    fn test_chain_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let chain = store.load_chain().unwrap();
        store.save_chain(&chain).unwrap();
        let reloaded = store.load_chain().unwrap();
        assert_eq!(chain, reloaded);
    }
}
