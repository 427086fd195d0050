use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::env;
use std::sync::RwLock;

pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(Config::new);

static DEFAULT_CHAIN_PATH: &str = "data/blockchain.dat";
static DEFAULT_POOL_PATH: &str = "data/transactions.dat";

const CHAIN_PATH_KEY: &str = "CHAIN_FILE";
const POOL_PATH_KEY: &str = "POOL_FILE";

pub struct Config {
    inner: RwLock<HashMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Config {
        let mut chain_path = String::from(DEFAULT_CHAIN_PATH);
        if let Ok(path) = env::var(CHAIN_PATH_KEY) {
            chain_path = path;
        }

        let mut pool_path = String::from(DEFAULT_POOL_PATH);
        if let Ok(path) = env::var(POOL_PATH_KEY) {
            pool_path = path;
        }

        let mut map = HashMap::new();
        map.insert(String::from(CHAIN_PATH_KEY), chain_path);
        map.insert(String::from(POOL_PATH_KEY), pool_path);

        Config {
            inner: RwLock::new(map),
        }
    }

    pub fn get_chain_path(&self) -> String {
        let inner = self
            .inner
            .read()
            .expect("Failed to acquire read lock on config - this should never happen");
        inner
            .get(CHAIN_PATH_KEY)
            .expect("Chain path should always be present in config")
            .clone()
    }

    pub fn set_chain_path(&self, path: String) {
        let mut inner = self
            .inner
            .write()
            .expect("Failed to acquire write lock on config - this should never happen");
        inner.insert(String::from(CHAIN_PATH_KEY), path);
    }

    pub fn get_pool_path(&self) -> String {
        let inner = self
            .inner
            .read()
            .expect("Failed to acquire read lock on config - this should never happen");
        inner
            .get(POOL_PATH_KEY)
            .expect("Pool path should always be present in config")
            .clone()
    }

    pub fn set_pool_path(&self, path: String) {
        let mut inner = self
            .inner
            .write()
            .expect("Failed to acquire write lock on config - this should never happen");
        inner.insert(String::from(POOL_PATH_KEY), path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = Config::new();
        assert!(!config.get_chain_path().is_empty());
        assert!(!config.get_pool_path().is_empty());
    }

    #[test]
    fn test_set_paths() {
        let config = Config::new();
        config.set_chain_path("custom/chain.dat".to_string());
        config.set_pool_path("custom/pool.dat".to_string());
        assert_eq!(config.get_chain_path(), "custom/chain.dat");
        assert_eq!(config.get_pool_path(), "custom/pool.dat");
    }
}
