use ring::digest::{Context, SHA256};

use crate::error::{LedgerError, Result};
use std::time::{SystemTime, UNIX_EPOCH};

/// Length of a SHA-256 digest in bytes
pub const HASH_LEN: usize = 32;

/// Current wall-clock time in whole seconds since the Unix epoch.
pub fn current_timestamp() -> Result<u64> {
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| LedgerError::Crypto(format!("System time error: {e}")))?;

    Ok(duration.as_secs())
}

pub fn sha256_digest(data: &[u8]) -> [u8; HASH_LEN] {
    let mut context = Context::new(&SHA256);
    context.update(data);
    let digest = context.finish();

    let mut hash = [0u8; HASH_LEN];
    hash.copy_from_slice(digest.as_ref());
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_digest_known_vector() {
        // SHA-256 of the empty input
        let hash = sha256_digest(b"");
        assert_eq!(
            hash[..4],
            [0xe3, 0xb0, 0xc4, 0x42],
            "empty-input digest prefix mismatch"
        );
    }

    #[test]
    fn test_sha256_digest_deterministic() {
        assert_eq!(sha256_digest(b"ledger"), sha256_digest(b"ledger"));
        assert_ne!(sha256_digest(b"ledger"), sha256_digest(b"ledgen"));
    }

    #[test]
    fn test_current_timestamp_is_sane() {
        let ts = current_timestamp().unwrap();
        // Well past 2020-01-01
        assert!(ts > 1_577_836_800);
    }
}
