use log::info;

// Difficulty adjustment constants
const FAST_BLOCK_SECS: u64 = 10; // Mined faster than this: raise difficulty
const SLOW_BLOCK_SECS: u64 = 40; // Mined slower than this: lower difficulty
const INITIAL_DIFFICULTY: u32 = 2; // Starting difficulty (leading zero bytes)
const MIN_DIFFICULTY: u32 = 1; // Minimum difficulty

/// Per-block difficulty adjustment based on how long the last mining cycle
/// took. Difficulty counts leading zero bytes of the block hash, so each
/// step changes the expected work by a factor of 256.
///
/// There is no upper bound: combined with the unbounded mining loop this is
/// a latent liveness hazard. Capping it would change which hashes persisted
/// chains accept, so the hazard stays.
pub struct DifficultyAdjustment;

impl DifficultyAdjustment {
    /// Compute the difficulty for the next block from the timestamps
    /// bracketing the previous mining cycle (seconds since epoch).
    pub fn adjust(prev_timestamp: u64, curr_timestamp: u64, current_difficulty: u32) -> u32 {
        let elapsed = curr_timestamp.saturating_sub(prev_timestamp);

        let new_difficulty = if elapsed < FAST_BLOCK_SECS {
            current_difficulty + 1
        } else if elapsed > SLOW_BLOCK_SECS && current_difficulty > MIN_DIFFICULTY {
            current_difficulty - 1
        } else {
            current_difficulty
        };

        if new_difficulty != current_difficulty {
            info!(
                "Difficulty adjusted {current_difficulty} -> {new_difficulty} (block took {elapsed}s)"
            );
        }

        new_difficulty
    }

    /// Get the initial difficulty for a fresh chain
    pub fn get_initial_difficulty() -> u32 {
        INITIAL_DIFFICULTY
    }
}
