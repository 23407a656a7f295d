//! Record key generation.

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Key length for new records. TimeTagger itself uses 8 characters; we use
/// 12 for more randomness. Collisions are not checked.
pub const KEY_LENGTH: usize = 12;

/// Generate a random record key drawn uniformly from the 62-symbol
/// alphanumeric pool (a-z, A-Z, 0-9).
pub fn record_key() -> String {
    key_of_length(KEY_LENGTH)
}

pub fn key_of_length(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
