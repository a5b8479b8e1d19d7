//! SHA-256 hashing

use ccd_primitives::Hash256;
use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of the input data
pub fn sha256(data: &[u8]) -> Hash256 {
    let mut hasher = Sha256::new();
    hasher.update(data);
    Hash256::from_bytes(hasher.finalize().into())
}

/// Compute SHA-256 over the concatenation of `parts` without copying them
pub fn sha256_concat(parts: &[&[u8]]) -> Hash256 {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    Hash256::from_bytes(hasher.finalize().into())
}
