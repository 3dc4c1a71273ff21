//! SHA-256 digests for snapshot content.

use sha2::{Digest, Sha256};

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Digest of a file body as stored on a commit snapshot row.
pub fn content_hash(content: &str) -> String {
    sha256_hex(content.as_bytes())
}
