//! SHA-256 helpers shared by the Merkle committer and the nonce search
//!
//! Both sides must use the same digest so a given (root, nonce) pair is
//! globally reproducible.

use sha2::{Digest, Sha256};

/// Hash arbitrary bytes with SHA-256
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Hash arbitrary bytes with SHA-256 and render the digest as lowercase hex
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        // SHA-256 of the empty string
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_hex_matches_bytes() {
        let digest = sha256(b"hello");
        assert_eq!(hex::encode(digest), sha256_hex(b"hello"));
        assert_eq!(digest.len(), 32);
    }
}
