//! Content digests: SHA-256 over a file's full byte content.
//!
//! The digest is what makes deduplication content-addressed rather than
//! path-addressed: identical bytes yield identical digests regardless of file
//! name, path or modification time.

use sha2::{Digest, Sha256};

/// Hash the complete byte content and render it as lowercase hex.
pub fn digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        assert_eq!(digest(b"hello world"), digest(b"hello world"));
    }

    #[test]
    fn digest_matches_known_sha256_vector() {
        assert_eq!(
            digest(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn digest_of_empty_input_is_well_defined() {
        assert_eq!(
            digest(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn digest_is_sensitive_to_content() {
        assert_ne!(digest(b"abc"), digest(b"abd"));
    }
}
