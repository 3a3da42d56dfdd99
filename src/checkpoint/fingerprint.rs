// src/checkpoint/fingerprint.rs
// =============================================================================
// Identity of an input file, used to decide whether a checkpoint belongs to it.
//
// Row count alone isn't enough: two different files with the same number of
// rows would be treated as the same job. We also hash the URL column in
// order, so a checkpoint only applies to the exact same list of URLs.
// =============================================================================

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub row_count: usize,
    /// Hex SHA-256 over the URL column, one URL per line
    pub url_digest: String,
}

impl Fingerprint {
    pub fn from_urls<'a, I>(urls: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut hasher = Sha256::new();
        let mut row_count = 0;
        for url in urls {
            hasher.update(url.as_bytes());
            hasher.update(b"\n");
            row_count += 1;
        }
        Self {
            row_count,
            url_digest: hex::encode(hasher.finalize()),
        }
    }

    /// Explains why `other` doesn't match, or None if it does
    pub fn mismatch(&self, other: &Fingerprint) -> Option<String> {
        if self.row_count != other.row_count {
            Some(format!(
                "row count changed ({} in checkpoint, {} in input)",
                other.row_count, self.row_count
            ))
        } else if self.url_digest != other.url_digest {
            Some("URL column changed since the checkpoint was written".to_string())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_urls_same_fingerprint() {
        let a = Fingerprint::from_urls(["https://a.test", "https://b.test"]);
        let b = Fingerprint::from_urls(["https://a.test", "https://b.test"]);
        assert_eq!(a, b);
        assert_eq!(a.mismatch(&b), None);
    }

    #[test]
    fn test_same_count_different_urls() {
        let a = Fingerprint::from_urls(["https://a.test", "https://b.test"]);
        let b = Fingerprint::from_urls(["https://b.test", "https://a.test"]);
        assert_eq!(a.row_count, b.row_count);
        assert!(a.mismatch(&b).unwrap().contains("URL column"));
    }

    #[test]
    fn test_row_count_reported_first() {
        let a = Fingerprint::from_urls(["https://a.test"]);
        let b = Fingerprint::from_urls(["https://a.test", "https://b.test"]);
        assert!(a.mismatch(&b).unwrap().contains("row count"));
    }

    #[test]
    fn test_line_boundaries_matter() {
        // "ab" + "c" must not collide with "a" + "bc"
        let a = Fingerprint::from_urls(["ab", "c"]);
        let b = Fingerprint::from_urls(["a", "bc"]);
        assert_ne!(a.url_digest, b.url_digest);
    }
}
