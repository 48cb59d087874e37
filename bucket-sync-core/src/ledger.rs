//! The upload ledger: a persisted set of content digests representing files
//! already confirmed uploaded.
//!
//! Lifecycle: loaded (or started empty) at the beginning of a run, consulted
//! per file, extended immediately after each acknowledged remote write, and
//! persisted once after the whole tree has been processed without an
//! unrecovered failure. The ledger is the sole durability mechanism for
//! idempotence, so the invariant is strict: a digest is recorded if and only
//! if the corresponding remote write was acknowledged.
//!
//! A missing or unreadable ledger file is not fatal (a first-ever run has no
//! ledger); a failed save is, since it silently discards all deduplication
//! progress for the next run.

use std::collections::HashSet;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::{info, warn};

/// In-memory digest set with atomic insert, safe to share across concurrently
/// completing upload tasks.
pub struct Ledger {
    digests: Mutex<HashSet<String>>,
}

impl Ledger {
    /// An empty ledger, as used on a first-ever run.
    pub fn new() -> Self {
        Ledger {
            digests: Mutex::new(HashSet::new()),
        }
    }

    /// Read the persisted ledger. Missing or unreadable state degrades to an
    /// empty ledger with a diagnostic; it never fails the run.
    pub async fn load(path: &Path) -> Self {
        info!(path = %path.display(), "Loading upload ledger");
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => {
                let digests: HashSet<String> = contents
                    .lines()
                    .filter(|line| !line.is_empty())
                    .map(str::to_owned)
                    .collect();
                info!(digests = digests.len(), "Upload ledger loaded");
                Ledger {
                    digests: Mutex::new(digests),
                }
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = ?e,
                    "Failed to read upload ledger, starting with an empty one"
                );
                Ledger::new()
            }
        }
    }

    pub fn contains(&self, digest: &str) -> bool {
        self.digests.lock().expect("ledger lock poisoned").contains(digest)
    }

    /// Idempotent insert.
    pub fn record(&self, digest: String) {
        self.digests.lock().expect("ledger lock poisoned").insert(digest);
    }

    /// Serialize the full current set as newline-joined hex strings,
    /// overwriting any previously persisted state.
    pub async fn save(&self, path: &Path) -> io::Result<()> {
        let joined = {
            let digests = self.digests.lock().expect("ledger lock poisoned");
            digests.iter().cloned().collect::<Vec<_>>().join("\n")
        };
        tokio::fs::write(path, joined).await?;
        info!(path = %path.display(), digests = self.len(), "Upload ledger saved");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.digests.lock().expect("ledger lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_contains() {
        let ledger = Ledger::new();
        assert!(!ledger.contains("abc"));
        ledger.record("abc".to_string());
        assert!(ledger.contains("abc"));
        // Idempotent: a second insert does not grow the set.
        ledger.record("abc".to_string());
        assert_eq!(ledger.len(), 1);
    }

    #[tokio::test]
    async fn load_of_missing_file_yields_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::load(&dir.path().join("no-such-ledger")).await;
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips_digests() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hash.bin");

        let ledger = Ledger::new();
        ledger.record("aaa".to_string());
        ledger.record("bbb".to_string());
        ledger.save(&path).await.unwrap();

        let reloaded = Ledger::load(&path).await;
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("aaa"));
        assert!(reloaded.contains("bbb"));
    }

    #[tokio::test]
    async fn load_ignores_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hash.bin");
        tokio::fs::write(&path, "aaa\n\nbbb\n").await.unwrap();

        let ledger = Ledger::load(&path).await;
        assert_eq!(ledger.len(), 2);
    }

    #[tokio::test]
    async fn save_overwrites_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hash.bin");
        tokio::fs::write(&path, "stale\n").await.unwrap();

        let ledger = Ledger::new();
        ledger.record("fresh".to_string());
        ledger.save(&path).await.unwrap();

        let reloaded = Ledger::load(&path).await;
        assert!(reloaded.contains("fresh"));
        assert!(!reloaded.contains("stale"));
    }

    #[tokio::test]
    async fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("hash.bin");
        let ledger = Ledger::new();
        ledger.record("aaa".to_string());
        assert!(ledger.save(&path).await.is_err());
    }
}
