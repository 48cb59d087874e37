//! Engine configuration for a single synchronisation run.

use std::path::PathBuf;
use std::time::Duration;

/// Number of files processed concurrently when no explicit limit is set.
pub const DEFAULT_CONCURRENCY: usize = 16;

/// Everything the orchestrator needs for one run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Name of the target bucket. Validated by the caller before the run starts.
    pub bucket: String,
    /// Root of the directory tree to upload.
    pub root_dir: PathBuf,
    /// Base directory that storage keys are made relative to (the invocation
    /// working directory in the CLI).
    pub base_dir: PathBuf,
    /// Location of the persisted digest ledger.
    pub ledger_path: PathBuf,
    /// Maximum number of files in flight at once.
    pub concurrency: usize,
    pub retry: RetryPolicy,
}

/// Bounded retry with exponential backoff, applied uniformly to every upload
/// error kind.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each subsequent retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}
