//! High-level pipeline: orchestrates one complete synchronisation run.
//!
//! This module drives the whole pass and owns the overall success/failure
//! verdict: load the ledger, walk the tree, process every discovered file
//! concurrently (read → hash → dedup-check → retried upload → record), and
//! persist the ledger once the entire tree has completed.
//!
//! # Major Types
//! - [`SyncReport`]: output report with uploaded keys and skip counts for
//!   downstream audit
//! - [`SyncError`]: the failure taxonomy for a run
//!
//! # Responsibilities
//! - Fail-fast batch semantics: if any file fails after exhausting its own
//!   retries, the batch join fails, in-flight results are discarded and the
//!   ledger is NOT saved. Uploads that already succeeded in the failed batch
//!   are durable remotely but their digests are lost from the persisted
//!   ledger, so the next run re-uploads them. Deliberate trade-off, kept.
//! - The ledger is held authoritative here; the walker and the retrying
//!   uploader never touch it.
//!
//! # Concurrency
//! Per-file tasks run with bounded fan-out ([`SyncConfig::concurrency`])
//! instead of spawning the whole tree at once, so a large tree cannot exhaust
//! file descriptors or trip storage-service rate limits. No ordering is
//! guaranteed between files.
//!
//! # Navigation
//! - Main entrypoint: [`synchronise`]

use std::io;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, error, info};

use crate::config::SyncConfig;
use crate::contract::{ObjectStore, PutRequest};
use crate::hash;
use crate::ledger::Ledger;
use crate::retry::{upload_with_retry, UploadError};
use crate::walk::{self, FileRecord, WalkError};

/// Per-file result for files that did not fail the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Content was written to the store and its digest recorded.
    Uploaded,
    /// Identical content was uploaded before (this run or a prior one).
    SkippedDuplicate,
    /// Zero-byte file: never hashed, never uploaded, never recorded.
    SkippedEmpty,
}

/// Aggregated report of one successful run.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Keys uploaded this run, in completion order.
    pub uploaded: Vec<String>,
    pub skipped_duplicate: usize,
    pub skipped_empty: usize,
}

#[derive(Debug)]
pub enum SyncError {
    /// Directory enumeration failed.
    Walk(WalkError),
    /// A discovered file could not be read.
    Read { key: String, source: io::Error },
    /// An upload exhausted its retries.
    Upload(UploadError),
    /// The ledger could not be persisted after a fully successful batch.
    /// Surfaced distinctly: it silently compromises the next run's
    /// deduplication.
    LedgerSave(io::Error),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::Walk(e) => write!(f, "{e}"),
            SyncError::Read { key, source } => {
                write!(f, "failed to read {key}: {source}")
            }
            SyncError::Upload(e) => write!(f, "{e}"),
            SyncError::LedgerSave(e) => write!(f, "failed to save upload ledger: {e}"),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::Walk(e) => Some(e),
            SyncError::Read { source, .. } => Some(source),
            SyncError::Upload(e) => Some(e),
            SyncError::LedgerSave(e) => Some(e),
        }
    }
}

impl From<WalkError> for SyncError {
    fn from(e: WalkError) -> Self {
        SyncError::Walk(e)
    }
}

impl From<UploadError> for SyncError {
    fn from(e: UploadError) -> Self {
        SyncError::Upload(e)
    }
}

/// Entrypoint: run one complete synchronisation pass against `store`.
pub async fn synchronise<S>(config: &SyncConfig, store: &S) -> Result<SyncReport, SyncError>
where
    S: ObjectStore + Sync,
{
    info!(
        bucket = %config.bucket,
        root = %config.root_dir.display(),
        "Starting synchronisation run"
    );

    let ledger = Ledger::load(&config.ledger_path).await;

    let records = walk::walk(&config.root_dir, &config.base_dir).await?;
    info!(files = records.len(), "Directory walk complete");

    // Bounded fan-out; the first failed task fails the whole batch and drops
    // everything still in flight.
    let outcomes: Vec<(String, UploadOutcome)> = stream::iter(
        records
            .into_iter()
            .map(|record| process_file(config, store, &ledger, record)),
    )
    .buffer_unordered(config.concurrency.max(1))
    .try_collect()
    .await?;

    let mut report = SyncReport::default();
    for (key, outcome) in outcomes {
        match outcome {
            UploadOutcome::Uploaded => report.uploaded.push(key),
            UploadOutcome::SkippedDuplicate => report.skipped_duplicate += 1,
            UploadOutcome::SkippedEmpty => report.skipped_empty += 1,
        }
    }

    if let Err(e) = ledger.save(&config.ledger_path).await {
        error!(
            path = %config.ledger_path.display(),
            error = ?e,
            "Failed to save upload ledger; next run will not deduplicate against this one"
        );
        return Err(SyncError::LedgerSave(e));
    }

    info!(
        uploaded = report.uploaded.len(),
        skipped_duplicate = report.skipped_duplicate,
        skipped_empty = report.skipped_empty,
        "Synchronisation complete"
    );
    Ok(report)
}

/// Per-file protocol: read the full content, skip empties without hashing,
/// dedup-check the digest, upload cache misses with retry, and record the
/// digest only after the remote write was acknowledged.
async fn process_file<S>(
    config: &SyncConfig,
    store: &S,
    ledger: &Ledger,
    record: FileRecord,
) -> Result<(String, UploadOutcome), SyncError>
where
    S: ObjectStore + Sync,
{
    let bytes = match tokio::fs::read(&record.path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(key = %record.key, error = ?e, "Failed to read file");
            return Err(SyncError::Read {
                key: record.key,
                source: e,
            });
        }
    };

    if bytes.is_empty() {
        debug!(key = %record.key, "Skipping empty file");
        return Ok((record.key, UploadOutcome::SkippedEmpty));
    }

    let digest = hash::digest(&bytes);
    if ledger.contains(&digest) {
        info!(key = %record.key, "Skipping (already uploaded)");
        return Ok((record.key, UploadOutcome::SkippedDuplicate));
    }

    upload_with_retry(
        store,
        PutRequest {
            bucket: &config.bucket,
            key: &record.key,
            body: &bytes,
            content_type: record.content_type,
        },
        config.retry,
    )
    .await?;

    ledger.record(digest);
    info!(key = %record.key, "Uploaded and recorded digest");
    Ok((record.key, UploadOutcome::Uploaded))
}
