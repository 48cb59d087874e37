/// # bucket-sync CLI Interface (Module)
///
/// This module implements the full CLI interface for bucket-sync — handling
/// argument parsing, environment validation and the main entrypoint.
///
/// All engine logic (hashing, ledger, walking, retried uploads) lives in the
/// `bucket-sync-core` crate. This module is strictly CLI glue and wiring.
///
/// ## How To Use
/// - For command-line users: run the installed `bucket-sync` binary with
///   `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed
///   [`Cli`].
///
/// One invocation uploads one directory tree (default `./book`) to the bucket
/// named by `CF_BUCKET_NAME`, consulting the `hash.bin` ledger in the working
/// directory. Exit code 0 on full success; 1 on missing configuration, a
/// ledger-save failure, or any unrecovered upload failure.
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use bucket_sync_core::config::{RetryPolicy, SyncConfig, DEFAULT_CONCURRENCY};
use bucket_sync_core::synchronise::synchronise;

use crate::load_config::load_from_env;
use crate::upload::R2Client;

/// CLI for bucket-sync: incrementally upload a directory tree to a bucket.
#[derive(Parser)]
#[clap(
    name = "bucket-sync",
    version,
    about = "Upload a directory tree to an S3-compatible bucket, skipping content already uploaded"
)]
pub struct Cli {
    /// Directory tree to upload
    #[clap(long, default_value = "./book")]
    pub dir: PathBuf,
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // The bucket name is validated before any I/O.
    let store_config = load_from_env()?;
    let store = R2Client::new(&store_config);

    let base_dir = std::env::current_dir()?;
    let config = SyncConfig {
        bucket: store_config.bucket.clone(),
        root_dir: cli.dir,
        base_dir: base_dir.clone(),
        ledger_path: base_dir.join("hash.bin"),
        concurrency: DEFAULT_CONCURRENCY,
        retry: RetryPolicy::default(),
    };

    tracing::info!(
        bucket = %config.bucket,
        dir = %config.root_dir.display(),
        "Starting upload run"
    );
    match synchronise(&config, &store).await {
        Ok(report) => {
            tracing::info!(
                uploaded = report.uploaded.len(),
                skipped_duplicate = report.skipped_duplicate,
                skipped_empty = report.skipped_empty,
                "Upload run complete"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Upload run failed");
            Err(anyhow::Error::new(e))
        }
    }
}
