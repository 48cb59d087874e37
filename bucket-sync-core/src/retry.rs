//! Retried uploads: bounded attempts with exponential backoff.
//!
//! The same request payload (key, full byte buffer, content type) is resent
//! unchanged on every attempt; the buffer is held in memory for the duration
//! of the retries and never re-read from disk, so every attempt sends
//! byte-identical content even if the source file changes mid-run.
//!
//! Retry applies uniformly to every error kind; transient and permanent
//! failures are not distinguished. After the last attempt the uploader
//! surfaces the final error together with the attempt count, leaving the
//! abort decision to the caller.

use tokio::time::sleep;
use tracing::warn;

use crate::config::RetryPolicy;
use crate::contract::{ObjectStore, PutRequest, StoreError};

/// An upload that failed after exhausting all attempts.
#[derive(Debug)]
pub struct UploadError {
    /// Storage key of the failing object.
    pub key: String,
    /// How many attempts were made before giving up.
    pub attempts: u32,
    /// The last error the store returned.
    pub source: StoreError,
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "upload of {} failed after {} attempts: {}",
            self.key, self.attempts, self.source
        )
    }
}

impl std::error::Error for UploadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Attempt the write, retrying up to `policy.max_attempts` times in total.
/// The delay before retry `n` is `base_delay * 2^(n-1)`.
pub async fn upload_with_retry<S>(
    store: &S,
    req: PutRequest<'_>,
    policy: RetryPolicy,
) -> Result<(), UploadError>
where
    S: ObjectStore + ?Sized,
{
    let mut attempt: u32 = 1;
    loop {
        match store.put(req).await {
            Ok(()) => return Ok(()),
            Err(e) if attempt < policy.max_attempts => {
                let delay = policy.base_delay * 2u32.pow(attempt - 1);
                warn!(
                    key = req.key,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = ?e,
                    "Upload attempt failed, backing off before retry"
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                return Err(UploadError {
                    key: req.key.to_string(),
                    attempts: attempt,
                    source: e,
                })
            }
        }
    }
}
