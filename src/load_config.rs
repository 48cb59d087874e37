//! `load_config` module: assembles the store configuration from the
//! environment.
//!
//! This is the only place where environment variables are read and mapped to
//! strongly-typed configuration. The bucket name is the single hard
//! requirement and is validated before any I/O happens; missing credentials
//! degrade to empty strings with a diagnostic so that a misconfiguration
//! fails at the remote endpoint rather than here, matching the behaviour of
//! the deployment scripts this tool replaces.
//!
//! # Errors
//! A missing `CF_BUCKET_NAME` returns an `anyhow::Error` that the CLI
//! surfaces with a non-zero exit before constructing any client.

use std::env;

use anyhow::Result;
use tracing::warn;

/// Connection settings for the S3-compatible object store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub account_id: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    pub region: String,
}

impl StoreConfig {
    /// Remote endpoint derived from the account id.
    pub fn endpoint(&self) -> String {
        format!("https://{}.r2.cloudflarestorage.com", self.account_id)
    }
}

/// Read the store configuration from the environment. Only the bucket name
/// is required.
pub fn load_from_env() -> Result<StoreConfig> {
    let bucket = env::var("CF_BUCKET_NAME")
        .map_err(|_| anyhow::anyhow!("CF_BUCKET_NAME environment variable must be set"))?;

    let optional = |name: &str| {
        env::var(name).unwrap_or_else(|_| {
            warn!(var = name, "Environment variable not set, using empty value");
            String::new()
        })
    };

    Ok(StoreConfig {
        account_id: optional("CF_ACCOUNT_ID"),
        access_key_id: optional("CF_ACCESS_KEY_ID"),
        secret_access_key: optional("CF_SECRET_ACCESS_KEY"),
        bucket,
        region: env::var("CF_REGION").unwrap_or_else(|_| "auto".to_string()),
    })
}
