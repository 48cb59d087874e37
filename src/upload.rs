//! # Store client (CLI <-> Core)
//!
//! This module bridges the CLI to the [`ObjectStore`] abstraction in
//! `bucket-sync-core`. It wires up the trait for real use against an
//! S3-compatible endpoint (Cloudflare R2 and friends) and provides the
//! [`R2Client`] used by the CLI for networked uploads.
//!
//! All transport, signing and endpoint details are encapsulated here; the
//! core engine only sees `put` succeeding or failing.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::{
    config::{Credentials, Region},
    primitives::ByteStream,
    Client,
};

use bucket_sync_core::contract::{ObjectStore, PutRequest, StoreError};

use crate::load_config::StoreConfig;

/// S3-compatible object store client.
pub struct R2Client {
    client: Client,
}

impl R2Client {
    /// Build a client from the loaded store configuration.
    pub fn new(config: &StoreConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "bucket-sync",
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(config.endpoint())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .build();

        tracing::info!(
            endpoint = %config.endpoint(),
            region = %config.region,
            "Initialized object store client"
        );
        R2Client {
            client: Client::from_conf(s3_config),
        }
    }
}

#[async_trait]
impl ObjectStore for R2Client {
    async fn put<'a>(&self, req: PutRequest<'a>) -> Result<(), StoreError> {
        tracing::debug!(bucket = req.bucket, key = req.key, "Sending PutObject");
        let result = self
            .client
            .put_object()
            .bucket(req.bucket)
            .key(req.key)
            .body(ByteStream::from(req.body.to_vec()))
            .content_type(req.content_type)
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::error!(key = req.key, error = ?e, "PutObject failed");
                Err(format!("PutObject failed for {}: {e}", req.key).into())
            }
        }
    }
}
