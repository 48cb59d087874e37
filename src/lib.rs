#![doc = "bucket-sync: CLI and S3-compatible store client around bucket-sync-core."]

pub mod cli;
pub mod load_config;
pub mod upload;
