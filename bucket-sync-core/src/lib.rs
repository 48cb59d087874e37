#![doc = "bucket-sync-core: core upload engine for bucket-sync."]

//! This crate contains the full engine logic: content hashing, the persisted
//! digest ledger, directory walking, retried uploads and the synchronisation
//! orchestrator. The concrete object-store client lives in the binary crate;
//! this crate only knows the [`contract::ObjectStore`] trait.
//!
//! # Usage
//! Construct a [`config::SyncConfig`], provide an [`contract::ObjectStore`]
//! implementation, and call [`synchronise::synchronise`].

pub mod config;
pub mod content_type;
pub mod contract;
pub mod hash;
pub mod ledger;
pub mod retry;
pub mod synchronise;
pub mod walk;
