//! # contract: interface to the remote object store
//!
//! This module defines a single trait ([`ObjectStore`]) and its request type
//! for writing objects into a remote bucket via an S3-compatible API, a local
//! system, or a mock/test implementation.
//!
//! ## Interface & Extensibility
//! - Implement the [`ObjectStore`] trait to create new store clients (e.g.
//!   vendor SDK, file-based).
//! - The method is async and returns a boxed error type; implementors convert
//!   all meaningful upstream errors into it.
//! - Meant for both production code and robust mocking in tests.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so consumers can generate
//!   deterministic mocks for unit/integration tests (enabled under `test` or
//!   the `test-export-mocks` feature).

use async_trait::async_trait;

use mockall::{automock, predicate::*};

/// Error type returned by store implementations (simple boxed error for now).
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// A single object write. The body is a full in-memory buffer so that a
/// caller retrying the request resends byte-identical content on every
/// attempt.
#[derive(Clone, Copy)]
pub struct PutRequest<'a> {
    /// Target bucket name.
    pub bucket: &'a str,
    /// Storage key the object is written under.
    pub key: &'a str,
    /// Full object content.
    pub body: &'a [u8],
    /// MIME type sent with the object.
    pub content_type: &'a str,
}

/// Trait for writing objects into a bucket. The implementor is responsible
/// for transport, authentication and endpoint details.
///
/// The trait is implemented by real clients and by test mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write one object. Success means the remote acknowledged the write.
    async fn put<'a>(&self, req: PutRequest<'a>) -> Result<(), StoreError>;
}
