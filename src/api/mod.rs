// src/api/mod.rs
//! Outbound API surface — the admin job queue, the source store, and the
//! photo publisher.
//!
//! Each trait describes a single capability. The orchestrator depends on
//! these traits, never on HTTP details, so the full lifecycle is testable
//! with stub implementations.

pub mod drive;
pub mod facebook;
pub mod queue;

use crate::error::WorkerError;
use crate::model::{ClaimOutcome, ExecutionResult, FileMetadata};
use crate::types::{AccessToken, FileId, JobId, PageId, PostId};

/// The ability to claim jobs from the admin API and report their outcomes.
///
/// Locking, scheduling windows, and the kill switch all live on the admin
/// side; this capability only transports their answers.
#[async_trait::async_trait]
pub trait JobQueue: Send + Sync {
    /// Claims at most one pending job. Total: transport failures come back
    /// as [`ClaimOutcome::Error`], never as a panic or an early return.
    async fn claim(&self) -> ClaimOutcome;

    /// Reports the outcome of an executed job. Callers treat a failure
    /// here as log-and-continue: the post already happened.
    async fn report(&self, job_id: &JobId, result: &ExecutionResult) -> Result<(), WorkerError>;
}

/// The ability to retrieve a job's source asset.
#[async_trait::async_trait]
pub trait SourceStore: Send + Sync {
    /// Downloads the full object into memory. Never returns partial bytes:
    /// an interrupted download is a failure.
    async fn download(&self, file_id: &FileId) -> Result<Vec<u8>, WorkerError>;

    /// Reads object metadata without downloading the content.
    async fn metadata(&self, file_id: &FileId) -> Result<FileMetadata, WorkerError>;
}

/// The ability to publish a photo to a page.
#[async_trait::async_trait]
pub trait PhotoPublisher: Send + Sync {
    /// Posts the image with a caption on behalf of the page and returns the
    /// platform-assigned post identifier.
    async fn publish(
        &self,
        page_id: &PageId,
        access_token: &AccessToken,
        image: Vec<u8>,
        caption: &str,
    ) -> Result<PostId, WorkerError>;
}

// Re-export the public interface
pub use drive::DriveClient;
pub use facebook::GraphApiClient;
pub use queue::QueueClient;
