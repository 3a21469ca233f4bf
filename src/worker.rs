// src/worker.rs
//! Job lifecycle orchestration — claim, execute, report.
//!
//! `execute` is a total function: every combination of fetch and publish
//! success or failure folds into an `ExecutionResult`; nothing escapes its
//! boundary. The worker never retries within an invocation (retry is the
//! external scheduler firing the trigger again) and never caches queue
//! state, since the lock and kill switch are owned by the admin API.

use crate::api::{JobQueue, PhotoPublisher, SourceStore};
use crate::model::{ClaimOutcome, ExecutionResult, Job, TriggerOutcome};
use std::sync::Arc;

/// Orchestrates one claim → execute → report cycle per trigger.
pub struct Worker {
    queue: Arc<dyn JobQueue>,
    source: Arc<dyn SourceStore>,
    publisher: Arc<dyn PhotoPublisher>,
}

impl Worker {
    pub fn new(
        queue: Arc<dyn JobQueue>,
        source: Arc<dyn SourceStore>,
        publisher: Arc<dyn PhotoPublisher>,
    ) -> Self {
        Self {
            queue,
            source,
            publisher,
        }
    }

    /// Runs one full trigger invocation.
    ///
    /// A non-`Ready` claim returns immediately: no execution, no completion
    /// call. A claimed job is executed and its result reported
    /// unconditionally; a report failure is logged and swallowed because
    /// the post already happened and cannot be taken back.
    pub async fn run_once(&self) -> TriggerOutcome {
        let job = match self.queue.claim().await {
            ClaimOutcome::Ready(job) => job,
            outcome => {
                log::info!("No job to execute: {}", outcome.message());
                return TriggerOutcome::NotExecuted {
                    reason: outcome.label(),
                    message: outcome.message(),
                };
            }
        };

        log::info!("Executing job {} for page {}", job.job_id, job.page_id);
        let result = self.execute(&job).await;

        if let Err(err) = self.queue.report(&job.job_id, &result).await {
            log::warn!("Failed to report result: {}", err);
        }

        TriggerOutcome::Executed(result)
    }

    /// Executes one claimed job: download the source asset, then publish.
    ///
    /// If the download fails the publisher is never invoked: no partial
    /// posts from partial data.
    pub async fn execute(&self, job: &Job) -> ExecutionResult {
        log::info!("Downloading file {}...", job.file_id);
        let image = match self.source.download(&job.file_id).await {
            Ok(bytes) => bytes,
            Err(err) => {
                log::error!("Drive error: {}", err);
                return ExecutionResult::failure(job, &err);
            }
        };
        log::info!("Downloaded {} bytes", image.len());

        log::info!("Posting to page {}...", job.page_id);
        match self
            .publisher
            .publish(&job.page_id, &job.access_token, image, &job.caption)
            .await
        {
            Ok(post_id) => {
                log::info!("Posted successfully: {}", post_id);
                ExecutionResult::success(job, post_id)
            }
            Err(err) => {
                log::error!("Facebook error: {}", err);
                ExecutionResult::failure(job, &err)
            }
        }
    }
}
