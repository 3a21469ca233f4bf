// src/lib.rs
//! autoposter library — claims photo-posting jobs from an admin API and
//! publishes them to Facebook Pages.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `WorkerError`, `ErrorKind`, `ValidationError`
//! - **Configuration** — `WorkerConfig`, `CommandLineInput`
//! - **Data model** — `Job`, `ClaimOutcome`, `ExecutionResult`, `TriggerOutcome`
//! - **API clients** — `QueueClient`, `DriveClient`, `GraphApiClient` and the
//!   capability traits they implement
//! - **Orchestration** — `Worker`

mod api;
mod config;
mod constants;
mod error;
mod model;
mod types;
mod worker;

// --- Error Handling ---
pub use crate::error::{ErrorKind, WorkerError};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, WorkerCommand, WorkerConfig};

// --- Data Model ---
pub use crate::model::{
    ClaimOutcome, CompletionReport, ExecutionResult, FileMetadata, Job, TokenStatus,
    TriggerOutcome,
};

// --- Domain Types ---
pub use crate::types::{AccessToken, ApiSecret, BaseUrl, FileId, JobId, PageId, PostId};

// --- API Clients ---
pub use crate::api::{
    facebook::parse_publish_response, queue::classify_claim_response, DriveClient, GraphApiClient,
    JobQueue, PhotoPublisher, QueueClient, SourceStore,
};

// --- Orchestration ---
pub use crate::worker::Worker;
