// src/model.rs
//! Job lifecycle data model.
//!
//! A `Job` lives for exactly one trigger invocation: parsed from the claim
//! response, consumed synchronously by the executor, reported, discarded.
//! Nothing here survives across invocations.

use crate::error::{ErrorKind, WorkerError};
use crate::types::{AccessToken, FileId, JobId, PageId, PostId};
use serde::{Deserialize, Serialize};

/// A claimed posting job, immutable once claimed.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    pub job_id: JobId,
    pub page_id: PageId,
    pub file_id: FileId,
    /// Post caption; absent in the claim body means an uncaptioned photo.
    #[serde(default)]
    pub caption: String,
    pub access_token: AccessToken,
}

/// Every possible answer from the admin API's claim endpoint.
///
/// Exactly one variant per claim call. The non-`Ready` variants carry the
/// queue service's own state (kill switch, lock, scheduling window); the
/// worker interprets them but never caches or enforces them locally.
#[derive(Debug, Clone)]
pub enum ClaimOutcome {
    /// A job was claimed and is owned by this invocation.
    Ready(Job),
    /// The kill switch is engaged on the admin side.
    Disabled,
    /// Another invocation already holds the job lock.
    Locked,
    /// No job needed right now: outside active hours, or nothing eligible.
    Skip,
    /// The claim call itself failed.
    Error(String),
}

impl ClaimOutcome {
    /// Stable lowercase label used in the trigger response.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ready(_) => "ready",
            Self::Disabled => "disabled",
            Self::Locked => "locked",
            Self::Skip => "skip",
            Self::Error(_) => "error",
        }
    }

    /// Human-readable explanation of the outcome.
    pub fn message(&self) -> String {
        match self {
            Self::Ready(job) => format!("Job {} ready", job.job_id),
            Self::Disabled => "System is disabled".to_string(),
            Self::Locked => "Job already in progress".to_string(),
            Self::Skip => "No job needed".to_string(),
            Self::Error(message) => message.clone(),
        }
    }
}

/// The outcome record for one executed job — the unit reported back to the
/// admin API.
///
/// Built only through [`ExecutionResult::success`] and
/// [`ExecutionResult::failure`], so the field invariants hold by
/// construction: `error_type` is present iff `success` is false, and
/// `post_id` is present iff `success` is true.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionResult {
    pub page_id: PageId,
    pub file_id: FileId,
    pub success: bool,
    pub post_id: Option<PostId>,
    pub error_type: Option<ErrorKind>,
    pub error_message: Option<String>,
}

impl ExecutionResult {
    /// A successful execution carrying the platform-assigned post ID.
    pub fn success(job: &Job, post_id: PostId) -> Self {
        Self {
            page_id: job.page_id.clone(),
            file_id: job.file_id.clone(),
            success: true,
            post_id: Some(post_id),
            error_type: None,
            error_message: None,
        }
    }

    /// A failed execution, classified through the error's kind.
    pub fn failure(job: &Job, error: &WorkerError) -> Self {
        Self {
            page_id: job.page_id.clone(),
            file_id: job.file_id.clone(),
            success: false,
            post_id: None,
            error_type: Some(error.kind()),
            error_message: Some(error.to_string()),
        }
    }
}

/// JSON body POSTed to the admin API's completion endpoint.
#[derive(Debug, Serialize)]
pub struct CompletionReport<'a> {
    pub job_id: &'a JobId,
    pub success: bool,
    pub result: &'a ExecutionResult,
    /// RFC 3339 stamp in the operator timezone.
    pub completed_at: String,
}

/// Drive file metadata (camelCase on the wire). Supported for inspection;
/// not on the core posting path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    /// Drive reports size as a decimal string, and omits it for some types.
    #[serde(default)]
    pub size: Option<String>,
}

/// Result of verifying a page access token against `debug_token`.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenStatus {
    pub valid: bool,
    pub expires_at: Option<i64>,
    pub scopes: Vec<String>,
    pub error: Option<String>,
}

impl TokenStatus {
    /// An invalid-token status carrying the reason.
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            expires_at: None,
            scopes: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// What one trigger invocation hands back to its caller.
#[derive(Debug, Clone)]
pub enum TriggerOutcome {
    /// The claim did not yield a job; nothing was executed or reported.
    NotExecuted {
        reason: &'static str,
        message: String,
    },
    /// A job was executed and its result reported (best-effort).
    Executed(ExecutionResult),
}

impl TriggerOutcome {
    /// True only when a job ran and failed, the one case the trigger caller
    /// signals as a hard failure so the scheduler surfaces it.
    pub fn executed_and_failed(&self) -> bool {
        matches!(self, Self::Executed(result) if !result.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WorkerError;
    use crate::types::{FileId, PostId};

    fn sample_job() -> Job {
        serde_json::from_str(
            r#"{
                "job_id": "job-42",
                "page_id": "104920175843211",
                "file_id": "1AbCdEfGh",
                "caption": "Morning post",
                "access_token": "EAABtoken"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn job_deserializes_from_claim_body() {
        let job = sample_job();
        assert_eq!(job.job_id.as_str(), "job-42");
        assert_eq!(job.page_id.as_str(), "104920175843211");
        assert_eq!(job.file_id.as_str(), "1AbCdEfGh");
        assert_eq!(job.caption, "Morning post");
        assert_eq!(job.access_token.as_str(), "EAABtoken");
    }

    #[test]
    fn missing_caption_defaults_to_empty() {
        let job: Job = serde_json::from_str(
            r#"{
                "job_id": "job-1",
                "page_id": "p",
                "file_id": "f",
                "access_token": "t"
            }"#,
        )
        .unwrap();
        assert_eq!(job.caption, "");
    }

    #[test]
    fn success_result_holds_invariants() {
        let job = sample_job();
        let result = ExecutionResult::success(&job, PostId::parse("104_456").unwrap());
        assert!(result.success);
        assert_eq!(result.post_id.as_ref().unwrap().as_str(), "104_456");
        assert!(result.error_type.is_none());
        assert!(result.error_message.is_none());
    }

    #[test]
    fn failure_result_holds_invariants() {
        let job = sample_job();
        let err = WorkerError::fetch(
            &FileId::parse("1AbCdEfGh").unwrap(),
            "Failed to download file 1AbCdEfGh: not found",
        );
        let result = ExecutionResult::failure(&job, &err);
        assert!(!result.success);
        assert!(result.post_id.is_none());
        assert_eq!(result.error_type, Some(ErrorKind::SourceFetch));
        assert!(result.error_message.as_ref().unwrap().contains("not found"));
    }

    #[test]
    fn completion_report_serializes_expected_shape() {
        let job = sample_job();
        let result = ExecutionResult::success(&job, PostId::parse("104_456").unwrap());
        let report = CompletionReport {
            job_id: &job.job_id,
            success: result.success,
            result: &result,
            completed_at: "2026-02-11T09:30:00+07:00".to_string(),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["job_id"], "job-42");
        assert_eq!(value["success"], true);
        assert_eq!(value["result"]["post_id"], "104_456");
        assert_eq!(value["result"]["error_type"], serde_json::Value::Null);
        assert_eq!(value["completed_at"], "2026-02-11T09:30:00+07:00");
    }

    #[test]
    fn file_metadata_reads_camel_case() {
        let meta: FileMetadata = serde_json::from_str(
            r#"{"id": "1AbC", "name": "photo.jpg", "mimeType": "image/jpeg", "size": "204800"}"#,
        )
        .unwrap();
        assert_eq!(meta.mime_type, "image/jpeg");
        assert_eq!(meta.size.as_deref(), Some("204800"));
    }

    #[test]
    fn claim_outcome_labels_and_messages() {
        assert_eq!(ClaimOutcome::Disabled.label(), "disabled");
        assert_eq!(ClaimOutcome::Disabled.message(), "System is disabled");
        assert_eq!(ClaimOutcome::Locked.message(), "Job already in progress");
        assert_eq!(ClaimOutcome::Skip.message(), "No job needed");
        assert_eq!(
            ClaimOutcome::Error("API error: 500".into()).message(),
            "API error: 500"
        );
    }

    #[test]
    fn trigger_outcome_failure_detection() {
        let job = sample_job();
        let failed = ExecutionResult::failure(&job, &WorkerError::internal("boom"));
        assert!(TriggerOutcome::Executed(failed).executed_and_failed());

        let ok = ExecutionResult::success(&job, PostId::parse("1_2").unwrap());
        assert!(!TriggerOutcome::Executed(ok).executed_and_failed());
        assert!(!TriggerOutcome::NotExecuted {
            reason: "skip",
            message: "No job needed".into()
        }
        .executed_and_failed());
    }
}
