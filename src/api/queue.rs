// src/api/queue.rs
//! Admin API client — the job claim and completion endpoints.
//!
//! A thin wrapper around reqwest with the bearer credential installed as a
//! default header. Status-code interpretation lives in
//! [`classify_claim_response`], a pure function, so the whole claim matrix
//! is unit-testable without I/O.

use crate::config::WorkerConfig;
use crate::constants::{ADMIN_API_TIMEOUT, CLAIM_PATH, COMPLETE_PATH};
use crate::error::WorkerError;
use crate::model::{ClaimOutcome, CompletionReport, ExecutionResult, Job};
use crate::types::{ApiSecret, BaseUrl, JobId};
use chrono::Utc;
use chrono_tz::Tz;
use reqwest::{header, Client, StatusCode};

/// HTTP client for the admin API's job endpoints.
#[derive(Clone)]
pub struct QueueClient {
    client: Client,
    base_url: BaseUrl,
    timezone: Tz,
}

impl QueueClient {
    /// Creates a queue client with the admin bearer credential installed.
    pub fn new(config: &WorkerConfig) -> Result<Self, WorkerError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(&config.api_secret)?)
            .timeout(ADMIN_API_TIMEOUT)
            .build()
            .map_err(|e| WorkerError::internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.admin_base_url.clone(),
            timezone: config.timezone,
        })
    }

    /// Creates the default headers for admin API requests.
    fn create_headers(secret: &ApiSecret) -> Result<header::HeaderMap, WorkerError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", secret.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                WorkerError::InvalidConfiguration(format!("Invalid API secret format: {}", e))
            })?,
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }
}

/// Maps a claim response to its outcome.
///
/// The admin API speaks in status codes: 503 means the kill switch is
/// engaged, 409 means another invocation holds the lock, 204 means no job
/// is needed right now, and anything else non-200 is a generic error.
pub fn classify_claim_response(status: StatusCode, body: &str) -> ClaimOutcome {
    match status {
        StatusCode::SERVICE_UNAVAILABLE => ClaimOutcome::Disabled,
        StatusCode::CONFLICT => ClaimOutcome::Locked,
        StatusCode::NO_CONTENT => ClaimOutcome::Skip,
        StatusCode::OK => match serde_json::from_str::<Job>(body) {
            Ok(job) => ClaimOutcome::Ready(job),
            Err(e) => ClaimOutcome::Error(format!("Malformed claim response: {}", e)),
        },
        other => ClaimOutcome::Error(format!("API error: {}", other.as_u16())),
    }
}

#[async_trait::async_trait]
impl super::JobQueue for QueueClient {
    async fn claim(&self) -> ClaimOutcome {
        let url = self.base_url.join(CLAIM_PATH);
        log::debug!("POST {}", url);

        let response = match self.client.post(&url).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return ClaimOutcome::Error("Admin API timeout".to_string())
            }
            Err(e) => return ClaimOutcome::Error(e.to_string()),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return ClaimOutcome::Error(e.to_string()),
        };

        classify_claim_response(status, &body)
    }

    async fn report(&self, job_id: &JobId, result: &ExecutionResult) -> Result<(), WorkerError> {
        let url = self.base_url.join(COMPLETE_PATH);
        let payload = CompletionReport {
            job_id,
            success: result.success,
            result,
            completed_at: Utc::now().with_timezone(&self.timezone).to_rfc3339(),
        };

        log::debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| WorkerError::internal(format!("Failed to report result: {}", e)))?;

        log::debug!("Completion reported ({})", response.status());
        Ok(())
    }
}
