// src/api/facebook.rs
//! Facebook Graph API publisher.
//!
//! The Graph API can return HTTP 200 with a business error embedded in the
//! body, so response interpretation never trusts the status code alone:
//! [`parse_publish_response`] treats any body carrying an `error` object as
//! a failure and extracts the provider code and message.

use crate::config::WorkerConfig;
use crate::constants::{DEBUG_TOKEN_TIMEOUT, GRAPH_API_URL, PUBLISH_TIMEOUT};
use crate::error::WorkerError;
use crate::model::TokenStatus;
use crate::types::{AccessToken, PageId, PostId};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;

/// HTTP client for page-scoped Graph API calls.
#[derive(Clone)]
pub struct GraphApiClient {
    client: Client,
    /// Versioned base, e.g. `https://graph.facebook.com/v19.0`.
    graph_url: String,
}

impl GraphApiClient {
    pub fn new(config: &WorkerConfig) -> Result<Self, WorkerError> {
        let client = Client::builder()
            .build()
            .map_err(|e| WorkerError::internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            graph_url: format!("{}/{}", GRAPH_API_URL, config.graph_api_version),
        })
    }

    /// Verifies a page access token against the `debug_token` endpoint.
    ///
    /// Total: any failure comes back as an invalid status carrying the
    /// reason, since this backs a diagnostic command.
    pub async fn verify_token(&self, access_token: &AccessToken) -> TokenStatus {
        let url = format!("{}/debug_token", self.graph_url);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(DEBUG_TOKEN_TIMEOUT)
            .query(&[
                ("input_token", access_token.as_str()),
                ("access_token", access_token.as_str()),
            ])
            .send()
            .await;

        let value: Value = match response {
            Ok(response) => match response.json().await {
                Ok(value) => value,
                Err(e) => return TokenStatus::invalid(e.to_string()),
            },
            Err(e) => return TokenStatus::invalid(e.to_string()),
        };

        token_status_from_response(&value)
    }
}

/// Extracts the post identifier from a Graph photos response.
///
/// A body containing an `error` object is a failure even when the transport
/// call returned HTTP 200. On success the platform reports the identifier
/// under `post_id` or `id` depending on the endpoint variant; both are
/// accepted.
pub fn parse_publish_response(page_id: &PageId, body: &str) -> Result<PostId, WorkerError> {
    let value: Value = serde_json::from_str(body).map_err(|e| WorkerError::Publish {
        page_id: page_id.clone(),
        code: None,
        message: format!("Malformed Facebook response: {}", e),
    })?;

    if let Some(error) = value.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error");
        let code = error.get("code").and_then(Value::as_i64);
        return Err(WorkerError::Publish {
            page_id: page_id.clone(),
            code,
            message: format!("Facebook API error: {}", message),
        });
    }

    value
        .get("post_id")
        .and_then(Value::as_str)
        .or_else(|| value.get("id").and_then(Value::as_str))
        .and_then(|id| PostId::parse(id).ok())
        .ok_or_else(|| WorkerError::Publish {
            page_id: page_id.clone(),
            code: None,
            message: "Facebook response missing post id".to_string(),
        })
}

fn token_status_from_response(value: &Value) -> TokenStatus {
    if let Some(error) = value.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error");
        return TokenStatus::invalid(message);
    }

    let data = value.get("data");
    TokenStatus {
        valid: data
            .and_then(|d| d.get("is_valid"))
            .and_then(Value::as_bool)
            .unwrap_or(false),
        expires_at: data.and_then(|d| d.get("expires_at")).and_then(Value::as_i64),
        scopes: data
            .and_then(|d| d.get("scopes"))
            .and_then(Value::as_array)
            .map(|scopes| {
                scopes
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default(),
        error: None,
    }
}

#[async_trait::async_trait]
impl super::PhotoPublisher for GraphApiClient {
    async fn publish(
        &self,
        page_id: &PageId,
        access_token: &AccessToken,
        image: Vec<u8>,
        caption: &str,
    ) -> Result<PostId, WorkerError> {
        let url = format!("{}/{}/photos", self.graph_url, page_id);

        let source = Part::bytes(image)
            .file_name("image.jpg")
            .mime_str("image/jpeg")
            .map_err(|e| WorkerError::internal(format!("Failed to build photo part: {}", e)))?;
        let form = Form::new()
            .part("source", source)
            .text("message", caption.to_string())
            .text("access_token", access_token.as_str().to_string());

        log::debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .timeout(PUBLISH_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WorkerError::PublishTimeout {
                        page_id: page_id.clone(),
                    }
                } else {
                    WorkerError::Publish {
                        page_id: page_id.clone(),
                        code: None,
                        message: format!("Network error posting to Facebook: {}", e),
                    }
                }
            })?;

        let body = response.text().await.map_err(|e| WorkerError::Publish {
            page_id: page_id.clone(),
            code: None,
            message: format!("Network error posting to Facebook: {}", e),
        })?;

        parse_publish_response(page_id, &body)
    }
}
