// src/types.rs
//! Domain newtypes for the job pipeline — validated at the boundary,
//! opaque everywhere else.
//!
//! Provider identifiers (jobs, pages, files, posts) carry no structure the
//! worker is allowed to rely on, so the newtypes only guarantee presence.
//! Credentials get a redacted `Display`/`Debug` so they can never leak
//! through log lines or error chains.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use thiserror::Error;
use url::Url;

/// Validation failures raised when constructing domain newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Strong typing for opaque provider identifiers with phantom markers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

/// Marker types for the different ID kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostMarker;

/// Identifier of a claimed job, assigned by the admin API.
pub type JobId = Id<JobMarker>;
/// Facebook Page identifier.
pub type PageId = Id<PageMarker>;
/// Google Drive file identifier.
pub type FileId = Id<FileMarker>;
/// Identifier Facebook assigns to a published post.
pub type PostId = Id<PostMarker>;

impl<T> Id<T> {
    /// Validates an identifier. Provider IDs are opaque, so the only rule
    /// is presence: an empty or whitespace-only ID is never valid.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidField {
                field: "id",
                reason: "identifier cannot be empty".to_string(),
            });
        }
        Ok(Self {
            value: trimmed.to_string(),
            _phantom: PhantomData,
        })
    }

    /// Get the ID as a string reference
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Id::parse(&value).map_err(serde::de::Error::custom)
    }
}

/// Page access token used to publish on behalf of a Facebook Page.
///
/// Arrives inside the claim body and is consumed within the same trigger
/// invocation. Never persisted, never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a new access token with validation
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "access token",
                reason: "token cannot be empty".to_string(),
            });
        }
        Ok(Self(token))
    }

    /// Get the token as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact the token in display
        write!(f, "{}...", &self.0[..self.0.len().min(6)])
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken({}...)", &self.0[..self.0.len().min(6)])
    }
}

impl<'de> Deserialize<'de> for AccessToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        AccessToken::new(value).map_err(serde::de::Error::custom)
    }
}

/// Shared secret authenticating the worker against the admin API.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiSecret(String);

impl ApiSecret {
    /// Create a new API secret with validation
    pub fn new(secret: impl Into<String>) -> Result<Self, ValidationError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "API secret",
                reason: "secret cannot be empty".to_string(),
            });
        }
        Ok(Self(secret))
    }

    /// Get the secret as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}...", &self.0[..self.0.len().min(4)])
    }
}

impl fmt::Debug for ApiSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiSecret({}...)", &self.0[..self.0.len().min(4)])
    }
}

/// Validated base URL of the admin API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Create a new validated base URL
    pub fn parse(url: &str) -> Result<Self, ValidationError> {
        match Url::parse(url) {
            Ok(parsed) => {
                if parsed.scheme() != "http" && parsed.scheme() != "https" {
                    return Err(ValidationError::InvalidBaseUrl {
                        url: url.to_string(),
                        reason: "Only HTTP and HTTPS URLs are supported".to_string(),
                    });
                }
                Ok(Self(parsed))
            }
            Err(e) => Err(ValidationError::InvalidBaseUrl {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Joins an absolute endpoint path onto the base, normalizing slashes.
    pub fn join(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.0.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Get the URL as a string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_parsing_trims_and_preserves() {
        let id = FileId::parse("  1A2b3C4d5E  ").unwrap();
        assert_eq!(id.as_str(), "1A2b3C4d5E");

        let id = PageId::parse("104920175843211").unwrap();
        assert_eq!(id.to_string(), "104920175843211");
    }

    #[test]
    fn empty_ids_are_rejected() {
        assert!(JobId::parse("").is_err());
        assert!(JobId::parse("   ").is_err());
    }

    #[test]
    fn id_round_trips_through_serde() {
        let id: FileId = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(id.as_str(), "abc123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");

        assert!(serde_json::from_str::<FileId>("\"\"").is_err());
    }

    #[test]
    fn access_token_never_displays_full_value() {
        let token = AccessToken::new("EAABsbCS1iHgBO7Vx8yzpages").unwrap();
        let shown = token.to_string();
        assert!(shown.starts_with("EAABsb"));
        assert!(!shown.contains("pages"));

        let debug = format!("{:?}", token);
        assert!(!debug.contains("pages"));
    }

    #[test]
    fn short_token_display_does_not_panic() {
        let token = AccessToken::new("abc").unwrap();
        assert_eq!(token.to_string(), "abc...");
    }

    #[test]
    fn api_secret_is_redacted() {
        let secret = ApiSecret::new("super-secret-key").unwrap();
        assert_eq!(secret.to_string(), "supe...");
        assert!(ApiSecret::new("").is_err());
    }

    #[test]
    fn base_url_join_normalizes_slashes() {
        let base = BaseUrl::parse("https://admin.example.com").unwrap();
        assert_eq!(
            base.join("/api/job/claim"),
            "https://admin.example.com/api/job/claim"
        );

        let base = BaseUrl::parse("https://admin.example.com/prefix/").unwrap();
        assert_eq!(
            base.join("api/job/claim"),
            "https://admin.example.com/prefix/api/job/claim"
        );
    }

    #[test]
    fn base_url_rejects_non_http_schemes() {
        assert!(BaseUrl::parse("ftp://admin.example.com").is_err());
        assert!(BaseUrl::parse("not a url").is_err());
    }
}
