// src/error.rs
//! Worker error taxonomy with structured failure classification.
//!
//! Failures travel as values: the fetcher and publisher return
//! `Result<_, WorkerError>` and the orchestrator folds any error into the
//! outcome record exactly once. Each `WorkerError` variant classifies into
//! exactly one reportable `ErrorKind`.

use crate::types::{FileId, PageId, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Failure classification reported back to the admin API.
///
/// Instead of matching against magic strings, the reportable vocabulary is
/// encoded in the type system. The wire form is the SCREAMING_SNAKE_CASE
/// tag the admin API stores alongside the job record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// The source asset could not be retrieved from Drive
    SourceFetch,
    /// Facebook rejected the publish call
    Publish,
    /// The publish call exceeded its timeout budget
    Timeout,
    /// Configuration or credentials were missing or malformed
    Config,
    /// A failure neither the fetcher nor the publisher owns
    Unknown,
}

impl ErrorKind {
    /// The wire tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SourceFetch => "SOURCE_FETCH",
            Self::Publish => "PUBLISH",
            Self::Timeout => "TIMEOUT",
            Self::Config => "CONFIG",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main worker error type.
///
/// Messages are fully formed at the failure site; the structured fields
/// (`file_id`, `code`) survive for reporting detail.
#[derive(Error, Debug, Clone)]
pub enum WorkerError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Any failure while retrieving the source asset, including the
    /// credential parse that precedes the download.
    #[error("{message}")]
    Fetch { file_id: FileId, message: String },

    /// A publish rejection: transport failure or an `error` object embedded
    /// in the Graph response body.
    #[error("{message}")]
    Publish {
        page_id: PageId,
        code: Option<i64>,
        message: String,
    },

    #[error("Facebook API timeout")]
    PublishTimeout { page_id: PageId },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl WorkerError {
    /// Classifies this failure into exactly one reportable kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingConfiguration(_) | Self::InvalidConfiguration(_) => ErrorKind::Config,
            Self::Fetch { .. } => ErrorKind::SourceFetch,
            Self::Publish { .. } => ErrorKind::Publish,
            Self::PublishTimeout { .. } => ErrorKind::Timeout,
            Self::Internal { .. } => ErrorKind::Unknown,
        }
    }

    /// Shorthand for a fetch failure carrying the file as structured detail.
    pub fn fetch(file_id: &FileId, message: impl Into<String>) -> Self {
        Self::Fetch {
            file_id: file_id.clone(),
            message: message.into(),
        }
    }

    /// Shorthand for an internal failure.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<ValidationError> for WorkerError {
    fn from(err: ValidationError) -> Self {
        WorkerError::InvalidConfiguration(err.to_string())
    }
}

/// Result type alias for convenience
#[allow(dead_code)]
pub type Result<T, E = WorkerError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FileId, PageId};

    #[test]
    fn every_variant_classifies_into_one_kind() {
        let file_id = FileId::parse("f1").unwrap();
        let page_id = PageId::parse("p1").unwrap();

        assert_eq!(
            WorkerError::MissingConfiguration("ADMIN_API_URL".into()).kind(),
            ErrorKind::Config
        );
        assert_eq!(
            WorkerError::fetch(&file_id, "not found").kind(),
            ErrorKind::SourceFetch
        );
        assert_eq!(
            WorkerError::Publish {
                page_id: page_id.clone(),
                code: Some(190),
                message: "Facebook API error: Invalid token".into(),
            }
            .kind(),
            ErrorKind::Publish
        );
        assert_eq!(
            WorkerError::PublishTimeout { page_id }.kind(),
            ErrorKind::Timeout
        );
        assert_eq!(WorkerError::internal("boom").kind(), ErrorKind::Unknown);
    }

    #[test]
    fn kind_serializes_as_screaming_snake_tags() {
        assert_eq!(
            serde_json::to_string(&ErrorKind::SourceFetch).unwrap(),
            "\"SOURCE_FETCH\""
        );
        assert_eq!(
            serde_json::to_string(&ErrorKind::Publish).unwrap(),
            "\"PUBLISH\""
        );
        assert_eq!(
            serde_json::to_string(&ErrorKind::Timeout).unwrap(),
            "\"TIMEOUT\""
        );
        assert_eq!(
            serde_json::to_string(&ErrorKind::Config).unwrap(),
            "\"CONFIG\""
        );
        assert_eq!(
            serde_json::to_string(&ErrorKind::Unknown).unwrap(),
            "\"UNKNOWN\""
        );
        assert_eq!(ErrorKind::SourceFetch.to_string(), "SOURCE_FETCH");
    }

    #[test]
    fn validation_errors_classify_as_config() {
        let err: WorkerError = crate::types::BaseUrl::parse("ftp://x").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn publish_timeout_message_is_stable() {
        let err = WorkerError::PublishTimeout {
            page_id: PageId::parse("p1").unwrap(),
        };
        assert_eq!(err.to_string(), "Facebook API timeout");
    }
}
