// src/constants.rs
//! Domain constants that define the operational boundaries of the worker.
//!
//! Each constant is named for the domain concept it constrains. Reading
//! these should tell you the story of how the worker operates: how long it
//! waits on each collaborator, and where each collaborator lives.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Timeout budgets
// ---------------------------------------------------------------------------

/// Timeout budget for claim and completion calls against the admin API.
///
/// The admin API answers from a warm serverless function; anything slower
/// than this means the trigger should give up and let the scheduler retry.
pub const ADMIN_API_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout budget for the Facebook Graph photo publish call.
///
/// Photo uploads carry the image body, so this is the largest budget in
/// the pipeline apart from the download itself.
pub const PUBLISH_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout budget for a full Drive media download.
///
/// A page photo is at most a few megabytes; a download that takes longer
/// than this would stall the entire trigger invocation.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Timeout budget for the OAuth token exchange preceding a Drive download.
pub const TOKEN_EXCHANGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout budget for the Graph `debug_token` verification call.
pub const DEBUG_TOKEN_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Admin API endpoints
// ---------------------------------------------------------------------------

/// Claim endpoint path on the admin API.
pub const CLAIM_PATH: &str = "/api/job/claim";

/// Completion endpoint path on the admin API.
pub const COMPLETE_PATH: &str = "/api/job/complete";

// ---------------------------------------------------------------------------
// Google Drive
// ---------------------------------------------------------------------------

/// Google Drive v3 files endpoint base.
pub const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";

/// OAuth scope requested for the service account. Read-only: the worker
/// never mutates anything in the source store.
pub const DRIVE_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/drive.readonly";

/// Fallback token endpoint when the service-account key omits `token_uri`.
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Lifetime requested for a service-account bearer token, in seconds.
/// One hour is the maximum Google grants for the JWT-bearer flow.
pub const SERVICE_TOKEN_TTL_SECS: i64 = 3600;

// ---------------------------------------------------------------------------
// Facebook Graph API
// ---------------------------------------------------------------------------

/// Facebook Graph API host.
pub const GRAPH_API_URL: &str = "https://graph.facebook.com";

/// Graph API version used when `FB_API_VERSION` is not set.
pub const DEFAULT_GRAPH_API_VERSION: &str = "v19.0";

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

/// Operator timezone for `completed_at` stamps when `WORKER_TIMEZONE` is
/// not set.
pub const DEFAULT_TIMEZONE: &str = "Asia/Jakarta";
