//! Tests for claim response classification — the status-code protocol the
//! admin API speaks.
//!
//! Every status the claim endpoint can answer with maps to exactly one
//! outcome, and a 200 populates the job from the exact body fields.

use autoposter::{classify_claim_response, ClaimOutcome};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;

const CLAIM_BODY: &str = r#"{
    "job_id": "job-2026-02-11-0930",
    "page_id": "104920175843211",
    "file_id": "1B9xYzAbCdEfGhIjKlMnOp",
    "caption": "Selamat pagi! ☀️",
    "access_token": "EAABsbCS1iHgBO7Vx8yz"
}"#;

#[test]
fn status_200_yields_ready_with_exact_body_fields() {
    let outcome = classify_claim_response(StatusCode::OK, CLAIM_BODY);

    let job = match outcome {
        ClaimOutcome::Ready(job) => job,
        other => panic!("expected Ready, got {:?}", other.label()),
    };
    assert_eq!(job.job_id.as_str(), "job-2026-02-11-0930");
    assert_eq!(job.page_id.as_str(), "104920175843211");
    assert_eq!(job.file_id.as_str(), "1B9xYzAbCdEfGhIjKlMnOp");
    assert_eq!(job.caption, "Selamat pagi! ☀️");
    assert_eq!(job.access_token.as_str(), "EAABsbCS1iHgBO7Vx8yz");
}

#[test]
fn status_503_means_kill_switch() {
    let outcome = classify_claim_response(StatusCode::SERVICE_UNAVAILABLE, "");
    assert!(matches!(outcome, ClaimOutcome::Disabled));
    assert_eq!(outcome.label(), "disabled");
}

#[test]
fn status_409_means_lock_held_elsewhere() {
    let outcome = classify_claim_response(StatusCode::CONFLICT, "");
    assert!(matches!(outcome, ClaimOutcome::Locked));
    assert_eq!(outcome.label(), "locked");
}

#[test]
fn status_204_means_no_job_needed() {
    let outcome = classify_claim_response(StatusCode::NO_CONTENT, "");
    assert!(matches!(outcome, ClaimOutcome::Skip));
    assert_eq!(outcome.label(), "skip");
}

#[test]
fn other_statuses_are_generic_errors_with_the_code() {
    for status in [
        StatusCode::BAD_REQUEST,
        StatusCode::UNAUTHORIZED,
        StatusCode::NOT_FOUND,
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::BAD_GATEWAY,
    ] {
        let outcome = classify_claim_response(status, "");
        match outcome {
            ClaimOutcome::Error(message) => {
                assert_eq!(message, format!("API error: {}", status.as_u16()))
            }
            other => panic!("expected Error for {}, got {:?}", status, other.label()),
        }
    }
}

#[test]
fn malformed_200_body_is_an_error_not_a_panic() {
    let outcome = classify_claim_response(StatusCode::OK, "not json at all");
    match outcome {
        ClaimOutcome::Error(message) => {
            assert!(message.starts_with("Malformed claim response"))
        }
        other => panic!("expected Error, got {:?}", other.label()),
    }
}

#[test]
fn missing_required_field_is_an_error() {
    // Without an access_token the job cannot be executed, so the claim
    // must not pretend to be ready.
    let body = r#"{"job_id": "j", "page_id": "p", "file_id": "f"}"#;
    let outcome = classify_claim_response(StatusCode::OK, body);
    assert!(matches!(outcome, ClaimOutcome::Error(_)));
}

#[test]
fn caption_is_optional_in_claim_body() {
    let body = r#"{
        "job_id": "j1",
        "page_id": "p1",
        "file_id": "f1",
        "access_token": "t1"
    }"#;
    match classify_claim_response(StatusCode::OK, body) {
        ClaimOutcome::Ready(job) => assert_eq!(job.caption, ""),
        other => panic!("expected Ready, got {:?}", other.label()),
    }
}
