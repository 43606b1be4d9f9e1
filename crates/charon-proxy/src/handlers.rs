//! HTTP handlers adapting inbound requests to the registry client.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use charon_client::{Decoded, RegistryClient, RegistryError};

/// Longest upstream body snippet quoted back in an error `detail`.
const DETAIL_LIMIT: usize = 512;

/// Structured error body returned for every handler-level failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable human-readable phrase describing the failure.
    pub message: String,

    /// Stable machine token identifying the failure kind.
    pub code: String,

    /// Bounded diagnostic snippet, when one is available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// `GET|HEAD /v2`: static liveness marker. No upstream call.
pub(crate) async fn api_version() -> Response {
    (StatusCode::OK, [(header::CONTENT_LENGTH, "0")]).into_response()
}

/// `GET /v2/_catalog`: forwards the catalog request upstream, copying the
/// upstream response headers onto the outbound response and re-encoding the
/// decoded catalog as the body.
pub(crate) async fn catalog(State(client): State<Arc<RegistryClient>>) -> Response {
    let outcome = match client.catalog().await {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::warn!(error = %err, "catalog request failed");
            return error_response(&err);
        }
    };

    let catalog = match outcome.body {
        Decoded::Decoded(catalog) => catalog,
        Decoded::Skipped(reason) => {
            let err = RegistryError::Undecoded { reason };
            tracing::warn!(error = %err, "catalog response was not JSON");
            return error_response(&err);
        }
    };

    let mut headers = outcome.headers;
    // The body is re-encoded, so message framing and media type are
    // re-established by the serializer rather than copied verbatim.
    headers.remove(header::CONTENT_LENGTH);
    headers.remove(header::TRANSFER_ENCODING);
    headers.remove(header::CONTENT_TYPE);

    (StatusCode::OK, headers, Json(catalog)).into_response()
}

fn error_response(err: &RegistryError) -> Response {
    let (code, message, detail) = match err {
        RegistryError::InvalidRequest { reason } => (
            "invalid-request",
            "the proxied request was malformed",
            Some(reason.clone()),
        ),
        RegistryError::InvalidEndpoint { url, .. } => (
            "invalid-endpoint",
            "the registry endpoint is not usable",
            Some(url.clone()),
        ),
        RegistryError::Auth(source) => (
            "auth-failed",
            "authentication headers could not be prepared",
            Some(source.to_string()),
        ),
        RegistryError::Transport { url, .. } => (
            "upstream-unreachable",
            "the registry could not be reached",
            Some(url.clone()),
        ),
        RegistryError::UnexpectedStatus { status, body } => (
            "unexpected-status",
            "the registry returned a non-success status",
            Some(format!("status {status}: {}", snippet(body))),
        ),
        RegistryError::MissingContentType => (
            "missing-content-type",
            "the registry response carried no content type",
            None,
        ),
        RegistryError::Undecoded { reason } => (
            "not-json",
            "the registry response was not JSON",
            Some(reason.to_string()),
        ),
        RegistryError::Decode { .. } => (
            "decode-failed",
            "the registry response could not be decoded",
            None,
        ),
    };

    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            message: message.to_string(),
            code: code.to_string(),
            detail,
        }),
    )
        .into_response()
}

fn snippet(body: &str) -> String {
    if body.len() <= DETAIL_LIMIT {
        return body.to_string();
    }
    let mut end = DETAIL_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_passes_short_bodies_through() {
        assert_eq!(snippet("short"), "short");
    }

    #[test]
    fn test_snippet_truncates_on_char_boundary() {
        let body = "é".repeat(DETAIL_LIMIT);
        let truncated = snippet(&body);
        assert!(truncated.len() <= DETAIL_LIMIT + 3);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_error_body_omits_empty_detail() {
        let body = ErrorBody {
            message: "m".to_string(),
            code: "c".to_string(),
            detail: None,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"message":"m","code":"c"}"#
        );
    }

    #[test]
    fn test_error_response_keeps_status_and_body_snippet() {
        let err = RegistryError::UnexpectedStatus {
            status: 404,
            body: "repository not found".to_string(),
        };
        let response = error_response(&err);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
