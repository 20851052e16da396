//! Classification of transport replies into fetch outcomes.
//!
//! The shell performs the actual GET and describes what happened as a
//! [`TransportReply`]; [`classify_reply`] decides whether that yields a
//! product collection or a [`TransportDefect`].

use serde_json::Value;

use crate::defect::{TransportDefect, TransportDefectKind};
use crate::product::RawProduct;

/// The only status code accepted as a successful fetch.
pub const EXPECTED_STATUS: u16 = 200;

/// What the transport observed for a single request.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportReply {
    /// A response arrived with this status and body.
    Response { status: u16, body: String },
    /// The transport surfaced an HTTP status as an error.
    ErrorResponse { status: u16, reason: String },
    /// The request went out but nothing came back (timeout, refused, DNS).
    NoResponse { detail: String },
    /// The request could not be built or dispatched.
    RequestFailed { message: String },
}

/// Result of one fetch attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success { products: Vec<RawProduct> },
    Failure { defect: TransportDefect },
}

impl FetchOutcome {
    fn failure(kind: TransportDefectKind, description: impl Into<String>) -> Self {
        FetchOutcome::Failure {
            defect: TransportDefect::critical(kind, description),
        }
    }
}

/// Classifies a transport reply.
pub fn classify_reply(reply: TransportReply) -> FetchOutcome {
    match reply {
        TransportReply::Response { status, body } if status == EXPECTED_STATUS => {
            match parse_products(&body) {
                Ok(products) => FetchOutcome::Success { products },
                Err(problem) => FetchOutcome::failure(TransportDefectKind::InvalidPayload, problem),
            }
        }
        TransportReply::Response { status, .. } => FetchOutcome::failure(
            TransportDefectKind::ResponseCode,
            format!("Expected {EXPECTED_STATUS}, got {status}"),
        ),
        TransportReply::ErrorResponse { status, reason } => FetchOutcome::failure(
            TransportDefectKind::HttpError,
            format!("{status} - {reason}"),
        ),
        TransportReply::NoResponse { .. } => FetchOutcome::failure(
            TransportDefectKind::NetworkError,
            "No response received from server",
        ),
        TransportReply::RequestFailed { message } => {
            FetchOutcome::failure(TransportDefectKind::RequestError, message)
        }
    }
}

/// Parses a response body into product records.
///
/// The body must be a JSON array; its elements are kept as-is.
pub fn parse_products(body: &str) -> Result<Vec<RawProduct>, String> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(items)) => Ok(items.into_iter().map(RawProduct::new).collect()),
        Ok(other) => Err(format!(
            "Expected a JSON array of products, got {}",
            crate::product::type_name(&other)
        )),
        Err(e) => Err(format!("Response body is not valid JSON: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defect::Severity;

    fn defect_of(outcome: FetchOutcome) -> TransportDefect {
        match outcome {
            FetchOutcome::Failure { defect } => defect,
            FetchOutcome::Success { .. } => panic!("expected a failure outcome"),
        }
    }

    #[test]
    fn test_classify_success() {
        let outcome = classify_reply(TransportReply::Response {
            status: 200,
            body: r#"[{"id": 1, "title": "Shirt"}, {"id": 2}]"#.to_string(),
        });

        match outcome {
            FetchOutcome::Success { products } => {
                assert_eq!(products.len(), 2);
                assert!(products[0].has_field("title"));
                assert!(!products[1].has_field("title"));
            }
            FetchOutcome::Failure { .. } => panic!("expected success"),
        }
    }

    #[test]
    fn test_classify_empty_array_is_success() {
        let outcome = classify_reply(TransportReply::Response {
            status: 200,
            body: "[]".to_string(),
        });

        assert_eq!(outcome, FetchOutcome::Success { products: vec![] });
    }

    #[test]
    fn test_classify_non_200_status() {
        let defect = defect_of(classify_reply(TransportReply::Response {
            status: 503,
            body: "Service Unavailable".to_string(),
        }));

        assert_eq!(defect.kind, TransportDefectKind::ResponseCode);
        assert_eq!(defect.description, "Expected 200, got 503");
        assert_eq!(defect.severity, Severity::Critical);
    }

    #[test]
    fn test_classify_other_2xx_is_response_code() {
        let defect = defect_of(classify_reply(TransportReply::Response {
            status: 204,
            body: String::new(),
        }));

        assert_eq!(defect.kind, TransportDefectKind::ResponseCode);
        assert_eq!(defect.description, "Expected 200, got 204");
    }

    #[test]
    fn test_classify_error_response() {
        let defect = defect_of(classify_reply(TransportReply::ErrorResponse {
            status: 404,
            reason: "Not Found".to_string(),
        }));

        assert_eq!(defect.kind, TransportDefectKind::HttpError);
        assert_eq!(defect.description, "404 - Not Found");
    }

    #[test]
    fn test_classify_no_response() {
        let defect = defect_of(classify_reply(TransportReply::NoResponse {
            detail: "operation timed out".to_string(),
        }));

        assert_eq!(defect.kind, TransportDefectKind::NetworkError);
        assert_eq!(defect.description, "No response received from server");
    }

    #[test]
    fn test_classify_request_failed() {
        let defect = defect_of(classify_reply(TransportReply::RequestFailed {
            message: "relative URL without a base".to_string(),
        }));

        assert_eq!(defect.kind, TransportDefectKind::RequestError);
        assert_eq!(defect.description, "relative URL without a base");
    }

    #[test]
    fn test_classify_object_body_is_invalid_payload() {
        let defect = defect_of(classify_reply(TransportReply::Response {
            status: 200,
            body: r#"{"products": []}"#.to_string(),
        }));

        assert_eq!(defect.kind, TransportDefectKind::InvalidPayload);
        assert_eq!(
            defect.description,
            "Expected a JSON array of products, got object"
        );
    }

    #[test]
    fn test_classify_malformed_body_is_invalid_payload() {
        let defect = defect_of(classify_reply(TransportReply::Response {
            status: 200,
            body: "<html>".to_string(),
        }));

        assert_eq!(defect.kind, TransportDefectKind::InvalidPayload);
        assert!(defect
            .description
            .starts_with("Response body is not valid JSON"));
    }
}
