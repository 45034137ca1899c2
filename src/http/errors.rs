//! Translation of cluster error responses.

use crate::error::Error;
use serde::Deserialize;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Error codes after which the same call may succeed.
const TRANSIENT_ERROR_CODES: &[&str] = &[
    "FABRIC_E_TIMEOUT",
    "FABRIC_E_SERVICE_TOO_BUSY",
    "FABRIC_E_NOT_READY",
    "FABRIC_E_NOT_PRIMARY",
    "FABRIC_E_NO_WRITE_QUORUM",
    "FABRIC_E_RECONFIGURATION_PENDING",
    "FABRIC_E_GATEWAY_NOT_REACHABLE",
    "FABRIC_E_COMMUNICATION_ERROR",
    "E_ABORT",
];

const TRANSIENT_STATUSES: &[u16] = &[429, 502, 503, 504];

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(rename = "Error")]
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "Code", default)]
    code: String,
    #[serde(rename = "Message", default)]
    message: String,
}

/// Truncate and strip control characters before a body goes into a log or
/// an error message.
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

pub(crate) fn is_transient(status: u16, code: &str) -> bool {
    TRANSIENT_STATUSES.contains(&status) || TRANSIENT_ERROR_CODES.contains(&code)
}

/// Map a non-success response to an [`Error`].
pub(crate) fn error_from_response(status: u16, body: &[u8]) -> Error {
    let text = String::from_utf8_lossy(body);
    let parsed = serde_json::from_slice::<ErrorEnvelope>(body).ok();

    if status == 401 || status == 403 {
        let message = parsed
            .map(|e| e.error.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("cluster returned HTTP {}", status));
        return Error::InvalidCredentials(message);
    }

    let (code, message) = match parsed {
        Some(envelope) => (envelope.error.code, envelope.error.message),
        None => (format!("HTTP_{}", status), sanitize_for_log(&text)),
    };

    tracing::error!("API error: {} [{}] - {}", status, code, sanitize_for_log(&message));

    Error::Remote {
        status,
        transient: is_transient(status, &code),
        code,
        message,
    }
}

/// Short, user-facing description of an error.
pub fn describe_error(error: &Error) -> String {
    match error {
        Error::InvalidCredentials(_) => {
            "Authentication failed. Check the certificate or token used for the cluster."
                .to_string()
        }
        Error::Remote { status: 404, code, .. } => format!("Resource not found ({}).", code),
        Error::Remote { status: 409, code, .. } => {
            format!("Resource conflict ({}). It may already exist or be in use.", code)
        }
        Error::Remote { transient: true, code, .. } => {
            format!("Cluster temporarily unavailable ({}). Please try again.", code)
        }
        Error::Remote { code, message, .. } => {
            let message: String = message
                .chars()
                .filter(|c| !c.is_control())
                .take(120)
                .collect();
            format!("{}: {}", code, message)
        }
        Error::Transport(_) => {
            "Could not reach the cluster. Check the endpoint and network.".to_string()
        }
        Error::Cancelled => "Operation cancelled.".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fabric_error_body() {
        let body = br#"{"Error":{"Code":"FABRIC_E_APPLICATION_NOT_FOUND","Message":"Not found"}}"#;
        let err = error_from_response(404, body);
        match err {
            Error::Remote {
                status,
                code,
                message,
                transient,
            } => {
                assert_eq!(status, 404);
                assert_eq!(code, "FABRIC_E_APPLICATION_NOT_FOUND");
                assert_eq!(message, "Not found");
                assert!(!transient);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_transient_by_code_and_status() {
        let body = br#"{"Error":{"Code":"FABRIC_E_TIMEOUT","Message":"Operation timed out"}}"#;
        assert!(error_from_response(500, body).is_transient());
        assert!(error_from_response(503, b"").is_transient());
        assert!(!error_from_response(400, b"bad").is_transient());
    }

    #[test]
    fn test_unparseable_body_keeps_status() {
        let err = error_from_response(502, b"<html>Bad Gateway</html>");
        assert_eq!(err.error_code(), Some("HTTP_502"));
    }

    #[test]
    fn test_auth_statuses_map_to_invalid_credentials() {
        assert!(matches!(error_from_response(401, b""), Error::InvalidCredentials(_)));
        assert!(matches!(error_from_response(403, b"{}"), Error::InvalidCredentials(_)));
    }

    #[test]
    fn test_sanitize_truncates_and_strips() {
        let long = "x".repeat(500);
        let sanitized = sanitize_for_log(&long);
        assert!(sanitized.contains("truncated, 500 bytes total"));
        assert_eq!(sanitize_for_log("a\nb\tc"), "abc");
    }

    #[test]
    fn test_describe_error() {
        let err = Error::Remote {
            status: 404,
            code: "FABRIC_E_APPLICATION_NOT_FOUND".to_string(),
            message: "gone".to_string(),
            transient: false,
        };
        assert!(describe_error(&err).starts_with("Resource not found"));
        assert_eq!(describe_error(&Error::Cancelled), "Operation cancelled.");
    }
}
