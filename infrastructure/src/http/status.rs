//! Mapping of HTTP failures onto GatewayError

use checkin_application::ports::checkin_gateway::GatewayError;
use reqwest::StatusCode;

/// Classify a non-success response
pub(crate) fn error_for_status(status: StatusCode, body: &str) -> GatewayError {
    let message = detail_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unknown status")
            .to_string()
    });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::Auth(message),
        StatusCode::NOT_FOUND => GatewayError::NotFound(message),
        s if s.is_client_error() => GatewayError::Validation(message),
        s => GatewayError::Server {
            status: s.as_u16(),
            message,
        },
    }
}

/// Classify a failure raised by the client itself
pub(crate) fn transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_decode() {
        GatewayError::MalformedResponse(err.to_string())
    } else if err.is_timeout() {
        GatewayError::Transport(format!("Request timed out: {}", err))
    } else {
        GatewayError::Transport(err.to_string())
    }
}

/// Extract the `detail` of an error body
///
/// `detail` may be a string or a list of validation errors; anything other
/// than a string is rendered as compact JSON.
fn detail_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses() {
        let err = error_for_status(StatusCode::FORBIDDEN, r#"{"detail": "Access denied"}"#);
        assert_eq!(err, GatewayError::Auth("Access denied".to_string()));

        let err = error_for_status(StatusCode::UNAUTHORIZED, "");
        assert_eq!(err, GatewayError::Auth("Unauthorized".to_string()));
    }

    #[test]
    fn test_not_found() {
        let err = error_for_status(StatusCode::NOT_FOUND, r#"{"detail": "Child not found"}"#);
        assert_eq!(err, GatewayError::NotFound("Child not found".to_string()));
    }

    #[test]
    fn test_validation_statuses() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::CONFLICT,
            StatusCode::UNPROCESSABLE_ENTITY,
        ] {
            assert!(matches!(
                error_for_status(status, "{}"),
                GatewayError::Validation(_)
            ));
        }
    }

    #[test]
    fn test_structured_detail_is_kept() {
        let body = r#"{"detail": [{"loc": ["body", "answers"], "msg": "field required"}]}"#;
        match error_for_status(StatusCode::UNPROCESSABLE_ENTITY, body) {
            GatewayError::Validation(message) => assert!(message.contains("field required")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_server_error_keeps_status() {
        let err = error_for_status(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(
            err,
            GatewayError::Server {
                status: 502,
                message: "Bad Gateway".to_string()
            }
        );
    }
}
