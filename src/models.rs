//! Data models and DTOs
//!
//! Event and envelope types for the movie listing contract.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One movie row: column name to JSON value, in column order.
/// The shape follows the movies table schema and is not fixed here.
pub type MovieRow = Map<String, Value>;

/// Incoming event for the movie listing handler.
///
/// Mirrors a gateway proxy event: pagination arrives under `pathParameters`
/// when the route carries path segments, and the field is absent otherwise.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviesEvent {
    #[serde(default)]
    pub path_parameters: Option<PageWindow>,
}

impl MoviesEvent {
    /// Event with an explicit page window
    pub fn with_page(limit: Value, offset: Value) -> Self {
        Self {
            path_parameters: Some(PageWindow { limit, offset }),
        }
    }
}

/// A limit/offset pair, carried verbatim. Gateways deliver path parameters
/// as strings; in-process callers may pass integers. Both must decode to the
/// same scalar type within one event.
#[derive(Debug, Clone, Deserialize)]
pub struct PageWindow {
    pub limit: Value,
    pub offset: Value,
}

/// The fixed response wrapper: an HTTP-ish status code plus a JSON body
/// string. Returned for every outcome; only the code and body text vary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status_code: u16,
    pub body: String,
}

impl Envelope {
    /// Success envelope around an already-serialized JSON body
    pub fn ok(body: String) -> Self {
        Self {
            status_code: 200,
            body,
        }
    }

    /// Failure envelope; the body is the message as a JSON string literal
    pub fn fault(message: &str) -> Self {
        Self {
            status_code: 500,
            body: Value::String(message.to_string()).to_string(),
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, [(header::CONTENT_TYPE, "application/json")], self.body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_envelope_field_names() {
        let envelope = Envelope::ok("[]".to_string());
        let encoded = serde_json::to_value(&envelope).unwrap();

        assert_eq!(encoded, json!({"statusCode": 200, "body": "[]"}));
    }

    #[test]
    fn test_fault_body_is_json_string() {
        let envelope = Envelope::fault(r#"bad "input""#);

        assert_eq!(envelope.status_code, 500);
        let decoded: String = serde_json::from_str(&envelope.body).unwrap();
        assert_eq!(decoded, r#"bad "input""#);
    }

    #[test]
    fn test_event_without_path_parameters() {
        let event: MoviesEvent = serde_json::from_value(json!({})).unwrap();
        assert!(event.path_parameters.is_none());
    }

    #[test]
    fn test_event_with_path_parameters() {
        let event: MoviesEvent = serde_json::from_value(json!({
            "pathParameters": {"limit": 2, "offset": 0}
        }))
        .unwrap();

        let window = event.path_parameters.unwrap();
        assert_eq!(window.limit, json!(2));
        assert_eq!(window.offset, json!(0));
    }

    #[test]
    fn test_event_with_string_path_parameters() {
        let event: MoviesEvent = serde_json::from_value(json!({
            "pathParameters": {"limit": "25", "offset": "50"}
        }))
        .unwrap();

        let window = event.path_parameters.unwrap();
        assert_eq!(window.limit, json!("25"));
        assert_eq!(window.offset, json!("50"));
    }

    #[test]
    fn test_event_with_null_path_parameters() {
        let event: MoviesEvent =
            serde_json::from_value(json!({"pathParameters": null})).unwrap();
        assert!(event.path_parameters.is_none());
    }

    #[test]
    fn test_envelope_into_response_status() {
        let ok = Envelope::ok("[]".to_string()).into_response();
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(
            ok.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let fault = Envelope::fault("boom").into_response();
        assert_eq!(fault.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
