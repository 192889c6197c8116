use axum::body::Body;
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Response};
use uuid::Uuid;

use crate::models::error::UnhandledError;
use crate::models::feedback_models::ErrorView;
use crate::views::home::render_error;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request identifier shown on the error page and attached to the request span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(pub String);

impl CorrelationId {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get("traceparent")
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| is_valid_traceparent(value))
            .map(|value| CorrelationId(value.to_ascii_lowercase()))
            .unwrap_or_else(|| CorrelationId(Uuid::new_v4().simple().to_string()))
    }
}

pub async fn correlation(mut req: Request<Body>, next: Next) -> Response {
    let correlation_id = CorrelationId::from_headers(req.headers());
    req.extensions_mut().insert(correlation_id.clone());

    let mut response = next.run(req).await;

    if response.extensions().get::<UnhandledError>().is_some() {
        // replace the bare 500 with the error page
        let view = ErrorView {
            request_id: correlation_id.0.clone(),
        };
        response = (StatusCode::INTERNAL_SERVER_ERROR, Html(render_error(&view))).into_response();
    }

    if let Ok(value) = HeaderValue::from_str(&correlation_id.0) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// W3C trace context: `version-traceid-parentid-flags`.
fn is_valid_traceparent(value: &str) -> bool {
    let parts: Vec<&str> = value.split('-').collect();
    if parts.len() != 4 {
        return false;
    }
    let hex_of_len = |part: &str, len: usize| {
        part.len() == len && part.chars().all(|c| c.is_ascii_hexdigit())
    };
    let all_zero = |part: &str| part.chars().all(|c| c == '0');

    hex_of_len(parts[0], 2)
        && !parts[0].eq_ignore_ascii_case("ff")
        && hex_of_len(parts[1], 32)
        && !all_zero(parts[1])
        && hex_of_len(parts[2], 16)
        && !all_zero(parts[2])
        && hex_of_len(parts[3], 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACEPARENT: &str = "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01";

    #[test]
    fn uses_valid_traceparent() {
        let mut headers = HeaderMap::new();
        headers.insert("traceparent", HeaderValue::from_static(TRACEPARENT));
        assert_eq!(CorrelationId::from_headers(&headers).0, TRACEPARENT);
    }

    #[test]
    fn falls_back_to_generated_id() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "traceparent",
            HeaderValue::from_static("00-00000000000000000000000000000000-00f067aa0ba902b7-01"),
        );
        let first = CorrelationId::from_headers(&headers);
        let second = CorrelationId::from_headers(&HeaderMap::new());
        assert_eq!(first.0.len(), 32);
        assert!(Uuid::parse_str(&first.0).is_ok());
        assert_ne!(first, second);
    }

    #[test]
    fn rejects_malformed_traceparents() {
        assert!(!is_valid_traceparent("ff-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"));
        assert!(!is_valid_traceparent("00-4bf92f3577b34da6a3ce929d0e0e4736-0000000000000000-01"));
        assert!(!is_valid_traceparent("00-xyz-00f067aa0ba902b7-01"));
        assert!(!is_valid_traceparent("not a trace"));
    }
}
