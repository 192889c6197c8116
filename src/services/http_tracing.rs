use axum::body::Body;
use axum::http::Request;
use tower_http::trace::{HttpMakeClassifier, TraceLayer};
use tracing::{Span, info_span};

use crate::middlewares::correlation::CorrelationId;

/// One `http_request` span per request, tagged with the id the error page shows.
pub fn http_trace_layer() -> TraceLayer<HttpMakeClassifier, fn(&Request<Body>) -> Span> {
    TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .extensions()
            .get::<CorrelationId>()
            .map(|id| id.0.as_str())
            .unwrap_or("");

        info_span!(
            "http_request",
            request_id = %request_id,
            method = %request.method(),
            path = %request.uri().path(),
            user_agent = ?request.headers().get("user-agent"),
        )
    })
}
