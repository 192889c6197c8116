use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::services::feedback_store::StoreError;
use crate::services::queue_storage::QueueError;

/// Marker left on a response whose body should be replaced by the error page.
#[derive(Debug, Clone, Copy)]
pub struct UnhandledError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("failed to serialize queue message: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    pub fn stage(&self) -> &'static str {
        match self {
            AppError::Store(_) => "store",
            AppError::Queue(_) => "queue",
            AppError::Serialization(_) => "serialize",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(stage = self.stage(), "feedback submission failed: {}", self);
        metrics::counter!("feedback_submission_failures_total", "stage" => self.stage())
            .increment(1);

        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(UnhandledError);
        response
    }
}
