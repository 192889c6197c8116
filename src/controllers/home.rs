use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::{Extension, Form};

use crate::middlewares::correlation::CorrelationId;
use crate::models::app_state::AppState;
use crate::models::error::AppError;
use crate::models::feedback_models::{ErrorView, FeedbackForm, FeedbackSubmission};
use crate::views::home::{render_error, render_index};

pub async fn index(State(app_state): State<Arc<AppState>>) -> Html<String> {
    metrics::counter!("feedback_form_views_total").increment(1);
    Html(render_index(&app_state.speech))
}

pub async fn submit_feedback(
    State(app_state): State<Arc<AppState>>,
    Form(form): Form<FeedbackForm>,
) -> Result<Redirect, AppError> {
    let submission = FeedbackSubmission::new(form);
    tracing::info!(feedback_id = %submission.feedback_id, "received feedback submission");

    app_state.feedback_store.insert(&submission).await?;

    let queue = &app_state.feedback_queue;
    let message = submission.to_queue_message()?;
    queue.send(&message).await?;
    tracing::info!(
        feedback_id = %submission.feedback_id,
        "feedback queued on {}",
        queue.name()
    );

    metrics::counter!("feedback_submissions_total").increment(1);
    Ok(Redirect::to("/"))
}

pub async fn error(Extension(correlation_id): Extension<CorrelationId>) -> Html<String> {
    Html(render_error(&ErrorView {
        request_id: correlation_id.0,
    }))
}
