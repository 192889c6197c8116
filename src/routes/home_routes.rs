use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::controllers::home::{error, index, submit_feedback};
use crate::models::app_state::AppState;

pub fn home_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index).post(submit_feedback))
        .route("/home", get(index).post(submit_feedback))
        .route("/home/index", get(index).post(submit_feedback))
        .route("/home/error", get(error))
}
