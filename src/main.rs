use std::sync::Arc;

use anyhow::Context;
use axum::{Router, middleware};
use dotenv::dotenv;

use crate::middlewares::correlation::correlation;
use crate::models::app_state::{AppState, SpeechSettings};
use crate::models::config::AppConfig;
use crate::observability::metrics::init_metrics;
use crate::routes::home_routes::home_routes;
use crate::services::feedback_queue::FeedbackQueue;
use crate::services::feedback_store::MongoFeedbackStore;
use crate::services::http_tracing::http_trace_layer;
use crate::services::queue_storage::AzureQueueBackend;
use crate::services::tracing::init_tracing;

mod controllers;
mod middlewares;
mod models;
mod observability;
mod routes;
mod services;
mod views;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let _guard = init_tracing();

    let config = AppConfig::from_env().context("loading configuration")?;
    tracing::info!(?config, "configuration loaded");

    init_metrics(config.metrics_port).context("installing prometheus exporter")?;

    let state = build_state(&config).await?;
    let app = routes(state);

    let address = if config.is_prod {
        format!("0.0.0.0:{}", config.port)
    } else {
        format!("[::]:{}", config.port)
    };
    tracing::info!("creating TCP listener on {}", address);
    let tcp_listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;

    tracing::info!("customer feedback form listening on {}", address);
    axum::serve(tcp_listener, app).await?;
    Ok(())
}

async fn build_state(config: &AppConfig) -> anyhow::Result<Arc<AppState>> {
    let feedback_store = MongoFeedbackStore::connect(&config.mongo_url)
        .await
        .context("configuring mongodb client")?;
    let queue_backend = AzureQueueBackend::new(
        config.storage_account_name.clone(),
        config.storage_account_key.clone(),
        config.queue_endpoint.clone(),
    );

    Ok(Arc::new(AppState {
        feedback_store: Arc::new(feedback_store),
        feedback_queue: FeedbackQueue::new(Arc::new(queue_backend)),
        speech: SpeechSettings {
            key: config.speech_key.clone(),
            region: config.speech_region.clone(),
        },
    }))
}

/// Correlation runs outermost so the trace span and the error page see the same id.
fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(home_routes())
        .layer(http_trace_layer())
        .layer(middleware::from_fn(correlation))
        .with_state(state)
}
