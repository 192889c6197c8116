use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Serves the Prometheus scrape endpoint on its own port, separate from the form.
pub fn init_metrics(port: u16) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()?;
    metrics::describe_counter!(
        "feedback_submissions_total",
        "feedback submissions stored and queued"
    );
    metrics::describe_counter!(
        "feedback_submission_failures_total",
        "feedback submissions that failed, by stage"
    );
    metrics::describe_counter!("feedback_form_views_total", "feedback form renders");
    Ok(())
}
